use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use tracing::info;

use sharps_edge::config::{Cli, Command, Config};
use sharps_edge::dashboard::{self, models::*, AppState};
use sharps_edge::engine::{default_counter_sweep, hedge_scenarios};
use sharps_edge::validation::{validate_amount, validate_odds, validate_scenario_odds};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.config.validate()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.config).await,
        Command::Analyze {
            sharp_odds,
            counter_odds,
            probability,
            bankroll,
            locked_stake,
        } => {
            let req = CalculateRequest {
                sharp_odds,
                counter_odds,
                bankroll,
                probability,
                locked_stake,
                scenario_odds: None,
            };
            let input = req.into_input(cli.config.default_bankroll, cli.config.default_locked_stake)?;
            let analysis = sharps_edge::engine::complete_analysis(&input)?;
            print_json(&AnalysisResponse::from(&analysis))
        }
        Command::Convert { odds } => {
            let odds = validate_odds("odds", odds)?;
            print_json(&ConvertResponse::from(odds))
        }
        Command::Hedge {
            locked_odds,
            locked_stake,
            counter_odds,
        } => {
            let locked_odds = validate_odds("locked odds", locked_odds)?;
            let locked_stake = validate_amount("locked stake", locked_stake)?;
            let counter = if counter_odds.is_empty() {
                default_counter_sweep()
            } else {
                validate_scenario_odds(&counter_odds)?
            };
            let scenarios: Vec<HedgeScenarioResponse> =
                hedge_scenarios(locked_odds, locked_stake, &counter)?
                    .map(|s| HedgeScenarioResponse::from(&s))
                    .collect();
            print_json(&scenarios)
        }
    }
}

async fn serve(config: &Config) -> Result<()> {
    let app = dashboard::router(AppState::from(config));
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!(
        "Calculator API listening on http://{} (default bankroll ${:.2})",
        addr, config.default_bankroll
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run API server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
