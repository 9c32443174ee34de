use clap::{Args, Parser, Subcommand};

use crate::validation::MAX_BANKROLL;

/// Sports betting edge calculator: EV, Kelly sizing and arbitrage hedging
#[derive(Parser, Debug, Clone)]
#[command(name = "sharps-edge", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Browser origins allowed to call the API (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Bankroll used when a request does not carry one (USD)
    #[arg(long, env = "DEFAULT_BANKROLL", default_value = "1000.0")]
    pub default_bankroll: f64,

    /// Stake locked on the recommended side for hedge scenarios (USD)
    #[arg(long, env = "DEFAULT_LOCKED_STAKE", default_value = "100.0")]
    pub default_locked_stake: f64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the calculator JSON API (default)
    Serve,

    /// Full analysis of one or two prices
    Analyze {
        /// Sharp-book American odds
        #[arg(long, allow_negative_numbers = true)]
        sharp_odds: f64,

        /// Competing (soft book / prediction market) American odds
        #[arg(long, allow_negative_numbers = true)]
        counter_odds: Option<f64>,

        /// Your own win probability (0–1); defaults to the sharp implied probability
        #[arg(long)]
        probability: Option<f64>,

        /// Bankroll in USD; defaults to --default-bankroll
        #[arg(long)]
        bankroll: Option<f64>,

        /// Stake locked for hedge scenarios; defaults to --default-locked-stake
        #[arg(long)]
        locked_stake: Option<f64>,
    },

    /// Convert an American price to decimal odds and implied probability
    Convert {
        #[arg(long, allow_negative_numbers = true)]
        odds: f64,
    },

    /// Sweep hedge stakes for a locked bet across counter prices
    Hedge {
        #[arg(long, allow_negative_numbers = true)]
        locked_odds: f64,

        #[arg(long)]
        locked_stake: f64,

        /// Counter prices to try (comma separated); defaults to ±110..±150
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        counter_odds: Vec<f64>,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=MAX_BANKROLL).contains(&self.default_bankroll) {
            anyhow::bail!("default_bankroll must be between 0 and {}", MAX_BANKROLL);
        }
        if !(0.0..=MAX_BANKROLL).contains(&self.default_locked_stake) {
            anyhow::bail!("default_locked_stake must be between 0 and {}", MAX_BANKROLL);
        }
        if self.cors_origins.iter().all(|o| o.trim().is_empty()) {
            anyhow::bail!("at least one CORS origin is required");
        }
        Ok(())
    }
}
