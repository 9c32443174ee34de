//! Full analysis of one or two prices for the same outcome.
//!
//! Both prices are evaluated at one win probability and the higher-EV side is
//! sized with Kelly. On exactly equal EV the counter (second-named) price is
//! chosen. With two prices an arbitrage report is attached as well.

use serde::Serialize;
use tracing::debug;

use super::arbitrage::{
    default_counter_sweep, detect_arbitrage, hedge_scenarios, split_stake, ArbitrageResult,
    HedgeScenario, StakeSplit,
};
use super::error::Result;
use super::ev::{ev_dollars, ev_percentage};
use super::kelly::{kelly_fraction, size_stakes, KellySizing};
use super::odds::{no_vig_probabilities, to_implied_probability, AmericanOdds};

/// Which of the two quoted prices an analysis recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Sharp,
    Counter,
}

/// Everything needed for one full analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    /// Caller's own win probability. Defaults to the sharp price's implied probability.
    pub probability: Option<f64>,
    pub sharp_odds: AmericanOdds,
    pub counter_odds: Option<AmericanOdds>,
    pub bankroll: f64,
    /// Stake locked on the recommended side for the hedge sweep and stake split.
    pub locked_stake: f64,
    /// Counter prices to sweep; the default sweep when `None`.
    pub scenario_odds: Option<Vec<AmericanOdds>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageReport {
    pub result: ArbitrageResult,
    pub stake_split: StakeSplit,
    pub hedge_scenarios: Vec<HedgeScenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub side: Side,
    pub odds: AmericanOdds,
    pub probability: f64,
    pub implied_probability: f64,
    /// Vig-free probability of the chosen side; only known with two prices.
    pub fair_probability: Option<f64>,
    pub ev: f64,
    /// Dollar EV of the full-Kelly stake.
    pub expected_profit: f64,
    pub kelly: KellySizing,
    pub arbitrage: Option<ArbitrageReport>,
}

impl Analysis {
    pub fn has_edge(&self) -> bool {
        self.ev > 0.0
    }
}

/// Evaluate both prices, size the better one and report how they relate.
///
/// On exactly equal EV the counter (second-named) price is recommended.
pub fn complete_analysis(input: &AnalysisInput) -> Result<Analysis> {
    let probability = input
        .probability
        .unwrap_or_else(|| to_implied_probability(input.sharp_odds));

    let sharp_ev = ev_percentage(probability, input.sharp_odds)?;
    let (side, odds, ev) = match input.counter_odds {
        Some(counter) => {
            let counter_ev = ev_percentage(probability, counter)?;
            if sharp_ev > counter_ev {
                (Side::Sharp, input.sharp_odds, sharp_ev)
            } else {
                (Side::Counter, counter, counter_ev)
            }
        }
        None => (Side::Sharp, input.sharp_odds, sharp_ev),
    };

    let fraction = kelly_fraction(ev, odds)?;
    let kelly = size_stakes(input.bankroll, fraction)?;
    let expected_profit = ev_dollars(kelly.full_stake, ev)?;

    let (fair_probability, arbitrage) = match input.counter_odds {
        Some(counter) => {
            let (fair_sharp, fair_counter) = no_vig_probabilities(input.sharp_odds, counter);
            let fair = match side {
                Side::Sharp => fair_sharp,
                Side::Counter => fair_counter,
            };
            let report = arbitrage_report(input, counter, odds)?;
            (Some(fair), Some(report))
        }
        None => (None, None),
    };

    debug!(
        "analysis: side={:?} odds={} p={:.4} ev={:.4} kelly={:.4}",
        side, odds, probability, ev, fraction
    );

    Ok(Analysis {
        side,
        odds,
        probability,
        implied_probability: to_implied_probability(odds),
        fair_probability,
        ev,
        expected_profit,
        kelly,
        arbitrage,
    })
}

fn arbitrage_report(
    input: &AnalysisInput,
    counter: AmericanOdds,
    locked_odds: AmericanOdds,
) -> Result<ArbitrageReport> {
    let result = detect_arbitrage(input.sharp_odds, counter);
    let stake_split = split_stake(input.sharp_odds, counter, input.locked_stake)?;
    let default_sweep;
    let sweep: &[AmericanOdds] = match &input.scenario_odds {
        Some(odds) => odds,
        None => {
            default_sweep = default_counter_sweep();
            &default_sweep
        }
    };
    let hedge_scenarios = hedge_scenarios(locked_odds, input.locked_stake, sweep)?.collect();
    Ok(ArbitrageReport {
        result,
        stake_split,
        hedge_scenarios,
    })
}
