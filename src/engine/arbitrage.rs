//! Two-way arbitrage detection and hedge sizing.
//!
//! Two prices on complementary outcomes form an arbitrage when their implied
//! probabilities sum to less than 1. The guaranteed return on the combined
//! stake is then `1 / sum − 1`.
//!
//! Hedging a locked bet of `S` at decimal `dA` with a counter bet at `dB`
//! equalises payout when `H = S · dA / dB`. Profit is then
//! `S · dA − S − H` whichever side wins.

use serde::Serialize;

use super::error::{finite_result, non_negative, Result};
use super::odds::{to_decimal, to_implied_probability, AmericanOdds};

/// Counter prices swept when the caller supplies none: common vig levels
/// either side of even money.
pub const DEFAULT_COUNTER_SWEEP: [i32; 10] =
    [-150, -140, -130, -120, -110, 110, 120, 130, 140, 150];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArbitrageResult {
    pub exists: bool,
    pub probability_sum: f64,
    /// Guaranteed return on total stake as a fraction; 0 when no arbitrage.
    pub edge: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeScenario {
    pub counter_odds: AmericanOdds,
    pub hedge_stake: f64,
    pub guaranteed_profit: f64,
    /// Profit over total risk, as a fraction.
    pub roi: f64,
}

/// A fixed total stake divided across both sides of an arbitrage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StakeSplit {
    pub stake_a: f64,
    pub stake_b: f64,
    pub guaranteed_profit: f64,
    pub roi: f64,
}

pub fn default_counter_sweep() -> Vec<AmericanOdds> {
    DEFAULT_COUNTER_SWEEP
        .iter()
        .map(|&v| AmericanOdds::from_int(v))
        .collect()
}

pub fn detect_arbitrage(a: AmericanOdds, b: AmericanOdds) -> ArbitrageResult {
    let probability_sum = to_implied_probability(a) + to_implied_probability(b);
    let exists = probability_sum < 1.0;
    let edge = if exists {
        1.0 / probability_sum - 1.0
    } else {
        0.0
    };
    ArbitrageResult {
        exists,
        probability_sum,
        edge,
    }
}

/// Hedge a bet of `locked_stake` at `locked_odds` against each candidate
/// counter price.
///
/// The sequence is lazy and cloneable, so it can be walked again without
/// recomputing anything up front. Inputs are checked once here; every
/// scenario it yields is finite.
pub fn hedge_scenarios<'a>(
    locked_odds: AmericanOdds,
    locked_stake: f64,
    counter_odds: &'a [AmericanOdds],
) -> Result<impl Iterator<Item = HedgeScenario> + Clone + 'a> {
    let locked_stake = non_negative("locked stake", locked_stake)?;
    let locked_payout = finite_result("locked payout", locked_stake * to_decimal(locked_odds))?;
    Ok(counter_odds
        .iter()
        .map(move |&counter| hedge_against(locked_stake, locked_payout, counter)))
}

fn hedge_against(locked_stake: f64, locked_payout: f64, counter_odds: AmericanOdds) -> HedgeScenario {
    // Counter decimal is > 1, so the hedge never exceeds the locked payout.
    let hedge_stake = locked_payout / to_decimal(counter_odds);
    let guaranteed_profit = locked_payout - locked_stake - hedge_stake;
    let total_risk = locked_stake + hedge_stake;
    let roi = if total_risk > 0.0 {
        guaranteed_profit / total_risk
    } else {
        0.0
    };
    HedgeScenario {
        counter_odds,
        hedge_stake,
        guaranteed_profit,
        roi,
    }
}

/// Allocate `total_stake` across both prices in proportion to their implied
/// probabilities so either outcome returns `total_stake / sum`.
///
/// Without an arbitrage there is nothing to lock in and every field is 0.
pub fn split_stake(a: AmericanOdds, b: AmericanOdds, total_stake: f64) -> Result<StakeSplit> {
    let total_stake = non_negative("total stake", total_stake)?;
    let arb = detect_arbitrage(a, b);
    if !arb.exists {
        return Ok(StakeSplit {
            stake_a: 0.0,
            stake_b: 0.0,
            guaranteed_profit: 0.0,
            roi: 0.0,
        });
    }
    let sum = arb.probability_sum;
    let guaranteed_profit = finite_result("guaranteed profit", total_stake / sum - total_stake)?;
    let roi = if total_stake > 0.0 {
        guaranteed_profit / total_stake
    } else {
        0.0
    };
    Ok(StakeSplit {
        stake_a: total_stake * to_implied_probability(a) / sum,
        stake_b: total_stake * to_implied_probability(b) / sum,
        guaranteed_profit,
        roi,
    })
}
