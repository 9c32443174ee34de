//! Pricing & staking engine.
//!
//! Pure, synchronous functions over caller-supplied numbers: odds conversion,
//! expected value, Kelly sizing and arbitrage/hedge analysis. Nothing here
//! holds state, so every call is safe from any thread and cheap enough to run
//! on each keystroke.

pub mod analysis;
pub mod arbitrage;
pub mod error;
pub mod ev;
pub mod kelly;
pub mod odds;

pub use analysis::{complete_analysis, Analysis, AnalysisInput, ArbitrageReport, Side};
pub use arbitrage::{
    default_counter_sweep, detect_arbitrage, hedge_scenarios, split_stake, ArbitrageResult,
    HedgeScenario, StakeSplit, DEFAULT_COUNTER_SWEEP,
};
pub use error::EngineError;
pub use ev::{ev_dollars, ev_percentage};
pub use kelly::{
    kelly_fraction, size_stakes, stake_amount, stake_recommendation, KellySizing, StakeRecommendation,
    StakeScale,
};
pub use odds::{no_vig_probabilities, to_american, to_decimal, to_implied_probability, AmericanOdds};
