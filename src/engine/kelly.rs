//! Kelly Criterion stake sizing from an expected value and a price.
//!
//! The Kelly formula sizes a bet to maximise the expected logarithm of wealth.
//! With `b = d − 1` the net odds per unit staked, the classic
//!   f* = (b·p − q) / b
//! reduces to `EV / b`, since `EV = b·p − q`.
//!
//! Half and quarter Kelly scale the full fraction down to trade growth for
//! lower variance. Bankroll is always passed in; nothing here keeps it.

use serde::Serialize;

use super::error::{finite_input, finite_result, non_negative, Result};
use super::odds::{to_decimal, AmericanOdds};

/// Fractional Kelly multiplier applied to the full fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeScale {
    Full,
    Half,
    Quarter,
}

impl StakeScale {
    pub const ALL: [StakeScale; 3] = [StakeScale::Full, StakeScale::Half, StakeScale::Quarter];

    pub fn factor(self) -> f64 {
        match self {
            StakeScale::Full => 1.0,
            StakeScale::Half => 0.5,
            StakeScale::Quarter => 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StakeRecommendation {
    pub fraction: f64,
    pub scale: StakeScale,
    pub amount: f64,
}

/// Full-Kelly fraction with the stake at every scale for one bankroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KellySizing {
    pub fraction: f64,
    pub full_stake: f64,
    pub half_stake: f64,
    pub quarter_stake: f64,
}

/// Full Kelly fraction of bankroll for a bet with edge `ev` at `american`.
///
/// Returns exactly `0.0` when the edge is non-positive. The result is not
/// capped; a fraction above 1 is possible for very large edges.
pub fn kelly_fraction(ev: f64, american: AmericanOdds) -> Result<f64> {
    let ev = finite_input("expected value", ev)?;
    if ev <= 0.0 {
        return Ok(0.0); // no edge
    }
    // AmericanOdds is nonzero, so d > 1 and b > 0.
    let b = to_decimal(american) - 1.0;
    let f = finite_result("kelly fraction", ev / b)?;
    Ok(f.max(0.0))
}

/// Dollar stake for `bankroll` at `fraction` scaled by `scale`.
pub fn stake_amount(bankroll: f64, fraction: f64, scale: StakeScale) -> Result<f64> {
    let bankroll = non_negative("bankroll", bankroll)?;
    let fraction = non_negative("kelly fraction", fraction)?;
    finite_result("stake amount", bankroll * fraction * scale.factor())
}

pub fn stake_recommendation(
    bankroll: f64,
    fraction: f64,
    scale: StakeScale,
) -> Result<StakeRecommendation> {
    let amount = stake_amount(bankroll, fraction, scale)?;
    Ok(StakeRecommendation {
        fraction,
        scale,
        amount,
    })
}

pub fn size_stakes(bankroll: f64, fraction: f64) -> Result<KellySizing> {
    Ok(KellySizing {
        fraction,
        full_stake: stake_amount(bankroll, fraction, StakeScale::Full)?,
        half_stake: stake_amount(bankroll, fraction, StakeScale::Half)?,
        quarter_stake: stake_amount(bankroll, fraction, StakeScale::Quarter)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;
    use crate::engine::ev::ev_percentage;
    use approx::assert_relative_eq;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::try_from(v).unwrap()
    }

    #[test]
    fn test_kelly_no_edge() {
        assert_eq!(kelly_fraction(0.0, odds(-110)).unwrap(), 0.0);
    }

    #[test]
    fn test_kelly_negative_edge() {
        for ev in [-0.0001, -0.05, -0.9] {
            assert_eq!(kelly_fraction(ev, odds(150)).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_kelly_positive_edge() {
        // 0.05 / 0.9091 = 0.055
        let f = kelly_fraction(0.05, odds(-110)).unwrap();
        assert_relative_eq!(f, 0.055, epsilon = 1e-9);
    }

    #[test]
    fn test_kelly_matches_classic_formula() {
        // p = 0.6 at even money: f* = (1·0.6 − 0.4) / 1 = 0.2
        let ev = ev_percentage(0.6, odds(100)).unwrap();
        assert_relative_eq!(kelly_fraction(ev, odds(100)).unwrap(), 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_kelly_strictly_positive_for_any_edge() {
        for v in [-1000, -300, -110, 100, 250, 10000] {
            for ev in [1e-6, 0.01, 0.3, 2.0] {
                assert!(kelly_fraction(ev, odds(v)).unwrap() > 0.0);
            }
        }
    }

    #[test]
    fn test_kelly_not_capped() {
        // An EV handed in directly is sized as-is, even past the whole bankroll.
        assert_relative_eq!(kelly_fraction(2.0, odds(100)).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kelly_rejects_nan() {
        assert!(kelly_fraction(f64::NAN, odds(-110)).is_err());
    }

    #[test]
    fn test_stake_half_kelly() {
        assert_relative_eq!(
            stake_amount(1000.0, 0.055, StakeScale::Half).unwrap(),
            27.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_stake_scales() {
        let sizing = size_stakes(2000.0, 0.1).unwrap();
        assert_relative_eq!(sizing.full_stake, 200.0, epsilon = 1e-9);
        assert_relative_eq!(sizing.half_stake, 100.0, epsilon = 1e-9);
        assert_relative_eq!(sizing.quarter_stake, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stake_zero_bankroll() {
        let rec = stake_recommendation(0.0, 0.2, StakeScale::Quarter).unwrap();
        assert_eq!(rec.amount, 0.0);
        assert_eq!(rec.scale, StakeScale::Quarter);
    }

    #[test]
    fn test_stake_rejects_negative_inputs() {
        assert_eq!(
            stake_amount(-1.0, 0.1, StakeScale::Full),
            Err(EngineError::NegativeAmount {
                name: "bankroll",
                value: -1.0
            })
        );
        assert!(stake_amount(100.0, -0.1, StakeScale::Full).is_err());
        assert!(stake_amount(f64::INFINITY, 0.1, StakeScale::Full).is_err());
    }

    #[test]
    fn test_scale_factors() {
        let factors: Vec<f64> = StakeScale::ALL.iter().map(|s| s.factor()).collect();
        assert_eq!(factors, vec![1.0, 0.5, 0.25]);
    }
}
