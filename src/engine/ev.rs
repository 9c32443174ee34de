//! Expected value of a bet per unit staked.
//!
//!   EV = p · (d − 1) − (1 − p)
//!
//! where `p` is the bettor's own win probability and `d` the decimal odds on
//! offer. The probability is supplied by the caller; nothing here predicts.

use super::error::{finite_input, finite_result, EngineError, Result};
use super::odds::{to_decimal, AmericanOdds};

/// Fractional EV (0.05 == +5%) of backing `american` at `your_probability`.
pub fn ev_percentage(your_probability: f64, american: AmericanOdds) -> Result<f64> {
    let p = finite_input("probability", your_probability)?;
    if p <= 0.0 || p >= 1.0 {
        return Err(EngineError::ProbabilityOutOfRange { value: p });
    }
    let d = to_decimal(american);
    finite_result("expected value", p * (d - 1.0) - (1.0 - p))
}

/// Dollar EV of a stake. No rounding; that is a display concern.
pub fn ev_dollars(bet_amount: f64, ev: f64) -> Result<f64> {
    let bet_amount = finite_input("bet amount", bet_amount)?;
    let ev = finite_input("expected value", ev)?;
    finite_result("expected value in dollars", bet_amount * ev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::odds::to_implied_probability;
    use approx::assert_relative_eq;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::try_from(v).unwrap()
    }

    #[test]
    fn test_ev_standard_favorite() {
        // d = 1.9091, 0.55 · 0.9091 − 0.45 = 0.05
        let ev = ev_percentage(0.55, odds(-110)).unwrap();
        assert_relative_eq!(ev, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_ev_underdog() {
        // 0.45 · 1.5 − 0.55 = 0.125
        let ev = ev_percentage(0.45, odds(150)).unwrap();
        assert_relative_eq!(ev, 0.125, epsilon = 1e-9);
    }

    #[test]
    fn test_ev_fair_price_is_zero() {
        let ev = ev_percentage(0.5, odds(100)).unwrap();
        assert_relative_eq!(ev, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ev_negative() {
        assert!(ev_percentage(0.4, odds(-110)).unwrap() < 0.0);
    }

    #[test]
    fn test_ev_sign_tracks_implied_probability() {
        for v in [-1000, -400, -150, -110, 105, 120, 250, 900, 5000] {
            let o = odds(v);
            let implied = to_implied_probability(o);
            for delta in [0.005, 0.02, 0.1] {
                let above = implied + delta;
                if above < 1.0 {
                    assert!(ev_percentage(above, o).unwrap() > 0.0, "odds {} p {}", v, above);
                }
                let below = implied - delta;
                if below > 0.0 {
                    assert!(ev_percentage(below, o).unwrap() < 0.0, "odds {} p {}", v, below);
                }
            }
        }
    }

    #[test]
    fn test_ev_rejects_probability_bounds() {
        for p in [0.0, 1.0, -0.1, 1.5] {
            assert_eq!(
                ev_percentage(p, odds(-110)),
                Err(EngineError::ProbabilityOutOfRange { value: p })
            );
        }
        assert!(matches!(
            ev_percentage(f64::NAN, odds(-110)),
            Err(EngineError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn test_ev_dollars_scales_linearly() {
        assert_relative_eq!(ev_dollars(200.0, 0.05).unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(ev_dollars(100.0, -0.0476).unwrap(), -4.76, epsilon = 1e-12);
    }

    #[test]
    fn test_ev_dollars_rejects_non_finite() {
        assert!(ev_dollars(f64::INFINITY, 0.05).is_err());
        assert!(ev_dollars(100.0, f64::NAN).is_err());
    }
}
