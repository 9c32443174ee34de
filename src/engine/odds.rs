//! Odds conversion between American quotes, decimal odds and implied probability.
//!
//! American odds quote a favorite as a negative number (stake `|odds|` to win
//! 100) and an underdog as a positive number (stake 100 to win `odds`).
//! Decimal odds are the total return per unit staked, stake included:
//!
//!   favorite:  d = 100 / |a| + 1
//!   underdog:  d = a / 100 + 1
//!
//! Implied probability is the raw single-sided `1 / d`; no vig is removed.
//!
//! `-100` and `+100` are the same price (decimal 2.0). `to_american(2.0)`
//! always answers `+100`, so a round trip of `-100` comes back as `+100`.

use serde::Serialize;
use std::fmt;

use super::error::{finite_input, EngineError, Result};

/// A validated American odds quote: finite, nonzero, and large enough in
/// magnitude that its decimal odds are finite and above 1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AmericanOdds(f64);

impl AmericanOdds {
    pub fn new(value: f64) -> Result<Self> {
        let value = finite_input("american odds", value)?;
        if value == 0.0 {
            return Err(EngineError::ZeroOdds);
        }
        let odds = AmericanOdds(value);
        let decimal = to_decimal(odds);
        let probability = to_implied_probability(odds);
        // Sub-unit or huge magnitudes round to decimal 1.0 (or overflow) in f64.
        if !decimal.is_finite() || decimal <= 1.0 || probability <= 0.0 || probability >= 1.0 {
            return Err(EngineError::DegenerateOdds { value });
        }
        Ok(odds)
    }

    /// Quotes known to be valid at compile time (sweep tables, tests).
    pub(crate) fn from_int(value: i32) -> Self {
        AmericanOdds(value as f64)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_decimal(self) -> f64 {
        to_decimal(self)
    }

    pub fn implied_probability(self) -> f64 {
        to_implied_probability(self)
    }
}

impl TryFrom<f64> for AmericanOdds {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self> {
        AmericanOdds::new(value)
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self> {
        AmericanOdds::new(value as f64)
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0.0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Total return per unit staked, stake included.
pub fn to_decimal(american: AmericanOdds) -> f64 {
    let a = american.0;
    if a < 0.0 {
        100.0 / a.abs() + 1.0
    } else {
        a / 100.0 + 1.0
    }
}

/// Market-implied probability of the quoted outcome, vig included.
pub fn to_implied_probability(american: AmericanOdds) -> f64 {
    let a = american.0;
    if a < 0.0 {
        a.abs() / (a.abs() + 100.0)
    } else {
        100.0 / (a + 100.0)
    }
}

/// Inverse of [`to_decimal`], rounded to the nearest whole American price.
pub fn to_american(decimal: f64) -> Result<AmericanOdds> {
    let decimal = finite_input("decimal odds", decimal)?;
    if decimal <= 1.0 {
        return Err(EngineError::InvalidDecimalOdds { value: decimal });
    }
    let american = if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round()
    } else {
        (-100.0 / (decimal - 1.0)).round()
    };
    // Decimals a hair above 1.0 give favorite prices too large to round-trip; `new` rejects them.
    AmericanOdds::new(american)
}

/// Normalise two complementary prices so their probabilities sum to 1.
pub fn no_vig_probabilities(a: AmericanOdds, b: AmericanOdds) -> (f64, f64) {
    let pa = to_implied_probability(a);
    let pb = to_implied_probability(b);
    let total = pa + pb;
    (pa / total, pb / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::try_from(v).unwrap()
    }

    #[test]
    fn test_zero_odds_rejected() {
        assert_eq!(AmericanOdds::new(0.0), Err(EngineError::ZeroOdds));
        assert_eq!(AmericanOdds::try_from(0_i32), Err(EngineError::ZeroOdds));
    }

    #[test]
    fn test_non_finite_odds_rejected() {
        assert!(matches!(
            AmericanOdds::new(f64::NAN),
            Err(EngineError::NonFiniteInput { .. })
        ));
        assert!(matches!(
            AmericanOdds::new(f64::INFINITY),
            Err(EngineError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn test_degenerate_magnitudes_rejected() {
        // Decimal would overflow to infinity.
        assert_eq!(
            AmericanOdds::new(-1e-310),
            Err(EngineError::DegenerateOdds { value: -1e-310 })
        );
        // Decimal and implied probability both collapse to exactly 1.
        assert_eq!(
            AmericanOdds::new(1e-300),
            Err(EngineError::DegenerateOdds { value: 1e-300 })
        );
        assert!(AmericanOdds::new(-1e20).is_err());
        assert!(AmericanOdds::try_from(-1e-310).is_err());
    }

    #[test]
    fn test_accepted_odds_stay_in_bounds() {
        for v in [-1e9, -0.5, 0.5, 1e9, f64::MAX] {
            let o = AmericanOdds::new(v).unwrap();
            let d = o.to_decimal();
            let p = o.implied_probability();
            assert!(d.is_finite() && d > 1.0, "odds {} gave decimal {}", v, d);
            assert!(p > 0.0 && p < 1.0, "odds {} gave probability {}", v, p);
        }
    }

    #[test]
    fn test_decimal_favorite() {
        assert_relative_eq!(to_decimal(odds(-110)), 1.909_090_909, epsilon = 1e-9);
        assert_relative_eq!(to_decimal(odds(-200)), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_decimal_underdog() {
        assert_relative_eq!(to_decimal(odds(150)), 2.5, epsilon = 1e-12);
        assert_relative_eq!(to_decimal(odds(100)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_implied_probability_values() {
        assert_relative_eq!(to_implied_probability(odds(-110)), 110.0 / 210.0, epsilon = 1e-12);
        assert_relative_eq!(to_implied_probability(odds(150)), 0.4, epsilon = 1e-12);
        assert_relative_eq!(to_implied_probability(odds(-100)), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_implied_probability_matches_inverse_decimal() {
        for v in [-1000, -250, -110, 105, 300, 10000] {
            let o = odds(v);
            assert_relative_eq!(o.implied_probability(), 1.0 / o.to_decimal(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_implied_probability_bounds() {
        for v in (-10_000..=10_000).filter(|v| *v != 0) {
            let p = to_implied_probability(odds(v));
            assert!(p > 0.0 && p < 1.0, "odds {} gave probability {}", v, p);
        }
    }

    #[test]
    fn test_round_trip_within_one() {
        for magnitude in 100..=10_000 {
            for v in [magnitude, -magnitude] {
                let back = to_american(to_decimal(odds(v))).unwrap().value();
                if v == -100 {
                    // Even money: both signs share decimal 2.0.
                    assert_eq!(back, 100.0);
                } else {
                    assert!(
                        (back - v as f64).abs() <= 1.0,
                        "round trip of {} gave {}",
                        v,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_to_american_branches() {
        assert_eq!(to_american(2.5).unwrap().value(), 150.0);
        assert_eq!(to_american(1.5).unwrap().value(), -200.0);
        assert_eq!(to_american(2.0).unwrap().value(), 100.0);
    }

    #[test]
    fn test_to_american_rejects_degenerate_decimal() {
        assert_eq!(
            to_american(1.0),
            Err(EngineError::InvalidDecimalOdds { value: 1.0 })
        );
        assert!(to_american(0.5).is_err());
        assert!(to_american(f64::NAN).is_err());
    }

    #[test]
    fn test_no_vig_sums_to_one() {
        let (a, b) = no_vig_probabilities(odds(-110), odds(-110));
        assert_relative_eq!(a, 0.5, epsilon = 1e-12);
        assert_relative_eq!(a + b, 1.0, epsilon = 1e-12);

        let (fav, dog) = no_vig_probabilities(odds(-150), odds(130));
        assert!(fav > dog);
        assert_relative_eq!(fav + dog, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display_sign() {
        assert_eq!(odds(150).to_string(), "+150");
        assert_eq!(odds(-110).to_string(), "-110");
    }
}
