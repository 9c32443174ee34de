use thiserror::Error;

use crate::engine::{AmericanOdds, EngineError};

/// Lowest American price accepted from user input.
pub const MIN_ODDS: f64 = -1000.0;
/// Highest American price accepted from user input.
pub const MAX_ODDS: f64 = 10_000.0;
pub const MAX_BANKROLL: f64 = 1_000_000.0;
/// Upper bound on prices in one hedge sweep request.
pub const MAX_SCENARIO_ODDS: usize = 64;

/// Input rejected before it reaches the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a valid number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between -1000 and 10000, got {value}")]
    OddsOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a whole number, got {value}")]
    FractionalOdds { field: &'static str, value: f64 },

    #[error("{field} cannot be zero")]
    ZeroOdds { field: &'static str },

    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },

    #[error("{field} exceeds maximum allowed ($1,000,000)")]
    AmountTooLarge { field: &'static str },

    #[error("probability must be strictly between 0 and 1, got {value}")]
    ProbabilityOutOfRange { value: f64 },

    #[error("at most {max} scenario prices are allowed, got {count}")]
    TooManyScenarios { count: usize, max: usize },
}

/// Check a user-entered American price and lift it into the engine type.
pub fn validate_odds(field: &'static str, odds: f64) -> Result<AmericanOdds, ValidationError> {
    if !odds.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if !(MIN_ODDS..=MAX_ODDS).contains(&odds) {
        return Err(ValidationError::OddsOutOfRange { field, value: odds });
    }
    if odds.fract() != 0.0 {
        return Err(ValidationError::FractionalOdds { field, value: odds });
    }
    AmericanOdds::try_from(odds).map_err(|e| match e {
        EngineError::ZeroOdds => ValidationError::ZeroOdds { field },
        _ => ValidationError::OddsOutOfRange { field, value: odds },
    })
}

/// Bankrolls and stakes share the same bounds: `[0, 1_000_000]`.
pub fn validate_amount(field: &'static str, amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount { field });
    }
    if amount > MAX_BANKROLL {
        return Err(ValidationError::AmountTooLarge { field });
    }
    Ok(amount)
}

pub fn validate_bankroll(bankroll: f64) -> Result<f64, ValidationError> {
    validate_amount("bankroll", bankroll)
}

pub fn validate_probability(probability: f64) -> Result<f64, ValidationError> {
    if !probability.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "probability",
        });
    }
    if probability <= 0.0 || probability >= 1.0 {
        return Err(ValidationError::ProbabilityOutOfRange { value: probability });
    }
    Ok(probability)
}

pub fn validate_scenario_odds(odds: &[f64]) -> Result<Vec<AmericanOdds>, ValidationError> {
    if odds.len() > MAX_SCENARIO_ODDS {
        return Err(ValidationError::TooManyScenarios {
            count: odds.len(),
            max: MAX_SCENARIO_ODDS,
        });
    }
    odds.iter()
        .map(|&o| validate_odds("scenario odds", o))
        .collect()
}
