use thiserror::Error;

/// Domain errors raised by the pricing engine.
///
/// Every engine operation either returns a fully-formed value or one of these,
/// naming the offending input. Non-finite numbers are never passed through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// American odds of zero are not a market quote.
    #[error("american odds cannot be zero")]
    ZeroOdds,

    #[error("{name} must be a finite number, got {value}")]
    NonFiniteInput { name: &'static str, value: f64 },

    /// Magnitudes so small or so large that the decimal price is not above 1.0
    /// or the implied probability touches 0 or 1.
    #[error("american odds {value} do not describe a usable price")]
    DegenerateOdds { value: f64 },

    /// Win probabilities must lie strictly inside (0, 1).
    #[error("probability must be strictly between 0 and 1, got {value}")]
    ProbabilityOutOfRange { value: f64 },

    /// Decimal odds must exceed 1.0 to map back onto an American price.
    #[error("decimal odds must be greater than 1.0, got {value}")]
    InvalidDecimalOdds { value: f64 },

    #[error("{name} cannot be negative, got {value}")]
    NegativeAmount { name: &'static str, value: f64 },

    #[error("{name} evaluated to a non-finite value")]
    NonFiniteResult { name: &'static str },
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject NaN / infinite inputs before they reach any arithmetic.
pub(crate) fn finite_input(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteInput { name, value })
    }
}

/// Reject negative or non-finite monetary amounts.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    let value = finite_input(name, value)?;
    if value < 0.0 {
        return Err(EngineError::NegativeAmount { name, value });
    }
    Ok(value)
}

/// Guard on computed outputs.
pub(crate) fn finite_result(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteResult { name })
    }
}
