//! Validation errors for ratio and settings construction
//!
//! These cover malformed input rejected before a solve ever runs. The
//! solver itself never returns them; its two outcome signals live in
//! [`crate::outcome`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while constructing or validating domain values
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A percentage fell outside [0, 100]
    #[error("percentage {value} is outside the allowed range [0, 100]")]
    PercentOutOfRange { value: Decimal },

    /// PG and VG shares of a ratio must add up to 100
    #[error("ratio components {pg}/{vg} must sum to 100")]
    RatioSumMismatch { pg: Decimal, vg: Decimal },

    /// Target volume must be strictly positive
    #[error("target volume must be positive, got {value} mL")]
    NonPositiveVolume { value: Decimal },

    /// A strength or concentration field went negative
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },

    /// A ratio string could not be parsed
    #[error("invalid ratio '{input}': expected PG/VG, e.g. 70/30")]
    InvalidRatioFormat { input: String },
}
