//! Error types for transient evaluation.

use thiserror::Error;

use crate::damping::DampingRegime;

/// Errors raised while validating inputs to the analyzer or evaluator.
///
/// Every variant is detected before any sample is computed, so a failed call
/// never yields a partial series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Circuit values for which ω₀ is undefined (L ≤ 0, C ≤ 0) or that are
    /// otherwise unphysical (R < 0, non-finite values).
    #[error("Invalid circuit parameters: {0}")]
    InvalidParameters(String),

    /// Sampling grid cannot be built (time step ≤ 0, negative duration, or more
    /// than [`MAX_SAMPLES`](crate::params::MAX_SAMPLES) samples).
    #[error("Degenerate sampling: time_step = {time_step}, total_duration = {total_duration}")]
    DegenerateSampling { time_step: f64, total_duration: f64 },

    /// Regime passed to the evaluator disagrees with the supplied damping ratio.
    #[error("Regime {regime} does not match damping ratio zeta = {zeta}")]
    RegimeMismatch { regime: DampingRegime, zeta: f64 },
}

/// Result type for transient evaluation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::InvalidParameters("inductance must be positive, got 0".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid circuit parameters: inductance must be positive, got 0"
        );

        let e = Error::DegenerateSampling {
            time_step: 0.0,
            total_duration: 10.0,
        };
        assert!(e.to_string().contains("time_step = 0"));

        let e = Error::RegimeMismatch {
            regime: DampingRegime::Overdamped,
            zeta: 0.5,
        };
        assert!(e.to_string().contains("overdamped"));
    }
}
