//! Error types for the lattice pricers.
//!
//! Every failure is local to a single pricing call and recoverable by the
//! caller. The `ensure!` and `ensure_post!` macros give the early-return
//! shorthand used for argument and result validation.

use crate::{Probability, Real, Size};
use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid configuration: zero steps, non-positive multipliers,
    /// inconsistent lattice depths and similar argument errors.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The continuous-time calibration implies a risk-neutral probability
    /// outside `(0, 1)`, i.e. the growth factor is not bracketed by the
    /// down and up multipliers.
    #[error(
        "arbitrage in calibration: q = {probability} (need d = {down} < a = {growth} < u = {up})"
    )]
    Calibration {
        /// The offending probability.
        probability: Probability,
        /// One-period growth factor `exp((r − c)·Δt)`.
        growth: Real,
        /// Up multiplier.
        up: Real,
        /// Down multiplier.
        down: Real,
    },

    /// A node produced a value outside its numerical domain.
    #[error("numerical domain error at node ({step}, {state}): {message}")]
    NumericalDomain {
        /// Time step of the offending node.
        step: Size,
        /// State index of the offending node.
        state: Size,
        /// What went wrong.
        message: String,
    },

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),
}

impl Error {
    /// Build a [`Error::NumericalDomain`] for node `(step, state)`.
    pub fn domain(step: Size, state: Size, message: impl Into<String>) -> Self {
        Error::NumericalDomain {
            step,
            state,
            message: message.into(),
        }
    }
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidConfiguration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use lt_core::{ensure, errors::Error};
/// fn positive(x: f64) -> lt_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidConfiguration(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidConfiguration(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use lt_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> lt_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(f64::INFINITY).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_the_node() {
        let err = Error::domain(3, 1, "hazard rate 1.5 outside [0, 1]");
        assert_eq!(
            err.to_string(),
            "numerical domain error at node (3, 1): hazard rate 1.5 outside [0, 1]"
        );
    }

    #[test]
    fn calibration_error_message() {
        let err = Error::Calibration {
            probability: 1.2,
            growth: 1.3,
            up: 1.1,
            down: 0.9,
        };
        let msg = err.to_string();
        assert!(msg.contains("q = 1.2"), "{msg}");
        assert!(msg.contains("u = 1.1"), "{msg}");
    }

    #[test]
    fn ensure_returns_invalid_configuration() {
        fn steps(n: usize) -> Result<usize> {
            ensure!(n > 0, "need at least one step");
            Ok(n)
        }
        assert_eq!(steps(3), Ok(3));
        assert_eq!(
            steps(0),
            Err(Error::InvalidConfiguration("need at least one step".into()))
        );
    }
}
