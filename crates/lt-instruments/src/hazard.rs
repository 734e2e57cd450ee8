//! One-step hazard-rate schedules for defaultable claims.
//!
//! A schedule gives the conditional probability `h(i, j)` that the issuer
//! defaults during the step leaving node `(i, j)`.

use lt_core::{Probability, Real, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-node one-step hazard rates.
pub trait HazardRateSchedule: std::fmt::Debug + Send + Sync {
    /// Default probability over the step leaving node `(step, state)`.
    fn hazard_rate(&self, step: Size, state: Size) -> Probability;
}

/// Two-parameter schedule `h(i, j) = a · b^(j − i/2)`.
///
/// With `b > 1` the hazard rises with the number of down-moves: states
/// below the centre of the lattice are more likely to default.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExponentialHazard {
    /// Hazard rate at the centre of the lattice.
    pub a: Real,
    /// Growth per down-move away from the centre.
    pub b: Real,
}

impl ExponentialHazard {
    /// Create a schedule.
    pub fn new(a: Real, b: Real) -> Self {
        Self { a, b }
    }
}

impl Default for ExponentialHazard {
    fn default() -> Self {
        Self { a: 0.01, b: 1.01 }
    }
}

impl HazardRateSchedule for ExponentialHazard {
    fn hazard_rate(&self, step: Size, state: Size) -> Probability {
        self.a * self.b.powf(state as Real - step as Real / 2.0)
    }
}

/// The same hazard rate at every node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatHazard(pub Probability);

impl HazardRateSchedule for FlatHazard {
    fn hazard_rate(&self, _step: Size, _state: Size) -> Probability {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exponential_hazard_centre_and_tails() {
        let h = ExponentialHazard::default();
        assert_relative_eq!(h.hazard_rate(0, 0), 0.01);
        assert_relative_eq!(h.hazard_rate(4, 2), 0.01);
        assert_relative_eq!(h.hazard_rate(4, 4), 0.01 * 1.01_f64.powi(2), max_relative = 1e-14);
        assert_relative_eq!(h.hazard_rate(3, 0), 0.01 * 1.01_f64.powf(-1.5), max_relative = 1e-14);
    }

    #[test]
    fn flat_hazard_ignores_node() {
        let h = FlatHazard(0.02);
        assert_eq!(h.hazard_rate(0, 0), 0.02);
        assert_eq!(h.hazard_rate(9, 7), 0.02);
    }
}
