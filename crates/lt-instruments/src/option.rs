//! Vanilla options on a lattice-valued underlying.
//!
//! The same terms describe an option on an asset, on a futures contract or
//! on any claim already valued on the short-rate lattice (e.g. a
//! zero-coupon bond). The expiry is a lattice step; when absent the option
//! expires at the last step of the underlying's lattice.

use crate::exercise::ExerciseType;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use lt_core::{ensure, errors::Result, Real, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A plain vanilla option with European or American exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VanillaOption {
    /// The payoff.
    pub payoff: PlainVanillaPayoff,
    /// The exercise style.
    pub exercise: ExerciseType,
    /// Expiry step; `None` means the depth of the underlying lattice.
    pub expiry: Option<Size>,
}

impl VanillaOption {
    /// Create a new vanilla option expiring with the underlying lattice.
    pub fn new(option_type: OptionType, strike: Real, exercise: ExerciseType) -> Self {
        Self {
            payoff: PlainVanillaPayoff::new(option_type, strike),
            exercise,
            expiry: None,
        }
    }

    /// Convenience: a European call/put.
    pub fn european(option_type: OptionType, strike: Real) -> Self {
        Self::new(option_type, strike, ExerciseType::European)
    }

    /// Convenience: an American call/put.
    pub fn american(option_type: OptionType, strike: Real) -> Self {
        Self::new(option_type, strike, ExerciseType::American)
    }

    /// Set an explicit expiry step (the `N2` of an option on futures).
    pub fn with_expiry(mut self, expiry: Size) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike
    }

    /// The option type.
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    /// Resolve the expiry step against an underlying lattice of `depth` steps.
    ///
    /// # Errors
    /// Fails if the expiry is zero, beyond `depth`, or the strike is not finite.
    pub fn expiry_within(&self, depth: Size) -> Result<Size> {
        ensure!(
            self.payoff.strike.is_finite(),
            "strike must be finite, got {}",
            self.payoff.strike
        );
        let expiry = self.expiry.unwrap_or(depth);
        ensure!(expiry > 0, "option expiry must be at least one step");
        ensure!(
            expiry <= depth,
            "option expiry {expiry} exceeds underlying lattice depth {depth}"
        );
        Ok(expiry)
    }
}
