//! Fixed-for-floating swaps and swaptions on the short-rate lattice.
//!
//! The floating leg pays the short rate set at each node one step later
//! (in arrears). A swap of maturity `n` has a valuation lattice of depth
//! `n`: a spot-starting swap exchanges payments set at steps `0..=n`, a
//! forward-starting swap skips the first setting and exchanges those set at
//! steps `1..=n`.

use lt_core::{ensure, errors::Result, Rate, Real, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Swap type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwapType {
    /// Payer (pay fixed, receive floating).
    #[default]
    Payer,
    /// Receiver (receive fixed, pay floating).
    Receiver,
}

impl SwapType {
    /// +1 for Payer, −1 for Receiver.
    pub fn sign(self) -> Real {
        match self {
            SwapType::Payer => 1.0,
            SwapType::Receiver => -1.0,
        }
    }
}

/// Whether the first rate setting is exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwapStart {
    /// Payments set at every step from the root.
    #[default]
    Spot,
    /// No payment set at the root; the first exchange is set at step 1.
    Forward,
}

/// A fixed-for-floating interest-rate swap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Swap {
    /// Payer or receiver.
    pub swap_type: SwapType,
    /// Fixed rate per step.
    pub fixed_rate: Rate,
    /// Last step at which a payment is set.
    pub maturity: Size,
    /// Spot or forward start.
    pub start: SwapStart,
    /// Notional; lattice values are per unit and scaled by this.
    pub notional: Real,
}

impl Swap {
    /// A unit-notional payer swap starting at the root.
    pub fn payer(fixed_rate: Rate, maturity: Size) -> Self {
        Self {
            swap_type: SwapType::Payer,
            fixed_rate,
            maturity,
            start: SwapStart::Spot,
            notional: 1.0,
        }
    }

    /// A unit-notional payer swap whose first payment is set at step 1.
    pub fn forward_starting(fixed_rate: Rate, maturity: Size) -> Self {
        Self {
            start: SwapStart::Forward,
            ..Self::payer(fixed_rate, maturity)
        }
    }

    /// Turn into a receiver swap.
    pub fn receiver(mut self) -> Self {
        self.swap_type = SwapType::Receiver;
        self
    }

    /// Set the notional.
    pub fn with_notional(mut self, notional: Real) -> Self {
        self.notional = notional;
        self
    }

    /// Same swap with a different fixed rate.
    pub fn with_fixed_rate(mut self, fixed_rate: Rate) -> Self {
        self.fixed_rate = fixed_rate;
        self
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.maturity > 0, "swap maturity must be at least one step");
        ensure!(
            self.fixed_rate.is_finite(),
            "fixed rate must be finite, got {}",
            self.fixed_rate
        );
        ensure!(
            self.notional.is_finite(),
            "notional must be finite, got {}",
            self.notional
        );
        Ok(())
    }
}

/// European option, struck at zero, to enter the underlying swap at step
/// `expiry`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Swaption {
    /// The swap entered on exercise.
    pub underlying: Swap,
    /// Exercise step.
    pub expiry: Size,
}

impl Swaption {
    /// Create a swaption.
    pub fn new(underlying: Swap, expiry: Size) -> Self {
        Self { underlying, expiry }
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        self.underlying.validate()?;
        ensure!(self.expiry > 0, "swaption expiry must be at least one step");
        ensure!(
            self.expiry <= self.underlying.maturity,
            "swaption expiry {} exceeds swap maturity {}",
            self.expiry,
            self.underlying.maturity
        );
        Ok(())
    }
}
