//! Forward and futures contracts on a coupon bond.

use crate::bond::CouponBond;
use lt_core::{ensure, errors::Result, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delivery of a coupon bond at step `delivery`.
///
/// Delivery is assumed to take place immediately after the coupon paid at
/// that step, so the bond changes hands ex-coupon. The same terms price
/// both the forward and the futures contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BondForward {
    /// The bond delivered.
    pub bond: CouponBond,
    /// Delivery step `N ≤ bond.maturity`.
    pub delivery: Size,
}

impl BondForward {
    /// Create a bond forward.
    pub fn new(bond: CouponBond, delivery: Size) -> Self {
        Self { bond, delivery }
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        self.bond.validate()?;
        ensure!(self.delivery > 0, "delivery must be at least one step");
        ensure!(
            self.bond.maturity >= self.delivery,
            "bond maturity {} precedes delivery {}",
            self.bond.maturity,
            self.delivery
        );
        Ok(())
    }
}
