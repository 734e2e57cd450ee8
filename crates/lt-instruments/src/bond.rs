//! Bonds priced on the short-rate lattice.
//!
//! Maturities are lattice steps; coupons are paid once per step.

use crate::hazard::HazardRateSchedule;
use lt_core::{ensure, errors::Result, Price, Rate, Real, Size};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Zero-coupon bond
// ────────────────────────────────────────────────────────────────────────────

/// Default-free zero-coupon bond paying `face` at step `maturity`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZeroCouponBond {
    /// Face value paid at maturity.
    pub face: Price,
    /// Maturity step.
    pub maturity: Size,
}

impl ZeroCouponBond {
    /// Create a zero-coupon bond.
    pub fn new(face: Price, maturity: Size) -> Self {
        Self { face, maturity }
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.maturity > 0, "bond maturity must be at least one step");
        ensure!(self.face.is_finite(), "face value must be finite, got {}", self.face);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Coupon bond
// ────────────────────────────────────────────────────────────────────────────

/// Default-free bond paying `face · coupon_rate` at every step and the face
/// at maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CouponBond {
    /// Face value.
    pub face: Price,
    /// Coupon rate per step.
    pub coupon_rate: Rate,
    /// Maturity step.
    pub maturity: Size,
}

impl CouponBond {
    /// Create a coupon bond.
    pub fn new(face: Price, coupon_rate: Rate, maturity: Size) -> Self {
        Self {
            face,
            coupon_rate,
            maturity,
        }
    }

    /// Coupon amount paid at every step.
    pub fn coupon(&self) -> Real {
        self.face * self.coupon_rate
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.maturity > 0, "bond maturity must be at least one step");
        ensure!(self.face.is_finite(), "face value must be finite, got {}", self.face);
        ensure!(
            self.coupon_rate.is_finite(),
            "coupon rate must be finite, got {}",
            self.coupon_rate
        );
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Defaultable zero-coupon bond
// ────────────────────────────────────────────────────────────────────────────

/// Zero-coupon bond whose issuer may default; recovers `recovery · face`
/// at the step of default.
#[derive(Debug, Clone)]
pub struct DefaultableZeroCouponBond {
    /// Face value paid at maturity absent default.
    pub face: Price,
    /// Maturity step. Independent of the depth of the rate lattice.
    pub maturity: Size,
    /// Recovery rate `R ∈ [0, 1]` as a fraction of face.
    pub recovery: Real,
    /// One-step hazard rates.
    pub hazard: Arc<dyn HazardRateSchedule>,
}

impl DefaultableZeroCouponBond {
    /// Create a defaultable zero-coupon bond.
    pub fn new(
        face: Price,
        maturity: Size,
        recovery: Real,
        hazard: Arc<dyn HazardRateSchedule>,
    ) -> Self {
        Self {
            face,
            maturity,
            recovery,
            hazard,
        }
    }

    /// Amount received if default occurs, `R · F`.
    pub fn recovery_value(&self) -> Real {
        self.recovery * self.face
    }

    /// Validate the terms.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.maturity > 0, "bond maturity must be at least one step");
        ensure!(self.face.is_finite(), "face value must be finite, got {}", self.face);
        ensure!(
            (0.0..=1.0).contains(&self.recovery),
            "recovery rate must lie in [0, 1], got {}",
            self.recovery
        );
        Ok(())
    }
}
