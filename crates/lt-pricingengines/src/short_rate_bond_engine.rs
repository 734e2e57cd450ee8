//! Default-free bonds, and options on them, on the short-rate lattice.
//!
//! Every short-rate claim moves up or down with probability one half and is
//! discounted one step at the simple rate of its node, `1 / (1 + r(i, j))`.

use std::sync::Arc;

use lt_core::{errors::Result, Price, Real, Size};
use lt_instruments::{CouponBond, PricingEngine, PricingResults, VanillaOption, ZeroCouponBond};
use lt_methods::{backward_induction, Lattice, SHORT_RATE_PROBABILITY};
use tracing::debug;

use crate::valuation::{ensure_covers, rollback_option, simple_discount, LatticeValuation};

/// Bond engine on a shared short-rate lattice.
#[derive(Debug, Clone)]
pub struct ShortRateBondEngine {
    rates: Arc<Lattice>,
}

impl ShortRateBondEngine {
    /// Create an engine over the given short-rate lattice.
    pub fn new(rates: Arc<Lattice>) -> Self {
        Self { rates }
    }

    /// The short-rate lattice.
    pub fn rates(&self) -> &Lattice {
        &self.rates
    }

    /// Zero-coupon bond valuation lattice of depth `bond.maturity`.
    pub fn zero_coupon(&self, bond: &ZeroCouponBond) -> Result<LatticeValuation> {
        bond.validate()?;
        self.rollback_bond(bond.maturity, bond.face, 0.0)
    }

    /// Coupon bond valuation lattice of depth `bond.maturity`.
    ///
    /// The coupon `face · c` is paid at every node, the root included, and
    /// the face with the last coupon at maturity.
    pub fn coupon_bond(&self, bond: &CouponBond) -> Result<LatticeValuation> {
        bond.validate()?;
        self.rollback_bond(bond.maturity, bond.face, bond.coupon())
    }

    fn rollback_bond(&self, maturity: Size, face: Price, coupon: Real) -> Result<LatticeValuation> {
        ensure_covers(&self.rates, maturity, "bond maturity")?;
        let rates = &*self.rates;
        let q = SHORT_RATE_PROBABILITY;
        let values = backward_induction(
            maturity,
            |_| Ok(face + coupon),
            |i, j, up, down| Ok(coupon + (q * up + (1.0 - q) * down) * simple_discount(rates, i, j)?),
        )?;
        debug!(maturity, face, coupon, npv = values.root(), "valued bond");
        Ok(LatticeValuation::european(values))
    }

    /// Value an option on a claim already valued on this short-rate lattice.
    ///
    /// The expiry must fall within both the claim's lattice and the rate
    /// lattice.
    pub fn option_on(&self, underlying: &Lattice, option: &VanillaOption) -> Result<LatticeValuation> {
        let expiry = option.expiry_within(underlying.depth())?;
        ensure_covers(&self.rates, expiry, "option expiry")?;
        let rates = &*self.rates;
        let valuation = rollback_option(underlying, option, SHORT_RATE_PROBABILITY, |i, j| {
            simple_discount(rates, i, j)
        })?;
        debug!(
            option = %option.payoff,
            exercise = %option.exercise,
            expiry,
            npv = valuation.npv(),
            "valued option on short-rate claim"
        );
        Ok(valuation)
    }
}

impl PricingEngine<ZeroCouponBond> for ShortRateBondEngine {
    fn calculate(&self, bond: &ZeroCouponBond) -> Result<PricingResults> {
        Ok(PricingResults::from_npv(self.zero_coupon(bond)?.npv()))
    }
}

impl PricingEngine<CouponBond> for ShortRateBondEngine {
    fn calculate(&self, bond: &CouponBond) -> Result<PricingResults> {
        let npv = self.coupon_bond(bond)?.npv();
        // Price after the coupon paid today.
        Ok(PricingResults::from_npv(npv).with_result("ex_coupon_npv", npv - bond.coupon()))
    }
}
