//! Defaultable zero-coupon bond on the short-rate lattice.
//!
//! Over the step leaving node `(i, j)` the issuer defaults with probability
//! `h(i, j)`, in which case the holder recovers `R · F`:
//!
//! ```text
//! V(i, j) = [(1 − h) (½ V(i+1, j) + ½ V(i+1, j+1)) + h R F] / (1 + r(i, j))
//! ```

use std::sync::Arc;

use lt_core::{errors::Result, Error};
use lt_instruments::{DefaultableZeroCouponBond, PricingEngine, PricingResults, ZeroCouponBond};
use lt_methods::{backward_induction, Lattice, SHORT_RATE_PROBABILITY};
use tracing::debug;

use crate::short_rate_bond_engine::ShortRateBondEngine;
use crate::valuation::{ensure_covers, simple_discount, LatticeValuation};

/// Credit-risky bond engine on a shared short-rate lattice.
#[derive(Debug, Clone)]
pub struct DefaultableBondEngine {
    rates: Arc<Lattice>,
}

impl DefaultableBondEngine {
    /// Create an engine over the given short-rate lattice.
    pub fn new(rates: Arc<Lattice>) -> Self {
        Self { rates }
    }

    /// Valuation lattice of depth `bond.maturity`.
    ///
    /// # Errors
    /// Fails if the maturity exceeds the rate lattice or a hazard rate falls
    /// outside `[0, 1]`.
    pub fn value(&self, bond: &DefaultableZeroCouponBond) -> Result<LatticeValuation> {
        bond.validate()?;
        ensure_covers(&self.rates, bond.maturity, "bond maturity")?;
        let rates = &*self.rates;
        let recovered = bond.recovery_value();
        let q = SHORT_RATE_PROBABILITY;

        let values = backward_induction(
            bond.maturity,
            |_| Ok(bond.face),
            |i, j, up, down| {
                let h = bond.hazard.hazard_rate(i, j);
                if !(0.0..=1.0).contains(&h) {
                    return Err(Error::domain(i, j, format!("hazard rate {h} outside [0, 1]")));
                }
                let survival = (1.0 - h) * (q * up + (1.0 - q) * down);
                Ok((survival + h * recovered) * simple_discount(rates, i, j)?)
            },
        )?;
        debug!(
            maturity = bond.maturity,
            recovery = bond.recovery,
            npv = values.root(),
            "valued defaultable bond"
        );
        Ok(LatticeValuation::european(values))
    }
}

impl PricingEngine<DefaultableZeroCouponBond> for DefaultableBondEngine {
    fn calculate(&self, bond: &DefaultableZeroCouponBond) -> Result<PricingResults> {
        let npv = self.value(bond)?.npv();
        let riskless = ShortRateBondEngine::new(Arc::clone(&self.rates))
            .zero_coupon(&ZeroCouponBond::new(bond.face, bond.maturity))?
            .npv();
        Ok(PricingResults::from_npv(npv).with_result("default_free_npv", riskless))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lt_instruments::{ExponentialHazard, FlatHazard};
    use lt_methods::ShortRateParameters;

    fn engine() -> DefaultableBondEngine {
        let rates = ShortRateParameters::new(1.1, 0.9, 0.05).lattice(10).unwrap();
        DefaultableBondEngine::new(Arc::new(rates))
    }

    #[test]
    fn exponential_hazard_regression() {
        let bond = DefaultableZeroCouponBond::new(100.0, 10, 0.2, Arc::new(ExponentialHazard::default()));
        let v = engine().value(&bond).unwrap();
        assert_relative_eq!(v.npv(), 57.21032193389396, max_relative = 1e-12);
    }

    #[test]
    fn zero_hazard_is_default_free() {
        let bond = DefaultableZeroCouponBond::new(100.0, 10, 0.2, Arc::new(FlatHazard(0.0)));
        let r = engine().calculate(&bond).unwrap();
        assert_relative_eq!(r.npv, 61.621958117541546, max_relative = 1e-12);
        assert_relative_eq!(r.result("default_free_npv").unwrap(), r.npv, max_relative = 1e-12);
    }

    #[test]
    fn certain_default_pays_recovery() {
        let bond = DefaultableZeroCouponBond::new(100.0, 1, 0.2, Arc::new(FlatHazard(1.0)));
        let v = engine().value(&bond).unwrap();
        assert_relative_eq!(v.npv(), 20.0 / 1.05, max_relative = 1e-14);
    }

    #[test]
    fn hazard_outside_unit_interval_is_rejected() {
        let bond = DefaultableZeroCouponBond::new(100.0, 4, 0.2, Arc::new(FlatHazard(1.5)));
        assert!(matches!(
            engine().value(&bond),
            Err(Error::NumericalDomain { step: 3, state: 0, .. })
        ));
    }

    #[test]
    fn maturity_is_independent_of_lattice_depth() {
        let e = engine();
        let short = DefaultableZeroCouponBond::new(100.0, 4, 0.2, Arc::new(ExponentialHazard::default()));
        let v = e.value(&short).unwrap();
        assert_eq!(v.values().depth(), 4);

        let long = DefaultableZeroCouponBond { maturity: 11, ..short };
        assert!(matches!(e.value(&long), Err(Error::InvalidConfiguration(_))));
    }
}
