//! Forward and futures prices of a coupon bond.
//!
//! The bond is valued on a short-rate lattice running to its maturity; the
//! contract only needs the top `delivery` steps. At delivery the bond is
//! handed over ex-coupon, immediately after that step's coupon.
//!
//! * forward: discount the ex-coupon values to the root and divide by the
//!   price of a unit zero-coupon bond maturing at delivery;
//! * futures: roll the ex-coupon values back with the risk-neutral
//!   expectation alone, without discounting.

use std::sync::Arc;

use lt_core::{ensure_post, errors::Result, Price};
use lt_instruments::{BondForward, PricingEngine, PricingResults, ZeroCouponBond};
use lt_methods::{backward_induction, Lattice, ShortRateParameters, SHORT_RATE_PROBABILITY};
use tracing::debug;

use crate::short_rate_bond_engine::ShortRateBondEngine;
use crate::valuation::{simple_discount, LatticeValuation};

/// Engine for forwards and futures on a coupon bond.
#[derive(Debug, Clone, Copy)]
pub struct BondForwardEngine {
    params: ShortRateParameters,
}

/// The delivery-horizon bond engine and the ex-coupon bond values at delivery.
struct Delivery {
    engine: ShortRateBondEngine,
    ex_coupon: Vec<Price>,
}

impl Delivery {
    fn discounted(&self) -> Result<Lattice> {
        let rates = self.engine.rates();
        let q = SHORT_RATE_PROBABILITY;
        backward_induction(
            rates.depth(),
            |j| Ok(self.ex_coupon[j]),
            |i, j, up, down| Ok((q * up + (1.0 - q) * down) * simple_discount(rates, i, j)?),
        )
    }
}

impl BondForwardEngine {
    /// Create an engine for the given short-rate process.
    pub fn new(params: ShortRateParameters) -> Self {
        Self { params }
    }

    fn delivery(&self, contract: &BondForward) -> Result<Delivery> {
        contract.validate()?;
        let bond = &contract.bond;
        let to_maturity = self.params.lattice(bond.maturity)?;
        let to_delivery = to_maturity.sub_lattice(contract.delivery)?;

        let full = ShortRateBondEngine::new(Arc::new(to_maturity)).coupon_bond(bond)?;
        let coupon = bond.coupon();
        let ex_coupon = full
            .values()
            .layer(contract.delivery)
            .iter()
            .map(|v| v - coupon)
            .collect();
        Ok(Delivery {
            engine: ShortRateBondEngine::new(Arc::new(to_delivery)),
            ex_coupon,
        })
    }

    /// Discounted ex-coupon value lattice of depth `delivery`.
    ///
    /// Its root is the value today of receiving the bond at delivery.
    pub fn forward_valuation(&self, contract: &BondForward) -> Result<LatticeValuation> {
        let delivery = self.delivery(contract)?;
        Ok(LatticeValuation::european(delivery.discounted()?))
    }

    /// Forward price of the bond for delivery at `contract.delivery`.
    pub fn forward_price(&self, contract: &BondForward) -> Result<Price> {
        Ok(self.forward_components(contract)?.0)
    }

    /// Returns `(forward price, discounted ex-coupon value, unit ZCB price)`.
    fn forward_components(&self, contract: &BondForward) -> Result<(Price, Price, Price)> {
        let delivery = self.delivery(contract)?;
        let pv = delivery.discounted()?.root();
        let zcb = delivery
            .engine
            .zero_coupon(&ZeroCouponBond::new(1.0, contract.delivery))?
            .npv();
        let price = pv / zcb;
        ensure_post!(
            price.is_finite(),
            "forward price {price} from zero-coupon price {zcb}"
        );
        debug!(delivery = contract.delivery, pv, zcb, price, "valued bond forward");
        Ok((price, pv, zcb))
    }

    /// Undiscounted futures-price lattice of depth `delivery`.
    pub fn futures_valuation(&self, contract: &BondForward) -> Result<LatticeValuation> {
        let Delivery { ex_coupon, .. } = self.delivery(contract)?;
        let q = SHORT_RATE_PROBABILITY;
        let values = backward_induction(
            contract.delivery,
            |j| Ok(ex_coupon[j]),
            |_, _, up, down| Ok(q * up + (1.0 - q) * down),
        )?;
        debug!(delivery = contract.delivery, price = values.root(), "valued bond futures");
        Ok(LatticeValuation::european(values))
    }

    /// Futures price of the bond for delivery at `contract.delivery`.
    pub fn futures_price(&self, contract: &BondForward) -> Result<Price> {
        Ok(self.futures_valuation(contract)?.npv())
    }
}

impl PricingEngine<BondForward> for BondForwardEngine {
    fn calculate(&self, contract: &BondForward) -> Result<PricingResults> {
        let (forward, pv, zcb) = self.forward_components(contract)?;
        Ok(PricingResults::from_npv(forward)
            .with_result("futures_price", self.futures_price(contract)?)
            .with_result("ex_coupon_pv", pv)
            .with_result("zcb", zcb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lt_instruments::CouponBond;

    fn engine() -> BondForwardEngine {
        BondForwardEngine::new(ShortRateParameters::new(1.1, 0.9, 0.05))
    }

    #[test]
    fn zero_coupon_bond_forward_and_futures() {
        let contract = BondForward::new(CouponBond::new(100.0, 0.0, 10), 4);
        let e = engine();
        assert_relative_eq!(e.forward_price(&contract).unwrap(), 74.88484493844841, max_relative = 1e-12);
        assert_relative_eq!(e.futures_price(&contract).unwrap(), 74.82458063139569, max_relative = 1e-12);
    }

    #[test]
    fn coupon_bond_forward_and_futures() {
        let contract = BondForward::new(CouponBond::new(100.0, 0.05, 10), 4);
        let e = engine();
        assert_relative_eq!(e.forward_price(&contract).unwrap(), 100.3014194003664, max_relative = 1e-12);
        assert_relative_eq!(e.futures_price(&contract).unwrap(), 100.22963641701138, max_relative = 1e-12);
    }

    #[test]
    fn delivery_at_maturity_returns_face() {
        let contract = BondForward::new(CouponBond::new(100.0, 0.05, 6), 6);
        let e = engine();
        assert_relative_eq!(e.forward_price(&contract).unwrap(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(e.futures_price(&contract).unwrap(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn results_expose_components() {
        let contract = BondForward::new(CouponBond::new(100.0, 0.0, 10), 4);
        let r = engine().calculate(&contract).unwrap();
        let zcb = r.result("zcb").unwrap();
        assert!(zcb > 0.0 && zcb < 1.0);
        assert_relative_eq!(r.npv * zcb, r.result("ex_coupon_pv").unwrap(), max_relative = 1e-12);
        assert_relative_eq!(r.result("futures_price").unwrap(), 74.82458063139569, max_relative = 1e-12);
    }

    #[test]
    fn delivery_after_maturity_is_rejected() {
        let contract = BondForward::new(CouponBond::new(100.0, 0.0, 4), 5);
        assert!(engine().forward_price(&contract).is_err());
        assert!(engine().futures_price(&contract).is_err());
    }
}
