//! The façade exposes the whole pricing stack under one crate.

use approx::assert_relative_eq;
use latticeprice::core::Error;
use latticeprice::instruments::{OptionType, PricingEngine, VanillaOption, ZeroCouponBond};
use latticeprice::methods::{build_price_lattice, BinomialCalibration, ShortRateParameters};
use latticeprice::pricingengines::{BinomialVanillaEngine, ShortRateBondEngine};
use std::sync::Arc;

#[test]
fn test_price_lattice_through_facade() {
    let s = build_price_lattice(1.1, 0.9, 2, 100.0).unwrap();
    assert_relative_eq!(s.value(2, 1), 99.0, max_relative = 1e-14);
    assert!(matches!(build_price_lattice(1.1, 0.9, 0, 100.0), Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_engines_through_facade() {
    let calibration = BinomialCalibration::new(0.5, 0.20, 10, 0.02, 0.01).unwrap();
    let call = BinomialVanillaEngine::new(calibration, 100.0)
        .calculate(&VanillaOption::european(OptionType::Call, 100.0))
        .unwrap();
    assert_relative_eq!(call.npv, 5.708713614454678, max_relative = 1e-12);

    let rates = ShortRateParameters::new(1.1, 0.9, 0.05).lattice(10).unwrap();
    let zcb = ShortRateBondEngine::new(Arc::new(rates))
        .calculate(&ZeroCouponBond::new(100.0, 10))
        .unwrap();
    assert_relative_eq!(zcb.npv, 61.621958117541546, max_relative = 1e-12);
}
