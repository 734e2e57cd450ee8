//! Binomial engine for vanilla options on an asset.
//!
//! The asset lattice is `S(i, j) = S0 · u^(i − j) · d^j` with `u = exp(σ√Δt)`,
//! `d = 1/u`, and node values roll back with the continuous-time
//! risk-neutral probability:
//!
//! ```text
//! V(i, j) = e^{−rΔt} · [q V(i+1, j) + (1 − q) V(i+1, j+1)]
//! ```
//!
//! American options take `max(V(i, j), φ(S(i, j) − K))` at every node.

use lt_core::{errors::Result, Price};
use lt_instruments::{PricingEngine, PricingResults, VanillaOption};
use lt_methods::BinomialCalibration;
use tracing::debug;

use crate::valuation::{rollback_option, LatticeValuation};

/// Binomial vanilla option engine.
#[derive(Debug, Clone, Copy)]
pub struct BinomialVanillaEngine {
    calibration: BinomialCalibration,
    spot: Price,
}

impl BinomialVanillaEngine {
    /// Create an engine for an asset trading at `spot`.
    pub fn new(calibration: BinomialCalibration, spot: Price) -> Self {
        Self { calibration, spot }
    }

    /// The calibration in use.
    pub fn calibration(&self) -> &BinomialCalibration {
        &self.calibration
    }

    /// Value the option, keeping the full valuation lattice.
    ///
    /// An explicit expiry `n < N` values the option on the first `n` steps
    /// of the asset lattice.
    pub fn value(&self, option: &VanillaOption) -> Result<LatticeValuation> {
        let q = self.calibration.probability()?;
        let discount = self.calibration.discount();
        let asset = self.calibration.asset_lattice(self.spot)?;
        let valuation = rollback_option(&asset, option, q, |_, _| Ok(discount))?;
        debug!(
            option = %option.payoff,
            exercise = %option.exercise,
            steps = valuation.values().depth(),
            npv = valuation.npv(),
            exercise_nodes = valuation.exercise_events().len(),
            "valued vanilla option"
        );
        Ok(valuation)
    }
}

impl PricingEngine<VanillaOption> for BinomialVanillaEngine {
    fn calculate(&self, option: &VanillaOption) -> Result<PricingResults> {
        let valuation = self.value(option)?;
        Ok(PricingResults::from_npv(valuation.npv())
            .with_result("probability", self.calibration.probability()?)
            .with_result("exercise_nodes", valuation.exercise_events().len() as f64))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lt_core::Error;
    use lt_instruments::OptionType;

    fn scenario() -> BinomialVanillaEngine {
        let calibration = BinomialCalibration::new(0.5, 0.20, 10, 0.02, 0.01).unwrap();
        BinomialVanillaEngine::new(calibration, 100.0)
    }

    #[test]
    fn european_put_regression() {
        let v = scenario()
            .value(&VanillaOption::european(OptionType::Put, 100.0))
            .unwrap();
        assert_relative_eq!(v.npv(), 5.2124490701033395, max_relative = 1e-12);
        assert!(v.exercise_events().is_empty());
        assert_eq!(v.values().depth(), 10);
    }

    #[test]
    fn european_call_regression() {
        let v = scenario()
            .value(&VanillaOption::european(OptionType::Call, 100.0))
            .unwrap();
        assert_relative_eq!(v.npv(), 5.708713614454678, max_relative = 1e-12);
    }

    #[test]
    fn american_put_reports_exercise_nodes() {
        let v = scenario()
            .value(&VanillaOption::american(OptionType::Put, 100.0))
            .unwrap();
        assert_relative_eq!(v.npv(), 5.2835589760173605, max_relative = 1e-12);
        assert_eq!(v.exercise_events().len(), 15);
        for e in v.exercise_events() {
            assert!(e.exercise >= e.continuation);
            assert!(e.underlying < 100.0, "put exercised above strike at {e:?}");
            assert_relative_eq!(v.values().value(e.step, e.state), e.exercise);
        }
    }

    #[test]
    fn american_call_without_dividends_is_never_exercised() {
        let calibration = BinomialCalibration::new(0.5, 0.20, 10, 0.02, 0.0).unwrap();
        let engine = BinomialVanillaEngine::new(calibration, 100.0);
        let eu = engine.value(&VanillaOption::european(OptionType::Call, 100.0)).unwrap();
        let am = engine.value(&VanillaOption::american(OptionType::Call, 100.0)).unwrap();
        assert_relative_eq!(am.npv(), eu.npv(), max_relative = 1e-12);
        assert!(am.exercise_events().is_empty());
    }

    #[test]
    fn american_call_with_high_carry_moves_its_boundary_down_the_layers() {
        // c = 10% > r = 1%: early exercise pays, in the high-price (low j) states.
        let calibration = BinomialCalibration::new(1.0, 0.20, 10, 0.01, 0.10).unwrap();
        let engine = BinomialVanillaEngine::new(calibration, 100.0);
        let v = engine
            .value(&VanillaOption::american(OptionType::Call, 100.0))
            .unwrap();
        assert_relative_eq!(v.npv(), 4.931634028169732, max_relative = 1e-12);
        assert_eq!(v.exercise_events().len(), 21);
        assert_eq!(
            v.exercise_boundary(),
            vec![(2, 0), (3, 0), (4, 1), (5, 1), (6, 2), (7, 2), (8, 3), (9, 4)]
        );
        // Every state above the boundary is exercised, the next one down is not.
        for (step, state) in v.exercise_boundary() {
            for j in 0..=state {
                assert!(v.is_exercised(step, j), "({step}, {j}) not exercised");
            }
            assert!(!v.is_exercised(step, state + 1));
        }
    }

    #[test]
    fn pricing_engine_reports_probability() {
        let r = scenario()
            .calculate(&VanillaOption::american(OptionType::Put, 100.0))
            .unwrap();
        assert_relative_eq!(r.npv, 5.2835589760173605, max_relative = 1e-12);
        assert_relative_eq!(r.result("probability").unwrap(), 0.49441122742796845, max_relative = 1e-12);
        assert_eq!(r.result("exercise_nodes"), Some(15.0));
    }

    #[test]
    fn arbitrage_calibration_fails_the_call() {
        let calibration = BinomialCalibration::new(10.0, 0.01, 1, 0.10, 0.0).unwrap();
        let engine = BinomialVanillaEngine::new(calibration, 100.0);
        let r = engine.value(&VanillaOption::european(OptionType::Call, 100.0));
        assert!(matches!(r, Err(Error::Calibration { .. })));
    }
}
