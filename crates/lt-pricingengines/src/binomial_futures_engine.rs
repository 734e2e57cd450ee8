//! Futures and options on futures on the asset lattice.
//!
//! The futures lattice starts from the asset price at the last step and
//! rolls back with the risk-neutral expectation alone; futures are marked
//! to market, so no discounting applies:
//!
//! ```text
//! F(N, j) = S(N, j)
//! F(i, j) = q F(i+1, j) + (1 − q) F(i+1, j+1)
//! ```
//!
//! An option on the futures contract may expire at any step `N2 ≤ N` and is
//! valued on the top `N2` steps of the futures lattice, discounting at
//! `e^{−rΔt}` with the same `Δt = T / N`.

use lt_core::{errors::Result, Price};
use lt_instruments::{PricingEngine, PricingResults, VanillaOption};
use lt_methods::{backward_induction, BinomialCalibration, Lattice};
use tracing::debug;

use crate::valuation::{rollback_option, LatticeValuation};

/// Binomial engine for futures contracts and options on them.
#[derive(Debug, Clone, Copy)]
pub struct BinomialFuturesEngine {
    calibration: BinomialCalibration,
    spot: Price,
}

impl BinomialFuturesEngine {
    /// Create an engine for futures on an asset trading at `spot`.
    pub fn new(calibration: BinomialCalibration, spot: Price) -> Self {
        Self { calibration, spot }
    }

    /// The full futures-price lattice of depth `N`.
    pub fn futures_lattice(&self) -> Result<Lattice> {
        let q = self.calibration.probability()?;
        let asset = self.calibration.asset_lattice(self.spot)?;
        let n = asset.depth();
        backward_induction(
            n,
            |j| Ok(asset.value(n, j)),
            |_, _, up, down| Ok(q * up + (1.0 - q) * down),
        )
    }

    /// Time-zero futures price.
    pub fn futures_price(&self) -> Result<Price> {
        let price = self.futures_lattice()?.root();
        debug!(price, "valued futures contract");
        Ok(price)
    }

    /// Value an option on the futures contract.
    ///
    /// The option's expiry defaults to `N`; an explicit expiry is the `N2`
    /// of the contract.
    pub fn value_option(&self, option: &VanillaOption) -> Result<LatticeValuation> {
        let futures = self.futures_lattice()?;
        self.value_option_on(&futures, option)
    }

    /// Value an option on an already-built futures lattice.
    pub fn value_option_on(
        &self,
        futures: &Lattice,
        option: &VanillaOption,
    ) -> Result<LatticeValuation> {
        let q = self.calibration.probability()?;
        let discount = self.calibration.discount();
        let expiry = option.expiry_within(futures.depth())?;
        let underlying = futures.sub_lattice(expiry)?;
        let valuation = rollback_option(&underlying, option, q, |_, _| Ok(discount))?;
        debug!(
            option = %option.payoff,
            exercise = %option.exercise,
            expiry,
            npv = valuation.npv(),
            "valued option on futures"
        );
        Ok(valuation)
    }
}

impl PricingEngine<VanillaOption> for BinomialFuturesEngine {
    fn calculate(&self, option: &VanillaOption) -> Result<PricingResults> {
        let futures = self.futures_lattice()?;
        let valuation = self.value_option_on(&futures, option)?;
        Ok(PricingResults::from_npv(valuation.npv())
            .with_result("futures_price", futures.root())
            .with_result("exercise_nodes", valuation.exercise_events().len() as f64))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
