//! Interest-rate swaps and swaptions on the short-rate lattice.
//!
//! The net payment set at node `(i, j)` is `±notional · (r(i, j) − K)` and is
//! paid one step later, so it is discounted at the node's own rate:
//!
//! ```text
//! V(n, j) = flow(n, j) / (1 + r(n, j))
//! V(i, j) = [flow(i, j) + ½ V(i+1, j) + ½ V(i+1, j+1)] / (1 + r(i, j))
//! ```
//!
//! A forward-starting swap sets no payment at the root.

use std::sync::Arc;

use lt_core::{ensure, errors::Result, Rate, Real, Size};
use lt_instruments::{PricingEngine, PricingResults, Swap, SwapStart, Swaption};
use lt_methods::{backward_induction, Lattice, SHORT_RATE_PROBABILITY};
use tracing::debug;

use crate::valuation::{ensure_covers, simple_discount, LatticeValuation};

/// Swap and swaption engine on a shared short-rate lattice.
#[derive(Debug, Clone)]
pub struct ShortRateSwapEngine {
    rates: Arc<Lattice>,
}

impl ShortRateSwapEngine {
    /// Create an engine over the given short-rate lattice.
    pub fn new(rates: Arc<Lattice>) -> Self {
        Self { rates }
    }

    /// Swap valuation lattice of depth `swap.maturity`.
    pub fn value_swap(&self, swap: &Swap) -> Result<LatticeValuation> {
        swap.validate()?;
        ensure_covers(&self.rates, swap.maturity, "swap maturity")?;
        let rates = &*self.rates;
        let scale = swap.swap_type.sign() * swap.notional;
        let skip_root = swap.start == SwapStart::Forward;
        let flow = |i: Size, j: Size| -> Real {
            if skip_root && i == 0 {
                0.0
            } else {
                scale * (rates.value(i, j) - swap.fixed_rate)
            }
        };

        let n = swap.maturity;
        let q = SHORT_RATE_PROBABILITY;
        let values = backward_induction(
            n,
            |j| Ok(flow(n, j) * simple_discount(rates, n, j)?),
            |i, j, up, down| Ok((flow(i, j) + q * up + (1.0 - q) * down) * simple_discount(rates, i, j)?),
        )?;
        debug!(
            fixed_rate = swap.fixed_rate,
            maturity = n,
            forward = skip_root,
            npv = values.root(),
            "valued swap"
        );
        Ok(LatticeValuation::european(values))
    }

    /// Fixed rate at which the swap is worth zero today.
    ///
    /// Swap values are affine in the fixed rate, so two valuations pin it:
    /// `K* = V(0) / (V(0) − V(1))`.
    pub fn fair_rate(&self, swap: &Swap) -> Result<Rate> {
        let at_zero = self.value_swap(&swap.with_fixed_rate(0.0))?.npv();
        let at_one = self.value_swap(&swap.with_fixed_rate(1.0))?.npv();
        let slope = at_zero - at_one;
        ensure!(
            slope != 0.0 && slope.is_finite(),
            "swap of notional {} has no fair rate: its value does not depend on the fixed rate",
            swap.notional
        );
        Ok(at_zero / slope)
    }

    /// European swaption struck at zero on an already-valued swap.
    ///
    /// Pays `max(V_swap(expiry, j), 0)` at step `expiry` of the swap lattice.
    pub fn swaption_on(&self, swap_values: &Lattice, expiry: Size) -> Result<LatticeValuation> {
        ensure!(expiry > 0, "swaption expiry must be at least one step");
        ensure!(
            expiry <= swap_values.depth(),
            "swaption expiry {expiry} exceeds swap lattice depth {}",
            swap_values.depth()
        );
        ensure_covers(&self.rates, swap_values.depth(), "swap lattice")?;
        let rates = &*self.rates;
        let q = SHORT_RATE_PROBABILITY;
        let values = backward_induction(
            expiry,
            |j| Ok(swap_values.value(expiry, j).max(0.0)),
            |i, j, up, down| Ok((q * up + (1.0 - q) * down) * simple_discount(rates, i, j)?),
        )?;
        debug!(expiry, npv = values.root(), "valued swaption");
        Ok(LatticeValuation::european(values))
    }

    /// Value a swaption from its terms.
    pub fn value_swaption(&self, swaption: &Swaption) -> Result<LatticeValuation> {
        swaption.validate()?;
        let swap = self.value_swap(&swaption.underlying)?;
        self.swaption_on(swap.values(), swaption.expiry)
    }
}

impl PricingEngine<Swap> for ShortRateSwapEngine {
    fn calculate(&self, swap: &Swap) -> Result<PricingResults> {
        let npv = self.value_swap(swap)?.npv();
        Ok(PricingResults::from_npv(npv).with_result("fair_rate", self.fair_rate(swap)?))
    }
}

impl PricingEngine<Swaption> for ShortRateSwapEngine {
    fn calculate(&self, swaption: &Swaption) -> Result<PricingResults> {
        swaption.validate()?;
        let swap = self.value_swap(&swaption.underlying)?;
        let option = self.swaption_on(swap.values(), swaption.expiry)?;
        Ok(PricingResults::from_npv(option.npv()).with_result("underlying_npv", swap.npv()))
    }
}
