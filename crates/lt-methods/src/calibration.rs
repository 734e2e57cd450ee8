//! Risk-neutral calibration of binomial lattices.
//!
//! Two conventions are supported:
//!
//! * **Continuous-time** ([`BinomialCalibration`]) for equity, futures and
//!   option-on-futures claims. The multipliers come from the volatility,
//!   `u = exp(σ √Δt)`, `d = 1/u`, and the up-probability matches the
//!   one-period growth `a = exp((r − c) Δt)`:
//!
//!   ```text
//!   q = (a − d) / (u − d)
//!   ```
//!
//! * **Short-rate** ([`ShortRateParameters`]) for bonds, swaps, swaptions
//!   and defaultable bonds. The short rate evolves multiplicatively with
//!   given `u`, `d` and the up-probability is fixed at
//!   [`SHORT_RATE_PROBABILITY`]. This is a modelling convention, not the
//!   continuous-time formula evaluated on the rate lattice.

use lt_core::{ensure, Error, Probability, Rate, Real, Result, Size, Time, Volatility};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lattice::{build_price_lattice, Lattice};

/// Up-probability used for every claim driven by the short-rate lattice.
pub const SHORT_RATE_PROBABILITY: Probability = 0.5;

/// Continuous-time risk-neutral probability `q = (exp((r − c)Δt) − d) / (u − d)`.
///
/// # Errors
/// [`Error::Calibration`] unless `d < exp((r − c)Δt) < u`; the probability is
/// never clamped into `(0, 1)`.
pub fn continuous_time_probability(
    up: Real,
    down: Real,
    rate: Rate,
    carry: Rate,
    dt: Time,
) -> Result<Probability> {
    ensure!(
        up > down,
        "up multiplier {up} must exceed down multiplier {down}"
    );
    let growth = ((rate - carry) * dt).exp();
    let probability = (growth - down) / (up - down);
    if !(probability > 0.0 && probability < 1.0) {
        return Err(Error::Calibration {
            probability,
            growth,
            up,
            down,
        });
    }
    Ok(probability)
}

// ─── BinomialCalibration ──────────────────────────────────────────────────────

/// Continuous-time calibration of an `N`-step binomial model over `[0, T]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinomialCalibration {
    /// Time horizon `T` in years.
    pub horizon: Time,
    /// Volatility `σ` of the underlying.
    pub volatility: Volatility,
    /// Number of steps `N`.
    pub steps: Size,
    /// Continuously compounded risk-free rate `r`.
    pub rate: Rate,
    /// Dividend or convenience yield `c`.
    pub carry: Rate,
}

impl BinomialCalibration {
    /// Create and validate a calibration.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] if `steps == 0`, `T ≤ 0`, `σ ≤ 0`
    /// or any input is not finite.
    pub fn new(
        horizon: Time,
        volatility: Volatility,
        steps: Size,
        rate: Rate,
        carry: Rate,
    ) -> Result<Self> {
        let calibration = Self {
            horizon,
            volatility,
            steps,
            rate,
            carry,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check the invariants a deserialized or hand-built value may violate.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.steps > 0, "number of steps must be at least 1");
        ensure!(
            self.horizon.is_finite() && self.horizon > 0.0,
            "horizon must be positive, got {}",
            self.horizon
        );
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure!(
            self.rate.is_finite() && self.carry.is_finite(),
            "rates must be finite (r = {}, c = {})",
            self.rate,
            self.carry
        );
        Ok(())
    }

    /// Length of one step, `Δt = T / N`.
    pub fn dt(&self) -> Time {
        self.horizon / self.steps as Real
    }

    /// Up multiplier `u = exp(σ √Δt)`.
    pub fn up(&self) -> Real {
        (self.volatility * self.dt().sqrt()).exp()
    }

    /// Down multiplier `d = 1 / u`.
    pub fn down(&self) -> Real {
        1.0 / self.up()
    }

    /// One-period growth factor `exp((r − c) Δt)`.
    pub fn growth(&self) -> Real {
        ((self.rate - self.carry) * self.dt()).exp()
    }

    /// One-period discount factor `exp(−r Δt)`.
    pub fn discount(&self) -> Real {
        (-self.rate * self.dt()).exp()
    }

    /// Risk-neutral up-probability.
    ///
    /// # Errors
    /// [`Error::Calibration`] when the calibration admits arbitrage.
    pub fn probability(&self) -> Result<Probability> {
        self.validate()?;
        let q = continuous_time_probability(
            self.up(),
            self.down(),
            self.rate,
            self.carry,
            self.dt(),
        )?;
        debug!(q, dt = self.dt(), up = self.up(), "calibrated risk-neutral probability");
        Ok(q)
    }

    /// Underlying-asset lattice rooted at `spot`.
    pub fn asset_lattice(&self, spot: Real) -> Result<Lattice> {
        self.validate()?;
        ensure!(spot > 0.0, "spot must be positive, got {spot}");
        build_price_lattice(self.up(), self.down(), self.steps, spot)
    }
}

// ─── ShortRateParameters ──────────────────────────────────────────────────────

/// Multiplicative short-rate process `r(i, j) = r0 · u^(i − j) · d^j`.
///
/// Rates are simple per-period rates: one step at node `(i, j)` discounts
/// by `1 / (1 + r(i, j))`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShortRateParameters {
    /// Up multiplier `u`.
    pub up: Real,
    /// Down multiplier `d`.
    pub down: Real,
    /// Short rate `r0` at the root.
    pub initial_rate: Rate,
}

impl ShortRateParameters {
    /// Create short-rate parameters.
    pub fn new(up: Real, down: Real, initial_rate: Rate) -> Self {
        Self {
            up,
            down,
            initial_rate,
        }
    }

    /// Short-rate lattice of the given depth.
    pub fn lattice(&self, steps: Size) -> Result<Lattice> {
        build_price_lattice(self.up, self.down, steps, self.initial_rate)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
