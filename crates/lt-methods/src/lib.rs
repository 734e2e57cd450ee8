//! # lt-methods
//!
//! Numerical methods shared by every lattice pricer: the recombining
//! triangular lattice, its backward-induction traversal, the forward
//! builders for asset-price and short-rate lattices, and the calibration of
//! the single-period risk-neutral probability.
//!
//! # Modules
//!
//! * [`lattice`] — arena-backed triangular lattice, builders, backward induction
//! * [`calibration`] — continuous-time and short-rate calibration parameters

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Recombining lattices and backward induction.
pub mod lattice;

/// Calibration of up/down multipliers and risk-neutral probabilities.
pub mod calibration;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calibration::{
    continuous_time_probability, BinomialCalibration, ShortRateParameters,
    SHORT_RATE_PROBABILITY,
};
pub use lattice::{backward_induction, build_price_lattice, Lattice};
