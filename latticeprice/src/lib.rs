//! # latticeprice
//!
//! Derivatives pricing on recombining binomial lattices.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `lt-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! latticeprice = "0.1"
//! ```
//!
//! ```rust
//! use latticeprice::instruments::{OptionType, VanillaOption};
//! use latticeprice::methods::BinomialCalibration;
//! use latticeprice::pricingengines::BinomialVanillaEngine;
//!
//! let calibration = BinomialCalibration::new(0.5, 0.20, 10, 0.02, 0.01)?;
//! let engine = BinomialVanillaEngine::new(calibration, 100.0);
//! let put = engine.value(&VanillaOption::american(OptionType::Put, 100.0))?;
//!
//! assert!(put.npv() > 5.0);
//! assert!(!put.exercise_events().is_empty());
//! # Ok::<(), latticeprice::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use lt_core as core;

/// Lattices, builders, backward induction and calibration.
pub use lt_methods as methods;

/// Instrument terms.
pub use lt_instruments as instruments;

/// Pricing engines.
pub use lt_pricingengines as pricingengines;
