//! # lt-pricingengines
//!
//! Backward-induction pricing engines on binomial lattices.
//!
//! ## Engines
//!
//! - [`BinomialVanillaEngine`] — European and American options on an asset
//! - [`BinomialFuturesEngine`] — futures prices and options on futures
//! - [`ShortRateBondEngine`] — zero-coupon and coupon bonds, options on short-rate claims
//! - [`ShortRateSwapEngine`] — spot and forward-starting swaps, swaptions, par rates
//! - [`BondForwardEngine`] — forward and futures prices of a coupon bond
//! - [`DefaultableBondEngine`] — zero-coupon bonds with hazard-rate default
//!
//! Every engine returns a [`LatticeValuation`] holding the full valuation
//! lattice and any early-exercise nodes, and implements
//! [`PricingEngine`](lt_instruments::PricingEngine) for its instruments.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binomial_futures_engine;
pub mod binomial_vanilla_engine;
pub mod bond_forward_engine;
pub mod defaultable_bond_engine;
pub mod short_rate_bond_engine;
pub mod short_rate_swap_engine;
pub mod valuation;

pub use binomial_futures_engine::BinomialFuturesEngine;
pub use binomial_vanilla_engine::BinomialVanillaEngine;
pub use bond_forward_engine::BondForwardEngine;
pub use defaultable_bond_engine::DefaultableBondEngine;
pub use short_rate_bond_engine::ShortRateBondEngine;
pub use short_rate_swap_engine::ShortRateSwapEngine;
pub use valuation::{ExerciseEvent, LatticeValuation};
