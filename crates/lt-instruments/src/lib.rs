//! # lt-instruments
//!
//! Instrument terms priced on binomial lattices: vanilla options (on an
//! asset, a futures contract or any lattice-valued claim), zero-coupon and
//! coupon bonds, defaultable bonds, swaps, swaptions and forwards/futures on
//! coupon bonds. Terms are plain value objects; maturities and expiries are
//! expressed in lattice steps.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bond;
pub mod exercise;
pub mod forward;
pub mod hazard;
pub mod instrument;
pub mod option;
pub mod payoff;
pub mod swap;

pub use bond::{CouponBond, DefaultableZeroCouponBond, ZeroCouponBond};
pub use exercise::ExerciseType;
pub use forward::BondForward;
pub use hazard::{ExponentialHazard, FlatHazard, HazardRateSchedule};
pub use instrument::{PricingEngine, PricingResults};
pub use option::VanillaOption;
pub use payoff::{OptionType, PlainVanillaPayoff};
pub use swap::{Swap, SwapStart, SwapType, Swaption};
