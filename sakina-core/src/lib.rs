#![cfg_attr(not(feature = "std"), no_std)]
//! Sakina Core — no_std-ready DSP primitives for the procedural ambience engine.
//!
//! Features
//! - `std`      : (default) use the Rust standard library
//! - `no-std`   : build with `#![no_std]` and use `libm` as the math backend
//! - `fast-math`: enable polynomial sine for the oscillator hot path
//!
//! Modules
//! - [`dsp`]       : math backend, smoothing coefficients, denormal handling
//! - [`noise`]     : colored-noise recurrences (pink 6-pole, brown walk)
//! - [`filters`]   : one-pole LP/HP tone shaping
//! - [`envelopes`] : retargetable linear gain ramps
//!
//! Design
//! - No heap allocations; pure sample-by-sample primitives
//! - No random source of its own — callers feed white samples in
//! - Friendly to embedded / real-time targets

pub mod dsp;
pub mod envelopes;
pub mod filters;
pub mod noise;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::dsp::{fast_sin, kill_denormals, one_pole_coeff_hz, TAU};
    pub use crate::envelopes::LinearRamp;
    pub use crate::filters::{OnePoleHP, OnePoleLP};
    pub use crate::noise::{fill_brown, fill_pink, fill_white, BrownWalk, PinkFilter};
}
