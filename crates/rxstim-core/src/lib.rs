//! RxStim - deterministic stimulus generation for digital receiver simulation
//!
//! Models the continuous-time-to-digital conversion path used to exercise a
//! receiver design before hardware is available: a piecewise waveform
//! generator synthesizes a modulation envelope over a carrier, and an ideal
//! ADC model quantizes the result into a registered digital code.
//!
//! # Architecture
//!
//! RxStim uses a compile-time static architecture:
//! - Fixed I/O sizes at compile time (const generics)
//! - All block signals are `f64` ports; digital codes also have typed accessors
//! - Fully static dispatch - the driver loop composes concrete blocks
//!
//! # Example
//!
//! ```rust,ignore
//! use rxstim_core::prelude::*;
//! use std::sync::Arc;
//!
//! // Stimulus: a 1 us gate over a 10 MHz carrier, into a 14-bit ADC
//! let program = Arc::new(WaveformProgram::new(
//!     vec![SignalSegment::constant(1e-6, 1.0)],
//!     0.0,
//! )?);
//! let mut gen = WaveformGenerator::new(program, CarrierConfig::new(1.0, 10e6, 0.0, 0.0));
//! let mut adc = Adc::<14>::new(AdcConfig::bipolar(2.0, 0.0), 1e-8, 0.0);
//!
//! let dt = 1e-10;
//! while gen.time() < 2e-6 {
//!     let analog = gen.advance(dt);
//!     adc.set_input(0, analog);
//!     adc.update(gen.time());
//! }
//! let sample = adc.sample();
//! ```

// Core block trait and types
pub mod block;
pub mod blocks;
pub mod utils;
pub mod waveform;

pub use block::{AlgebraicBlock, Block};
pub use blocks::*;
pub use waveform::{ProgramError, SegmentShape, SignalSegment, WaveformProgram};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::block::{AlgebraicBlock, Block};
    pub use crate::blocks::*;
    pub use crate::waveform::{ProgramError, SegmentShape, SignalSegment, WaveformProgram};
}
