//! Block implementations

pub mod adc;
pub mod generator;
pub mod scope;

pub use adc::{Adc, AdcConfig, AdcSample, CodePolicy};
pub use generator::{CarrierConfig, WaveformGenerator};
pub use scope::Scope;
