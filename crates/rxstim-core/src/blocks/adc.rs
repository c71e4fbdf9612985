//! Ideal ADC quantization model
//!
//! Deterministic quantization of a real-valued input into a fixed-width
//! digital code, latched on a block-internal sample clock, with clamping and
//! overrange reporting. Purely mathematical: no noise, nonlinearity, jitter,
//! or aperture effects.

use crate::block::{AlgebraicBlock, Block};
use crate::utils::constants::EDGE_TOLERANCE;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Output code interpretation, fixed once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodePolicy {
    /// Codes span `0 ..= 2^N - 1`
    Unsigned,
    /// Codes span `-2^(N-1) ..= 2^(N-1) - 1`
    TwosComplement,
}

/// Analog range and coding configuration for an [`Adc`]
///
/// Immutable once supplied to a converter; safe to share across multiple
/// converter instances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcConfig {
    /// Bipolar spans `offset - scale/2 ..= offset + scale/2`; unipolar spans
    /// `offset ..= offset + scale`. Also selects the code mapping: bipolar
    /// converters emit two's-complement codes.
    pub bipolar: bool,
    /// Width of the valid analog span in volts, must be positive
    pub voltage_scale: f64,
    /// Center (bipolar) or bottom (unipolar) of the valid span
    pub voltage_offset: f64,
    /// Records how the downstream consumer interprets the emitted bits.
    /// Informational only: the code mapping itself follows `bipolar`.
    pub twos_complement: bool,
}

impl AdcConfig {
    /// Bipolar converter: span centered on `voltage_offset`, signed codes
    pub fn bipolar(voltage_scale: f64, voltage_offset: f64) -> Self {
        Self {
            bipolar: true,
            voltage_scale,
            voltage_offset,
            twos_complement: true,
        }
    }

    /// Unipolar converter: span starting at `voltage_offset`, unsigned codes
    pub fn unipolar(voltage_scale: f64, voltage_offset: f64) -> Self {
        Self {
            bipolar: false,
            voltage_scale,
            voltage_offset,
            twos_complement: false,
        }
    }

    /// Top of the valid analog input range
    pub fn top(&self) -> f64 {
        if self.bipolar {
            self.voltage_offset + self.voltage_scale / 2.0
        } else {
            self.voltage_offset + self.voltage_scale
        }
    }

    /// Bottom of the valid analog input range
    pub fn bottom(&self) -> f64 {
        if self.bipolar {
            self.voltage_offset - self.voltage_scale / 2.0
        } else {
            self.voltage_offset
        }
    }

    /// Code mapping implied by the range selection
    pub fn policy(&self) -> CodePolicy {
        if self.bipolar {
            CodePolicy::TwosComplement
        } else {
            CodePolicy::Unsigned
        }
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::bipolar(2.0, 0.0)
    }
}

/// One registered conversion result
///
/// Produced on each sampling edge (or forced to code 0 while the reset line
/// is asserted) and superseded by the next edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcSample {
    /// Latched digital code
    pub code: i32,
    /// Input was outside the configured span when this code latched
    pub overrange: bool,
}

/// Analog-to-Digital Converter model
///
/// Models an ideal ADC that samples its analog input on a block-internal
/// sample clock (period `period`, first edge at `tau`), clamps it into the
/// configured span, quantizes it by truncation, and holds the resulting code
/// until the next edge. The code is a registered, one-cycle-latency value;
/// the overrange flag is combinational and follows the live input.
///
/// # Type Parameters
///
/// - `N_BITS`: Output code width; `1..=31` so every code fits an `i32`
///   register exactly
///
/// # Port view
///
/// - input 0: analog value
/// - output 0: latched code as `f64` (registered)
/// - output 1: live overrange flag, 0.0 or 1.0 (level-sensitive, not latched)
///
/// The typed result is available through [`sample`](Adc::sample).
///
/// # Example
///
/// ```ignore
/// let mut adc = Adc::<14>::new(AdcConfig::bipolar(5.0, 2.5), 1e-8, 0.0);
/// adc.set_input(0, 5.0);
/// adc.update(0.0); // first sampling edge
/// assert_eq!(adc.sample().code, 8191);
/// ```
#[derive(Debug, Clone)]
pub struct Adc<const N_BITS: usize> {
    input: f64,
    outputs: [f64; 2],
    config: AdcConfig,
    policy: CodePolicy,
    period: f64,
    tau: f64,
    reset_line: bool,
    latched: AdcSample,
    last_sample_time: Option<f64>,
}

impl<const N_BITS: usize> Adc<N_BITS> {
    /// Create a new converter with analog configuration, sampling period,
    /// and delay before the first edge.
    ///
    /// Malformed configuration fails here, never during a run.
    pub fn new(config: AdcConfig, period: f64, tau: f64) -> Self {
        assert!(
            (1..=31).contains(&N_BITS),
            "code width must fit an i32 register (1..=31 bits), got {N_BITS}"
        );
        assert!(
            config.voltage_scale > 0.0,
            "voltage scale must be positive, got {}",
            config.voltage_scale
        );
        assert!(period > 0.0, "sampling period must be positive");
        assert!(tau >= 0.0, "delay must be non-negative");

        Self {
            input: 0.0,
            outputs: [0.0; 2],
            policy: config.policy(),
            config,
            period,
            tau,
            reset_line: false,
            latched: AdcSample {
                code: 0,
                overrange: false,
            },
            last_sample_time: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> AdcConfig {
        self.config
    }

    /// Get the sampling period
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Get the delay before the first sampling edge
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Get the code mapping selected at construction
    pub fn policy(&self) -> CodePolicy {
        self.policy
    }

    /// Get the number of bits
    pub fn n_bits(&self) -> usize {
        N_BITS
    }

    /// Smallest representable code for the configured policy
    pub fn min_code(&self) -> i32 {
        match self.policy {
            CodePolicy::Unsigned => 0,
            CodePolicy::TwosComplement => -(1i32 << (N_BITS - 1)),
        }
    }

    /// Largest representable code for the configured policy
    pub fn max_code(&self) -> i32 {
        match self.policy {
            CodePolicy::Unsigned => ((1i64 << N_BITS) - 1) as i32,
            CodePolicy::TwosComplement => (1i32 << (N_BITS - 1)) - 1,
        }
    }

    /// Drive the modeled reset line.
    ///
    /// While asserted, the latched code is forced to 0 regardless of input;
    /// the previous code is not retained across reset.
    pub fn set_reset(&mut self, asserted: bool) {
        self.reset_line = asserted;
    }

    /// Currently latched conversion result
    pub fn sample(&self) -> AdcSample {
        self.latched
    }

    /// Normalize the analog input into `[0, 1]` over the configured span.
    ///
    /// Clamping guarantees the subsequent integer conversion never produces
    /// an out-of-range code, whatever the input magnitude.
    pub fn condition(&self, analog_in: f64) -> f64 {
        ((analog_in - self.config.bottom()) / self.config.voltage_scale).clamp(0.0, 1.0)
    }

    /// Map a normalized value in `[0, 1]` to a digital code.
    ///
    /// The scaled value is truncated toward zero, not rounded to nearest;
    /// this matches the modeled converter bit-for-bit and is deliberate (see
    /// DESIGN.md). Monotonic non-decreasing over `[0, 1]`.
    pub fn quantize(&self, normalized: f64) -> i32 {
        let full_scale = ((1i64 << N_BITS) - 1) as f64;
        let rounded = (normalized * full_scale).trunc() as i32;
        match self.policy {
            CodePolicy::Unsigned => rounded,
            CodePolicy::TwosComplement => rounded - (1i32 << (N_BITS - 1)),
        }
    }

    /// Combinational overrange check: strictly outside the configured span.
    ///
    /// Diagnostic only; quantization still clamps and proceeds while this is
    /// true.
    pub fn is_overrange(&self, analog_in: f64) -> bool {
        analog_in > self.config.top() || analog_in < self.config.bottom()
    }

    /// Check if a sampling edge falls at this time
    fn should_sample(&self, t: f64) -> bool {
        if t < self.tau {
            return false;
        }
        match self.last_sample_time {
            None => true,
            // Tolerance is relative to the period so picosecond clocks work
            Some(last_t) => t - last_t >= self.period * (1.0 - EDGE_TOLERANCE),
        }
    }
}

impl<const N_BITS: usize> Default for Adc<N_BITS> {
    fn default() -> Self {
        Self::new(AdcConfig::default(), 1.0, 0.0)
    }
}

impl<const N_BITS: usize> Block for Adc<N_BITS> {
    const NUM_INPUTS: usize = 1;
    const NUM_OUTPUTS: usize = 2;

    fn inputs(&self) -> &[f64] {
        std::slice::from_ref(&self.input)
    }

    fn inputs_mut(&mut self) -> &mut [f64] {
        std::slice::from_mut(&mut self.input)
    }

    fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    fn outputs_mut(&mut self) -> &mut [f64] {
        &mut self.outputs
    }

    fn update(&mut self, t: f64) {
        let overrange = self.is_overrange(self.input);
        if self.reset_line {
            self.latched = AdcSample { code: 0, overrange };
        } else if self.should_sample(t) {
            if overrange {
                warn!(
                    time = t,
                    input = self.input,
                    bottom = self.config.bottom(),
                    top = self.config.top(),
                    "analog input outside configured span; clamping"
                );
            }
            self.latched = AdcSample {
                code: self.quantize(self.condition(self.input)),
                overrange,
            };
            self.last_sample_time = Some(t);
        }
        // Code is registered; the overrange port follows the live input
        self.outputs[0] = self.latched.code as f64;
        self.outputs[1] = if overrange { 1.0 } else { 0.0 };
    }

    fn reset(&mut self) {
        self.input = 0.0;
        self.outputs = [0.0; 2];
        self.reset_line = false;
        self.latched = AdcSample {
            code: 0,
            overrange: false,
        };
        self.last_sample_time = None;
    }
}

impl<const N_BITS: usize> AlgebraicBlock for Adc<N_BITS> {}
