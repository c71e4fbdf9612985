//! Piecewise stimulus waveform generator
//!
//! Composes a [`WaveformProgram`] envelope with a carrier sinusoid to
//! produce the continuous-time analog stimulus fed to an ADC model.

use crate::block::{AlgebraicBlock, Block};
use crate::waveform::{sinusoid, WaveformProgram};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Carrier sinusoid parameters plus an additive DC offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarrierConfig {
    pub amplitude: f64,
    /// Carrier frequency in Hz
    pub frequency: f64,
    /// Phase offset in radians
    pub phase: f64,
    /// DC offset added after modulation
    pub offset: f64,
}

impl CarrierConfig {
    pub fn new(amplitude: f64, frequency: f64, phase: f64, offset: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            offset,
        }
    }

    /// Unit carrier at the given frequency
    pub fn unit(frequency: f64) -> Self {
        Self::new(1.0, frequency, 0.0, 0.0)
    }
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }
}

/// Waveform generator source block
///
/// Evaluates the program envelope at the current time, multiplies it by the
/// carrier sinusoid, and adds the DC offset:
///
/// ```text
/// out(t) = envelope(t) * amplitude * sin(2*pi*frequency*t + phase) + offset
/// ```
///
/// The generator owns its virtual time base, advanced only by
/// [`advance`](WaveformGenerator::advance); apart from that it is a pure
/// function of the queried time, the shared program, and the carrier
/// parameters. It has no notion of "done" - the driver's configured run
/// duration stops the loop.
///
/// # Example
///
/// ```ignore
/// let program = Arc::new(WaveformProgram::level(1.0));
/// let mut gen = WaveformGenerator::new(program, CarrierConfig::unit(10e6));
/// let analog = gen.advance(1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct WaveformGenerator {
    output: f64,
    time: f64,
    program: Arc<WaveformProgram>,
    carrier: CarrierConfig,
}

impl WaveformGenerator {
    /// Create a generator over a shared program. The output is primed at
    /// t = 0.
    pub fn new(program: Arc<WaveformProgram>, carrier: CarrierConfig) -> Self {
        let mut gen = Self {
            output: 0.0,
            time: 0.0,
            program,
            carrier,
        };
        gen.output = gen.sample_output(0.0);
        gen
    }

    /// Current virtual time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The active program
    pub fn program(&self) -> &WaveformProgram {
        &self.program
    }

    /// Carrier parameters
    pub fn carrier(&self) -> CarrierConfig {
        self.carrier
    }

    /// Modulation envelope at time `t`
    pub fn envelope(&self, t: f64) -> f64 {
        self.program.value_at(t)
    }

    /// Composite stimulus at time `t`: envelope times carrier plus offset
    pub fn sample_output(&self, t: f64) -> f64 {
        self.envelope(t)
            * sinusoid(
                self.carrier.amplitude,
                self.carrier.frequency,
                self.carrier.phase,
                t,
            )
            + self.carrier.offset
    }

    /// Advance the virtual time base by `step` and recompute the held
    /// output. Returns the new output value.
    ///
    /// Time never decreases; a negative step is a driver bug and panics.
    pub fn advance(&mut self, step: f64) -> f64 {
        assert!(step >= 0.0, "time step must be non-negative, got {step}");
        self.time += step;
        self.output = self.sample_output(self.time);
        self.output
    }
}

impl Block for WaveformGenerator {
    const NUM_INPUTS: usize = 0;
    const NUM_OUTPUTS: usize = 1;

    fn inputs(&self) -> &[f64] {
        &[]
    }
    fn inputs_mut(&mut self) -> &mut [f64] {
        &mut []
    }

    fn outputs(&self) -> &[f64] {
        std::slice::from_ref(&self.output)
    }

    fn outputs_mut(&mut self) -> &mut [f64] {
        std::slice::from_mut(&mut self.output)
    }

    /// Recompute the output at the explicitly threaded time `t`.
    ///
    /// Does not touch the stored time base, so re-evaluating at any time is
    /// deterministic and side-effect-free.
    fn update(&mut self, t: f64) {
        self.output = self.sample_output(t);
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.output = self.sample_output(0.0);
    }
}

impl AlgebraicBlock for WaveformGenerator {}
