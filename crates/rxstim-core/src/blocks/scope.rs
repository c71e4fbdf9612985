//! Data recorder (scope) block
//!
//! Multi-channel recording of block outputs over a run, with CSV export for
//! offline inspection of stimulus and code traces.

use crate::block::Block;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Scope: multi-channel data recorder with CSV export
///
/// Records its inputs as `(time, values)` rows on every update and passes
/// them through unchanged. Re-updating at the same time overwrites the
/// previous row, so a driver may safely evaluate a step more than once.
///
/// # Type Parameters
///
/// - `CHANNELS`: Number of input channels (const generic)
///
/// # Example
///
/// ```ignore
/// let mut scope = Scope::<2>::new();
/// scope.set_input(0, analog);
/// scope.set_input(1, code as f64);
/// scope.update(t);
///
/// scope.save_with_labels("trace.csv", &["analog", "code"])?;
/// ```
#[derive(Debug, Clone)]
pub struct Scope<const CHANNELS: usize> {
    inputs: [f64; CHANNELS],
    outputs: [f64; CHANNELS], // pass-through
    buffer: Vec<(f64, [f64; CHANNELS])>,
}

impl<const CHANNELS: usize> Scope<CHANNELS> {
    /// Create new scope
    pub fn new() -> Self {
        assert!(CHANNELS > 0, "must have at least one channel");
        Self {
            inputs: [0.0; CHANNELS],
            outputs: [0.0; CHANNELS],
            buffer: Vec::new(),
        }
    }

    /// Get number of recorded samples
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear all recorded data
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Recorded data in chronological order
    pub fn data(&self) -> &[(f64, [f64; CHANNELS])] {
        &self.buffer
    }

    /// Export recorded data to CSV with default `port N` labels
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let labels: Vec<String> = (0..CHANNELS).map(|i| format!("port {i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        self.save_with_labels(path, &refs)
    }

    /// Export recorded data to CSV with caller-provided channel labels
    pub fn save_with_labels<P: AsRef<Path>>(&self, path: P, labels: &[&str]) -> io::Result<()> {
        assert_eq!(
            labels.len(),
            CHANNELS,
            "expected {CHANNELS} labels, got {}",
            labels.len()
        );
        let mut file = File::create(path)?;
        writeln!(file, "time [s],{}", labels.join(","))?;
        for (t, values) in &self.buffer {
            write!(file, "{t}")?;
            for v in values {
                write!(file, ",{v}")?;
            }
            writeln!(file)?;
        }
        Ok(())
    }
}

impl<const CHANNELS: usize> Block for Scope<CHANNELS> {
    const NUM_INPUTS: usize = CHANNELS;
    const NUM_OUTPUTS: usize = CHANNELS;

    fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut [f64] {
        &mut self.inputs
    }

    fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    fn outputs_mut(&mut self) -> &mut [f64] {
        &mut self.outputs
    }

    fn update(&mut self, t: f64) {
        self.outputs = self.inputs;
        match self.buffer.last_mut() {
            Some(last) if last.0 == t => *last = (t, self.inputs),
            _ => self.buffer.push((t, self.inputs)),
        }
    }

    fn reset(&mut self) {
        self.inputs = [0.0; CHANNELS];
        self.outputs = [0.0; CHANNELS];
        self.buffer.clear();
    }
}
