//! Simulation constants and defaults

/// Default fine-grained stimulus timestep (10 ps of simulated time)
pub const SIM_TIMESTEP: f64 = 1e-11;

/// Relative tolerance for sample-clock edge detection
///
/// Relative to the sampling period so that picosecond-scale clocks are not
/// swamped by an absolute epsilon.
pub const EDGE_TOLERANCE: f64 = 1e-9;
