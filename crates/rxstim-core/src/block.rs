//! Core Block trait
//!
//! All I/O sizes are fixed at compile time via associated constants.

/// Core block trait - all sizes known at compile time
///
/// # Design
///
/// - `NUM_INPUTS` and `NUM_OUTPUTS` are compile-time constants
/// - I/O stored as fixed-size arrays, not Vec
/// - No dynamic dispatch - blocks are concrete types
/// - Simulated time is threaded explicitly into [`update`](Block::update);
///   there is no process-wide clock
pub trait Block {
    /// Number of input ports (compile-time constant)
    const NUM_INPUTS: usize;

    /// Number of output ports (compile-time constant)
    const NUM_OUTPUTS: usize;

    /// Access inputs as slice
    fn inputs(&self) -> &[f64];

    /// Mutable access to inputs
    fn inputs_mut(&mut self) -> &mut [f64];

    /// Access outputs as slice
    fn outputs(&self) -> &[f64];

    /// Mutable access to outputs (rarely needed)
    fn outputs_mut(&mut self) -> &mut [f64];

    /// Evaluate the block at simulated time `t`: outputs = f(inputs, t)
    ///
    /// Called once per driver step.
    fn update(&mut self, t: f64);

    /// Reset to initial conditions
    fn reset(&mut self);

    /// Get single input value (convenience)
    #[inline]
    fn get_input(&self, port: usize) -> f64 {
        self.inputs()[port]
    }

    /// Set single input value (convenience)
    #[inline]
    fn set_input(&mut self, port: usize, value: f64) {
        self.inputs_mut()[port] = value;
    }

    /// Get single output value (convenience)
    #[inline]
    fn get_output(&self, port: usize) -> f64 {
        self.outputs()[port]
    }
}

/// Marker trait for algebraic blocks (no solver-integrated state)
pub trait AlgebraicBlock: Block {}
