//! Piecewise waveform programs and the stimulus function library
//!
//! A [`WaveformProgram`] is an ordered table of time-windowed segments plus a
//! tail value that holds once every window has elapsed. Each segment covers
//! the window from the previous segment's `end_time` (0.0 for the first) up
//! to and including its own `end_time`, and is evaluated by one of the pure
//! shape functions in this module. Programs are immutable once built and may
//! be shared across generators without synchronization.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Constant segment level, independent of time
#[inline]
pub fn constant_value(value: f64) -> f64 {
    value
}

/// Linear ramp from `(t1, v1)` to `(t2, v2)` evaluated at `t`.
///
/// The window must be well-formed (`t2 > t1`) and `t` must lie inside it.
/// Evaluating outside the window indicates a broken stimulus table, so this
/// panics with the offending time and window bounds rather than extrapolating.
///
/// Endpoint-exact: `linear(v1, t1, v2, t2, t1) == v1` and
/// `linear(v1, t1, v2, t2, t2) == v2` hold bitwise.
pub fn linear(v1: f64, t1: f64, v2: f64, t2: f64, t: f64) -> f64 {
    assert!(t2 > t1, "degenerate ramp window: t1={t1}, t2={t2}");
    assert!(
        (t1..=t2).contains(&t),
        "ramp evaluated at t={t} outside its window [{t1}, {t2}]"
    );
    if t == t2 {
        return v2;
    }
    v1 + (v2 - v1) / (t2 - t1) * (t - t1)
}

/// `amplitude * sin(2*pi*frequency*t + phase)`
#[inline]
pub fn sinusoid(amplitude: f64, frequency: f64, phase: f64, t: f64) -> f64 {
    amplitude * (2.0 * PI * frequency * t + phase).sin()
}

/// Gaussian peak of height `amplitude` centered at `t == center`.
///
/// Time is first scaled as `x = (t - center) / time_scale`, then shaped as
/// `exp(-x^2 / (2*sigma^2))`, so the value at the center is exactly
/// `amplitude`.
#[inline]
pub fn gaussian(amplitude: f64, sigma: f64, center: f64, time_scale: f64, t: f64) -> f64 {
    let x = (t - center) / time_scale;
    amplitude * (-(x * x) / (2.0 * sigma * sigma)).exp()
}

/// Shape of one time-windowed segment of a [`WaveformProgram`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SegmentShape {
    /// Hold a fixed level across the whole window
    Constant { value: f64 },
    /// Ramp linearly from `start_value` at the window start to `end_value`
    /// at the window end; the window bounds are the line's endpoints
    Linear { start_value: f64, end_value: f64 },
    /// Sinusoid in absolute time (not window-relative)
    Sinusoid {
        amplitude: f64,
        frequency: f64,
        phase: f64,
    },
    /// Gaussian peak, see [`gaussian`]
    Gaussian {
        amplitude: f64,
        sigma: f64,
        center: f64,
        time_scale: f64,
    },
}

impl SegmentShape {
    /// Evaluate this shape at `t` inside the window `[window_start, window_end]`
    fn value(&self, window_start: f64, window_end: f64, t: f64) -> f64 {
        match *self {
            SegmentShape::Constant { value } => constant_value(value),
            SegmentShape::Linear {
                start_value,
                end_value,
            } => linear(start_value, window_start, end_value, window_end, t),
            SegmentShape::Sinusoid {
                amplitude,
                frequency,
                phase,
            } => sinusoid(amplitude, frequency, phase, t),
            SegmentShape::Gaussian {
                amplitude,
                sigma,
                center,
                time_scale,
            } => gaussian(amplitude, sigma, center, time_scale, t),
        }
    }
}

/// One time-windowed entry of a [`WaveformProgram`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSegment {
    /// End of this segment's window; the window starts where the previous
    /// segment ends (0.0 for the first segment)
    pub end_time: f64,
    /// Function evaluated inside the window
    pub shape: SegmentShape,
}

impl SignalSegment {
    /// Constant level until `end_time`
    pub fn constant(end_time: f64, value: f64) -> Self {
        Self {
            end_time,
            shape: SegmentShape::Constant { value },
        }
    }

    /// Linear ramp across the window, from `start_value` to `end_value`
    pub fn linear(end_time: f64, start_value: f64, end_value: f64) -> Self {
        Self {
            end_time,
            shape: SegmentShape::Linear {
                start_value,
                end_value,
            },
        }
    }

    /// Sinusoid until `end_time`
    pub fn sinusoid(end_time: f64, amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            end_time,
            shape: SegmentShape::Sinusoid {
                amplitude,
                frequency,
                phase,
            },
        }
    }

    /// Gaussian peak until `end_time`
    pub fn gaussian(end_time: f64, amplitude: f64, sigma: f64, center: f64, time_scale: f64) -> Self {
        Self {
            end_time,
            shape: SegmentShape::Gaussian {
                amplitude,
                sigma,
                center,
                time_scale,
            },
        }
    }
}

/// Errors detected while building a [`WaveformProgram`]
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("segment {index}: end time {end_time} does not increase past {window_start}")]
    NonmonotonicEndTime {
        index: usize,
        end_time: f64,
        window_start: f64,
    },

    #[error("segment {index}: end time {end_time} is not finite")]
    NonFiniteEndTime { index: usize, end_time: f64 },
}

/// Ordered table of time-windowed segments plus a tail value
///
/// The tail value is returned for any time past the last segment's window,
/// so a program defines an output for all non-negative time. End times must
/// strictly increase; violations are rejected at construction, never at
/// evaluation.
///
/// # Example
///
/// ```ignore
/// // 1 us gate that ramps 0 -> 1, then holds 0.5 forever
/// let program = WaveformProgram::new(
///     vec![SignalSegment::linear(1e-6, 0.0, 1.0)],
///     0.5,
/// )?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformProgram {
    segments: Vec<SignalSegment>,
    tail_value: f64,
}

impl WaveformProgram {
    /// Build a program from segments and the tail value that holds after the
    /// last window.
    ///
    /// Rejects non-finite or non-increasing end times; an empty segment list
    /// is a valid program that holds the tail value for all time.
    pub fn new(segments: Vec<SignalSegment>, tail_value: f64) -> Result<Self, ProgramError> {
        let mut window_start = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            if !segment.end_time.is_finite() {
                return Err(ProgramError::NonFiniteEndTime {
                    index,
                    end_time: segment.end_time,
                });
            }
            if segment.end_time <= window_start {
                return Err(ProgramError::NonmonotonicEndTime {
                    index,
                    end_time: segment.end_time,
                    window_start,
                });
            }
            window_start = segment.end_time;
        }
        Ok(Self {
            segments,
            tail_value,
        })
    }

    /// Program that holds `value` for all time
    pub fn level(value: f64) -> Self {
        Self {
            segments: Vec::new(),
            tail_value: value,
        }
    }

    /// Windowed segments in evaluation order
    pub fn segments(&self) -> &[SignalSegment] {
        &self.segments
    }

    /// Value held once every window has elapsed
    pub fn tail_value(&self) -> f64 {
        self.tail_value
    }

    /// Time covered by the windowed segments
    pub fn duration(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end_time)
    }

    /// Evaluate the program at time `t`.
    ///
    /// Linear scan from the first segment; `t` equal to a segment's
    /// `end_time` is evaluated by that segment, not its successor. Past the
    /// last window the tail value holds. The scan is stateless, so
    /// re-evaluating at any time yields identical results regardless of
    /// query order.
    ///
    /// Negative times are covered by no window and indicate a driver bug, so
    /// they panic rather than returning a stale value.
    pub fn value_at(&self, t: f64) -> f64 {
        assert!(t >= 0.0, "waveform program evaluated at negative time {t}");
        let mut window_start = 0.0;
        for segment in &self.segments {
            if t > segment.end_time {
                window_start = segment.end_time;
                continue;
            }
            return segment.shape.value(window_start, segment.end_time, t);
        }
        self.tail_value
    }
}
