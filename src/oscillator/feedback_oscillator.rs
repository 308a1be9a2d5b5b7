//! Sine oscillator modulated by its own previous output.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::{sanitize, wrap_phase};

/// Phase deviation, in cycles, at full feedback amount and full output.
pub const FEEDBACK_DEPTH: f32 = 3.0;

/// One-sample memory of the feedback oscillator.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FeedbackState {
    pub last_output: f32,
}

impl FeedbackState {
    pub fn reset(&mut self) {
        self.last_output = 0.0;
    }
}

/// Renders `sin(phase + last_output * amount * k)` and stores the result as
/// the new `last_output`.
///
/// The previous output must be read before the new one is written; callers
/// sharing one state between two oscillators see the first oscillator's
/// output in the second.
#[inline]
pub fn render_feedback(phase: f32, _w0: f32, state: &mut FeedbackState, amount: f32) -> f32 {
    let modulation = state.last_output * amount * FEEDBACK_DEPTH;
    let phase = wrap_phase(phase + modulation);
    let output = sanitize((2.0 * core::f32::consts::PI * phase).sin());
    state.last_output = output;
    output
}
