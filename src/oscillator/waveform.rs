//! Single-cycle waveforms of the two oscillators.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::feedback_oscillator::{render_feedback, FeedbackState};
use crate::utils::polyblep::poly_blep;

/// Duty cycle of the pulse waveform.
pub const PULSE_WIDTH: f32 = 0.3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Sawtooth. On oscillator 1 this becomes the supersaw when the detune
    /// amount is high enough.
    #[default]
    Saw,

    Square,
    Pulse,
    Feedback,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Saw,
        Waveform::Square,
        Waveform::Pulse,
        Waveform::Feedback,
    ];

    /// Maps the low two bits of `value` to a waveform.
    #[inline]
    pub fn from_bits(value: u8) -> Self {
        Self::ALL[(value & 0x3) as usize]
    }

    /// Renders one sample at `phase` and phase increment `w0`.
    ///
    /// Only the feedback waveform reads and updates `feedback`.
    #[inline]
    pub fn render(
        self,
        phase: f32,
        w0: f32,
        feedback: &mut FeedbackState,
        feedback_amount: f32,
    ) -> f32 {
        RENDERERS[self as usize](phase, w0, feedback, feedback_amount)
    }
}

type WaveRenderer = fn(f32, f32, &mut FeedbackState, f32) -> f32;

const RENDERERS: [WaveRenderer; 4] = [saw, square, pulse, render_feedback];

fn saw(phase: f32, w0: f32, _feedback: &mut FeedbackState, _amount: f32) -> f32 {
    2.0 * phase - 1.0 - poly_blep(phase, w0)
}

fn square(phase: f32, w0: f32, _feedback: &mut FeedbackState, _amount: f32) -> f32 {
    variable_pulse(phase, w0, 0.5)
}

fn pulse(phase: f32, w0: f32, _feedback: &mut FeedbackState, _amount: f32) -> f32 {
    variable_pulse(phase, w0, PULSE_WIDTH)
}

/// Band-limited pulse with a rising edge at phase 0 and a falling edge at
/// `pw`.
#[inline]
fn variable_pulse(phase: f32, w0: f32, pw: f32) -> f32 {
    let naive = if phase < pw { 1.0 } else { -1.0 };
    let falling = (phase + (1.0 - pw)).fract();
    naive + poly_blep(phase, w0) - poly_blep(falling, w0)
}

/// Oscillator 1 and oscillator 2 waveforms packed into a selector value.
///
/// Bits 3..2 select oscillator 1, bits 1..0 oscillator 2, giving 16 pairs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WaveformPair(u8);

impl WaveformPair {
    pub const COUNT: u8 = 16;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::COUNT - 1))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn osc1(self) -> Waveform {
        Waveform::from_bits(self.0 >> 2)
    }

    #[inline]
    pub fn osc2(self) -> Waveform {
        Waveform::from_bits(self.0)
    }
}
