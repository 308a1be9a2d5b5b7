//! Pair of cross-modulated oscillators owned by one voice.

use super::feedback_oscillator::FeedbackState;
use super::supersaw_oscillator::SupersawOscillator;
use super::waveform::{Waveform, WaveformPair};
use super::MAX_FREQUENCY;
use crate::utils::wrap_phase;

/// Detune amount above which a sawtooth oscillator 1 becomes a supersaw.
pub const SUPERSAW_THRESHOLD: f32 = 0.7;

/// Settings shared by all voices, in normalized units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OscillatorSettings {
    pub waveforms: WaveformPair,
    pub detune: f32,
    pub feedback: f32,
    pub cross_mod: f32,
}

#[derive(Debug, Default, Clone)]
pub struct OscillatorBank {
    phase_1: f32,
    phase_2: f32,
    supersaw: SupersawOscillator,
    feedback: FeedbackState,
}

impl OscillatorBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all phases and the feedback memory.
    pub fn reset(&mut self) {
        self.reset_phases();
        self.feedback.reset();
    }

    pub fn reset_phases(&mut self) {
        self.phase_1 = 0.0;
        self.phase_2 = 0.0;
        self.supersaw.reset();
    }

    #[inline]
    pub fn phase_1(&self) -> f32 {
        self.phase_1
    }

    #[inline]
    pub fn phase_2(&self) -> f32 {
        self.phase_2
    }

    #[inline]
    pub fn supersaw(&self) -> &SupersawOscillator {
        &self.supersaw
    }

    #[inline]
    pub fn feedback(&self) -> FeedbackState {
        self.feedback
    }

    /// Renders one raw sample at phase increment `w0`.
    ///
    /// Oscillator 1 runs first; its output bends the frequency of
    /// oscillator 2 by `1 + osc1 * cross_mod / 2`.
    #[inline]
    pub fn render(&mut self, w0: f32, settings: &OscillatorSettings) -> f32 {
        let w0 = w0.clamp(0.0, MAX_FREQUENCY);
        let osc1_waveform = settings.waveforms.osc1();

        let osc1 = if osc1_waveform == Waveform::Saw && settings.detune > SUPERSAW_THRESHOLD {
            self.supersaw.render(w0, settings.detune)
        } else {
            let out = osc1_waveform.render(self.phase_1, w0, &mut self.feedback, settings.feedback);
            self.phase_1 = wrap_phase(self.phase_1 + w0);
            out
        };

        let osc2_w0 = (w0 * (1.0 + osc1 * settings.cross_mod * 0.5)).clamp(0.0, MAX_FREQUENCY);
        let osc2 = settings.waveforms.osc2().render(
            self.phase_2,
            osc2_w0,
            &mut self.feedback,
            settings.feedback * 0.5,
        );
        self.phase_2 = wrap_phase(self.phase_2 + osc2_w0);

        (osc1 + osc2) * 0.5
    }
}
