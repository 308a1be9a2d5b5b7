//! Oscillators of a voice.

pub mod feedback_oscillator;
pub mod oscillator_bank;
pub mod supersaw_oscillator;
pub mod waveform;

/// Upper bound of every phase increment, in cycles per sample.
pub const MAX_FREQUENCY: f32 = 0.48;

use crate::utils::units::semitones_to_ratio;
use crate::A0;

/// Phase increment per sample of a (fractional) MIDI note.
#[inline]
pub fn note_to_frequency(mut midi_note: f32) -> f32 {
    midi_note -= 9.0;
    midi_note = midi_note.clamp(-128.0, 127.0);

    A0 * 0.25 * semitones_to_ratio(midi_note)
}
