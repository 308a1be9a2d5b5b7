//! Seven detuned band-limited sawtooths.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::MAX_FREQUENCY;
use crate::utils::polyblep::poly_blep;
use crate::utils::units::semitones_to_ratio;

pub const SUPERSAW_SAWS: usize = 7;

/// Detune of each saw in semitones at full detune amount.
const DETUNE: [f32; SUPERSAW_SAWS] = [
    0.0,
    -0.110_023_13,
    0.110_023_13,
    -0.062_884_39,
    0.062_884_39,
    -0.019_523_56,
    0.019_523_56,
];

/// Gain of each saw. The centre saw is the loudest.
const MIX: [f32; SUPERSAW_SAWS] = [0.2188, 0.1405, 0.1405, 0.1405, 0.1405, 0.0906, 0.0906];

#[derive(Debug, Default, Clone)]
pub struct SupersawOscillator {
    phases: [f32; SUPERSAW_SAWS],
}

impl SupersawOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.phases = [0.0; SUPERSAW_SAWS];
    }

    #[inline]
    pub fn phases(&self) -> &[f32; SUPERSAW_SAWS] {
        &self.phases
    }

    #[inline]
    pub fn render(&mut self, w0: f32, detune_amount: f32) -> f32 {
        let mut output = 0.0;

        for ((phase, detune), mix) in self.phases.iter_mut().zip(DETUNE).zip(MIX) {
            let w0 = (w0 * semitones_to_ratio(detune * detune_amount)).clamp(0.0, MAX_FREQUENCY);

            let saw = 2.0 * *phase - 1.0 - poly_blep(*phase, w0);
            output += saw * mix;

            *phase += w0;
            *phase -= (*phase as u32) as f32;

            // Drifted phases restart at zero rather than wrapping.
            if !(0.0..1.0).contains(&*phase) {
                *phase = 0.0;
            }
        }

        output
    }
}
