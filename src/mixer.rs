//! Voice summation and output stage.
//!
//! The voice sum is normalized by the number of sounding voices, DC blocked,
//! sent through the chorus and finally soft limited.

use crate::fx::chorus::Chorus;
use crate::utils::filter::DcBlocker;
use crate::utils::soft_clip;

pub const DC_BLOCKER_POLE: f32 = 0.995;

const LIMITER_DRIVE: f32 = 1.2;
const OUTPUT_GAIN: f32 = 2.0;

/// Soft clip followed by makeup gain, bounded to `[-1, 1]`.
#[inline]
pub fn limit(x: f32) -> f32 {
    (soft_clip(x * LIMITER_DRIVE) * OUTPUT_GAIN).clamp(-1.0, 1.0)
}

#[derive(Debug, Default)]
pub struct Mixer {
    dc_blocker: DcBlocker,
    chorus: Chorus,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.dc_blocker.init(DC_BLOCKER_POLE);
        self.chorus.init();
    }

    /// Turns the sum of `active_count` voice outputs into a stereo frame.
    ///
    /// With no active voice the chain still advances on silence, but the
    /// frame is exactly zero.
    #[inline]
    pub fn process(&mut self, sum: f32, active_count: usize) -> (f32, f32) {
        let mono = if active_count > 0 {
            sum / active_count as f32
        } else {
            0.0
        };

        let mono = self.dc_blocker.process(mono);
        let (left, right) = self.chorus.process(mono);

        if active_count == 0 {
            return (0.0, 0.0);
        }

        (limit(left), limit(right))
    }
}
