//! Per-voice filters: a 4-pole ladder low-pass and a 2-pole high-pass.
//!
//! The ladder stays bounded purely through its clamps. Per sample, in this
//! order: the feedback gain is limited, the stage 0 input is saturated, and
//! every stage is clamped to `±STAGE_LIMIT` right after its update.
//! Reordering these lets the loop diverge under sustained high resonance.

use crate::utils::filter::{tan, FrequencyApproximation};
use crate::utils::{one_pole, sanitize, soft_clip};
use crate::SAMPLE_RATE;

/// Bound of every filter state value.
pub const STAGE_LIMIT: f32 = 2.0;

/// Feedback gain at full resonance.
pub const MAX_FEEDBACK: f32 = 3.5;

/// Upper bound of the ladder integrator gain.
pub const MAX_GAIN: f32 = 1.5;

const MIN_CUTOFF_HZ: f32 = 20.0;
const MAX_CUTOFF_HZ: f32 = 20000.0;

/// Normalized cutoff of the high-pass stage, 109.5 Hz.
pub const HIGH_PASS_CUTOFF: f32 = 0.05;

/// Maps a normalized cutoff in `0.0..=1.0` to the ladder integrator gain.
#[inline]
pub fn ladder_gain(cutoff: f32) -> f32 {
    let frequency = (MIN_CUTOFF_HZ + cutoff.clamp(0.0, 1.0) * (MAX_CUTOFF_HZ - MIN_CUTOFF_HZ))
        .min(MAX_CUTOFF_HZ);
    let g = 0.9892 * tan(frequency / SAMPLE_RATE, FrequencyApproximation::Exact);
    g.min(MAX_GAIN)
}

/// Global feedback of the ladder for integrator gain `g`.
#[inline]
pub fn ladder_feedback(resonance: f32, g: f32) -> f32 {
    let k = resonance.clamp(0.0, 1.0) * MAX_FEEDBACK;
    (k * (1.0 - 0.3 * g * g)).clamp(0.0, MAX_FEEDBACK)
}

#[derive(Debug, Default, Clone)]
pub struct LadderFilter {
    stages: [f32; 4],
}

impl LadderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.stages = [0.0; 4];
    }

    #[inline]
    pub fn stages(&self) -> &[f32; 4] {
        &self.stages
    }

    #[inline]
    pub fn process(&mut self, input: f32, cutoff: f32, resonance: f32) -> f32 {
        let g = ladder_gain(cutoff);
        let feedback = ladder_feedback(resonance, g);

        let mut stage_input = soft_clip(sanitize(input) - feedback * self.stages[3]);

        for stage in self.stages.iter_mut() {
            one_pole(stage, stage_input, g);
            *stage = stage.clamp(-STAGE_LIMIT, STAGE_LIMIT);
            stage_input = *stage;
        }

        if self.stages.iter().any(|stage| !stage.is_finite()) {
            self.reset();
        } else {
            for stage in self.stages.iter_mut() {
                *stage = sanitize(*stage);
            }
        }

        self.stages[3]
    }
}

/// Two cascaded one-poles whose low-passed output is subtracted from the
/// input.
#[derive(Debug, Default, Clone)]
pub struct HighPassFilter {
    g: f32,
    state: [f32; 2],
}

impl HighPassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, cutoff: f32) {
        let frequency = 10.0 + cutoff.clamp(0.0, 1.0) * 1990.0;
        self.g = tan(frequency / SAMPLE_RATE, FrequencyApproximation::Fast);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = [0.0; 2];
    }

    #[inline]
    pub fn state(&self) -> &[f32; 2] {
        &self.state
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input = sanitize(input);
        let [z1, z2] = &mut self.state;

        one_pole(z1, input, self.g);
        *z1 = sanitize(z1.clamp(-STAGE_LIMIT, STAGE_LIMIT));
        one_pole(z2, *z1, self.g);
        *z2 = sanitize(z2.clamp(-STAGE_LIMIT, STAGE_LIMIT));

        input - *z2
    }
}
