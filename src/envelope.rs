//! ADSR envelope generator.
//!
//! Attack follows a squared ramp. Decay and release are base-2 exponential
//! curves that cover five halvings over the configured time.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::sanitize;
use crate::utils::units::seconds_to_samples;
use crate::SAMPLE_RATE;

/// Level at which the attack hands over to the decay.
pub const ATTACK_PEAK: f32 = 0.99;

/// Level below which a releasing envelope is considered silent.
pub const RELEASE_FLOOR: f32 = 0.001;

const MIN_ATTACK_SAMPLES: u32 = 10;

/// Number of halvings over a decay or release time.
const DECAY_OCTAVES: f32 = 5.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Sustain,
    Release,

    #[default]
    Off,
}

/// Segment times in seconds and sustain level in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSettings {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl EnvelopeSettings {
    pub const FILTER: Self = Self {
        attack: 0.002,
        decay: 0.3,
        sustain: 0.3,
        release: 0.5,
    };

    pub const AMP: Self = Self {
        attack: 0.001,
        decay: 0.1,
        sustain: 0.7,
        release: 0.3,
    };
}

#[derive(Debug, Default, Clone)]
pub struct Envelope {
    level: f32,
    stage: EnvelopeStage,
    counter: u32,
    release_level: f32,

    attack_samples: u32,
    decay_samples: u32,
    release_samples: u32,
    sustain: f32,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, settings: &EnvelopeSettings) {
        self.attack_samples =
            seconds_to_samples(settings.attack, SAMPLE_RATE).max(MIN_ATTACK_SAMPLES);
        self.decay_samples = seconds_to_samples(settings.decay, SAMPLE_RATE).max(1);
        self.release_samples = seconds_to_samples(settings.release, SAMPLE_RATE).max(1);
        self.sustain = settings.sustain.clamp(0.0, 1.0);
        self.kill();
    }

    /// Restarts the attack from zero.
    pub fn trigger(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeStage::Attack;
        self.counter = 0;
        self.release_level = 0.0;
    }

    /// Enters the release stage from the current level. Has no effect on an
    /// envelope that is already releasing or off.
    pub fn release(&mut self) {
        if self.stage < EnvelopeStage::Release {
            self.stage = EnvelopeStage::Release;
            self.counter = 0;
            self.release_level = self.level;
        }
    }

    /// Silences the envelope immediately.
    pub fn kill(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeStage::Off;
        self.counter = 0;
        self.release_level = 0.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                self.counter += 1;
                let t = self.counter as f32 / self.attack_samples as f32;
                self.level = t * t;
                if self.level >= ATTACK_PEAK || self.counter >= self.attack_samples {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                    self.counter = 0;
                }
            }
            EnvelopeStage::Decay => {
                self.counter += 1;
                if self.counter >= self.decay_samples {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                    self.counter = 0;
                } else {
                    let t = self.counter as f32 / self.decay_samples as f32;
                    self.level =
                        self.sustain + (1.0 - self.sustain) * (-t * DECAY_OCTAVES).exp2();
                }
            }
            EnvelopeStage::Sustain => {
                self.counter = self.counter.saturating_add(1);
                self.level = self.sustain;
            }
            EnvelopeStage::Release => {
                self.counter += 1;
                let t = self.counter as f32 / self.release_samples as f32;
                self.level = self.release_level * (-t * DECAY_OCTAVES).exp2();
                // At the end of the release time the level drops from
                // release_level / 32 straight to zero.
                if self.level < RELEASE_FLOOR || self.counter >= self.release_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Off;
                    self.counter = 0;
                }
            }
            EnvelopeStage::Off => {
                self.level = 0.0;
            }
        }

        self.level = sanitize(self.level);
        self.level
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[inline]
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Samples spent in the current stage.
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.counter
    }

    #[inline]
    pub fn is_off(&self) -> bool {
        self.stage == EnvelopeStage::Off
    }
}
