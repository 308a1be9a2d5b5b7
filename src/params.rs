//! Host parameters.
//!
//! The host sets and reads integers. Continuous parameters span
//! `0..=PARAM_MAX` and are normalized to `0.0..=1.0` internally; selectors
//! keep their integer value.

use crate::motion::MOTION_PATTERNS;
use crate::oscillator::waveform::WaveformPair;

/// Upper end of the continuous parameter range.
pub const PARAM_MAX: i32 = 1023;

pub const PARAM_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    SupersawDetune = 0,
    Cutoff = 1,
    Resonance = 2,
    EnvAmount = 3,
    Feedback = 4,
    Lfo1Rate = 5,
    Lfo2Rate = 6,
    CrossMod = 7,

    /// Waveform pair selector, see [`WaveformPair`].
    Waveform = 8,

    /// Motion pattern; values at or above [`MOTION_PATTERNS`] stop the
    /// sequencer.
    Motion = 9,

    Lfo2PitchDepth = 10,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::SupersawDetune,
        ParamId::Cutoff,
        ParamId::Resonance,
        ParamId::EnvAmount,
        ParamId::Feedback,
        ParamId::Lfo1Rate,
        ParamId::Lfo2Rate,
        ParamId::CrossMod,
        ParamId::Waveform,
        ParamId::Motion,
        ParamId::Lfo2PitchDepth,
    ];

    /// Inclusive range of accepted values.
    pub fn range(self) -> (i32, i32) {
        match self {
            ParamId::Waveform => (0, WaveformPair::COUNT as i32 - 1),
            ParamId::Motion => (0, MOTION_PATTERNS as i32),
            _ => (0, PARAM_MAX),
        }
    }

    pub fn default_value(self) -> i32 {
        match self {
            ParamId::SupersawDetune => 819,
            ParamId::Cutoff => 102,
            ParamId::Resonance => 614,
            ParamId::EnvAmount => 768,
            ParamId::Feedback => 512,
            ParamId::Lfo1Rate => 307,
            ParamId::Lfo2Rate => 409,
            ParamId::CrossMod => 256,
            ParamId::Waveform => 0,
            ParamId::Motion => 5,
            ParamId::Lfo2PitchDepth => 0,
        }
    }

    pub fn is_selector(self) -> bool {
        matches!(self, ParamId::Waveform | ParamId::Motion)
    }
}

impl TryFrom<u8> for ParamId {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(id as usize).copied().ok_or(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    values: [i32; PARAM_COUNT],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            values: ParamId::ALL.map(ParamId::default_value),
        }
    }
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` clamped to the range of `id`. Returns `false` when the
    /// stored value did not change.
    pub fn set(&mut self, id: ParamId, value: i32) -> bool {
        let (min, max) = id.range();
        let value = value.clamp(min, max);
        let slot = &mut self.values[id as usize];
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> i32 {
        self.values[id as usize]
    }

    /// Value of a continuous parameter in `0.0..=1.0`.
    #[inline]
    pub fn normalized(&self, id: ParamId) -> f32 {
        self.get(id) as f32 / PARAM_MAX as f32
    }

    #[inline]
    pub fn waveforms(&self) -> WaveformPair {
        WaveformPair::new(self.get(ParamId::Waveform) as u8)
    }

    #[inline]
    pub fn motion_pattern(&self) -> u8 {
        self.get(ParamId::Motion) as u8
    }
}
