//! Per-voice modulation: poly LFOs, filter envelope and motion values
//! combined into cutoff, resonance and pitch offsets.

use crate::lfo::{LfoShape, LfoTables};
use crate::utils::wrap_phase;
use crate::{MAX_VOICES, SAMPLE_RATE};

/// Cutoff deviation at full LFO1 swing.
pub const LFO1_CUTOFF_DEPTH: f32 = 0.2;

/// Vibrato range in semitones at full LFO2 pitch depth.
pub const LFO2_PITCH_RANGE: f32 = 1.0;

const MIN_LFO_HZ: f32 = 0.1;
const MAX_LFO_HZ: f32 = 20.0;

/// Maps a normalized LFO rate to a phase increment per sample.
#[inline]
pub fn lfo_increment(rate: f32) -> f32 {
    (MIN_LFO_HZ + rate.clamp(0.0, 1.0) * (MAX_LFO_HZ - MIN_LFO_HZ)) / SAMPLE_RATE
}

/// Phase of a voice's copy of a global LFO.
#[inline]
pub fn voice_phase(global_phase: f32, voice_index: usize) -> f32 {
    wrap_phase(global_phase + voice_index as f32 / MAX_VOICES as f32)
}

/// LFO phases last used by a voice.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VoiceLfoState {
    pub lfo1_phase: f32,
    pub lfo2_phase: f32,
}

/// Static modulation targets shared by all voices for the current sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ModulationTargets {
    /// Knob or motion cutoff before envelope and LFO.
    pub cutoff: f32,

    /// Knob or motion resonance.
    pub resonance: f32,

    pub env_amount: f32,

    /// LFO2 vibrato depth in `0.0..=1.0`.
    pub vibrato_depth: f32,

    /// Pitch offset in semitones, e.g. from the pitch bender.
    pub pitch_offset: f32,
}

/// Modulated values for one voice and one sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Modulation {
    pub cutoff: f32,
    pub resonance: f32,

    /// Pitch offset in semitones.
    pub pitch: f32,
}

#[derive(Debug)]
pub struct ModulationEngine {
    tables: &'static LfoTables,
    lfo1_phase: f32,
    lfo2_phase: f32,
}

impl Default for ModulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModulationEngine {
    pub fn new() -> Self {
        Self {
            tables: LfoTables::get(),
            lfo1_phase: 0.0,
            lfo2_phase: 0.0,
        }
    }

    pub fn init(&mut self) {
        self.lfo1_phase = 0.0;
        self.lfo2_phase = 0.0;
    }

    #[inline]
    pub fn global_phases(&self) -> (f32, f32) {
        (self.lfo1_phase, self.lfo2_phase)
    }

    /// Moves both global LFOs forward by one sample.
    #[inline]
    pub fn advance(&mut self, lfo1_rate: f32, lfo2_rate: f32) {
        self.lfo1_phase = wrap_phase(self.lfo1_phase + lfo_increment(lfo1_rate));
        self.lfo2_phase = wrap_phase(self.lfo2_phase + lfo_increment(lfo2_rate));
    }

    /// Computes the modulation of voice `voice_index`.
    ///
    /// Envelope and LFO act additively on the cutoff, which is clamped only
    /// after both have been applied.
    #[inline]
    pub fn modulate(
        &self,
        voice_index: usize,
        state: &mut VoiceLfoState,
        filter_env: f32,
        targets: &ModulationTargets,
    ) -> Modulation {
        state.lfo1_phase = voice_phase(self.lfo1_phase, voice_index);
        state.lfo2_phase = voice_phase(self.lfo2_phase, voice_index);

        let lfo1 = self.tables.read(LfoShape::Triangle, state.lfo1_phase);
        let lfo2 = self.tables.read(LfoShape::Sine, state.lfo2_phase);

        let cutoff = targets.cutoff + filter_env * targets.env_amount + lfo1 * LFO1_CUTOFF_DEPTH;

        Modulation {
            cutoff: cutoff.clamp(0.0, 1.0),
            resonance: targets.resonance.clamp(0.0, 1.0),
            pitch: targets.pitch_offset + lfo2 * targets.vibrato_depth * LFO2_PITCH_RANGE,
        }
    }
}
