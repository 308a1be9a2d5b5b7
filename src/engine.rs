//! Polyphonic engine: the single context object owning all synthesis state.
//!
//! Per output frame the motion sequencer and the global LFOs advance, every
//! active voice renders oscillators, filters and envelopes in that order, and
//! the mixer turns the voice sum into the output frame. Nothing in the render
//! path allocates, locks or fails.

use crate::error::InitError;
use crate::mixer::Mixer;
use crate::modulation::{ModulationEngine, ModulationTargets};
use crate::motion::{MotionSequencer, StepClock};
use crate::oscillator::oscillator_bank::OscillatorSettings;
use crate::params::{ParamId, Params};
use crate::voice::Voice;
use crate::voice_allocator::{Allocation, VoiceAllocator};
use crate::{MAX_VOICES, SAMPLE_RATE_HZ};

/// Pitch bend range in semitones in each direction.
pub const PITCH_BEND_RANGE: f32 = 2.0;

const PITCH_BEND_CENTER: u16 = 0x2000;

/// Host setup checked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Must equal [`SAMPLE_RATE_HZ`].
    pub sample_rate: u32,

    /// Must be 2.
    pub input_channels: u8,

    /// 1 for [`SynthEngine::render`], 2 for [`SynthEngine::render_stereo`].
    pub output_channels: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE_HZ,
            input_channels: 2,
            output_channels: 1,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), InitError> {
        if self.sample_rate != SAMPLE_RATE_HZ {
            return Err(InitError::SampleRate {
                expected: SAMPLE_RATE_HZ,
                actual: self.sample_rate,
            });
        }
        if self.input_channels != 2 || !(1..=2).contains(&self.output_channels) {
            return Err(InitError::Geometry {
                inputs: self.input_channels,
                outputs: self.output_channels,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SynthEngine {
    config: EngineConfig,
    params: Params,
    voices: VoiceAllocator,
    modulation: ModulationEngine,
    motion: MotionSequencer,
    mixer: Mixer,

    /// Pitch bend in semitones.
    pitch_bend: f32,

    sample_counter: u64,
}

impl SynthEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, InitError> {
        if let Err(error) = config.validate() {
            log::warn!("Engine setup rejected: {error}");
            return Err(error);
        }

        let mut engine = Self {
            config: *config,
            params: Params::default(),
            voices: VoiceAllocator::new(),
            modulation: ModulationEngine::new(),
            motion: MotionSequencer::new(),
            mixer: Mixer::new(),
            pitch_bend: 0.0,
            sample_counter: 0,
        };
        engine.init();

        log::debug!(
            "Engine ready: {} Hz, {} voices, {} output channel(s)",
            config.sample_rate,
            MAX_VOICES,
            config.output_channels
        );

        Ok(engine)
    }

    /// Returns every voice, parameter and buffer to its power-on state.
    pub fn init(&mut self) {
        self.params = Params::default();
        self.voices.init();
        self.modulation.init();
        self.motion.init(self.params.motion_pattern());
        self.mixer.init();
        self.pitch_bend = 0.0;
        self.sample_counter = 0;
    }

    /// Zeroes the oscillator phases of all voices.
    pub fn reset(&mut self) {
        self.voices.reset_phases();
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> Allocation {
        let allocation = self.voices.note_on(note.min(127), velocity.min(127));
        if let Some(stolen) = allocation.stolen_note {
            log::trace!("Note {note} steals voice {} from note {stolen}", allocation.index);
        } else {
            log::trace!("Note {note} on voice {}", allocation.index);
        }
        allocation
    }

    pub fn note_off(&mut self, note: u8) {
        log::trace!("Note off {note}");
        self.voices.note_off(note);
    }

    pub fn all_notes_off(&mut self) {
        log::trace!("All notes off");
        self.voices.all_notes_off();
    }

    /// Sets a parameter. Unknown ids are ignored, values are clamped to the
    /// parameter's range.
    pub fn set_param(&mut self, id: u8, value: i32) {
        let Ok(id) = ParamId::try_from(id) else {
            log::debug!("Ignoring unknown parameter {id}");
            return;
        };

        let changed = self.params.set(id, value);

        // Motion starts stopped, so the first write of the default pattern
        // must still start it. Selecting is idempotent.
        if id == ParamId::Motion {
            self.motion.select(self.params.motion_pattern());
        }

        if changed {
            log::debug!("{id:?} = {}", self.params.get(id));
        }
    }

    /// Current value of a parameter, 0 for unknown ids.
    pub fn get_param(&self, id: u8) -> i32 {
        ParamId::try_from(id)
            .map(|id| self.params.get(id))
            .unwrap_or(0)
    }

    /// 14-bit pitch bend, centred at 8192.
    pub fn pitch_bend(&mut self, bend: u16) {
        let bend = bend.min(0x3FFF) as f32 - PITCH_BEND_CENTER as f32;
        self.pitch_bend = bend / PITCH_BEND_CENTER as f32 * PITCH_BEND_RANGE;
    }

    /// Tempo in BPM as 16.16 fixed point. Turns on tempo sync, see
    /// [`StepClock::Tempo`]; 0 restores the free-running motion step length.
    pub fn set_tempo(&mut self, tempo: u32) {
        self.motion.set_tempo(tempo);
    }

    /// Host clock tick at 4 PPQN, one motion step per tick under tempo sync
    /// or [`StepClock::External`].
    pub fn tempo_tick(&mut self) {
        self.motion.tick();
    }

    pub fn set_motion_clock(&mut self, clock: StepClock) {
        self.motion.set_clock(clock);
    }

    /// Renders a mono block.
    pub fn render(&mut self, out: &mut [f32]) {
        let oscillator_settings = self.oscillator_settings();
        for sample in out.iter_mut() {
            *sample = self.process_frame(&oscillator_settings).0;
        }
    }

    /// Renders a stereo block. Buffers of unequal length are both filled
    /// completely; the longer one continues past the end of the shorter.
    pub fn render_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        let oscillator_settings = self.oscillator_settings();
        let frames = left.len().max(right.len());
        for n in 0..frames {
            let (l, r) = self.process_frame(&oscillator_settings);
            if let Some(sample) = left.get_mut(n) {
                *sample = l;
            }
            if let Some(sample) = right.get_mut(n) {
                *sample = r;
            }
        }
    }

    fn oscillator_settings(&self) -> OscillatorSettings {
        OscillatorSettings {
            waveforms: self.params.waveforms(),
            detune: self.params.normalized(ParamId::SupersawDetune),
            feedback: self.params.normalized(ParamId::Feedback),
            cross_mod: self.params.normalized(ParamId::CrossMod),
        }
    }

    #[inline]
    fn process_frame(&mut self, oscillator_settings: &OscillatorSettings) -> (f32, f32) {
        self.motion.advance();
        let step = self.motion.current_step_values();

        let lfo1_rate = step.map_or(self.params.normalized(ParamId::Lfo1Rate), |s| s.lfo1_rate);
        self.modulation
            .advance(lfo1_rate, self.params.normalized(ParamId::Lfo2Rate));

        let targets = ModulationTargets {
            cutoff: step.map_or(self.params.normalized(ParamId::Cutoff), |s| s.cutoff),
            resonance: step.map_or(self.params.normalized(ParamId::Resonance), |s| s.resonance),
            env_amount: self.params.normalized(ParamId::EnvAmount),
            vibrato_depth: self.params.normalized(ParamId::Lfo2PitchDepth),
            pitch_offset: self.pitch_bend,
        };

        let mut sum = 0.0;
        let mut active_count = 0;
        for (index, voice) in self.voices.voices_mut().iter_mut().enumerate() {
            if let Some(sample) =
                voice.render(index, &self.modulation, &targets, oscillator_settings)
            {
                sum += sample;
                active_count += 1;
            }
        }

        self.sample_counter += 1;
        self.mixer.process(sum, active_count)
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn voices(&self) -> &[Voice; MAX_VOICES] {
        self.voices.voices()
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.active_count()
    }

    #[inline]
    pub fn steal_count(&self) -> u32 {
        self.voices.steal_count()
    }

    #[inline]
    pub fn motion(&self) -> &MotionSequencer {
        &self.motion
    }

    #[inline]
    pub fn modulation(&self) -> &ModulationEngine {
        &self.modulation
    }

    /// Frames rendered since initialization.
    #[inline]
    pub fn sample_counter(&self) -> u64 {
        self.sample_counter
    }
}
