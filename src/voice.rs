//! One voice: oscillators, filters and envelopes for a single note.

use crate::envelope::{Envelope, EnvelopeSettings, EnvelopeStage, RELEASE_FLOOR};
use crate::filter::{HighPassFilter, LadderFilter, HIGH_PASS_CUTOFF};
use crate::modulation::{ModulationEngine, ModulationTargets, VoiceLfoState};
use crate::oscillator::note_to_frequency;
use crate::oscillator::oscillator_bank::{OscillatorBank, OscillatorSettings};
use crate::utils::sanitize;

#[derive(Debug, Default, Clone)]
pub struct Voice {
    oscillators: OscillatorBank,
    high_pass: HighPassFilter,
    ladder: LadderFilter,
    filter_envelope: Envelope,
    amp_envelope: Envelope,
    lfo: VoiceLfoState,

    note: u8,
    velocity: u8,
    active: bool,
    age: u64,
}

/// A voice that has been deactivated and cleared, waiting for its new note.
///
/// Obtained from [`Voice::clear`]; the only way back to a sounding voice is
/// [`ClearedVoice::activate`], so a voice cannot be reactivated with stale
/// oscillator, filter or envelope state.
#[derive(Debug)]
pub struct ClearedVoice<'a>(&'a mut Voice);

impl<'a> ClearedVoice<'a> {
    /// Assigns the new note and starts both envelopes.
    pub fn activate(self, note: u8, velocity: u8, age: u64) -> &'a mut Voice {
        let voice = self.0;
        voice.note = note.min(127);
        voice.velocity = velocity.min(127);
        voice.age = age;
        voice.filter_envelope.trigger();
        voice.amp_envelope.trigger();
        voice.active = true;
        voice
    }

    pub fn voice(&self) -> &Voice {
        &*self.0
    }
}

impl Voice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.filter_envelope.init(&EnvelopeSettings::FILTER);
        self.amp_envelope.init(&EnvelopeSettings::AMP);
        self.high_pass.init(HIGH_PASS_CUTOFF);
        self.clear();
    }

    /// Deactivates the voice, then zeroes oscillator, filter, envelope and
    /// LFO state.
    pub fn clear(&mut self) -> ClearedVoice<'_> {
        self.active = false;
        self.oscillators.reset();
        self.high_pass.reset();
        self.ladder.reset();
        self.filter_envelope.kill();
        self.amp_envelope.kill();
        self.lfo = VoiceLfoState::default();
        ClearedVoice(self)
    }

    /// Moves both envelopes into their release stage.
    pub fn release(&mut self) {
        self.filter_envelope.release();
        self.amp_envelope.release();
    }

    /// Stops the voice without a release tail.
    pub fn kill(&mut self) {
        self.active = false;
        self.filter_envelope.kill();
        self.amp_envelope.kill();
    }

    pub fn reset_phases(&mut self) {
        self.oscillators.reset_phases();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn note(&self) -> u8 {
        self.note
    }

    #[inline]
    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Trigger stamp; smaller values were triggered earlier.
    #[inline]
    pub fn age(&self) -> u64 {
        self.age
    }

    #[inline]
    pub fn oscillators(&self) -> &OscillatorBank {
        &self.oscillators
    }

    #[inline]
    pub fn ladder(&self) -> &LadderFilter {
        &self.ladder
    }

    #[inline]
    pub fn high_pass(&self) -> &HighPassFilter {
        &self.high_pass
    }

    #[inline]
    pub fn filter_envelope(&self) -> &Envelope {
        &self.filter_envelope
    }

    #[inline]
    pub fn amp_envelope(&self) -> &Envelope {
        &self.amp_envelope
    }

    #[inline]
    pub fn lfo(&self) -> &VoiceLfoState {
        &self.lfo
    }

    /// Gain applied for the note velocity, from 0.5 to 1.0.
    #[inline]
    pub fn velocity_gain(&self) -> f32 {
        0.5 + 0.5 * self.velocity as f32 / 127.0
    }

    /// Renders one sample, or returns `None` when the voice is or just went
    /// silent. A voice whose amplitude envelope is off, or below the release
    /// floor while releasing, returns to the pool here, on the same sample
    /// its envelope ends.
    #[inline]
    pub fn render(
        &mut self,
        voice_index: usize,
        modulation: &ModulationEngine,
        targets: &ModulationTargets,
        oscillator_settings: &OscillatorSettings,
    ) -> Option<f32> {
        if !self.active {
            return None;
        }
        if self.is_silent() {
            self.active = false;
            return None;
        }

        let filter_env = self.filter_envelope.process();
        let modulation = modulation.modulate(voice_index, &mut self.lfo, filter_env, targets);

        let w0 = note_to_frequency(self.note as f32 + modulation.pitch);
        let raw = self.oscillators.render(w0, oscillator_settings);

        let filtered = self.ladder.process(
            self.high_pass.process(raw),
            modulation.cutoff,
            modulation.resonance,
        );

        let amp_env = self.amp_envelope.process();

        // The envelope may end on this very sample; the voice must not count
        // as sounding for it.
        if self.is_silent() {
            self.active = false;
            return None;
        }

        Some(sanitize(filtered * amp_env * self.velocity_gain()))
    }

    #[inline]
    fn is_silent(&self) -> bool {
        self.amp_envelope.is_off()
            || (self.amp_envelope.stage() == EnvelopeStage::Release
                && self.amp_envelope.level() < RELEASE_FLOOR)
    }
}
