//! Tests for the voice pool and voice stealing

use supersaw_dsp::envelope::EnvelopeStage;
use supersaw_dsp::modulation::{ModulationEngine, ModulationTargets, VoiceLfoState};
use supersaw_dsp::oscillator::oscillator_bank::OscillatorSettings;
use supersaw_dsp::oscillator::waveform::WaveformPair;
use supersaw_dsp::voice::Voice;
use supersaw_dsp::voice_allocator::{Allocation, VoiceAllocator};
use supersaw_dsp::MAX_VOICES;

struct Context {
    modulation: ModulationEngine,
    targets: ModulationTargets,
    settings: OscillatorSettings,
}

impl Context {
    fn new() -> Self {
        Self {
            modulation: ModulationEngine::new(),
            targets: ModulationTargets {
                cutoff: 0.4,
                resonance: 0.6,
                env_amount: 0.5,
                vibrato_depth: 0.0,
                pitch_offset: 0.0,
            },
            // Supersaw on oscillator 1, feedback sine on oscillator 2.
            settings: OscillatorSettings {
                waveforms: WaveformPair::new(0b0011),
                detune: 0.8,
                feedback: 0.5,
                cross_mod: 0.25,
            },
        }
    }

    fn render(&mut self, allocator: &mut VoiceAllocator, samples: usize) {
        for _ in 0..samples {
            self.modulation.advance(0.3, 0.4);
            for (index, voice) in allocator.voices_mut().iter_mut().enumerate() {
                voice.render(index, &self.modulation, &self.targets, &self.settings);
            }
        }
    }
}

fn allocator() -> VoiceAllocator {
    let mut allocator = VoiceAllocator::new();
    allocator.init();
    allocator
}

fn assert_cleared(voice: &Voice) {
    let oscillators = voice.oscillators();
    assert_eq!(oscillators.phase_1(), 0.0);
    assert_eq!(oscillators.phase_2(), 0.0);
    assert!(oscillators.supersaw().phases().iter().all(|p| *p == 0.0));
    assert_eq!(oscillators.feedback().last_output, 0.0);

    assert!(voice.ladder().stages().iter().all(|z| *z == 0.0));
    assert!(voice.high_pass().state().iter().all(|z| *z == 0.0));

    for envelope in [voice.filter_envelope(), voice.amp_envelope()] {
        assert_eq!(envelope.level(), 0.0);
        assert_eq!(envelope.elapsed(), 0);
    }
    assert_eq!(*voice.lfo(), VoiceLfoState::default());
}

#[test]
fn free_voices_are_used_first() {
    let mut allocator = allocator();
    assert_eq!(allocator.active_count(), 0);

    for (n, note) in [60, 64, 67, 71].into_iter().enumerate() {
        let allocation = allocator.note_on(note, 100);
        assert_eq!(
            allocation,
            Allocation {
                index: n,
                stolen_note: None
            }
        );
        assert_eq!(allocator.active_count(), n + 1);
    }

    assert_eq!(allocator.steal_count(), 0);
}

#[test]
fn fifth_note_steals_exactly_one_voice() {
    let mut allocator = allocator();

    for note in [60, 64, 67, 71] {
        allocator.note_on(note, 100);
    }
    let allocation = allocator.note_on(74, 100);

    assert_eq!(allocation.index, 0);
    assert_eq!(allocation.stolen_note, Some(60));
    assert_eq!(allocator.steal_count(), 1);
    assert_eq!(allocator.active_count(), MAX_VOICES);
    assert_eq!(allocator.voices()[0].note(), 74);
}

#[test]
fn oldest_voice_is_stolen() {
    let mut allocator = allocator();

    for note in 60..66 {
        allocator.note_on(note, 100);
    }

    assert_eq!(allocator.steal_count(), 2);
    let notes: Vec<u8> = allocator.voices().iter().map(|voice| voice.note()).collect();
    assert_eq!(notes, [64, 65, 62, 63]);
}

#[test]
fn stolen_voice_is_fully_reset() {
    let mut allocator = allocator();
    let mut context = Context::new();

    for note in [48, 55, 60, 64] {
        allocator.note_on(note, 127);
    }
    context.render(&mut allocator, 1000);

    let stolen = &allocator.voices()[0];
    assert!(stolen.is_active());
    assert!(stolen.oscillators().phase_2() > 0.0);
    assert!(stolen.oscillators().supersaw().phases().iter().any(|p| *p > 0.0));
    assert!(stolen.oscillators().feedback().last_output != 0.0);
    assert!(stolen.ladder().stages().iter().any(|z| *z != 0.0));
    assert!(stolen.high_pass().state().iter().any(|z| *z != 0.0));
    assert!(stolen.amp_envelope().level() > 0.0);
    assert!(stolen.filter_envelope().level() > 0.0);

    let allocation = allocator.note_on(72, 90);
    assert_eq!(allocation.index, 0);
    assert_eq!(allocation.stolen_note, Some(48));
    assert_eq!(allocator.steal_count(), 1);

    let voice = &allocator.voices()[0];
    assert_cleared(voice);
    assert!(voice.is_active());
    assert_eq!(voice.note(), 72);
    assert_eq!(voice.velocity(), 90);
    assert_eq!(voice.amp_envelope().stage(), EnvelopeStage::Attack);
    assert_eq!(voice.filter_envelope().stage(), EnvelopeStage::Attack);
}

#[test]
fn cleared_voice_is_inactive_until_activated() {
    let mut voice = Voice::new();
    voice.init();

    let cleared = voice.clear();
    assert!(!cleared.voice().is_active());
    assert_cleared(cleared.voice());

    let voice = cleared.activate(200, 200, 7);
    assert!(voice.is_active());
    assert_eq!(voice.note(), 127);
    assert_eq!(voice.velocity(), 127);
    assert_eq!(voice.age(), 7);
    assert_eq!(voice.velocity_gain(), 1.0);
}

#[test]
fn note_off_releases_matching_voices() {
    let mut allocator = allocator();
    let mut context = Context::new();

    allocator.note_on(60, 100);
    allocator.note_on(60, 100);
    allocator.note_on(62, 100);
    context.render(&mut allocator, 6000);

    allocator.note_off(60);
    allocator.note_off(70);

    let stages: Vec<EnvelopeStage> = allocator
        .voices()
        .iter()
        .map(|voice| voice.amp_envelope().stage())
        .collect();
    assert_eq!(
        stages,
        [
            EnvelopeStage::Release,
            EnvelopeStage::Release,
            EnvelopeStage::Sustain,
            EnvelopeStage::Off
        ]
    );
}

#[test]
fn released_voices_return_to_the_pool() {
    let mut allocator = allocator();
    let mut context = Context::new();

    for note in [60, 64, 67, 71] {
        allocator.note_on(note, 100);
    }
    context.render(&mut allocator, 6000);

    allocator.note_off(64);
    context.render(&mut allocator, 14400 + 2);
    assert_eq!(allocator.active_count(), 3);
    assert!(!allocator.voices()[1].is_active());

    let allocation = allocator.note_on(76, 100);
    assert_eq!(allocation.index, 1);
    assert_eq!(allocation.stolen_note, None);
    assert_eq!(allocator.steal_count(), 0);
}

#[test]
fn all_notes_off_silences_immediately() {
    let mut allocator = allocator();
    let mut context = Context::new();

    for note in [60, 64, 67] {
        allocator.note_on(note, 100);
    }
    context.render(&mut allocator, 100);

    allocator.all_notes_off();
    assert_eq!(allocator.active_count(), 0);
    assert!(allocator
        .voices()
        .iter()
        .all(|voice| voice.amp_envelope().is_off()));
}

#[test]
fn pool_never_exceeds_its_size() {
    let mut allocator = allocator();
    let mut context = Context::new();

    for n in 0..200u32 {
        allocator.note_on((n * 7 % 128) as u8, 100);
        if n % 3 == 0 {
            allocator.note_off(((n + 5) * 7 % 128) as u8);
        }
        context.render(&mut allocator, 50);
        assert!(allocator.active_count() <= MAX_VOICES);
    }
}
