//! Tests for the envelope generator

use supersaw_dsp::envelope::{Envelope, EnvelopeSettings, EnvelopeStage};
use supersaw_dsp::SAMPLE_RATE;

fn samples(seconds: f32) -> usize {
    (seconds * SAMPLE_RATE) as usize
}

fn amp_envelope() -> Envelope {
    let mut envelope = Envelope::new();
    envelope.init(&EnvelopeSettings::AMP);
    envelope
}

#[test]
fn starts_off() {
    let mut envelope = amp_envelope();
    assert!(envelope.is_off());
    assert_eq!(envelope.process(), 0.0);
    assert_eq!(envelope.stage(), EnvelopeStage::Off);
}

#[test]
fn runs_through_all_stages() {
    let settings = EnvelopeSettings::AMP;
    let mut envelope = amp_envelope();
    envelope.trigger();
    assert_eq!(envelope.stage(), EnvelopeStage::Attack);
    assert_eq!(envelope.level(), 0.0);

    let mut previous = 0.0;
    for _ in 0..samples(settings.attack) {
        let level = envelope.process();
        assert!(level >= previous);
        previous = level;
    }
    assert_eq!(envelope.stage(), EnvelopeStage::Decay);
    assert_eq!(envelope.level(), 1.0);

    for _ in 0..samples(settings.decay) {
        let level = envelope.process();
        assert!(level <= previous);
        assert!(level >= settings.sustain);
        previous = level;
    }
    assert_eq!(envelope.stage(), EnvelopeStage::Sustain);
    assert_eq!(envelope.level(), settings.sustain);

    for _ in 0..1000 {
        assert_eq!(envelope.process(), settings.sustain);
    }

    envelope.release();
    assert_eq!(envelope.stage(), EnvelopeStage::Release);

    previous = settings.sustain;
    for _ in 0..samples(settings.release) {
        let level = envelope.process();
        assert!(level <= previous);
        previous = level;
    }
    assert!(envelope.is_off());
    assert_eq!(envelope.level(), 0.0);
}

#[test]
fn filter_envelope_timing() {
    let settings = EnvelopeSettings::FILTER;
    let mut envelope = Envelope::new();
    envelope.init(&settings);
    envelope.trigger();

    for _ in 0..samples(settings.attack) + samples(settings.decay) {
        envelope.process();
    }

    assert_eq!(envelope.stage(), EnvelopeStage::Sustain);
    assert_eq!(envelope.level(), settings.sustain);
}

#[test]
fn release_during_attack_starts_from_current_level() {
    let mut envelope = amp_envelope();
    envelope.trigger();

    for _ in 0..10 {
        envelope.process();
    }
    let level = envelope.level();
    assert!(level > 0.0 && level < 1.0);

    envelope.release();
    assert_eq!(envelope.stage(), EnvelopeStage::Release);
    assert!(envelope.process() < level);

    for _ in 0..samples(EnvelopeSettings::AMP.release) {
        envelope.process();
    }
    assert!(envelope.is_off());
}

#[test]
fn release_is_ignored_when_releasing_or_off() {
    let mut envelope = amp_envelope();

    envelope.release();
    assert!(envelope.is_off());

    envelope.trigger();
    for _ in 0..500 {
        envelope.process();
    }
    envelope.release();
    for _ in 0..100 {
        envelope.process();
    }
    let elapsed = envelope.elapsed();
    let level = envelope.level();

    envelope.release();
    assert_eq!(envelope.stage(), EnvelopeStage::Release);
    assert_eq!(envelope.elapsed(), elapsed);
    assert_eq!(envelope.level(), level);
}

#[test]
fn kill_and_retrigger() {
    let mut envelope = amp_envelope();
    envelope.trigger();
    for _ in 0..2000 {
        envelope.process();
    }

    envelope.kill();
    assert!(envelope.is_off());
    assert_eq!(envelope.level(), 0.0);

    envelope.trigger();
    assert_eq!(envelope.stage(), EnvelopeStage::Attack);
    assert_eq!(envelope.elapsed(), 0);
    assert!(envelope.process() > 0.0);
}
