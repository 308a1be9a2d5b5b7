//! Tests for the motion sequencer

use supersaw_dsp::motion::{
    motion_patterns, MotionSequencer, PatternFamily, StepClock, DEFAULT_STEP_SAMPLES,
    MOTION_PATTERNS, MOTION_STEPS,
};
use supersaw_dsp::utils::random::Lcg;

#[test]
fn patterns_are_generated_once() {
    assert!(std::ptr::eq(motion_patterns(), motion_patterns()));
}

#[test]
fn pattern_families() {
    assert_eq!(PatternFamily::of_pattern(0), PatternFamily::Smooth);
    assert_eq!(PatternFamily::of_pattern(5), PatternFamily::Rhythmic);
    assert_eq!(PatternFamily::of_pattern(11), PatternFamily::Chaotic);
    assert_eq!(PatternFamily::of_pattern(15), PatternFamily::Extreme);
}

#[test]
fn first_pattern_follows_the_seeded_generator() {
    let mut rng = Lcg::default();
    let pattern = &motion_patterns()[0];

    for step in pattern.iter() {
        let r = [rng.get_bipolar(), rng.get_bipolar(), rng.get_bipolar()];
        assert_eq!(step.cutoff, 0.3 + r[0] * 0.2);
        assert_eq!(step.resonance, 0.5 + r[1] * 0.1);
        assert_eq!(step.lfo1_rate, 0.4 + r[2] * 0.1);
    }
}

#[test]
fn rhythmic_patterns_accent_every_fourth_step() {
    for pattern in &motion_patterns()[4..8] {
        for (n, step) in pattern.iter().enumerate() {
            let cutoff = if n % 4 == 0 { 0.8 } else { 0.2 };
            let resonance = if n % 2 == 0 { 0.7 } else { 0.3 };
            assert_eq!(step.cutoff, cutoff);
            assert_eq!(step.resonance, resonance);
            assert_eq!(step.lfo1_rate, 0.5);
        }
    }
}

#[test]
fn extreme_patterns_switch_between_two_values() {
    for pattern in &motion_patterns()[12..16] {
        for step in pattern.iter() {
            assert!(step.cutoff == 0.9 || step.cutoff == 0.1);
            assert!(step.resonance == 0.95 || step.resonance == 0.2);
            assert!(step.lfo1_rate == 0.8 || step.lfo1_rate == 0.1);
        }
    }
}

#[test]
fn filter_steps_are_normalized() {
    for pattern in motion_patterns().iter() {
        for step in pattern.iter() {
            assert!((0.0..=1.0).contains(&step.cutoff));
            assert!((0.0..=1.0).contains(&step.resonance));
            assert!(step.lfo1_rate <= 1.0);
        }
    }
}

#[test]
fn steps_on_internal_clock() {
    let mut sequencer = MotionSequencer::new();
    sequencer.init(5);
    assert!(!sequencer.is_active());
    assert_eq!(sequencer.current_step_values(), None);

    // Stopped sequencers hold their step.
    for _ in 0..DEFAULT_STEP_SAMPLES {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 0);

    sequencer.select(5);
    assert!(sequencer.is_active());
    for _ in 0..DEFAULT_STEP_SAMPLES - 1 {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 0);
    sequencer.advance();
    assert_eq!(sequencer.step(), 1);
    assert_eq!(
        sequencer.current_step_values(),
        Some(motion_patterns()[5][1])
    );
}

#[test]
fn steps_wrap_around() {
    let mut sequencer = MotionSequencer::new();
    sequencer.select(2);
    sequencer.set_clock(StepClock::Samples(1));

    for _ in 0..MOTION_STEPS - 1 {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), MOTION_STEPS - 1);
    sequencer.advance();
    assert_eq!(sequencer.step(), 0);
}

#[test]
fn select_keeps_the_step() {
    let mut sequencer = MotionSequencer::new();
    sequencer.select(0);
    sequencer.set_clock(StepClock::Samples(10));
    for _ in 0..30 {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 3);

    sequencer.select(MOTION_PATTERNS as u8);
    assert!(!sequencer.is_active());
    assert_eq!(sequencer.current_step_values(), None);

    sequencer.select(7);
    assert_eq!(sequencer.step(), 3);
    assert_eq!(
        sequencer.current_step_values(),
        Some(motion_patterns()[7][3])
    );
}

#[test]
fn tempo_sync() {
    let mut sequencer = MotionSequencer::new();

    sequencer.set_tempo(120 << 16);
    assert_eq!(sequencer.clock(), StepClock::Tempo(6000));

    sequencer.set_clock(StepClock::Tempo(0));
    assert_eq!(sequencer.clock(), StepClock::Tempo(1));

    sequencer.set_tempo(0);
    assert_eq!(sequencer.clock(), StepClock::Samples(DEFAULT_STEP_SAMPLES));

    sequencer.set_clock(StepClock::Samples(0));
    assert_eq!(sequencer.clock(), StepClock::Samples(1));
}

#[test]
fn external_clock() {
    let mut sequencer = MotionSequencer::new();
    sequencer.select(9);
    sequencer.set_clock(StepClock::External);

    for _ in 0..10 * DEFAULT_STEP_SAMPLES {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 0);

    sequencer.tick();
    sequencer.tick();
    assert_eq!(sequencer.step(), 2);

    sequencer.select(MOTION_PATTERNS as u8);
    sequencer.tick();
    assert_eq!(sequencer.step(), 2);
}

#[test]
fn tempo_sync_free_runs_until_the_first_tick() {
    let mut sequencer = MotionSequencer::new();
    sequencer.select(4);
    sequencer.set_tempo(120 << 16);

    for _ in 0..6000 {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 1);
    assert!(!sequencer.follows_host_ticks());

    sequencer.tick();
    assert_eq!(sequencer.step(), 2);
    assert!(sequencer.follows_host_ticks());

    for _ in 0..6000 * 4 {
        sequencer.advance();
    }
    assert_eq!(sequencer.step(), 2);

    sequencer.tick();
    assert_eq!(sequencer.step(), 3);

    // A new tempo goes back to counting samples until the host ticks again.
    sequencer.set_tempo(140 << 16);
    assert!(!sequencer.follows_host_ticks());
}

#[test]
fn ticks_are_ignored_on_the_internal_clock() {
    let mut sequencer = MotionSequencer::new();
    sequencer.select(1);

    sequencer.tick();
    assert_eq!(sequencer.step(), 0);
}
