//! Motion sequencer.
//!
//! Replays one of 16 pre-generated patterns of 16 steps. Each step carries a
//! cutoff, a resonance and an LFO1 rate that replace the corresponding knobs
//! while the sequencer is running.
//!
//! Patterns are generated once per process from a fixed seed, so two engines
//! always play identical patterns. The patterns come in four families of four
//! patterns each, all drawing from the same random stream:
//! - 0..=3 smooth: small deviations around a dark, moderately resonant centre.
//! - 4..=7 rhythmic: accents on every fourth step, alternating resonance.
//! - 8..=11 chaotic: squared random values over a wide range.
//! - 12..=15 extreme: random switching between two far-apart values.

use spin::Once;

use crate::utils::random::Lcg;
use crate::SAMPLE_RATE;

pub const MOTION_PATTERNS: usize = 16;
pub const MOTION_STEPS: usize = 16;

/// Step length in samples of the internal clock.
pub const DEFAULT_STEP_SAMPLES: u32 = 3000;

pub type MotionPatterns = [[MotionStep; MOTION_STEPS]; MOTION_PATTERNS];

static MOTION_TABLE: Once<MotionPatterns> = Once::new();

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub cutoff: f32,
    pub resonance: f32,
    pub lfo1_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Smooth,
    Rhythmic,
    Chaotic,
    Extreme,
}

type StepShaper = fn(usize, [f32; 3]) -> MotionStep;

const SHAPERS: [StepShaper; 4] = [smooth_step, rhythmic_step, chaotic_step, extreme_step];

impl PatternFamily {
    pub fn of_pattern(pattern: usize) -> Self {
        match pattern / 4 {
            0 => Self::Smooth,
            1 => Self::Rhythmic,
            2 => Self::Chaotic,
            _ => Self::Extreme,
        }
    }

    #[inline]
    fn shape(self, step: usize, r: [f32; 3]) -> MotionStep {
        SHAPERS[self as usize](step, r)
    }
}

fn smooth_step(_step: usize, r: [f32; 3]) -> MotionStep {
    MotionStep {
        cutoff: 0.3 + r[0] * 0.2,
        resonance: 0.5 + r[1] * 0.1,
        lfo1_rate: 0.4 + r[2] * 0.1,
    }
}

fn rhythmic_step(step: usize, _r: [f32; 3]) -> MotionStep {
    MotionStep {
        cutoff: if step % 4 == 0 { 0.8 } else { 0.2 },
        resonance: if step % 2 == 0 { 0.7 } else { 0.3 },
        lfo1_rate: 0.5,
    }
}

fn chaotic_step(_step: usize, r: [f32; 3]) -> MotionStep {
    MotionStep {
        cutoff: 0.1 + r[0] * r[0] * 0.8,
        resonance: 0.2 + r[1] * r[1] * 0.7,
        lfo1_rate: 0.3 + r[2] * 0.6,
    }
}

fn extreme_step(_step: usize, r: [f32; 3]) -> MotionStep {
    MotionStep {
        cutoff: if r[0] > 0.0 { 0.9 } else { 0.1 },
        resonance: if r[1] > 0.0 { 0.95 } else { 0.2 },
        lfo1_rate: if r[2] > 0.0 { 0.8 } else { 0.1 },
    }
}

/// Returns the process-wide pattern table, generating it on first use.
pub fn motion_patterns() -> &'static MotionPatterns {
    MOTION_TABLE.call_once(generate_patterns)
}

fn generate_patterns() -> MotionPatterns {
    let mut rng = Lcg::default();
    let mut patterns = [[MotionStep::default(); MOTION_STEPS]; MOTION_PATTERNS];

    for (p, pattern) in patterns.iter_mut().enumerate() {
        let family = PatternFamily::of_pattern(p);
        for (s, step) in pattern.iter_mut().enumerate() {
            // Three draws per step regardless of family keep the stream aligned.
            let r = [rng.get_bipolar(), rng.get_bipolar(), rng.get_bipolar()];
            *step = family.shape(s, r);
        }
    }

    patterns
}

/// Source of step advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepClock {
    /// Advance after the given number of samples.
    Samples(u32),

    /// Host tempo with the given sixteenth-note length in samples. Steps
    /// follow the sample count until the first host tick, then the ticks
    /// only.
    Tempo(u32),

    /// Advance on host clock ticks only.
    External,
}

#[derive(Debug, Clone)]
pub struct MotionSequencer {
    patterns: &'static MotionPatterns,
    pattern: u8,
    active: bool,
    step: usize,
    counter: u32,
    clock: StepClock,
    host_ticks: bool,
}

impl Default for MotionSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSequencer {
    pub fn new() -> Self {
        Self {
            patterns: motion_patterns(),
            pattern: 0,
            active: false,
            step: 0,
            counter: 0,
            clock: StepClock::Samples(DEFAULT_STEP_SAMPLES),
            host_ticks: false,
        }
    }

    pub fn init(&mut self, pattern: u8) {
        self.pattern = pattern;
        self.active = false;
        self.step = 0;
        self.counter = 0;
        self.clock = StepClock::Samples(DEFAULT_STEP_SAMPLES);
        self.host_ticks = false;
    }

    /// Selects a pattern. Indices at or beyond [`MOTION_PATTERNS`] stop the
    /// sequencer. The current step is kept.
    pub fn select(&mut self, pattern: u8) {
        self.pattern = pattern;
        self.active = (pattern as usize) < MOTION_PATTERNS;
    }

    #[inline]
    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn clock(&self) -> StepClock {
        self.clock
    }

    pub fn set_clock(&mut self, clock: StepClock) {
        self.clock = match clock {
            StepClock::Samples(samples) => StepClock::Samples(samples.max(1)),
            StepClock::Tempo(samples) => StepClock::Tempo(samples.max(1)),
            StepClock::External => StepClock::External,
        };
        self.counter = 0;
        self.host_ticks = false;
    }

    /// Turns on tempo sync with a step length of a sixteenth note at
    /// `tempo`, given in BPM as 16.16 fixed point. A tempo of 0 restores the
    /// internal step length.
    pub fn set_tempo(&mut self, tempo: u32) {
        if tempo == 0 {
            self.set_clock(StepClock::Samples(DEFAULT_STEP_SAMPLES));
            return;
        }
        let bpm = tempo as f32 / 65536.0;
        let samples = SAMPLE_RATE * 60.0 / (bpm * 4.0);
        self.set_clock(StepClock::Tempo(samples as u32));
    }

    /// Advances the internal clock by one sample.
    #[inline]
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        let samples = match self.clock {
            StepClock::Samples(samples) => samples,
            StepClock::Tempo(samples) if !self.host_ticks => samples,
            _ => return,
        };
        self.counter += 1;
        if self.counter >= samples {
            self.counter = 0;
            self.next_step();
        }
    }

    /// Host clock tick at 4 PPQN. Advances one step under
    /// [`StepClock::Tempo`] or [`StepClock::External`]; under tempo sync the
    /// first tick also stops the sample count.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        match self.clock {
            StepClock::Tempo(_) => {
                self.host_ticks = true;
                self.counter = 0;
                self.next_step();
            }
            StepClock::External => self.next_step(),
            StepClock::Samples(_) => {}
        }
    }

    /// True once host ticks drive the steps under tempo sync.
    #[inline]
    pub fn follows_host_ticks(&self) -> bool {
        self.host_ticks
    }

    #[inline]
    fn next_step(&mut self) {
        self.step = (self.step + 1) % MOTION_STEPS;
    }

    /// Values of the current step, or `None` while the sequencer is stopped.
    #[inline]
    pub fn current_step_values(&self) -> Option<MotionStep> {
        if self.active {
            Some(self.patterns[self.pattern as usize][self.step])
        } else {
            None
        }
    }
}
