//! Stereo chorus on a pair of modulated delay lines.

use crate::lfo::{LfoShape, LfoTables};
use crate::utils::delay_line::DelayLine;
use crate::utils::{sanitize, wrap_phase};
use crate::SAMPLE_RATE;

pub const CHORUS_BUFFER_SIZE: usize = 2048;

const LFO_HZ: f32 = 0.6;
const BASE_DELAY: f32 = 800.0;
const DELAY_DEPTH: f32 = 400.0;

/// Extra delay of the right channel in samples.
const STEREO_OFFSET: f32 = 100.0;

#[derive(Debug)]
pub struct Chorus {
    line_l: DelayLine<f32, CHORUS_BUFFER_SIZE>,
    line_r: DelayLine<f32, CHORUS_BUFFER_SIZE>,
    lfo_phase: f32,
    tables: &'static LfoTables,
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new()
    }
}

impl Chorus {
    pub fn new() -> Self {
        Self {
            line_l: DelayLine::new(),
            line_r: DelayLine::new(),
            lfo_phase: 0.0,
            tables: LfoTables::get(),
        }
    }

    pub fn init(&mut self) {
        self.line_l.init();
        self.line_r.init();
        self.lfo_phase = 0.0;
    }

    /// Writes one sample into both lines and returns the left and right
    /// mixes of dry and delayed signal.
    #[inline]
    pub fn process(&mut self, sample: f32) -> (f32, f32) {
        self.line_l.write(sample);
        self.line_r.write(sample);

        self.lfo_phase = wrap_phase(self.lfo_phase + LFO_HZ / SAMPLE_RATE);
        let lfo = self.tables.read(LfoShape::Sine, self.lfo_phase);
        let delay = BASE_DELAY + lfo * DELAY_DEPTH;

        let wet_l = self.line_l.read_with_delay(delay as usize);
        let wet_r = self.line_r.read_with_delay((delay + STEREO_OFFSET) as usize);

        (
            sanitize((sample + wet_l) * 0.5),
            sanitize((sample + wet_r) * 0.5),
        )
    }
}
