//! Low-frequency waveform tables.
//!
//! The four tables are computed once per process and shared by every engine
//! instance. They are read with [`read`], which accepts any phase and
//! interpolates linearly between neighbouring entries.

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::utils::wrap_phase;

pub const LFO_TABLE_SIZE: usize = 512;

pub type LfoTable = [f32; LFO_TABLE_SIZE];

static LFO_TABLES: Once<LfoTables> = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoShape {
    Triangle,
    Square,
    Sine,
    Ramp,
}

#[derive(Debug)]
pub struct LfoTables {
    triangle: LfoTable,
    square: LfoTable,
    sine: LfoTable,
    ramp: LfoTable,
}

impl LfoTables {
    /// Returns the process-wide tables, building them on first use.
    pub fn get() -> &'static Self {
        LFO_TABLES.call_once(Self::generate)
    }

    fn generate() -> Self {
        let mut tables = Self {
            triangle: [0.0; LFO_TABLE_SIZE],
            square: [0.0; LFO_TABLE_SIZE],
            sine: [0.0; LFO_TABLE_SIZE],
            ramp: [0.0; LFO_TABLE_SIZE],
        };

        for i in 0..LFO_TABLE_SIZE {
            let phase = i as f32 / LFO_TABLE_SIZE as f32;

            tables.triangle[i] = if phase < 0.5 {
                -1.0 + 4.0 * phase
            } else {
                3.0 - 4.0 * phase
            };
            tables.square[i] = if phase < 0.5 { 1.0 } else { -1.0 };
            tables.sine[i] = (2.0 * core::f32::consts::PI * phase).sin();
            tables.ramp[i] = -1.0 + 2.0 * phase;
        }

        tables
    }

    #[inline]
    pub fn table(&self, shape: LfoShape) -> &LfoTable {
        match shape {
            LfoShape::Triangle => &self.triangle,
            LfoShape::Square => &self.square,
            LfoShape::Sine => &self.sine,
            LfoShape::Ramp => &self.ramp,
        }
    }

    #[inline]
    pub fn read(&self, shape: LfoShape, phase: f32) -> f32 {
        read(self.table(shape), phase)
    }
}

/// Linearly interpolated table lookup. The phase is reduced to `[0, 1)`
/// first, so negative and out-of-range phases are accepted.
#[inline]
pub fn read(table: &LfoTable, phase: f32) -> f32 {
    let phase = wrap_phase(phase);

    let index = phase * (LFO_TABLE_SIZE - 1) as f32;
    let index_integral = index as usize;
    let index_fractional = index - index_integral as f32;
    let a = table[index_integral];
    let b = table[(index_integral + 1) % LFO_TABLE_SIZE];

    a + (b - a) * index_fractional
}
