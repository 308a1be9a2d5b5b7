//! Frequency warping and DC blocking.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;

use super::sanitize;

#[derive(Debug, Clone, Copy)]
pub enum FrequencyApproximation {
    Exact,
    Fast,
}

const M_PI_F: f32 = core::f32::consts::PI;
const M_PI_POW_2: f32 = M_PI_F * M_PI_F;
const M_PI_POW_3: f32 = M_PI_POW_2 * M_PI_F;
const M_PI_POW_5: f32 = M_PI_POW_3 * M_PI_POW_2;

/// Prewarped integrator gain `tan(pi * f)` for a normalized frequency `f`.
#[inline]
pub fn tan(f: f32, approximation: FrequencyApproximation) -> f32 {
    match approximation {
        FrequencyApproximation::Exact => {
            // Clip coefficient to about 100.
            let f = if f < 0.497 { f } else { 0.497 };
            (M_PI_F * f).tan()
        }
        FrequencyApproximation::Fast => {
            // Coefficients optimized for the 16Hz to 16kHz range at 48kHz.
            const A: f32 = 3.260e-01 * M_PI_POW_3;
            const B: f32 = 1.823e-01 * M_PI_POW_5;
            let f2 = f * f;
            f * (M_PI_F + f2 * (A + B * f2))
        }
    }
}

/// One-pole DC blocker, `y[n] = pole * y[n-1] + x[n] - x[n-1]`.
#[derive(Debug, Default, Clone)]
pub struct DcBlocker {
    pole: f32,
    x: f32,
    y: f32,
}

impl DcBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, pole: f32) {
        self.x = 0.0;
        self.y = 0.0;
        self.pole = pole;
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let old_x = self.x;
        self.x = sample;
        self.y = sanitize(self.y * self.pole + self.x - old_x);
        self.y
    }
}
