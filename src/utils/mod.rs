//! Utility functions shared by the oscillators, filters and the output stage.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

pub mod delay_line;
pub mod filter;
pub mod polyblep;
pub mod random;
pub mod units;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Magnitudes below this are flushed to zero.
pub const DENORMAL_THRESHOLD: f32 = 1e-20;

#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += (coefficient) * ((in_) - *out);
}

#[inline]
pub fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

/// Rational tanh approximation, saturating at ±1 outside ±3.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

/// Replaces non-finite values by zero and flushes denormals.
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if !x.is_finite() || x.abs() < DENORMAL_THRESHOLD {
        0.0
    } else {
        x
    }
}

/// Removes the integral part of a phase, mapping negative phases into `[0, 1)`.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        return 0.0;
    }
    let mut phase = phase - (phase as i32) as f32;
    if phase < 0.0 {
        phase += 1.0;
    }
    // -epsilon + 1.0 can round up to exactly 1.0.
    if phase >= 1.0 {
        phase = 0.0;
    }
    phase
}
