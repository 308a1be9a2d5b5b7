//! Polynomial approximation of band-limited step for band-limited waveform
//! synthesis.

/// Two-sided polyBLEP residual for a discontinuity at phase 0.
///
/// `t` is the current phase in `[0, 1)` and `dt` the phase increment per
/// sample. Returns 0 outside of one increment around the discontinuity.
#[inline]
pub fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}
