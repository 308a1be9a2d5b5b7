//! Unit conversions.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Frequency ratio of an interval given in semitones.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    (semitones / 12.0).exp2()
}

/// Converts a duration in seconds into a sample count at `sample_rate`.
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> u32 {
    (seconds * sample_rate) as u32
}
