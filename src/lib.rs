#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod engine;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod fx;
pub mod lfo;
pub mod mixer;
pub mod modulation;
pub mod motion;
pub mod oscillator;
pub mod params;
pub mod utils;
pub mod voice;
pub mod voice_allocator;

pub use engine::{EngineConfig, SynthEngine};
pub use error::InitError;
pub use params::ParamId;

/// Audio sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48000.0;

/// Audio sample rate the host must run at.
pub const SAMPLE_RATE_HZ: u32 = 48000;

/// Normalized frequency of note A0.
pub const A0: f32 = (440.0 / 8.0) / SAMPLE_RATE;

/// Size of the voice pool.
pub const MAX_VOICES: usize = 4;
