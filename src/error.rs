//! Initialization errors.

use thiserror::Error;

/// Configuration rejected by [`SynthEngine::new`](crate::SynthEngine::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("unsupported sample rate {actual} Hz, expected {expected} Hz")]
    SampleRate { expected: u32, actual: u32 },

    #[error("unsupported channel geometry: {inputs} inputs, {outputs} outputs")]
    Geometry { inputs: u8, outputs: u8 },
}
