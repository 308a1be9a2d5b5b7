//! Deterministic linear congruential generator.

/// Fixed seed of the pattern generator.
pub const DEFAULT_SEED: u32 = 0x1234_5678;

#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn get_word(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        self.state
    }

    /// Upper 16 bits of the next word mapped to `[-1, 1)`.
    #[inline]
    pub fn get_bipolar(&mut self) -> f32 {
        (self.get_word() >> 16) as f32 / 32768.0 - 1.0
    }
}
