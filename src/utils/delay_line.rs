//! Fixed-size delay line.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

use num_traits::Num;

/// Circular buffer with a single write cursor.
///
/// The cursor moves backwards, so the sample written `n` writes ago sits at
/// `write_ptr + n + 1`.
#[derive(Debug)]
pub struct DelayLine<T, const MAX_DELAY: usize> {
    write_ptr: usize,
    line: [T; MAX_DELAY],
}

impl<T, const MAX_DELAY: usize> Default for DelayLine<T, MAX_DELAY>
where
    T: Copy + Num,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX_DELAY: usize> DelayLine<T, MAX_DELAY>
where
    T: Copy + Num,
{
    pub fn new() -> Self {
        Self {
            write_ptr: 0,
            line: [T::zero(); MAX_DELAY],
        }
    }

    pub fn init(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        for elem in self.line.iter_mut() {
            *elem = T::zero();
        }
        self.write_ptr = 0;
    }

    pub fn max_delay(&self) -> usize {
        MAX_DELAY
    }

    #[inline]
    pub fn write(&mut self, sample: T) {
        self.line[self.write_ptr] = sample;
        self.write_ptr = (self.write_ptr + MAX_DELAY - 1) % MAX_DELAY;
    }

    /// Reads the sample written `delay` samples before the most recent one.
    ///
    /// A delay of 0 returns the most recent write. Delays are wrapped to the
    /// line length.
    #[inline]
    pub fn read_with_delay(&self, delay: usize) -> T {
        self.line[(self.write_ptr + 1 + delay % MAX_DELAY) % MAX_DELAY]
    }
}
