//! Deterministic random sources for tests.

use rand::RngCore;

/// Generator that returns the same word forever.
///
/// With [`ConstantRng::half`] every `f64` draw is exactly `0.5`, so every arm
/// with identical counts receives a bit-identical posterior score.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRng {
    word: u64,
}

impl ConstantRng {
    #[must_use]
    pub const fn new(word: u64) -> Self {
        Self { word }
    }

    /// Every uniform `f64` draw equals `0.5`.
    #[must_use]
    pub const fn half() -> Self {
        Self::new(1 << 63)
    }
}

impl RngCore for ConstantRng {
    fn next_u32(&mut self) -> u32 {
        (self.word >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.word
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.word.to_le_bytes();
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = bytes[i % bytes.len()];
        }
    }
}
