//! Deterministic pseudo-random source.
//!
//! Ambient behavior (shuffles, walk-direction changes) needs cheap
//! randomness that tests can control.  The core only ever sees the
//! [`RandomSource`] trait; production uses a small xorshift generator
//! seeded at boot, tests inject a scripted one.

/// Source of randomness for ambient behavior decisions.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish value in `0..bound`.  Returns 0 for `bound == 0`.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 { 0 } else { self.next_u32() % bound }
    }
}

/// xorshift64* generator.  Not cryptographic; good enough for picking
/// which way the pet wanders.
pub struct SmallRng {
    state: u64,
}

impl SmallRng {
    pub fn new(seed: u64) -> Self {
        // splitmix the seed so 0 and small values still work
        let state = seed
            .wrapping_add(0x9E37_79B9_7F4A_7C15)
            .wrapping_mul(0xBF58_476D_1CE4_E5B9);
        Self { state: state | 1 }
    }
}

impl RandomSource for SmallRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }
}
