use std::num::Wrapping;

// Linear congruential generator parameters
const MUL: u64 = 6364136223846793005; // Knuth section 3.3.4 (p.108)
const INC: u64 = 1442695040888963407;

/// A small deterministic generator seeded from arbitrary bytes.
///
/// Every source of randomness in the gradient pipeline (point jitter, pixel
/// noise) draws from an `Rng` that the caller passes in explicitly, so the same
/// seed and options always reproduce the same pixel buffer.
#[derive(Clone, PartialEq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Seeds the generator by hashing `seed` twice with murmur2 under fixed
    /// basis values. Any byte length is accepted; an empty seed is valid.
    pub fn from_seed(seed: &[u8]) -> Rng {
        let lower = murmur2(seed, 1690382925).swap_bytes();
        let upper = murmur2(seed, 72970470).swap_bytes();
        let state = u64::from(lower) | (u64::from(upper) << 32);
        Rng { state }
    }

    /// Picks a random value uniformly distributed between `0.0` (inclusive) and `1.0` (exclusive).
    pub fn rnd(&mut self) -> f64 {
        let old_state = self.state;
        // Advance internal state.
        self.state = old_state.wrapping_mul(MUL).wrapping_add(INC);
        // Calculate output function (XSH RR) using the old state. This is a
        // standard PCG-XSH-RR generator (O'Neill 2014, section 6.3.1), except
        // that 3 bits are dropped during the xorshift; the golden sequences in
        // the tests below pin that exact behavior.
        let xorshifted = ((((old_state >> 18) & !(3 << 30)) ^ old_state) >> 27) as u32;
        let fac = xorshifted.rotate_right((old_state >> 59) as u32);
        2.0f64.powi(-32) * f64::from(fac)
    }

    /// Picks a random value uniformly distributed between `min` (inclusive) and `max` (exclusive).
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rnd() * (max - min) + min
    }

    /// Picks a random value uniformly distributed in `[-scale, scale)`, as
    /// `(rnd - 0.5) * 2 * scale`. A scale of zero still consumes one deviate
    /// and returns exactly `0.0`, which keeps the draw sequence identical
    /// across option values that only differ in jitter or noise amplitude.
    pub fn symmetric(&mut self, scale: f64) -> f64 {
        (self.rnd() - 0.5) * 2.0 * scale
    }
}

fn murmur2(bytes: &[u8], seed: u32) -> u32 {
    const K: usize = 16;
    const MASK: Wrapping<u32> = Wrapping(0xffff);
    const MASK_BYTE: Wrapping<u32> = Wrapping(0xff);
    const M: Wrapping<u32> = Wrapping(0x5bd1e995);

    let mut l: usize = bytes.len();
    let mut h = Wrapping(seed ^ (l as u32));
    let mut i = 0;

    let byte32 = |i: usize| Wrapping(u32::from(bytes[i]));

    while l >= 4 {
        let mut k = (byte32(i) & MASK_BYTE)
            | ((byte32(i + 1) & MASK_BYTE) << 8)
            | ((byte32(i + 2) & MASK_BYTE) << 16)
            | ((byte32(i + 3) & MASK_BYTE) << 24);
        i += 4;
        k = (k & MASK) * M + ((((k >> K) * M) & MASK) << K);
        k ^= k >> 24;
        k = (k & MASK) * M + ((((k >> K) * M) & MASK) << K);
        h = ((h & MASK) * M + ((((h >> K) * M) & MASK) << K)) ^ k;
        l -= 4;
    }
    if l >= 3 {
        h ^= (byte32(i + 2) & MASK_BYTE) << K;
    }
    if l >= 2 {
        h ^= (byte32(i + 1) & MASK_BYTE) << 8;
    }
    if l >= 1 {
        h ^= byte32(i) & MASK_BYTE;
        h = (h & MASK) * M + ((((h >> K) * M) & MASK) << K);
    }

    h ^= h >> 13;
    h = (h & MASK) * M + ((((h >> K) * M) & MASK) << K);
    h ^= h >> 15;

    h.0
}
