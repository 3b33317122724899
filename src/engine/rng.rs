//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic so tests can pin float destinations; the web shell seeds it
//! from platform entropy.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from `getrandom`. Falls back to `fallback_seed` when the entropy
    /// source is unavailable.
    #[cfg(feature = "rng")]
    pub fn from_entropy(fallback_seed: u64) -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Rng::new(u64::from_le_bytes(buf)),
            Err(err) => {
                log::warn!("entropy source unavailable ({}), using clock seed", err);
                Rng::new(fallback_seed)
            }
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform integer in the inclusive range [lo, hi]. Returns `lo` when the
    /// range is empty or inverted.
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        (lo as i64 + (self.next_u64() % span) as i64) as i32
    }
}
