use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
///
/// Both bounds are inclusive. Callers must pass `min <= max`.
pub trait RandomSource {
    fn uniform_u32(&mut self, min: u32, max: u32) -> u32;

    fn uniform_u64(&mut self, min: u64, max: u64) -> u64;
}

/// A [`RandomSource`] backed by the standard generator of the `rand` crate.
pub struct Entropy {
    rng: StdRng,
}

impl Entropy {
    /// Seeds the generator from the operating system.
    pub fn from_entropy() -> Self {
        Entropy {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the generator with a fixed value, producing a reproducible stream.
    pub fn seeded(seed: u64) -> Self {
        Entropy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for Entropy {
    fn uniform_u32(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    fn uniform_u64(&mut self, min: u64, max: u64) -> u64 {
        self.rng.gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_closed_range() {
        let mut random = Entropy::seeded(7);
        for _ in 0..1000 {
            let value = random.uniform_u32(10, 12);
            assert!((10..=12).contains(&value));
        }
        assert_eq!(random.uniform_u64(5, 5), 5);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Entropy::seeded(42);
        let mut b = Entropy::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_u32(0, u32::MAX), b.uniform_u32(0, u32::MAX));
        }
    }
}
