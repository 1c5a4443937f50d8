// RNG Provider Port (for deterministic testing)

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hands every unit of work its own independently owned random source
///
/// `stream` distinguishes units so that two units never share a generator.
pub trait RngProvider: Send + Sync {
    fn rng_for(&self, stream: u64) -> StdRng;
}

/// OS-entropy seeded generators (production)
pub struct EntropyRngProvider;

impl RngProvider for EntropyRngProvider {
    fn rng_for(&self, _stream: u64) -> StdRng {
        StdRng::from_entropy()
    }
}

/// Reproducible generators derived from one base seed
pub struct SeededRngProvider {
    seed: u64,
}

impl SeededRngProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RngProvider for SeededRngProvider {
    fn rng_for(&self, stream: u64) -> StdRng {
        // Golden-ratio stride keeps neighbouring streams far apart
        StdRng::seed_from_u64(self.seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_streams_are_reproducible() {
        let provider = SeededRngProvider::new(42);
        let mut first = provider.rng_for(3);
        let mut second = provider.rng_for(3);
        let a: Vec<u32> = (0..8).map(|_| first.gen()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_streams_differ() {
        let provider = SeededRngProvider::new(42);
        let a: u64 = provider.rng_for(1).gen();
        let b: u64 = provider.rng_for(2).gen();
        assert_ne!(a, b);
    }
}
