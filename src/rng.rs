use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded random streams backing the pair-move proposals.
///
/// One source per replica; never shared. A given seed reproduces the same
/// uniform / gaussian / index sequence on the same platform.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Xoshiro256StarStar,
}

impl RandomSource {
    /// Create a source from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Uniform U(0, 1).
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Standard normal N(0, 1).
    #[inline]
    pub fn gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Uniform site index in [0, n).
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}
