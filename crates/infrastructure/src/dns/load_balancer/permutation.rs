use queried_application::ports::PermutationSource;
use std::sync::Mutex;

/// Uniform random resolver orderings backed by `fastrand`.
pub struct FastrandPermutation {
    rng: Option<Mutex<fastrand::Rng>>,
}

impl FastrandPermutation {
    /// Uses the thread-local generator.
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Reproducible orderings for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(fastrand::Rng::with_seed(seed))),
        }
    }
}

impl Default for FastrandPermutation {
    fn default() -> Self {
        Self::new()
    }
}

impl PermutationSource for FastrandPermutation {
    fn permutation(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();

        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                rng.shuffle(&mut order);
            }
            None => fastrand::shuffle(&mut order),
        }

        order
    }
}
