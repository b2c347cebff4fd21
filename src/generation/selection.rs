use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random selector for weighted stochastic choices
///
/// Seeded selectors reproduce the same sequence of draws for the same catalog.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a selector from an optional seed
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Integer weighted random selection
    ///
    /// Returns an index into `weights`, chosen with probability proportional to
    /// its weight. Falls back to a uniform choice when every weight is zero.
    /// Returns `None` only for an empty slice.
    pub fn weighted_choice(&mut self, weights: &[u32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return Some(self.rng.random_range(0..weights.len()));
        }

        let mut rand_val = self.rng.random_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if rand_val < weight {
                return Some(i);
            }
            rand_val -= weight;
        }
        Some(weights.len() - 1)
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}
