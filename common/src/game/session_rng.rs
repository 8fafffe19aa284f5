use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness source owned by a session. Gameplay does not seed it, but
/// tests construct it from a fixed seed to make spawning deterministic.
pub struct SessionRng {
    rng: StdRng,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_random() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform choice from a slice, `None` when it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..items.len());
        items.get(index)
    }
}
