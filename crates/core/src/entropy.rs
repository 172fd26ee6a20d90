use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Hands out a random generator for one engine call.
///
/// Every "AI" output is sampled noise, so this is the seam tests use to get
/// reproducible insights.
pub trait EntropySource: Send + Sync {
    fn rng(&self) -> Box<dyn RngCore>;
}

/// Thread-local OS-seeded generator. Used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn rng(&self) -> Box<dyn RngCore> {
        Box::new(rand::thread_rng())
    }
}

/// Deterministic stream: each call gets a child generator seeded from a
/// shared parent, so a sequence of calls replays exactly for a given seed.
#[derive(Debug)]
pub struct SeededEntropy {
    parent: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            parent: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn rng(&self) -> Box<dyn RngCore> {
        let mut parent = self.parent.lock().unwrap_or_else(PoisonError::into_inner);
        Box::new(StdRng::seed_from_u64(parent.gen()))
    }
}
