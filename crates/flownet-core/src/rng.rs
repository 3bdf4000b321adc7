//! Seeded randomness for generators.
//!
//! Every generator takes a `&mut RngHandle`; no code path reads process-wide
//! random state. A handle can fork numbered substreams, so a generator that
//! needs two independent draws (edge endpoints and capacities, say) keeps the
//! second sequence fixed no matter how many values the first consumes.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Seeded random source.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Starts a stream from `seed`. Equal seeds yield equal sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this stream was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Forks the numbered substream.
    ///
    /// The fork depends only on this handle's seed and `id`, never on how far
    /// this handle has been advanced.
    pub fn substream(&self, id: u64) -> Self {
        Self::from_seed(derive_substream_seed(self.seed, id))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of substream `id` under `seed`: SipHash-1-3 with zero keys over both
/// values.
pub fn derive_substream_seed(seed: u64, id: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(seed);
    hasher.write_u64(id);
    hasher.finish()
}
