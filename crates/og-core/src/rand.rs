//!
//! Seeded graphic selection.
//!
//! Canister code cannot reach an OS entropy source, so the picker is seeded
//! explicitly: from time at init, then from management canister `raw_rand`.
//!
use crate::{
    error::{DecodeError, Error},
    infra::{actor::Actor, agent::Agent},
};
use candid::Principal;
use rand_chacha::{
    ChaCha20Rng,
    rand_core::{RngCore, SeedableRng},
};
use sha2::{Digest, Sha256};
use std::rc::Rc;

const RAW_RAND: &str = "raw_rand";

///
/// GraphicPicker
///

#[derive(Clone, Debug)]
pub struct GraphicPicker {
    rng: ChaCha20Rng,
}

impl GraphicPicker {
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    pub fn reseed(&mut self, seed: [u8; 32]) {
        self.rng = ChaCha20Rng::from_seed(seed);
    }

    /// Uniformly pick one element, or `None` for an empty slice.
    #[allow(clippy::cast_possible_truncation)]
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.below(items.len() as u64);

        items.get(idx as usize).copied()
    }

    /// Uniform value in `0..bound` by rejection sampling.
    fn below(&mut self, bound: u64) -> u64 {
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let v = self.rng.next_u64();
            if v < zone {
                return v % bound;
            }
        }
    }
}

/// Derive a 32-byte seed from a timestamp and a salt (e.g. canister id bytes).
#[must_use]
pub fn seed_from_time(now_nanos: u64, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(now_nanos.to_be_bytes());
    hasher.update(salt);

    hasher.finalize().into()
}

/// Fetch 32 bytes of entropy from the management canister.
pub async fn fetch_seed<A: Agent>(agent: Rc<A>) -> Result<[u8; 32], Error> {
    let mgmt = Actor::new(agent, Principal::management_canister());
    let bytes: Vec<u8> = mgmt.call(RAW_RAND, ()).await?;
    let len = bytes.len();

    let seed: [u8; 32] = bytes.try_into().map_err(|_| DecodeError::Candid {
        method: RAW_RAND.to_string(),
        message: format!("expected 32 bytes, got {len}"),
    })?;

    Ok(seed)
}

///
/// TESTS
///
