//! Multi-pool allocation engine.
//!
//! Turns a single target amount into a per-pool allocation vector under hard
//! capacity constraints. The contract, for `distribute(available, target)`:
//!
//! - `result[i] <= available[i]` for every pool `i`
//! - `sum(result) == min(target, sum(available))`
//!
//! The allocation runs as three sequential passes over the same mutable
//! (available, remaining) state. Each pass strictly shrinks `remaining` and
//! never increases any pool's capacity, so the contract holds at every
//! stage. Only the first pass draws randomness; passes two and three are
//! fully deterministic given its output.

use rand::RngCore;
use sha2::{Digest, Sha256};

// ═══════════════════════════════════════════════════════════════════════════════
// SEED CHAIN
// ═══════════════════════════════════════════════════════════════════════════════

/// Hash-chained random seed for the first pass.
///
/// Each round re-derives the seed by hashing the previous seed together with
/// fresh entropy, so rounds are not mutually predictable from one draw.
struct SeedChain([u8; 32]);

impl SeedChain {
    fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);
        Self(Sha256::digest(entropy).into())
    }

    fn draw(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(bytes)
    }

    fn advance<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        let mut fresh = [0u8; 16];
        rng.fill_bytes(&mut fresh);

        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(fresh);
        self.0 = hasher.finalize().into();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISTRIBUTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Allocate `target` units across pools with the given available capacities.
///
/// Draws entropy from the thread-local secure generator. Callers must never
/// pass an empty `available` slice; Random events cannot be created with an
/// empty pool, so the registry upholds this precondition.
pub fn distribute(available: &[u64], target: u64) -> Vec<u64> {
    distribute_with(available, target, &mut rand::thread_rng())
}

/// Allocate `target` units across pools using the supplied generator.
///
/// Deterministic given the generator's output stream, which is what the
/// engine's tests rely on.
pub fn distribute_with<R: RngCore + ?Sized>(available: &[u64], target: u64, rng: &mut R) -> Vec<u64> {
    let n = available.len();
    debug_assert!(n > 0, "distribution over an empty pool set");
    if n == 0 {
        return Vec::new();
    }

    let mut capacity = available.to_vec();
    let mut result = vec![0u64; n];
    let mut remaining = target;

    // Pass 1: seeded random walk. Bound each round's draw so a single pool
    // cannot soak up the whole target when several pools have capacity.
    if remaining > 0 {
        let mut seed = SeedChain::generate(rng);
        let max_random = if target < n as u64 {
            1
        } else {
            (target / n as u64).saturating_add(1)
        };
        let mut index = (seed.draw() % n as u64) as usize;

        for _ in 0..n {
            if remaining == 0 {
                break;
            }
            let draw = seed.draw() % max_random + 1;
            let take = draw.min(capacity[index]).min(remaining);
            result[index] += take;
            capacity[index] -= take;
            remaining -= take;

            seed.advance(rng);
            index = (index + 1) % n;
        }
    }

    // Pass 2: average leveling. One index-order walk capped at one unit over
    // the mean of what is still available.
    if remaining > 0 {
        let total: u64 = capacity.iter().fold(0, |acc, &c| acc.saturating_add(c));
        let fake_average = (total / n as u64).saturating_add(1);

        for i in 0..n {
            if remaining == 0 {
                break;
            }
            let take = fake_average.min(capacity[i]).min(remaining);
            result[i] += take;
            capacity[i] -= take;
            remaining -= take;
        }
    }

    // Pass 3: greedy sweep. Drains whatever the first two passes left; after
    // this, remaining is zero unless total capacity fell short of the
    // target, in which case the shortfall is simply not allocated.
    for i in 0..n {
        if remaining == 0 {
            break;
        }
        let take = capacity[i].min(remaining);
        result[i] += take;
        capacity[i] -= take;
        remaining -= take;
    }

    result
}
