//! Deterministic per-agent RNG for schedule staggering.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Identical (seed, agent) pairs always produce identical jitter sequences,
//! so runs are reproducible.
//!
//! The RNG exists for exactly one purpose: staggering re-check ticks so that
//! hundreds of steady-state agents don't all re-scan the candidate index on
//! the same tick.  Scoring and validation never consult it — their outputs
//! must be pure functions of (agent state, item state).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
///
/// The type is `!Sync` to prevent accidental sharing; the single-threaded
/// scheduling model never needs to share one anyway.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform jitter in `[0, span]` ticks.  Returns 0 for `span == 0`.
    #[inline]
    pub fn jitter(&mut self, span: u64) -> u64 {
        if span == 0 {
            return 0;
        }
        self.0.gen_range(0..=span)
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
