//! `ScoreEngine` — the rough/full scoring entry points.

use rearm_world::{ItemKind, ItemRecord};

use crate::{CombatProfile, ScoreResult, ScoreWeights};

/// Stateless scorer configured with a [`ScoreWeights`] table.
///
/// Shared by the scheduler and by compatibility providers that want to rank
/// secondaries with the engine's own metric.
#[derive(Clone, Debug, Default)]
pub struct ScoreEngine {
    weights: ScoreWeights,
}

impl ScoreEngine {
    /// Construct with validated weights.
    pub fn new(weights: ScoreWeights) -> ScoreResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Cheap pre-filter score from static item properties only.
    ///
    /// Two multiplies; safe to run on every candidate in a region.
    #[inline]
    pub fn rough_score(&self, profile: &CombatProfile, kind: &ItemKind) -> f32 {
        kind.base_power * profile.affinity(kind.class)
    }

    /// Authoritative desirability score for one item instance.
    pub fn full_score(&self, profile: &CombatProfile, kind: &ItemKind, item: &ItemRecord) -> f32 {
        self.rough_score(profile, kind)
            * self.weights.quality_mult(item.quality)
            * self.weights.condition_mult(item.condition)
            * self.weights.skill_mult(profile.skill(kind.class))
    }

    /// See [`ScoreWeights::prune_bound`].
    #[inline]
    pub fn prune_bound(&self) -> f32 {
        self.weights.prune_bound()
    }
}
