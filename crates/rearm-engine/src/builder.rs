//! Fluent builder for constructing an [`EquipEngine`].

use rearm_core::EquipPolicy;
use rearm_score::{ScoreEngine, ScoreWeights};
use rearm_validate::Validator;

use crate::{providers::ProviderRegistry, CompatProvider, EngineResult, EquipEngine};

/// Fluent builder for [`EquipEngine`].
///
/// # Required inputs
///
/// - [`EquipPolicy`] — the host settings surface.
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                       |
/// |-----------------|-------------------------------|
/// | `.weights(w)`   | `ScoreWeights::default()`     |
/// | `.seed(n)`      | `0`                           |
/// | `.validator(v)` | The standard predicate chain  |
/// | `.provider(p)`  | No compatibility providers    |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EquipPolicy::default())
///     .seed(world_seed)
///     .provider(Box::new(MySidearmsBridge))
///     .build()?;
/// ```
pub struct EngineBuilder {
    policy: EquipPolicy,
    weights: ScoreWeights,
    seed: u64,
    validator: Option<Validator>,
    providers: ProviderRegistry,
}

impl EngineBuilder {
    pub fn new(policy: EquipPolicy) -> Self {
        Self {
            policy,
            weights: ScoreWeights::default(),
            seed: 0,
            validator: None,
            providers: ProviderRegistry::new(),
        }
    }

    /// Override the score multiplier tables.
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Seed for the deterministic re-check stagger.  Use the world seed so
    /// replays reproduce the same evaluation cadence.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the standard eligibility chain (tests, exotic hosts).
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Register a compatibility provider.  Call repeatedly for several.
    pub fn provider(mut self, provider: Box<dyn CompatProvider>) -> Self {
        self.providers.register(provider);
        self
    }

    /// Validate configuration and construct the engine.
    pub fn build(self) -> EngineResult<EquipEngine> {
        let score = ScoreEngine::new(self.weights)?;
        EquipEngine::from_parts(
            self.policy,
            score,
            self.validator.unwrap_or_default(),
            self.providers,
            self.seed,
        )
    }
}
