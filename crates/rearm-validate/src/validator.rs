//! `Validator` — drives the predicate chain with cache-first semantics.

use rearm_core::{EquipPolicy, ItemId, Tick};
use rearm_state::AgentStateStore;
use rearm_world::{AgentRecord, World};

use crate::{
    cache::CacheEntry, check::standard_chain, CacheClass, Denial, DenialReason, EligibilityCheck,
    Fingerprint, ValidationCache, ValidationContext,
};

/// The ordered chain plus the driving logic.
///
/// Call sequence per item:
///
/// 1. Resolve the item record — a missing record denies `Destroyed`
///    immediately (the commonest race: the item despawned mid-scan).
/// 2. Run the `Uncached` checks.  Cheap and volatile; never cached.
/// 3. Consult the cache with the item's current [`Fingerprint`].
/// 4. On a miss, run the cacheable checks, **persist any requested denylist
///    side effect first**, then cache the verdict with the denying check's
///    TTL class (a pass gets the volatile TTL — passes can flip as fast as
///    any volatile negative).
pub struct Validator {
    checks: Vec<Box<dyn EligibilityCheck>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self { checks: standard_chain() }
    }
}

impl Validator {
    pub fn new(checks: Vec<Box<dyn EligibilityCheck>>) -> Self {
        Self { checks }
    }

    /// Names of the chain in execution order (telemetry, tests).
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Full eligibility verdict for (agent, item) at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        &self,
        agent: &AgentRecord,
        item_id: ItemId,
        world: &dyn World,
        policy: &EquipPolicy,
        now: Tick,
        cache: &mut ValidationCache,
        state: &mut AgentStateStore,
    ) -> Result<(), DenialReason> {
        let Some(item) = world.item(item_id) else {
            return Err(DenialReason::Destroyed);
        };
        let Some(kind) = world.kind(item.kind) else {
            // A record pointing at an unregistered kind cannot be scored or
            // equipped; treat it like a destroyed item.
            return Err(DenialReason::Destroyed);
        };
        let fingerprint = Fingerprint::of(item);

        // Phases 1–3 hold a shared borrow of `state` via the context; the
        // outcome is captured by value so the borrow ends before side
        // effects are applied.
        let outcome: Result<Option<Result<(), DenialReason>>, (Denial, CacheClass)> = {
            let ctx = ValidationContext::new(world, policy, state, now);

            let mut cached_verdict = None;
            let mut failure = None;

            for check in self.checks.iter().filter(|c| c.cache_class() == CacheClass::Uncached) {
                if let Err(denial) = check.check(agent, item, kind, &ctx) {
                    failure = Some((denial, CacheClass::Uncached));
                    break;
                }
            }

            if failure.is_none() {
                if let Some(verdict) = cache.lookup(agent.id, item_id, now, fingerprint) {
                    cached_verdict = Some(verdict);
                } else {
                    for check in
                        self.checks.iter().filter(|c| c.cache_class() != CacheClass::Uncached)
                    {
                        if let Err(denial) = check.check(agent, item, kind, &ctx) {
                            failure = Some((denial, check.cache_class()));
                            break;
                        }
                    }
                }
            }

            match failure {
                Some(f) => Err(f),
                None    => Ok(cached_verdict),
            }
        };

        match outcome {
            // Cache hit: trusted verdict, nothing to write.
            Ok(Some(verdict)) => verdict,

            // Clean pass: cache positively with the volatile TTL.
            Ok(None) => {
                cache.insert(
                    agent.id,
                    item_id,
                    CacheEntry {
                        verdict: Ok(()),
                        expiry: now + policy.volatile_cache_ttl,
                        fingerprint,
                    },
                );
                Ok(())
            }

            // Uncached denial: return without touching the cache.
            Err((denial, CacheClass::Uncached)) => Err(denial.reason),

            // Cacheable denial: side effect first, then the cache write.
            Err((denial, class)) => {
                if let Some(ticks) = denial.deny_ticks {
                    state.deny_until(agent.id, item_id, now + ticks);
                }
                cache.insert(
                    agent.id,
                    item_id,
                    CacheEntry {
                        verdict: Err(denial.reason),
                        expiry: now + class.ttl(policy),
                        fingerprint,
                    },
                );
                Err(denial.reason)
            }
        }
    }
}
