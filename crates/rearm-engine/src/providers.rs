//! Compatibility providers — optional external plugins.
//!
//! Third-party extensions can claim management of (agent, item) pairs,
//! override secondary-weapon selection, and veto swaps.  The engine works
//! with zero providers registered; every provider feature degrades to
//! "absent" rather than failing.
//!
//! A provider that returns malformed data (an unknown item, a non-finite
//! verdict) is **quarantined**: reported to the observer once and ignored
//! for the rest of the session.

use rearm_core::ItemId;
use rearm_world::{AgentRecord, ItemRecord, World};

// ── Verdict ───────────────────────────────────────────────────────────────────

/// A provider's answer to a proposed swap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProviderVerdict {
    Approve,
    /// Veto, with a label for telemetry.
    Reject(&'static str),
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// The extension surface a compatibility plugin implements.
///
/// Every method has a permissive default so providers override only what
/// they care about.
pub trait CompatProvider: Send + Sync {
    /// Stable name, used in quarantine reports.
    fn name(&self) -> &'static str;

    /// `true` if this provider owns equip decisions for `(agent, item)` —
    /// the engine will leave the pairing alone.
    fn is_managed(&self, _agent: &AgentRecord, _item: &ItemRecord) -> bool {
        false
    }

    /// Pick the best secondary for `agent`, scored however the provider
    /// likes (it may call `score` to reuse the engine's metric).  Returning
    /// an item unknown to `world` counts as malformed.
    fn find_best_secondary(
        &self,
        _agent: &AgentRecord,
        _world: &dyn World,
        _score: &dyn Fn(&ItemRecord) -> f32,
    ) -> Option<ItemId> {
        None
    }

    /// Approve or veto a proposed swap.
    fn validate_swap(
        &self,
        _new: &ItemRecord,
        _old: Option<&ItemRecord>,
        _agent: &AgentRecord,
    ) -> ProviderVerdict {
        ProviderVerdict::Approve
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

struct Slot {
    provider: Box<dyn CompatProvider>,
    quarantined: bool,
}

/// Registered providers plus quarantine bookkeeping.
#[derive(Default)]
pub struct ProviderRegistry {
    slots: Vec<Slot>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn CompatProvider>) {
        self.slots.push(Slot { provider, quarantined: false });
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `true` if any active provider manages the pairing.
    pub fn is_managed(&self, agent: &AgentRecord, item: &ItemRecord) -> bool {
        self.slots
            .iter()
            .filter(|s| !s.quarantined)
            .any(|s| s.provider.is_managed(agent, item))
    }

    /// First active provider's secondary pick, validated against the world.
    ///
    /// A provider naming an unknown item is quarantined on the spot; its
    /// name is returned so the engine can report it, and the search falls
    /// through to the next provider.
    pub fn find_best_secondary(
        &mut self,
        agent: &AgentRecord,
        world: &dyn World,
        score: &dyn Fn(&ItemRecord) -> f32,
    ) -> (Option<ItemId>, Vec<&'static str>) {
        let mut quarantined = Vec::new();
        for slot in self.slots.iter_mut().filter(|s| !s.quarantined) {
            let Some(item) = slot.provider.find_best_secondary(agent, world, score) else {
                continue;
            };
            if world.item(item).is_none() {
                slot.quarantined = true;
                quarantined.push(slot.provider.name());
                continue;
            }
            return (Some(item), quarantined);
        }
        (None, quarantined)
    }

    /// `Ok(())` if every active provider approves the swap.
    pub fn validate_swap(
        &self,
        new: &ItemRecord,
        old: Option<&ItemRecord>,
        agent: &AgentRecord,
    ) -> Result<(), &'static str> {
        for slot in self.slots.iter().filter(|s| !s.quarantined) {
            if let ProviderVerdict::Reject(why) = slot.provider.validate_swap(new, old, agent) {
                return Err(why);
            }
        }
        Ok(())
    }

    /// Names of currently quarantined providers (telemetry).
    pub fn quarantined(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|s| s.quarantined)
            .map(|s| s.provider.name())
            .collect()
    }
}
