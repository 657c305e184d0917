//! `ValidationCache` — TTL'd, fingerprinted verdict storage.

use rustc_hash::FxHashMap;

use rearm_core::{AgentId, ItemId, Tick};
use rearm_world::ItemRecord;

use crate::DenialReason;

// ── Fingerprint ───────────────────────────────────────────────────────────────

/// Snapshot of the volatile item state a cache entry was computed under.
///
/// Cheap to build and compare; a mismatch at lookup time means the world
/// moved underneath the entry and it must be recomputed even if unexpired.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Fingerprint {
    pub forbidden: bool,
    pub has_holder: bool,
}

impl Fingerprint {
    pub fn of(item: &ItemRecord) -> Self {
        Self {
            forbidden: item.forbidden,
            has_holder: item.holder.is_some(),
        }
    }
}

// ── CacheEntry ────────────────────────────────────────────────────────────────

/// One cached verdict for an (agent, item) pair.
#[derive(Copy, Clone, Debug)]
pub struct CacheEntry {
    /// `Ok(())` = eligible; `Err(reason)` = the denial that was computed.
    pub verdict: Result<(), DenialReason>,
    /// First tick at which the entry is no longer trusted.
    pub expiry: Tick,
    /// Volatile state at computation time.
    pub fingerprint: Fingerprint,
}

// ── ValidationCache ───────────────────────────────────────────────────────────

/// Two-level map: agent → item → entry.
///
/// The outer level exists so purging an agent is a single removal — no
/// per-agent cache entry may survive the agent it belongs to.
#[derive(Default)]
pub struct ValidationCache {
    map: FxHashMap<AgentId, FxHashMap<ItemId, CacheEntry>>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trusted lookup: returns the verdict only if the entry is unexpired
    /// *and* its fingerprint matches `current`.  Stale entries are removed
    /// on the way out so they can't be re-read cheaper than recomputing.
    pub fn lookup(
        &mut self,
        agent: AgentId,
        item: ItemId,
        now: Tick,
        current: Fingerprint,
    ) -> Option<Result<(), DenialReason>> {
        let per_agent = self.map.get_mut(&agent)?;
        let entry = per_agent.get(&item)?;
        if now >= entry.expiry || entry.fingerprint != current {
            per_agent.remove(&item);
            return None;
        }
        Some(entry.verdict)
    }

    pub fn insert(&mut self, agent: AgentId, item: ItemId, entry: CacheEntry) {
        self.map.entry(agent).or_default().insert(item, entry);
    }

    /// Drop every entry for `agent`.  O(1) outer-map removal.
    pub fn purge_agent(&mut self, agent: AgentId) {
        self.map.remove(&agent);
    }

    /// Drop every entry referencing `item` (item destroyed).
    ///
    /// Walks all agents; called from the amortized cleanup path, not per
    /// tick.
    pub fn purge_item(&mut self, item: ItemId) {
        for per_agent in self.map.values_mut() {
            per_agent.remove(&item);
        }
        self.map.retain(|_, per_agent| !per_agent.is_empty());
    }

    /// Amortized eviction of expired entries.  Returns how many were
    /// removed.
    pub fn sweep(&mut self, now: Tick) -> usize {
        let mut removed = 0;
        for per_agent in self.map.values_mut() {
            let before = per_agent.len();
            per_agent.retain(|_, entry| now < entry.expiry);
            removed += before - per_agent.len();
        }
        self.map.retain(|_, per_agent| !per_agent.is_empty());
        removed
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Total entries across all agents (telemetry).
    pub fn len(&self) -> usize {
        self.map.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `true` if any entry exists for `agent` (purge verification).
    pub fn has_agent(&self, agent: AgentId) -> bool {
        self.map.contains_key(&agent)
    }
}
