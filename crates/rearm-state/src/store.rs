//! `AgentStateStore` — owning container for all per-agent decision state.

use rustc_hash::FxHashMap;

use rearm_core::{AgentId, AgentRng, ItemId, Tick};

use crate::{AgentDecisionState, ExpiryQueue};

/// Owns every [`AgentDecisionState`] plus the shared expiry queue.
///
/// Keyed by `AgentId` so a purge is a single map removal; queue entries for
/// a purged agent become harmless no-ops when their bucket drains.
pub struct AgentStateStore {
    entries: FxHashMap<AgentId, AgentDecisionState>,
    expiry: ExpiryQueue,
    /// Global seed for the per-agent recheck stagger.
    seed: u64,
    /// Set once the store has either served an agent or reported a fresh
    /// load, so the fresh-load signal can't fire repeatedly.
    fresh_load_resolved: bool,
}

impl AgentStateStore {
    pub fn new(seed: u64) -> Self {
        Self {
            entries: FxHashMap::default(),
            expiry: ExpiryQueue::new(),
            seed,
            fresh_load_resolved: false,
        }
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn get(&self, agent: AgentId) -> Option<&AgentDecisionState> {
        self.entries.get(&agent)
    }

    pub fn get_or_create(&mut self, agent: AgentId) -> &mut AgentDecisionState {
        self.fresh_load_resolved = true;
        self.entries.entry(agent).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Recording ─────────────────────────────────────────────────────────

    /// Record a completed evaluation: decision tick, the index change tick
    /// the scan observed, and the agent attribute fingerprint.
    pub fn record_decision(
        &mut self,
        agent: AgentId,
        now: Tick,
        index_tick: Tick,
        fingerprint: u64,
    ) {
        let st = self.get_or_create(agent);
        st.last_decision_tick = Some(now);
        st.last_scan_index_tick = index_tick;
        st.attr_fingerprint = fingerprint;
    }

    /// Record a successful equip, starting the cooldown.
    pub fn record_equip(&mut self, agent: AgentId, now: Tick) {
        self.get_or_create(agent).last_equip_tick = Some(now);
    }

    /// Record an attempt on `item` for the contention throttle.
    pub fn record_attempt(&mut self, agent: AgentId, item: ItemId, now: Tick) {
        self.get_or_create(agent).last_attempt = Some((item, now));
    }

    /// Schedule the next routine re-scan with the agent's deterministic
    /// stagger offset.
    ///
    /// The jitter is a pure function of `(seed, agent)`, so each agent gets
    /// a stable personal offset and re-scan waves stay spread out no matter
    /// how many times this is called or in what order.
    pub fn schedule_recheck(&mut self, agent: AgentId, now: Tick, interval: u64, jitter: u64) {
        let offset = AgentRng::new(self.seed, agent).jitter(jitter);
        self.get_or_create(agent).next_recheck_tick = now + interval + offset;
    }

    // ── Denylist ──────────────────────────────────────────────────────────

    /// Denylist `item` for `agent` until `expiry` (exclusive).
    ///
    /// Idempotent, and never shortens an existing entry: re-denying with an
    /// earlier expiry keeps the later one.
    pub fn deny_until(&mut self, agent: AgentId, item: ItemId, expiry: Tick) {
        let st = self.get_or_create(agent);
        let slot = st.denylist.entry(item).or_insert(expiry);
        if *slot < expiry {
            *slot = expiry;
        }
        let effective = *slot;
        self.expiry.push(effective, agent, item);
    }

    /// `true` if `item` is denylisted for `agent` at `now`.
    pub fn is_denied(&self, agent: AgentId, item: ItemId, now: Tick) -> bool {
        self.entries
            .get(&agent)
            .is_some_and(|st| st.is_denied(item, now))
    }

    /// Clear every denylist entry due at or before `now`.
    ///
    /// Cost is O(entries expiring now).  An entry whose stored expiry was
    /// extended after enqueueing survives its stale queue slot.  Returns the
    /// number of entries actually cleared.
    pub fn expire_due(&mut self, now: Tick) -> usize {
        let mut cleared = 0;
        for (agent, item) in self.expiry.drain_due(now) {
            if let Some(st) = self.entries.get_mut(&agent) {
                if st.denylist.get(&item).is_some_and(|&expiry| expiry <= now) {
                    st.denylist.remove(&item);
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Earliest pending expiry, if any (exposed for tests and telemetry).
    pub fn next_expiry_tick(&self) -> Option<Tick> {
        self.expiry.next_tick()
    }

    /// Pending expiry-queue entries (bounded-operation-count observability).
    pub fn pending_expiries(&self) -> usize {
        self.expiry.len()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Drop all state for `agent`.  Queue entries referencing the agent
    /// become no-ops.
    pub fn purge(&mut self, agent: AgentId) {
        self.entries.remove(&agent);
    }

    /// Drop everything (world reset).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.expiry.clear();
        self.fresh_load_resolved = false;
    }

    /// Fresh-load detection: an empty store past the warm-up window means
    /// the world was just (re)loaded and any derived caches the caller holds
    /// belong to a different session.  Reports `true` at most once until the
    /// store is cleared again.
    pub fn detect_fresh_load(&mut self, now: Tick, warmup_ticks: u64) -> bool {
        if self.fresh_load_resolved || !self.entries.is_empty() {
            return false;
        }
        if now.0 > warmup_ticks {
            self.fresh_load_resolved = true;
            return true;
        }
        false
    }
}
