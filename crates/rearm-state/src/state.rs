//! `AgentDecisionState` — what the engine remembers about one agent.

use rustc_hash::FxHashMap;

use rearm_core::{ItemId, Tick};

/// Per-agent scheduling memory.
///
/// Created lazily on first evaluation and purged when the host reports the
/// agent invalid.  Everything here is derived bookkeeping except
/// `last_equip_tick`, which participates in the persisted cooldown rows.
#[derive(Clone, Debug, Default)]
pub struct AgentDecisionState {
    /// Tick of the last completed evaluation (any outcome).
    pub last_decision_tick: Option<Tick>,

    /// Tick of the last successful equip — the cooldown anchor.
    pub last_equip_tick: Option<Tick>,

    /// Most recent attempted item and when, for the contention throttle.
    pub last_attempt: Option<(ItemId, Tick)>,

    /// Temporarily excluded items → expiry tick.  Entries are cleared by the
    /// store's expiry queue, never by scanning.
    pub denylist: FxHashMap<ItemId, Tick>,

    /// Fingerprint of scoring-relevant agent attributes at the last full
    /// scan; a mismatch forces a fresh scan.
    pub attr_fingerprint: u64,

    /// Candidate-index change tick observed at the last full scan.
    pub last_scan_index_tick: Tick,

    /// Earliest tick at which a routine (nothing-changed) re-scan may run.
    pub next_recheck_tick: Tick,
}

impl AgentDecisionState {
    /// `true` while the post-equip cooldown is still running at `now`.
    #[inline]
    pub fn on_equip_cooldown(&self, now: Tick, cooldown_ticks: u64) -> bool {
        self.last_equip_tick
            .is_some_and(|t| now < t + cooldown_ticks)
    }

    /// `true` if `item` was attempted recently enough to be throttled.
    #[inline]
    pub fn attempt_throttled(&self, item: ItemId, now: Tick, throttle_ticks: u64) -> bool {
        self.last_attempt
            .is_some_and(|(i, t)| i == item && now < t + throttle_ticks)
    }

    /// `true` if `item` is denylisted at `now` (strictly before its expiry).
    #[inline]
    pub fn is_denied(&self, item: ItemId, now: Tick) -> bool {
        self.denylist.get(&item).is_some_and(|&expiry| now < expiry)
    }
}
