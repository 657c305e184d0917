//! `ExpiryQueue` — sparse per-tick denylist-expiry buckets.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and O(log W) bucket removal where W =
//! number of distinct expiry ticks currently enqueued.  Denylist durations
//! cluster around two policy values (transient and structural), so W stays
//! small regardless of how many agents are denying items.

use std::collections::BTreeMap;

use rearm_core::{AgentId, ItemId, Tick};

/// A priority queue mapping expiry ticks → denylist entries due at that tick.
#[derive(Default)]
pub struct ExpiryQueue {
    inner: BTreeMap<Tick, Vec<(AgentId, ItemId)>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `(agent, item)` for expiry processing at `tick`.
    ///
    /// The same pair may appear at multiple ticks when an entry is extended;
    /// the store resolves duplicates against the authoritative per-agent
    /// denylist map when the bucket drains.
    pub fn push(&mut self, tick: Tick, agent: AgentId, item: ItemId) {
        self.inner.entry(tick).or_default().push((agent, item));
        self.total += 1;
    }

    /// Remove and return every entry scheduled at or before `now`.
    ///
    /// The ≤ comparison (rather than ==) keeps expiry exact even when the
    /// host skips ticks between scheduler invocations.  Returns an empty
    /// vec without allocating when nothing is due — the common case.
    pub fn drain_due(&mut self, now: Tick) -> Vec<(AgentId, ItemId)> {
        if self.next_tick().is_none_or(|t| t > now) {
            return Vec::new();
        }
        let due: Vec<Tick> = self
            .inner
            .range(..=now)
            .map(|(&tick, _)| tick)
            .collect();
        let mut drained = Vec::new();
        for tick in due {
            if let Some(mut bucket) = self.inner.remove(&tick) {
                self.total -= bucket.len();
                drained.append(&mut bucket);
            }
        }
        drained
    }

    /// The earliest tick with at least one queued entry, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total entries across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks with at least one queued entry.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }

    /// Drop everything (world reset).
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
