//! The host-configurable policy surface.
//!
//! Every tuning constant in the engine — tier thresholds, cache TTLs, tick
//! budgets, cooldowns — is a field here rather than a hardcoded value.  The
//! host's settings UI reads and writes this struct; the engine treats it as
//! read-only for the duration of a tick.
//!
//! Tick-count fields assume the host's native tick rate; at 60 ticks/second
//! the defaults put the equip cooldown at ~5 s and the structural cache TTL
//! at ~30 s.

use crate::{CoreError, CoreResult, KindId};

/// Read-only configuration consumed by the scheduler, validator, and command
/// layer.  Construct with [`EquipPolicy::default`] and adjust fields, then
/// call [`validate`](Self::validate) before handing it to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipPolicy {
    /// Master switch.  When false, every evaluation fast-rejects.
    pub enabled: bool,

    // ── Acceptance tiers ──────────────────────────────────────────────────
    /// Minimum candidate/current score ratio to count as an upgrade at all
    /// ("Good" tier).  Must be ≥ 1.0; below that the engine would thrash.
    pub upgrade_threshold: f32,
    /// Ratio at or above which a candidate is a "Great" upgrade.
    pub great_threshold: f32,
    /// Ratio at or above which a candidate is an "Amazing" upgrade.  The
    /// candidate scan stops early once one is found.
    pub amazing_threshold: f32,

    // ── Search restrictions ───────────────────────────────────────────────
    /// Only consider items inside designated storage, not loose drops.
    pub search_storage_only: bool,
    /// Allow replacing a forced-retention primary with a same-kind upgrade.
    pub allow_forced_upgrades: bool,
    /// Allow agents younger than `minor_min_age` to auto-equip at all.
    pub allow_minors: bool,
    /// Age below which an agent counts as a minor.
    pub minor_min_age: u32,
    /// Also search for secondary (inventory) weapons, not just the primary.
    pub auto_equip_secondary: bool,
    /// Kinds no agent may auto-equip, regardless of filters.  Small list;
    /// linear scan is cheaper than hashing at realistic sizes.
    pub blacklist: Vec<KindId>,

    // ── Work budgets ──────────────────────────────────────────────────────
    /// Global cap on agents fully evaluated per tick.  Agents over the cap
    /// are deferred (left eligible), never skipped permanently.
    pub max_agents_per_tick: u32,
    /// Cap on candidates that receive a full score in one search.
    pub max_full_scores_per_search: u32,
    /// Cap on candidates pulled from the index in one search.
    pub max_candidates: u32,

    // ── Cooldowns & throttles ─────────────────────────────────────────────
    /// Ticks after a successful equip before the agent re-evaluates.
    pub equip_cooldown_ticks: u64,
    /// Ticks during which a failed attempt on an item suppresses retrying
    /// that same item.
    pub attempt_throttle_ticks: u64,
    /// Denylist duration for transient failures (item contended/unreachable).
    pub failure_denylist_ticks: u64,
    /// Denylist duration for structural ineligibility (wrong body size).
    pub structural_denylist_ticks: u64,
    /// Ticks between full re-scans for an agent when nothing changed.
    pub recheck_interval_ticks: u64,
    /// Uniform jitter added to the recheck interval so steady-state agents
    /// don't all re-scan on the same tick.  0 disables staggering.
    pub recheck_jitter_ticks: u64,

    // ── Cache lifetimes ───────────────────────────────────────────────────
    /// TTL for cached negatives that can flip quickly (ownership-adjacent).
    pub volatile_cache_ttl: u64,
    /// TTL for near-permanent negatives (body size, faction policy).
    pub structural_cache_ttl: u64,

    // ── Scan pruning ──────────────────────────────────────────────────────
    /// Candidates whose rough score falls below `best_rough / ratio` are not
    /// fully scored.  The engine widens this to the score engine's own
    /// safety bound if set too tight, so pruning can never discard the true
    /// best candidate.
    pub rough_prune_ratio: f32,

    // ── Command execution ─────────────────────────────────────────────────
    /// When true, a primary swap drops the old weapon before equipping the
    /// new one (brief unarmed window).  When false the old weapon is held
    /// until the new equip succeeds.
    pub weak_window_swap: bool,

    // ── Housekeeping ──────────────────────────────────────────────────────
    /// Coarse interval between amortized cache sweeps.
    pub cleanup_interval_ticks: u64,
    /// If the state store is empty after this many ticks of uptime, treat it
    /// as a fresh world load and clear all derived caches once.
    pub fresh_load_warmup_ticks: u64,
    /// Lifetime of an advisory (scheduler-local) reservation.
    pub reservation_ticks: u64,
}

impl Default for EquipPolicy {
    fn default() -> Self {
        Self {
            enabled: true,

            upgrade_threshold: 1.05,
            great_threshold:   1.5,
            amazing_threshold: 2.0,

            search_storage_only:   false,
            allow_forced_upgrades: false,
            allow_minors:          false,
            minor_min_age:         13,
            auto_equip_secondary:  false,
            blacklist:             Vec::new(),

            max_agents_per_tick:        30,
            max_full_scores_per_search: 40,
            max_candidates:             400,

            equip_cooldown_ticks:      300,
            attempt_throttle_ticks:    120,
            failure_denylist_ticks:    600,
            structural_denylist_ticks: 30_000,
            recheck_interval_ticks:    1_800,
            recheck_jitter_ticks:      240,

            volatile_cache_ttl:   120,
            structural_cache_ttl: 1_800,

            rough_prune_ratio: 4.0,

            weak_window_swap: false,

            cleanup_interval_ticks:  2_000,
            fresh_load_warmup_ticks: 600,
            reservation_ticks:       180,
        }
    }
}

impl EquipPolicy {
    /// Check cross-field invariants the engine relies on.
    ///
    /// Tier thresholds must be ordered and ≥ 1.0, budgets non-zero, and the
    /// prune ratio ≥ 1.0 (a ratio below 1 would prune the best candidate).
    pub fn validate(&self) -> CoreResult<()> {
        if self.upgrade_threshold < 1.0 {
            return Err(CoreError::Config(format!(
                "upgrade_threshold {} must be >= 1.0",
                self.upgrade_threshold
            )));
        }
        if !(self.upgrade_threshold <= self.great_threshold
            && self.great_threshold <= self.amazing_threshold)
        {
            return Err(CoreError::Config(format!(
                "tier thresholds must be ordered: {} <= {} <= {}",
                self.upgrade_threshold, self.great_threshold, self.amazing_threshold
            )));
        }
        if self.max_agents_per_tick == 0 {
            return Err(CoreError::Config("max_agents_per_tick must be > 0".into()));
        }
        if self.max_full_scores_per_search == 0 || self.max_candidates == 0 {
            return Err(CoreError::Config("search budgets must be > 0".into()));
        }
        if self.rough_prune_ratio < 1.0 {
            return Err(CoreError::Config(format!(
                "rough_prune_ratio {} must be >= 1.0",
                self.rough_prune_ratio
            )));
        }
        Ok(())
    }
}
