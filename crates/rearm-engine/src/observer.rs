//! Engine observer — the fire-and-forget telemetry seam.

use rearm_command::{CommandError, Executed};
use rearm_core::{AgentId, Tick};

use crate::Decision;

/// Housekeeping counters reported by `report_periodic_cleanup`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub cache_entries_evicted: usize,
    pub denylist_entries_cleared: usize,
    pub reservations_dropped: usize,
}

/// Callbacks invoked by the engine at decision and housekeeping points.
///
/// All methods have no-op defaults and no return values: the engine never
/// blocks on, retries through, or fails because of an observer.  Implementors
/// that can fail (file writers) must swallow and stash their own errors.
pub trait EngineObserver {
    /// Every completed evaluation, command or skip.
    fn on_decision(&mut self, _tick: Tick, _agent: AgentId, _decision: &Decision) {}

    /// A command ran to completion.
    fn on_executed(&mut self, _tick: Tick, _agent: AgentId, _executed: &Executed) {}

    /// A command failed (after rollback); the agent keeps its previous
    /// weapon and the item was throttled.
    fn on_execute_failed(&mut self, _tick: Tick, _agent: AgentId, _error: &CommandError) {}

    /// A compatibility provider returned malformed data and was quarantined
    /// for the rest of the session.  Fired once per provider.
    fn on_provider_quarantined(&mut self, _tick: Tick, _provider: &'static str) {}

    /// Periodic cleanup finished.
    fn on_cleanup(&mut self, _tick: Tick, _stats: &CleanupStats) {}
}

/// An [`EngineObserver`] that does nothing.  Use when no telemetry is wanted.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
