//! Persisted per-agent rows — the only engine state that survives a save.
//!
//! Everything else the engine holds (validation cache, index, advisory
//! reservations, denylists) is derived and rebuildable, so save files carry
//! just the forced-retention flag and the equip-cooldown anchor.  The host
//! owns the actual serialization format; these rows are plain serde values
//! it can embed wherever it likes.

use rearm_core::{AgentId, Tick};

use crate::AgentStateStore;

/// One agent's save-file row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersistedAgentState {
    pub agent: AgentId,
    /// The agent's current primary is player-flagged non-replaceable.
    /// Stored here because the engine must honour it from the first tick
    /// after load, before the host finishes rebuilding its own records.
    pub forced_retention: bool,
    /// Cooldown anchor; `None` if the agent never auto-equipped.
    pub last_equip_tick: Option<Tick>,
}

/// Extract rows for every agent with persistence-worthy state.
///
/// `forced` reports the host-side forced-retention flag per agent, so the
/// row set also covers agents the engine itself holds no state for.
pub fn export<F>(store: &AgentStateStore, agents: &[AgentId], forced: F) -> Vec<PersistedAgentState>
where
    F: Fn(AgentId) -> bool,
{
    agents
        .iter()
        .filter_map(|&agent| {
            let forced_retention = forced(agent);
            let last_equip_tick = store.get(agent).and_then(|st| st.last_equip_tick);
            if !forced_retention && last_equip_tick.is_none() {
                return None; // nothing worth a row
            }
            Some(PersistedAgentState {
                agent,
                forced_retention,
                last_equip_tick,
            })
        })
        .collect()
}

/// Restore cooldown anchors into `store` and return the forced-retention
/// flags for the host to re-apply to its agent records.
pub fn import(store: &mut AgentStateStore, rows: &[PersistedAgentState]) -> Vec<(AgentId, bool)> {
    let mut flags = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(tick) = row.last_equip_tick {
            store.get_or_create(row.agent).last_equip_tick = Some(tick);
        }
        flags.push((row.agent, row.forced_retention));
    }
    flags
}
