//! `rearm-state` — per-agent decision bookkeeping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`state`]   | `AgentDecisionState` — one record per evaluated agent    |
//! | [`expiry`]  | `ExpiryQueue` — sparse tick → denylist-expiry buckets    |
//! | [`store`]   | `AgentStateStore` — owning map + expiry orchestration    |
//! | [`persist`] | `PersistedAgentState` — the only state that survives save/load |
//!
//! # Expiry model
//!
//! Most agents have no denylist entries most ticks.  Scanning every agent's
//! denylist every tick would cost O(agents) regardless of how many entries
//! actually expire.  [`ExpiryQueue`] inverts the problem the same way the
//! wake-queue of a discrete-event simulation does: when an entry is created
//! it registers its expiry tick, and each tick the store drains only the
//! buckets that have come due — O(expiring now), not O(all agents).

pub mod expiry;
pub mod persist;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use expiry::ExpiryQueue;
pub use persist::PersistedAgentState;
pub use state::AgentDecisionState;
pub use store::AgentStateStore;
