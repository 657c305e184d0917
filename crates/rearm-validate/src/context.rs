//! Read-only state passed to every eligibility check.

use rearm_core::{EquipPolicy, Tick};
use rearm_state::AgentStateStore;
use rearm_world::World;

/// A read-only snapshot handed to each check in the chain.
///
/// Built once per `validate` call and shared across all checks; nothing in
/// it may be mutated while a chain is running.  Side effects a check wants
/// (denylist entries) are returned in its [`Denial`][crate::Denial] and
/// applied by the driver afterwards, keeping every check a pure function of
/// this context.
pub struct ValidationContext<'a> {
    pub world: &'a dyn World,
    pub policy: &'a EquipPolicy,
    /// Read access to per-agent decision state (denylist membership).
    pub state: &'a AgentStateStore,
    pub now: Tick,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        world: &'a dyn World,
        policy: &'a EquipPolicy,
        state: &'a AgentStateStore,
        now: Tick,
    ) -> Self {
        Self { world, policy, state, now }
    }
}
