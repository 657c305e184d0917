//! Command shapes and the execution summary.

use rearm_core::{AgentId, ItemId, MapPos};

/// An atomic state-transition request produced by the scheduler.
///
/// One command per agent per evaluation, maximum.  The executor owns the
/// step sequencing; the command only says *what* should end up true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EquipCommand {
    /// Pick up and equip a primary; the agent currently has none.
    Equip { agent: AgentId, item: ItemId },

    /// Replace the equipped primary with `item`, leaving the old weapon on
    /// the ground at the agent's position.
    SwapPrimary { agent: AgentId, item: ItemId },

    /// Stow `item` as a secondary.  When inventory capacity would be
    /// exceeded, `displace` names the secondary to drop first — never
    /// silently destroyed.
    SwapSecondary {
        agent: AgentId,
        item: ItemId,
        displace: Option<ItemId>,
    },
}

impl EquipCommand {
    pub fn agent(&self) -> AgentId {
        match *self {
            EquipCommand::Equip { agent, .. }
            | EquipCommand::SwapPrimary { agent, .. }
            | EquipCommand::SwapSecondary { agent, .. } => agent,
        }
    }

    /// The item being acquired.
    pub fn item(&self) -> ItemId {
        match *self {
            EquipCommand::Equip { item, .. }
            | EquipCommand::SwapPrimary { item, .. }
            | EquipCommand::SwapSecondary { item, .. } => item,
        }
    }

    /// Stable label for telemetry rows.
    pub fn kind_str(&self) -> &'static str {
        match self {
            EquipCommand::Equip { .. }         => "equip",
            EquipCommand::SwapPrimary { .. }   => "swap_primary",
            EquipCommand::SwapSecondary { .. } => "swap_secondary",
        }
    }
}

/// What actually happened, for the scheduler's bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Executed {
    /// The item now equipped or stowed (left the ground — the candidate
    /// index should see a despawn).
    pub picked: ItemId,
    /// An item that ended up on the ground (the index should see a spawn,
    /// and the scheduler briefly denylists it so the agent doesn't
    /// immediately re-evaluate its own cast-off).
    pub displaced: Option<(ItemId, MapPos)>,
}
