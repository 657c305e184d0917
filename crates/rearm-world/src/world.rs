//! The `World` trait — the seam between the engine and the host simulation.

use rearm_core::{AgentId, ItemId, KindId, MapPos, RegionId};

use crate::{AgentRecord, ItemKind, ItemRecord, WorldResult};

// ── WorldChange ───────────────────────────────────────────────────────────────

/// A notification the host (or the command layer) emits when item placement
/// changes, consumed by the candidate index for incremental maintenance.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldChange {
    /// An item appeared on the ground (spawned, dropped, or unequipped).
    ItemSpawned { region: RegionId, item: ItemId },
    /// An item left the ground (destroyed, picked up, or moved off-region).
    ItemDespawned { region: RegionId, item: ItemId },
    /// An item moved within its region (hauled, shelf reorganisation).
    ItemMoved { region: RegionId, item: ItemId, pos: MapPos },
    /// Per-item attributes relevant to indexing changed (storage membership).
    ItemUpdated { region: RegionId, item: ItemId },
    /// Coarse change: map load or batch mutation.  Forces a full index
    /// rebuild for the region.
    RegionReset(RegionId),
}

impl WorldChange {
    /// The region this change applies to.
    pub fn region(&self) -> RegionId {
        match *self {
            WorldChange::ItemSpawned { region, .. }
            | WorldChange::ItemDespawned { region, .. }
            | WorldChange::ItemMoved { region, .. }
            | WorldChange::ItemUpdated { region, .. } => region,
            WorldChange::RegionReset(region) => region,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the engine is allowed to ask of, or do to, the host simulation.
///
/// Read methods return `None` for unknown IDs rather than erroring — an item
/// disappearing between scan and commit is a routine race, not a bug.
/// Mutating methods are the item-manipulation primitives of the host; each
/// either fully applies or returns a [`WorldError`] with the host state
/// unchanged.
///
/// The host's reservation system is authoritative.  The engine keeps its own
/// advisory reservations to cut same-tick contention, but always re-validates
/// through [`reserve`](World::reserve) before committing an action.
pub trait World {
    // ── Read access ───────────────────────────────────────────────────────

    fn agent(&self, id: AgentId) -> Option<&AgentRecord>;
    fn item(&self, id: ItemId) -> Option<&ItemRecord>;
    fn kind(&self, id: KindId) -> Option<&ItemKind>;

    /// All item records currently on the ground in `region`.  Used only for
    /// (re)building the candidate index, never in the per-agent hot path.
    fn ground_items(&self, region: RegionId) -> Vec<ItemRecord>;

    // ── Authoritative reservations ────────────────────────────────────────

    /// `true` if `agent` could claim `item` right now (not reserved by
    /// another agent's job, not physically unreachable).
    fn is_reservable(&self, item: ItemId, agent: AgentId) -> bool;

    /// Claim `item` for `agent`.  Fails if another agent got there first.
    fn reserve(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()>;

    /// Release a claim.  Releasing an unclaimed item is a no-op.
    fn release(&mut self, agent: AgentId, item: ItemId);

    // ── Item manipulation primitives ──────────────────────────────────────

    /// Make `item` the agent's equipped primary.  The item must be loose on
    /// the ground or in the agent's own inventory.
    fn equip_primary(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()>;

    /// Remove and return the agent's current primary, leaving it in hand
    /// (unequipped but still carried) pending a follow-up `drop_at` or
    /// `add_to_inventory`.
    fn unequip_primary(&mut self, agent: AgentId) -> WorldResult<ItemId>;

    /// Put a carried item on the ground at `pos`.
    fn drop_at(&mut self, agent: AgentId, item: ItemId, pos: MapPos) -> WorldResult<()>;

    /// Stow a carried or ground item into the agent's inventory.
    /// Fails with `InventoryFull` when bulk capacity would be exceeded.
    fn add_to_inventory(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()>;

    /// Take an item out of the agent's inventory, leaving it in hand.
    fn remove_from_inventory(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()>;
}
