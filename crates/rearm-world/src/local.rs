//! `LocalWorld` — an in-memory `World` implementation.
//!
//! Backs the engine's test suite and hosts that have no entity store of
//! their own.  Mutators return the [`WorldChange`] the host must forward to
//! the candidate index, keeping index maintenance explicit rather than
//! hidden behind the trait.
//!
//! Reservation model: a flat `ItemId → AgentId` claim map.  Real hosts have
//! richer job-reservation systems; the engine only ever asks the questions
//! on the [`World`] trait, so this is sufficient.

use rustc_hash::FxHashMap;

use rearm_core::{AgentId, ItemId, KindId, MapPos, RegionId};

use crate::{
    AgentRecord, ItemKind, ItemRecord, World, WorldChange, WorldError, WorldResult,
};

#[derive(Default)]
pub struct LocalWorld {
    kinds:        FxHashMap<KindId, ItemKind>,
    agents:       FxHashMap<AgentId, AgentRecord>,
    items:        FxHashMap<ItemId, ItemRecord>,
    reservations: FxHashMap<ItemId, AgentId>,
}

impl LocalWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn add_kind(&mut self, kind: ItemKind) {
        self.kinds.insert(kind.id, kind);
    }

    pub fn add_agent(&mut self, agent: AgentRecord) {
        self.agents.insert(agent.id, agent);
    }

    /// Mutable access for tests and host-side updates.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        self.agents.get_mut(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut ItemRecord> {
        self.items.get_mut(&id)
    }

    // ── Item lifecycle mutators ───────────────────────────────────────────

    /// Place an item on the ground.  Returns the change to feed the index.
    pub fn spawn_item(&mut self, record: ItemRecord) -> WorldChange {
        let change = WorldChange::ItemSpawned {
            region: record.region,
            item:   record.id,
        };
        self.items.insert(record.id, record);
        change
    }

    /// Destroy an item outright.
    pub fn despawn_item(&mut self, id: ItemId) -> Option<WorldChange> {
        let record = self.items.remove(&id)?;
        self.reservations.remove(&id);
        Some(WorldChange::ItemDespawned {
            region: record.region,
            item:   id,
        })
    }

    /// Move a ground item within its region.
    pub fn move_item(&mut self, id: ItemId, pos: MapPos) -> Option<WorldChange> {
        let record = self.items.get_mut(&id)?;
        record.pos = pos;
        Some(WorldChange::ItemMoved {
            region: record.region,
            item:   id,
            pos,
        })
    }

    /// Toggle storage membership (hauled into or out of a stockpile).
    pub fn set_storage(&mut self, id: ItemId, in_storage: bool) -> Option<WorldChange> {
        let record = self.items.get_mut(&id)?;
        record.in_storage = in_storage;
        Some(WorldChange::ItemUpdated {
            region: record.region,
            item:   id,
        })
    }

    /// Player-forbid toggle.  Volatile: validators read it uncached, so no
    /// index change is produced.
    pub fn set_forbidden(&mut self, id: ItemId, forbidden: bool) {
        if let Some(record) = self.items.get_mut(&id) {
            record.forbidden = forbidden;
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn agent_checked(&mut self, id: AgentId) -> WorldResult<&mut AgentRecord> {
        self.agents.get_mut(&id).ok_or(WorldError::AgentMissing(id))
    }

    fn inventory_bulk(&self, agent: &AgentRecord) -> u32 {
        agent
            .inventory
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter_map(|rec| self.kinds.get(&rec.kind))
            .map(|k| k.bulk)
            .sum()
    }
}

impl World for LocalWorld {
    // ── Read access ───────────────────────────────────────────────────────

    fn agent(&self, id: AgentId) -> Option<&AgentRecord> {
        self.agents.get(&id)
    }

    fn item(&self, id: ItemId) -> Option<&ItemRecord> {
        self.items.get(&id)
    }

    fn kind(&self, id: KindId) -> Option<&ItemKind> {
        self.kinds.get(&id)
    }

    fn ground_items(&self, region: RegionId) -> Vec<ItemRecord> {
        self.items
            .values()
            .filter(|rec| rec.region == region && rec.holder.is_none())
            .cloned()
            .collect()
    }

    // ── Authoritative reservations ────────────────────────────────────────

    fn is_reservable(&self, item: ItemId, agent: AgentId) -> bool {
        match self.reservations.get(&item) {
            None            => true,
            Some(&claimant) => claimant == agent,
        }
    }

    fn reserve(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()> {
        if !self.items.contains_key(&item) {
            return Err(WorldError::ItemMissing(item));
        }
        match self.reservations.get(&item) {
            Some(&claimant) if claimant != agent => Err(WorldError::AlreadyReserved(item)),
            _ => {
                self.reservations.insert(item, agent);
                Ok(())
            }
        }
    }

    fn release(&mut self, agent: AgentId, item: ItemId) {
        if self.reservations.get(&item) == Some(&agent) {
            self.reservations.remove(&item);
        }
    }

    // ── Item manipulation primitives ──────────────────────────────────────

    fn equip_primary(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()> {
        let record = self.items.get(&item).ok_or(WorldError::ItemMissing(item))?;
        if record.held_by_other(agent) {
            return Err(WorldError::AlreadyReserved(item));
        }
        let a = self.agent_checked(agent)?;
        if a.primary.is_some() {
            return Err(WorldError::Rejected("primary slot occupied"));
        }
        a.primary = Some(item);
        a.inventory.retain(|&i| i != item);
        // Checked above; re-borrowed because agent_checked needed &mut self.
        if let Some(rec) = self.items.get_mut(&item) {
            rec.holder = Some(agent);
        }
        Ok(())
    }

    fn unequip_primary(&mut self, agent: AgentId) -> WorldResult<ItemId> {
        let a = self.agent_checked(agent)?;
        let item = a
            .primary
            .take()
            .ok_or(WorldError::Rejected("no primary equipped"))?;
        // The item stays in hand (holder unchanged) pending drop_at or
        // add_to_inventory.
        Ok(item)
    }

    fn drop_at(&mut self, agent: AgentId, item: ItemId, pos: MapPos) -> WorldResult<()> {
        let holds = self
            .items
            .get(&item)
            .ok_or(WorldError::ItemMissing(item))?
            .holder
            == Some(agent);
        if !holds {
            return Err(WorldError::NotHolding(agent, item));
        }
        let a = self.agent_checked(agent)?;
        if a.primary == Some(item) {
            return Err(WorldError::Rejected("unequip before dropping the primary"));
        }
        a.inventory.retain(|&i| i != item);
        if let Some(rec) = self.items.get_mut(&item) {
            rec.holder = None;
            rec.pos = pos;
            rec.in_storage = false;
        }
        Ok(())
    }

    fn add_to_inventory(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()> {
        let record = self.items.get(&item).ok_or(WorldError::ItemMissing(item))?;
        if record.held_by_other(agent) {
            return Err(WorldError::AlreadyReserved(item));
        }
        let bulk = self.kinds.get(&record.kind).map_or(1, |k| k.bulk);
        let a = self.agents.get(&agent).ok_or(WorldError::AgentMissing(agent))?;
        if self.inventory_bulk(a) + bulk > a.inventory_capacity {
            return Err(WorldError::InventoryFull(agent));
        }
        let a = self.agent_checked(agent)?;
        if !a.inventory.contains(&item) {
            a.inventory.push(item);
        }
        if let Some(rec) = self.items.get_mut(&item) {
            rec.holder = Some(agent);
        }
        Ok(())
    }

    fn remove_from_inventory(&mut self, agent: AgentId, item: ItemId) -> WorldResult<()> {
        let a = self.agent_checked(agent)?;
        let before = a.inventory.len();
        a.inventory.retain(|&i| i != item);
        if a.inventory.len() == before {
            return Err(WorldError::NotHolding(agent, item));
        }
        // Item stays in hand (holder unchanged).
        Ok(())
    }
}
