//! `CandidateIndex` — routes queries and change notifications per region.

use rustc_hash::FxHashMap;

use rearm_core::{ItemId, MapPos, RegionId, Tick};
use rearm_world::{KindFilter, World, WorldChange};

use crate::region::{ItemMeta, RegionIndex};

/// All region indexes, keyed by `RegionId`.
///
/// Regions come into existence on first touch (change notification or
/// rebuild) and start cold.  Queries against an unknown region behave like
/// queries against a cold one: empty results, `is_cold() == true`.
#[derive(Default)]
pub struct CandidateIndex {
    regions: FxHashMap<RegionId, RegionIndex>,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Status ────────────────────────────────────────────────────────────

    /// `true` when the region needs a rebuild before queries mean anything.
    pub fn is_cold(&self, region: RegionId) -> bool {
        self.regions.get(&region).is_none_or(RegionIndex::is_cold)
    }

    /// Tick of the region's most recent mutation; `Tick::ZERO` for regions
    /// never touched.
    pub fn last_change_tick(&self, region: RegionId) -> Tick {
        self.regions
            .get(&region)
            .map_or(Tick::ZERO, RegionIndex::last_change_tick)
    }

    pub fn len(&self, region: RegionId) -> usize {
        self.regions.get(&region).map_or(0, RegionIndex::len)
    }

    // ── Maintenance ───────────────────────────────────────────────────────

    /// Coarse invalidation: drop the region's contents and go cold.
    pub fn invalidate(&mut self, region: RegionId, now: Tick) {
        self.regions.entry(region).or_default().invalidate(now);
    }

    /// Rebuild a region from the world's full ground-item enumeration.
    pub fn rebuild<W: World>(&mut self, region: RegionId, world: &W, now: Tick) {
        let records = world.ground_items(region);
        self.regions
            .entry(region)
            .or_default()
            .rebuild(records.iter(), now);
    }

    /// Apply one incremental change notification.
    ///
    /// Spawn/update notifications read the live record from `world`; if the
    /// item vanished in the meantime the notification is treated as a
    /// removal, keeping the index consistent with whatever the world says
    /// *now* rather than what the notification said then.
    pub fn apply<W: World>(&mut self, change: &WorldChange, world: &W, now: Tick) {
        match *change {
            WorldChange::RegionReset(region) => self.invalidate(region, now),

            WorldChange::ItemSpawned { region, item }
            | WorldChange::ItemUpdated { region, item } => {
                let idx = self.regions.entry(region).or_default();
                match world.item(item) {
                    Some(record) if record.holder.is_none() => idx.upsert(record, now),
                    _ => idx.remove(item, now),
                }
            }

            WorldChange::ItemDespawned { region, item } => {
                self.regions.entry(region).or_default().remove(item, now);
            }

            WorldChange::ItemMoved { region, item, pos } => {
                self.regions.entry(region).or_default().relocate(item, pos, now);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn all_items(&self, region: RegionId) -> Vec<(ItemId, ItemMeta)> {
        self.regions
            .get(&region)
            .map_or_else(Vec::new, |idx| idx.all_items().collect())
    }

    pub fn storage_items(&self, region: RegionId) -> Vec<(ItemId, ItemMeta)> {
        self.regions
            .get(&region)
            .map_or_else(Vec::new, |idx| idx.storage_items().collect())
    }

    pub fn items_matching(&self, region: RegionId, filter: &KindFilter) -> Vec<(ItemId, ItemMeta)> {
        self.regions
            .get(&region)
            .map_or_else(Vec::new, |idx| idx.items_matching(filter).collect())
    }

    pub fn items_near(&self, region: RegionId, pos: MapPos, radius: f32) -> Vec<(ItemId, ItemMeta)> {
        self.regions
            .get(&region)
            .map_or_else(Vec::new, |idx| idx.items_near(pos, radius))
    }
}
