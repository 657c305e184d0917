//! Per-region item index: metadata map + R-tree.
//!
//! # Data layout
//!
//! `items` answers identity and attribute queries in O(1); the R-tree
//! answers "what lies within r cells of here" without scanning the whole
//! region.  Both are updated together so they never disagree.
//!
//! The tree stores `(x, y) → ItemId` entries (the same shape the road
//! network index uses for node snapping); metadata lives only in the map so
//! tree entries stay small and `remove` can match on `(point, id)` equality.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use rearm_core::{ItemId, KindId, MapPos, Tick};
use rearm_world::{ItemRecord, KindFilter};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `ItemId`.
#[derive(Clone, PartialEq)]
struct ItemEntry {
    point: [f32; 2],
    id: ItemId,
}

impl RTreeObject for ItemEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ItemEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ItemMeta ──────────────────────────────────────────────────────────────────

/// The slice of item state the index tracks — just enough to answer
/// storage/allow-list queries and to locate the tree entry for removal.
/// Everything else (quality, condition, flags) is read from the `World` at
/// validation time, so the index never goes stale on volatile attributes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemMeta {
    pub kind: KindId,
    pub pos: MapPos,
    pub in_storage: bool,
}

impl ItemMeta {
    fn of(record: &ItemRecord) -> Self {
        Self {
            kind: record.kind,
            pos: record.pos,
            in_storage: record.in_storage,
        }
    }
}

// ── RegionIndex ───────────────────────────────────────────────────────────────

/// Index of all loose items in one region.
///
/// Starts **cold**: queries return empty and [`is_cold`](Self::is_cold)
/// reports true until the first [`rebuild`](Self::rebuild).
pub struct RegionIndex {
    items: FxHashMap<ItemId, ItemMeta>,
    tree: RTree<ItemEntry>,
    change_tick: Tick,
    cold: bool,
}

impl Default for RegionIndex {
    fn default() -> Self {
        Self {
            items: FxHashMap::default(),
            tree: RTree::new(),
            change_tick: Tick::ZERO,
            cold: true,
        }
    }
}

impl RegionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Status ────────────────────────────────────────────────────────────

    /// `true` until the first rebuild, and again after `invalidate`.
    #[inline]
    pub fn is_cold(&self) -> bool {
        self.cold
    }

    /// Tick of the most recent mutation (rebuild included).
    #[inline]
    pub fn last_change_tick(&self) -> Tick {
        self.change_tick
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ── Maintenance ───────────────────────────────────────────────────────

    /// Discard contents and go cold.  Called on coarse world changes; the
    /// scheduler rebuilds lazily on next use.
    pub fn invalidate(&mut self, now: Tick) {
        self.items.clear();
        self.tree = RTree::new();
        self.cold = true;
        self.change_tick = now;
    }

    /// Replace contents from a full enumeration of the region's loose items.
    /// Bulk-loads the R-tree, which is substantially faster than repeated
    /// inserts for map-load-sized batches.
    pub fn rebuild<'a, I>(&mut self, records: I, now: Tick)
    where
        I: IntoIterator<Item = &'a ItemRecord>,
    {
        self.items.clear();
        let mut entries = Vec::new();
        for record in records {
            self.items.insert(record.id, ItemMeta::of(record));
            entries.push(ItemEntry {
                point: [record.pos.x, record.pos.y],
                id: record.id,
            });
        }
        self.tree = RTree::bulk_load(entries);
        self.cold = false;
        self.change_tick = now;
    }

    /// Add or refresh one item.  O(log n) for the tree insert.
    pub fn upsert(&mut self, record: &ItemRecord, now: Tick) {
        if self.cold {
            // A rebuild is pending anyway; don't resurrect a cold index
            // one item at a time.
            return;
        }
        if let Some(old) = self.items.insert(record.id, ItemMeta::of(record)) {
            self.tree.remove(&ItemEntry {
                point: [old.pos.x, old.pos.y],
                id: record.id,
            });
        }
        self.tree.insert(ItemEntry {
            point: [record.pos.x, record.pos.y],
            id: record.id,
        });
        self.change_tick = now;
    }

    /// Remove one item.  Unknown IDs are ignored.
    pub fn remove(&mut self, item: ItemId, now: Tick) {
        if let Some(old) = self.items.remove(&item) {
            self.tree.remove(&ItemEntry {
                point: [old.pos.x, old.pos.y],
                id: item,
            });
            self.change_tick = now;
        }
    }

    /// Move one item to `pos` without touching other metadata.
    pub fn relocate(&mut self, item: ItemId, pos: MapPos, now: Tick) {
        let Some(meta) = self.items.get_mut(&item) else {
            return;
        };
        let old_pos = meta.pos;
        meta.pos = pos;
        self.tree.remove(&ItemEntry {
            point: [old_pos.x, old_pos.y],
            id: item,
        });
        self.tree.insert(ItemEntry {
            point: [pos.x, pos.y],
            id: item,
        });
        self.change_tick = now;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every indexed item.  Empty while cold.
    pub fn all_items(&self) -> impl Iterator<Item = (ItemId, ItemMeta)> + '_ {
        self.items.iter().map(|(&id, &meta)| (id, meta))
    }

    /// Items inside designated storage.
    pub fn storage_items(&self) -> impl Iterator<Item = (ItemId, ItemMeta)> + '_ {
        self.all_items().filter(|(_, meta)| meta.in_storage)
    }

    /// Items whose kind passes `filter`.
    pub fn items_matching<'a>(
        &'a self,
        filter: &'a KindFilter,
    ) -> impl Iterator<Item = (ItemId, ItemMeta)> + 'a {
        self.all_items().filter(|(_, meta)| filter.allows(meta.kind))
    }

    /// Items within `radius` cells of `pos`, unsorted.
    pub fn items_near(&self, pos: MapPos, radius: f32) -> Vec<(ItemId, ItemMeta)> {
        self.tree
            .locate_within_distance([pos.x, pos.y], radius * radius)
            .filter_map(|e| self.items.get(&e.id).map(|&meta| (e.id, meta)))
            .collect()
    }
}
