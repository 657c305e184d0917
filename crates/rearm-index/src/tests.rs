//! Unit tests for rearm-index.

use rearm_core::{AgentId, ItemId, KindId, MapPos, RegionId, Tick};
use rearm_world::{ItemKind, ItemRecord, KindFilter, LocalWorld, WeaponClass, World, WorldChange};

use crate::CandidateIndex;

// ── Helpers ───────────────────────────────────────────────────────────────────

const REGION: RegionId = RegionId(0);

fn kind(id: u16) -> ItemKind {
    ItemKind {
        id: KindId(id),
        label: format!("kind-{id}"),
        class: WeaponClass::Melee,
        base_power: 5.0,
        min_body_size: 0.0,
        bulk: 1,
    }
}

fn world_with_items(n: u32) -> LocalWorld {
    let mut w = LocalWorld::new();
    w.add_kind(kind(1));
    w.add_kind(kind(2));
    for i in 0..n {
        let k = if i % 2 == 0 { KindId(1) } else { KindId(2) };
        w.spawn_item(ItemRecord::on_ground(
            ItemId(i),
            k,
            REGION,
            MapPos::new(i as f32, 0.0),
        ));
    }
    w
}

fn built_index(world: &LocalWorld) -> CandidateIndex {
    let mut idx = CandidateIndex::new();
    idx.rebuild(REGION, world, Tick(1));
    idx
}

// ── Cold behavior ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cold {
    use super::*;

    #[test]
    fn unknown_region_is_cold_and_empty() {
        let idx = CandidateIndex::new();
        assert!(idx.is_cold(REGION));
        assert!(idx.all_items(REGION).is_empty());
        assert_eq!(idx.last_change_tick(REGION), Tick::ZERO);
    }

    #[test]
    fn rebuild_warms_the_region() {
        let world = world_with_items(4);
        let idx = built_index(&world);
        assert!(!idx.is_cold(REGION));
        assert_eq!(idx.len(REGION), 4);
        assert_eq!(idx.last_change_tick(REGION), Tick(1));
    }

    #[test]
    fn invalidate_goes_cold_and_empties() {
        let world = world_with_items(4);
        let mut idx = built_index(&world);
        idx.invalidate(REGION, Tick(9));
        assert!(idx.is_cold(REGION));
        assert!(idx.all_items(REGION).is_empty());
        assert_eq!(idx.last_change_tick(REGION), Tick(9));
    }

    #[test]
    fn incremental_changes_on_cold_region_do_not_warm_it() {
        let world = world_with_items(1);
        let mut idx = CandidateIndex::new();
        idx.apply(
            &WorldChange::ItemSpawned { region: REGION, item: ItemId(0) },
            &world,
            Tick(2),
        );
        assert!(idx.is_cold(REGION));
        assert!(idx.all_items(REGION).is_empty());
    }
}

// ── Incremental maintenance ───────────────────────────────────────────────────

#[cfg(test)]
mod incremental {
    use super::*;

    #[test]
    fn spawn_and_despawn_reflected_within_one_cycle() {
        let mut world = world_with_items(2);
        let mut idx = built_index(&world);

        let change = world.spawn_item(ItemRecord::on_ground(
            ItemId(50),
            KindId(1),
            REGION,
            MapPos::new(9.0, 9.0),
        ));
        idx.apply(&change, &world, Tick(2));
        assert_eq!(idx.len(REGION), 3);
        assert_eq!(idx.last_change_tick(REGION), Tick(2));

        let change = world.despawn_item(ItemId(50)).unwrap();
        idx.apply(&change, &world, Tick(3));
        assert_eq!(idx.len(REGION), 2);
        assert_eq!(idx.last_change_tick(REGION), Tick(3));
    }

    #[test]
    fn spawn_of_already_picked_up_item_is_a_removal() {
        // The notification raced a pickup: the record now has a holder, so
        // the index must not list it.
        let mut world = world_with_items(2);
        let mut idx = built_index(&world);

        world.add_agent(rearm_world::AgentRecord::new(
            AgentId(0),
            REGION,
            MapPos::new(0.0, 0.0),
        ));
        world.equip_primary(AgentId(0), ItemId(0)).unwrap();
        idx.apply(
            &WorldChange::ItemUpdated { region: REGION, item: ItemId(0) },
            &world,
            Tick(4),
        );
        assert_eq!(idx.len(REGION), 1);
    }

    #[test]
    fn relocate_moves_the_spatial_entry() {
        let mut world = world_with_items(2);
        let mut idx = built_index(&world);

        let change = world.move_item(ItemId(0), MapPos::new(100.0, 100.0)).unwrap();
        idx.apply(&change, &world, Tick(5));

        let near_origin = idx.items_near(REGION, MapPos::new(0.0, 0.0), 5.0);
        assert!(near_origin.iter().all(|&(id, _)| id != ItemId(0)));
        let near_dest = idx.items_near(REGION, MapPos::new(100.0, 100.0), 5.0);
        assert_eq!(near_dest.len(), 1);
        assert_eq!(near_dest[0].0, ItemId(0));
    }

    #[test]
    fn region_reset_invalidates() {
        let world = world_with_items(2);
        let mut idx = built_index(&world);
        idx.apply(&WorldChange::RegionReset(REGION), &world, Tick(6));
        assert!(idx.is_cold(REGION));
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn storage_filtering() {
        let mut world = world_with_items(4);
        world.set_storage(ItemId(1), true).unwrap();
        world.set_storage(ItemId(3), true).unwrap();
        let idx = built_index(&world);

        let stored: Vec<ItemId> = idx
            .storage_items(REGION)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(stored.len(), 2);
        assert!(stored.contains(&ItemId(1)) && stored.contains(&ItemId(3)));
    }

    #[test]
    fn kind_filter_matching() {
        let world = world_with_items(6); // kinds alternate 1, 2, 1, 2, …
        let idx = built_index(&world);

        let filter = KindFilter::new([KindId(2)]);
        let matched = idx.items_matching(REGION, &filter);
        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|(_, meta)| meta.kind == KindId(2)));
    }

    #[test]
    fn items_near_respects_radius() {
        let world = world_with_items(10); // x = 0..9
        let idx = built_index(&world);

        let near = idx.items_near(REGION, MapPos::new(0.0, 0.0), 3.5);
        assert_eq!(near.len(), 4); // x = 0, 1, 2, 3
    }
}
