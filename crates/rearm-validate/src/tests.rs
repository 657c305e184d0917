//! Unit tests for rearm-validate.

use std::sync::atomic::{AtomicU32, Ordering};

use rearm_core::{AgentId, EquipPolicy, ItemId, KindId, MapPos, RegionId, Tick};
use rearm_state::AgentStateStore;
use rearm_world::{
    AgentRecord, ItemKind, ItemRecord, KindFilter, LocalWorld, Quality, WeaponClass, World,
};

use crate::{
    cache::CacheEntry, CacheClass, Denial, DenialReason, EligibilityCheck, Fingerprint,
    ValidationCache, ValidationContext, Validator,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const REGION: RegionId = RegionId(0);
const AGENT: AgentId = AgentId(0);
const ITEM: ItemId = ItemId(10);

fn sword_kind() -> ItemKind {
    ItemKind {
        id: KindId(1),
        label: "sword".into(),
        class: WeaponClass::Melee,
        base_power: 10.0,
        min_body_size: 0.5,
        bulk: 1,
    }
}

fn halberd_kind() -> ItemKind {
    ItemKind {
        id: KindId(2),
        label: "halberd".into(),
        class: WeaponClass::Melee,
        base_power: 16.0,
        min_body_size: 1.5, // too big for a default agent
        bulk: 2,
    }
}

struct Fixture {
    world: LocalWorld,
    policy: EquipPolicy,
    cache: ValidationCache,
    state: AgentStateStore,
    validator: Validator,
}

impl Fixture {
    fn new() -> Self {
        let mut world = LocalWorld::new();
        world.add_kind(sword_kind());
        world.add_kind(halberd_kind());
        world.add_agent(AgentRecord::new(AGENT, REGION, MapPos::new(0.0, 0.0)));
        world.spawn_item(ItemRecord::on_ground(
            ITEM,
            KindId(1),
            REGION,
            MapPos::new(5.0, 5.0),
        ));
        Self {
            world,
            policy: EquipPolicy::default(),
            cache: ValidationCache::new(),
            state: AgentStateStore::new(7),
            validator: Validator::default(),
        }
    }

    fn validate(&mut self, item: ItemId, now: Tick) -> Result<(), DenialReason> {
        let agent = self.world.agent(AGENT).unwrap().clone();
        self.validator.validate(
            &agent,
            item,
            &self.world,
            &self.policy,
            now,
            &mut self.cache,
            &mut self.state,
        )
    }
}

// ── Cache mechanics ───────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use super::*;

    fn fp(forbidden: bool, has_holder: bool) -> Fingerprint {
        Fingerprint { forbidden, has_holder }
    }

    fn entry(verdict: Result<(), DenialReason>, expiry: Tick, f: Fingerprint) -> CacheEntry {
        CacheEntry { verdict, expiry, fingerprint: f }
    }

    #[test]
    fn hit_within_ttl_and_matching_fingerprint() {
        let mut c = ValidationCache::new();
        c.insert(AGENT, ITEM, entry(Ok(()), Tick(100), fp(false, false)));
        assert_eq!(c.lookup(AGENT, ITEM, Tick(50), fp(false, false)), Some(Ok(())));
    }

    #[test]
    fn expired_entry_is_discarded() {
        let mut c = ValidationCache::new();
        c.insert(AGENT, ITEM, entry(Ok(()), Tick(100), fp(false, false)));
        assert_eq!(c.lookup(AGENT, ITEM, Tick(100), fp(false, false)), None);
        // Evicted, not merely hidden.
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn fingerprint_mismatch_discards_even_unexpired_entries() {
        let mut c = ValidationCache::new();
        c.insert(
            AGENT,
            ITEM,
            entry(Err(DenialReason::FactionRestricted), Tick(10_000), fp(false, false)),
        );
        // Ownership flipped since computation: entry must not be reused.
        assert_eq!(c.lookup(AGENT, ITEM, Tick(5), fp(false, true)), None);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn purge_agent_is_total() {
        let mut c = ValidationCache::new();
        c.insert(AGENT, ITEM, entry(Ok(()), Tick(100), fp(false, false)));
        c.insert(AGENT, ItemId(11), entry(Ok(()), Tick(100), fp(false, false)));
        c.insert(AgentId(1), ITEM, entry(Ok(()), Tick(100), fp(false, false)));

        c.purge_agent(AGENT);
        assert!(!c.has_agent(AGENT));
        assert_eq!(c.len(), 1); // other agent untouched
    }

    #[test]
    fn sweep_removes_only_expired() {
        let mut c = ValidationCache::new();
        c.insert(AGENT, ITEM, entry(Ok(()), Tick(10), fp(false, false)));
        c.insert(AGENT, ItemId(11), entry(Ok(()), Tick(1_000), fp(false, false)));
        assert_eq!(c.sweep(Tick(500)), 1);
        assert_eq!(c.len(), 1);
    }
}

// ── Standard chain verdicts ───────────────────────────────────────────────────

#[cfg(test)]
mod verdicts {
    use super::*;

    #[test]
    fn clean_item_passes() {
        let mut f = Fixture::new();
        assert_eq!(f.validate(ITEM, Tick(1)), Ok(()));
    }

    #[test]
    fn missing_item_is_destroyed() {
        let mut f = Fixture::new();
        assert_eq!(f.validate(ItemId(999), Tick(1)), Err(DenialReason::Destroyed));
    }

    #[test]
    fn zero_condition_is_destroyed() {
        let mut f = Fixture::new();
        f.world.item_mut(ITEM).unwrap().condition = 0.0;
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::Destroyed));
    }

    #[test]
    fn wrong_region_denied() {
        let mut f = Fixture::new();
        f.world.item_mut(ITEM).unwrap().region = RegionId(5);
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::WrongRegion));
    }

    #[test]
    fn invalid_position_is_out_of_bounds() {
        let mut f = Fixture::new();
        f.world.item_mut(ITEM).unwrap().pos = MapPos::new(f32::NAN, 3.0);
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::OutOfBounds));
    }

    #[test]
    fn forbidden_denied_uncached() {
        let mut f = Fixture::new();
        f.world.set_forbidden(ITEM, true);
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::Forbidden));
        // Flip back: no cache entry should linger from the denial.
        f.world.set_forbidden(ITEM, false);
        assert_eq!(f.validate(ITEM, Tick(2)), Ok(()));
    }

    #[test]
    fn held_or_biocoded_elsewhere_is_owned_by_other() {
        let mut f = Fixture::new();
        f.world.item_mut(ITEM).unwrap().holder = Some(AgentId(9));
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::OwnedByOther));

        f.world.item_mut(ITEM).unwrap().holder = None;
        f.world.item_mut(ITEM).unwrap().biocoded_to = Some(AgentId(9));
        assert_eq!(f.validate(ITEM, Tick(2)), Err(DenialReason::OwnedByOther));

        // Biocoded to the evaluating agent is fine.
        f.world.item_mut(ITEM).unwrap().biocoded_to = Some(AGENT);
        assert_eq!(f.validate(ITEM, Tick(3)), Ok(()));
    }

    #[test]
    fn quest_items_untouchable() {
        let mut f = Fixture::new();
        f.world.item_mut(ITEM).unwrap().quest_item = true;
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::QuestItem));
    }

    #[test]
    fn blacklisted_kind_denied() {
        let mut f = Fixture::new();
        f.policy.blacklist.push(KindId(1));
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::Blacklisted));
    }

    #[test]
    fn allow_list_restriction() {
        let mut f = Fixture::new();
        f.world.agent_mut(AGENT).unwrap().kind_filter = Some(KindFilter::new([KindId(2)]));
        assert_eq!(f.validate(ITEM, Tick(1)), Err(DenialReason::FactionRestricted));
    }

    #[test]
    fn duplicate_kind_requires_upgrade() {
        let mut f = Fixture::new();
        // Current primary: Good-quality sword.
        f.world.spawn_item(ItemRecord::on_ground(
            ItemId(20),
            KindId(1),
            REGION,
            MapPos::new(0.0, 0.0),
        ));
        f.world.item_mut(ItemId(20)).unwrap().quality = Quality::Good;
        f.world.equip_primary(AGENT, ItemId(20)).unwrap();

        // Candidate is Normal quality: same kind, not an upgrade.
        assert_eq!(
            f.validate(ITEM, Tick(1)),
            Err(DenialReason::DuplicateTypeNoUpgrade)
        );

        // Raise candidate quality above the primary: now eligible.
        f.world.item_mut(ITEM).unwrap().quality = Quality::Excellent;
        assert_eq!(f.validate(ITEM, Tick(200)), Ok(()));
    }
}

// ── Side effects & idempotence ────────────────────────────────────────────────

#[cfg(test)]
mod side_effects {
    use super::*;

    #[test]
    fn body_size_denial_persists_denylist_before_caching() {
        let mut f = Fixture::new();
        f.world.spawn_item(ItemRecord::on_ground(
            ItemId(30),
            KindId(2), // halberd: min body size 1.5
            REGION,
            MapPos::new(2.0, 2.0),
        ));

        assert_eq!(
            f.validate(ItemId(30), Tick(1)),
            Err(DenialReason::BodySizeTooSmall)
        );
        // The structural denylist entry exists.
        assert!(f.state.is_denied(AGENT, ItemId(30), Tick(2)));

        // Re-running now short-circuits on the denylist itself, leaving the
        // stored entry untouched.
        assert_eq!(
            f.validate(ItemId(30), Tick(2)),
            Err(DenialReason::OnCooldownDenylist)
        );
        assert_eq!(f.state.pending_expiries(), 1);
        assert!(f.state.is_denied(AGENT, ItemId(30), Tick(3)));
    }

    #[test]
    fn repeated_calls_within_ttl_are_stable() {
        let mut f = Fixture::new();
        f.world.agent_mut(AGENT).unwrap().kind_filter = Some(KindFilter::new([KindId(2)]));
        let first = f.validate(ITEM, Tick(1));
        for t in 2..10 {
            assert_eq!(f.validate(ITEM, Tick(t)), first);
        }
        assert_eq!(first, Err(DenialReason::FactionRestricted));
    }
}

// ── Cache-first driving ───────────────────────────────────────────────────────

#[cfg(test)]
mod cache_first {
    use super::*;

    use std::sync::Arc;

    /// A structural check that counts invocations, for observing cache hits.
    struct CountingCheck {
        calls: Arc<AtomicU32>,
    }

    impl EligibilityCheck for CountingCheck {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn cache_class(&self) -> CacheClass {
            CacheClass::Structural
        }

        fn check(
            &self,
            _agent: &AgentRecord,
            _item: &ItemRecord,
            _kind: &ItemKind,
            _ctx: &ValidationContext<'_>,
        ) -> Result<(), Denial> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn cached_verdicts_skip_expensive_checks_until_ttl() {
        let mut f = Fixture::new();
        f.policy.volatile_cache_ttl = 100; // positive verdicts use this TTL
        let calls = Arc::new(AtomicU32::new(0));
        f.validator = Validator::new(vec![Box::new(CountingCheck { calls: Arc::clone(&calls) })]);

        f.validate(ITEM, Tick(0)).unwrap();
        f.validate(ITEM, Tick(50)).unwrap();
        f.validate(ITEM, Tick(99)).unwrap();
        // One compute, two cache hits.
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        f.validate(ITEM, Tick(100)).unwrap(); // expired → recompute
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn chain_order_is_reported() {
        let v = Validator::default();
        assert_eq!(
            v.check_names(),
            vec![
                "intact",
                "region",
                "forbidden",
                "owner",
                "quest",
                "denylist",
                "blacklist",
                "body_size",
                "faction",
                "duplicate",
            ]
        );
    }
}
