//! Per-agent view state and attribute fingerprinting.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use rearm_core::{AgentId, ItemId, MapPos, RegionId};

use crate::KindFilter;

// ── TraitFlags ────────────────────────────────────────────────────────────────

/// Compact trait bitfield.  Only traits that influence weapon choice are
/// represented; everything else about an agent's personality stays in the
/// host.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitFlags(pub u32);

impl TraitFlags {
    /// Strongly prefers melee weapons; penalised when holding ranged.
    pub const BRAWLER: TraitFlags = TraitFlags(1 << 0);
    /// Hunts for food; favours ranged weapons.
    pub const HUNTER: TraitFlags = TraitFlags(1 << 1);
    /// Refuses to carry weapons entirely.
    pub const PACIFIST: TraitFlags = TraitFlags(1 << 2);

    pub const NONE: TraitFlags = TraitFlags(0);

    #[inline]
    pub fn has(self, flag: TraitFlags) -> bool {
        self.0 & flag.0 != 0
    }

    #[inline]
    pub fn with(self, flag: TraitFlags) -> TraitFlags {
        TraitFlags(self.0 | flag.0)
    }
}

// ── AgentRecord ───────────────────────────────────────────────────────────────

/// Read-side view of one agent, owned by the host simulation.
///
/// The engine never creates or destroys these; it purges its own per-agent
/// caches when the host reports an agent invalid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub id: AgentId,
    pub region: RegionId,
    pub pos: MapPos,

    // ── Scoring-relevant attributes ───────────────────────────────────────
    pub body_size: f32,
    pub age: u32,
    /// Ranged weapon skill, 0–20.
    pub shooting: u8,
    /// Melee weapon skill, 0–20.
    pub melee: u8,
    pub traits: TraitFlags,

    // ── Volatile status ───────────────────────────────────────────────────
    pub spawned: bool,
    /// Drafted or actively fighting; never re-equips mid-combat.
    pub in_combat: bool,

    // ── Equipment ─────────────────────────────────────────────────────────
    pub primary: Option<ItemId>,
    pub inventory: Vec<ItemId>,
    /// Total bulk the agent can carry as secondaries.
    pub inventory_capacity: u32,
    /// The current primary is player-flagged non-replaceable (or replaceable
    /// only by same-kind upgrades, per policy).
    pub forced_retention: bool,

    // ── Restrictions ──────────────────────────────────────────────────────
    /// Allow-list of equippable kinds; `None` means unrestricted.
    pub kind_filter: Option<KindFilter>,
}

impl AgentRecord {
    /// A spawned adult agent with default attributes, for host bootstrap and
    /// tests.
    pub fn new(id: AgentId, region: RegionId, pos: MapPos) -> Self {
        Self {
            id,
            region,
            pos,
            body_size: 1.0,
            age: 30,
            shooting: 5,
            melee: 5,
            traits: TraitFlags::NONE,
            spawned: true,
            in_combat: false,
            primary: None,
            inventory: Vec::new(),
            inventory_capacity: 2,
            forced_retention: false,
            kind_filter: None,
        }
    }

    /// Hash of every attribute that can change the outcome of a full
    /// evaluation.  The scheduler compares fingerprints to decide whether a
    /// full re-scan is warranted ("skip-if-unchanged").
    ///
    /// Position is deliberately excluded: agents move constantly and the
    /// candidate index's change tick already covers item movement.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FxHasher::default();
        self.body_size.to_bits().hash(&mut h);
        self.age.hash(&mut h);
        self.shooting.hash(&mut h);
        self.melee.hash(&mut h);
        self.traits.hash(&mut h);
        self.in_combat.hash(&mut h);
        self.primary.hash(&mut h);
        self.forced_retention.hash(&mut h);
        match &self.kind_filter {
            None    => 0u32.hash(&mut h),
            Some(f) => (1u32, f.revision).hash(&mut h),
        }
        h.finish()
    }
}
