//! Item definitions and per-item state.
//!
//! `ItemKind` is the static definition shared by every item of one weapon
//! type; `ItemRecord` is the mutable per-instance state.  The engine treats
//! both as opaque numeric inputs — it never interprets weapon content beyond
//! what the scoring function and validators read.

use rearm_core::{AgentId, ItemId, KindId, MapPos, RegionId};

// ── WeaponClass ───────────────────────────────────────────────────────────────

/// Broad combat class of a weapon, used by the rough pre-filter score to
/// match items against an agent's combat profile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponClass {
    Melee,
    Ranged,
}

impl WeaponClass {
    pub fn as_str(self) -> &'static str {
        match self {
            WeaponClass::Melee  => "melee",
            WeaponClass::Ranged => "ranged",
        }
    }
}

// ── Quality ───────────────────────────────────────────────────────────────────

/// Manufacturing quality tier of an item instance.
///
/// Ordered ascending so tiers can be compared directly; the numeric score
/// multiplier for each tier lives in the score engine's weight table, not
/// here.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    Awful,
    Poor,
    #[default]
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

impl Quality {
    /// All tiers in ascending order.
    pub const ALL: [Quality; 7] = [
        Quality::Awful,
        Quality::Poor,
        Quality::Normal,
        Quality::Good,
        Quality::Excellent,
        Quality::Masterwork,
        Quality::Legendary,
    ];

    /// Position in the ascending tier order (Awful = 0).
    #[inline]
    pub fn rank(self) -> usize {
        self as usize
    }
}

// ── ItemKind ──────────────────────────────────────────────────────────────────

/// Static definition of one weapon type.
///
/// Registered once per type by the host; shared by every item instance of
/// that kind.  Only static properties live here — anything that can vary per
/// instance belongs in [`ItemRecord`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKind {
    pub id: KindId,
    /// Host-facing label, used only in telemetry output.
    pub label: String,
    pub class: WeaponClass,
    /// Baseline combat effectiveness of a Normal-quality, pristine instance.
    pub base_power: f32,
    /// Minimum wielder body size.  Agents below this cannot use the weapon
    /// at all (structural ineligibility).
    pub min_body_size: f32,
    /// Carry bulk, counted against inventory capacity for secondaries.
    pub bulk: u32,
}

// ── ItemRecord ────────────────────────────────────────────────────────────────

/// Mutable state of one item instance.
///
/// `holder` is purely informational — never an ownership edge.  Lifetime is
/// owned by the host: records appear when spawned or dropped and disappear
/// when destroyed, picked up, or moved off the region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub id: ItemId,
    pub kind: KindId,
    pub region: RegionId,
    pub pos: MapPos,
    pub quality: Quality,
    /// Remaining condition in `(0, 1]`.  The host destroys items at 0.
    pub condition: f32,
    /// Agent currently holding the item, if any.
    pub holder: Option<AgentId>,
    /// Inside a designated storage zone.
    pub in_storage: bool,
    /// Player-forbidden: agents must not touch it.
    pub forbidden: bool,
    /// Quest-reserved items are never auto-equipped.
    pub quest_item: bool,
    /// Biocoded lock: only the named agent can wield the item.
    pub biocoded_to: Option<AgentId>,
}

impl ItemRecord {
    /// A plain unheld item of `kind` lying at `pos`.
    pub fn on_ground(id: ItemId, kind: KindId, region: RegionId, pos: MapPos) -> Self {
        Self {
            id,
            kind,
            region,
            pos,
            quality: Quality::Normal,
            condition: 1.0,
            holder: None,
            in_storage: false,
            forbidden: false,
            quest_item: false,
            biocoded_to: None,
        }
    }

    /// `true` if some agent other than `agent` holds the item.
    #[inline]
    pub fn held_by_other(&self, agent: AgentId) -> bool {
        self.holder.is_some_and(|h| h != agent)
    }

    /// `true` if a biocode lock excludes `agent`.
    #[inline]
    pub fn locked_against(&self, agent: AgentId) -> bool {
        self.biocoded_to.is_some_and(|owner| owner != agent)
    }
}
