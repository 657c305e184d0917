//! The fixed denial taxonomy.

use std::fmt;

/// Why an item is ineligible for an agent.
///
/// The set is closed on purpose: telemetry, caching policy, and the failure
/// taxonomy all key off it, and an open-ended string would defeat all three.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DenialReason {
    /// The item no longer exists (or its condition hit zero).
    Destroyed,
    /// The item is on a different region than the agent.
    WrongRegion,
    /// The item's position is not a valid map cell.
    OutOfBounds,
    /// Player-forbidden.
    Forbidden,
    /// Held by, or biocode-locked to, another agent.
    OwnedByOther,
    /// The item's kind is on the global blacklist.
    Blacklisted,
    /// The agent is too small to wield the weapon.
    BodySizeTooSmall,
    /// The agent's allow-list (outfit/ideology policy) excludes the kind.
    FactionRestricted,
    /// Agent already holds this kind and the candidate is not an upgrade.
    DuplicateTypeNoUpgrade,
    /// Quest-reserved items are untouchable.
    QuestItem,
    /// The agent's temporary denylist excludes the item right now.
    OnCooldownDenylist,
}

impl DenialReason {
    /// Stable label for telemetry rows.
    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::Destroyed              => "destroyed",
            DenialReason::WrongRegion            => "wrong_region",
            DenialReason::OutOfBounds            => "out_of_bounds",
            DenialReason::Forbidden              => "forbidden",
            DenialReason::OwnedByOther           => "owned_by_other",
            DenialReason::Blacklisted            => "blacklisted",
            DenialReason::BodySizeTooSmall       => "body_size_too_small",
            DenialReason::FactionRestricted      => "faction_restricted",
            DenialReason::DuplicateTypeNoUpgrade => "duplicate_no_upgrade",
            DenialReason::QuestItem              => "quest_item",
            DenialReason::OnCooldownDenylist     => "on_cooldown_denylist",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
