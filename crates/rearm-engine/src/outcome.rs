//! Decision outcomes: acceptance tiers and skip reasons.

use rearm_command::EquipCommand;
use rearm_core::EquipPolicy;

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Acceptance bucket for a candidate, by ratio of its score to the current
/// weapon's score.
///
/// The scheduler accepts the highest tier *found*, not the best absolute
/// score — deliberately trading a sliver of optimality for shorter scans and
/// less multi-agent pile-up on the one "technically best" item on the map.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Tier {
    Good,
    Great,
    Amazing,
}

impl Tier {
    /// Classify a candidate/current score ratio under `policy`.
    ///
    /// `Good` uses a strict comparison: a candidate sitting exactly at the
    /// threshold is not an upgrade, which is what keeps a 3 % better weapon
    /// from bouncing back and forth under a 1.05 threshold.
    pub fn classify(ratio: f32, policy: &EquipPolicy) -> Option<Tier> {
        if ratio >= policy.amazing_threshold {
            Some(Tier::Amazing)
        } else if ratio >= policy.great_threshold {
            Some(Tier::Great)
        } else if ratio > policy.upgrade_threshold {
            Some(Tier::Good)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Good    => "good",
            Tier::Great   => "great",
            Tier::Amazing => "amazing",
        }
    }
}

// ── SkipReason ────────────────────────────────────────────────────────────────

/// Why an evaluation produced no command.
///
/// Fast-reject reasons come first (in check order); the scan reasons at the
/// bottom mean a full candidate scan ran and found nothing worth taking.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SkipReason {
    /// Master switch off.
    Disabled,
    /// The host no longer knows the agent; its caches were purged.
    AgentInvalid,
    /// Agent exists but is not spawned on a map.
    Unspawned,
    /// Drafted or actively fighting.
    InCombat,
    /// Too young under the minor-age policy.
    Minor,
    /// Global per-tick processing budget exhausted; deferred, not dropped.
    BudgetExhausted,
    /// Already evaluated this tick.
    AlreadyProcessed,
    /// Inside the post-equip cooldown.
    OnEquipCooldown,
    /// Current weapon is forced-retention and forced upgrades are off.
    ForcedRetention,
    /// Nothing relevant changed since the last full scan.
    NothingChanged,
    /// Scan ran; no candidate survived validation.
    NoCandidates,
    /// Scan ran; survivors exist but none cleared the upgrade threshold.
    NoUpgrade,
    /// A compatibility provider vetoed the winning swap.
    ProviderVeto,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Disabled         => "disabled",
            SkipReason::AgentInvalid     => "agent_invalid",
            SkipReason::Unspawned        => "unspawned",
            SkipReason::InCombat         => "in_combat",
            SkipReason::Minor            => "minor",
            SkipReason::BudgetExhausted  => "budget_exhausted",
            SkipReason::AlreadyProcessed => "already_processed",
            SkipReason::OnEquipCooldown  => "on_equip_cooldown",
            SkipReason::ForcedRetention  => "forced_retention",
            SkipReason::NothingChanged   => "nothing_changed",
            SkipReason::NoCandidates     => "no_candidates",
            SkipReason::NoUpgrade        => "no_upgrade",
            SkipReason::ProviderVeto     => "provider_veto",
        }
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

/// The outcome of one `evaluate` call.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Do this.  At most one command per agent per invocation.
    Command(EquipCommand),
    /// Do nothing, and here is why.
    Skip(SkipReason),
}

impl Decision {
    pub fn command(&self) -> Option<&EquipCommand> {
        match self {
            Decision::Command(cmd) => Some(cmd),
            Decision::Skip(_)      => None,
        }
    }
}
