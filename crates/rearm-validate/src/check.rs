//! The `EligibilityCheck` trait and the standard predicate chain.
//!
//! Each check is a named unit struct so it can be table-tested in isolation
//! and so telemetry can report *which* predicate denied.  Order in the
//! standard chain matters for cost only, never for correctness: any
//! permutation yields the same verdict, just with different work done before
//! reaching it.

use rearm_world::{AgentRecord, ItemKind, ItemRecord};

use crate::{DenialReason, ValidationContext};

// ── CacheClass ────────────────────────────────────────────────────────────────

/// How a check's verdict may be cached.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CacheClass {
    /// Volatile and cheap — recomputed on every call, never cached.
    Uncached,
    /// Can flip quickly (ownership-adjacent); short TTL.
    Volatile,
    /// Near-permanent for a given (agent, kind) pair; long TTL.
    Structural,
}

impl CacheClass {
    /// TTL in ticks under `policy`, for the cacheable classes.
    pub fn ttl(self, policy: &rearm_core::EquipPolicy) -> u64 {
        match self {
            CacheClass::Uncached   => 0,
            CacheClass::Volatile   => policy.volatile_cache_ttl,
            CacheClass::Structural => policy.structural_cache_ttl,
        }
    }
}

// ── Denial ────────────────────────────────────────────────────────────────────

/// A failed check: the reason, plus an optional denylist side effect the
/// driver must persist before caching the verdict.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Denial {
    pub reason: DenialReason,
    /// Denylist the item for this many ticks (structural unusability).
    pub deny_ticks: Option<u64>,
}

impl Denial {
    #[inline]
    pub fn new(reason: DenialReason) -> Self {
        Self { reason, deny_ticks: None }
    }

    #[inline]
    pub fn with_denylist(reason: DenialReason, ticks: u64) -> Self {
        Self { reason, deny_ticks: Some(ticks) }
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// One predicate in the eligibility chain.
///
/// # Contract
///
/// - Must be a pure function of its arguments (side effects are *requested*
///   via [`Denial::deny_ticks`], applied by the driver, and must be
///   idempotent).
/// - Must be deterministic and must not block or perform I/O.
pub trait EligibilityCheck: Send + Sync {
    /// Stable name for telemetry and table-driven tests.
    fn name(&self) -> &'static str;

    /// Caching class of this check's verdict.
    fn cache_class(&self) -> CacheClass;

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        kind: &ItemKind,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial>;
}

// ── Uncached checks ───────────────────────────────────────────────────────────

/// Item must be intact: condition above zero.
///
/// Record existence itself is verified by the driver before the chain runs
/// (a missing record denies `Destroyed` without constructing a chain input).
pub struct IntactCheck;

impl EligibilityCheck for IntactCheck {
    fn name(&self) -> &'static str {
        "intact"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        _agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if item.condition <= 0.0 {
            return Err(Denial::new(DenialReason::Destroyed));
        }
        Ok(())
    }
}

/// Item and agent must share a region, and the item's position must be a
/// real map cell.
pub struct RegionCheck;

impl EligibilityCheck for RegionCheck {
    fn name(&self) -> &'static str {
        "region"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if item.region != agent.region {
            return Err(Denial::new(DenialReason::WrongRegion));
        }
        if !item.pos.x.is_finite() || !item.pos.y.is_finite() || item.pos.x < 0.0 || item.pos.y < 0.0
        {
            return Err(Denial::new(DenialReason::OutOfBounds));
        }
        Ok(())
    }
}

/// Player-forbidden items are untouchable.
pub struct ForbiddenCheck;

impl EligibilityCheck for ForbiddenCheck {
    fn name(&self) -> &'static str {
        "forbidden"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        _agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if item.forbidden {
            return Err(Denial::new(DenialReason::Forbidden));
        }
        Ok(())
    }
}

/// Held by, or biocode-locked to, someone else.
pub struct OwnerCheck;

impl EligibilityCheck for OwnerCheck {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if item.held_by_other(agent.id) || item.locked_against(agent.id) {
            return Err(Denial::new(DenialReason::OwnedByOther));
        }
        Ok(())
    }
}

/// Quest-reserved items are never auto-equipped.
pub struct QuestCheck;

impl EligibilityCheck for QuestCheck {
    fn name(&self) -> &'static str {
        "quest"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        _agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if item.quest_item {
            return Err(Denial::new(DenialReason::QuestItem));
        }
        Ok(())
    }
}

/// The agent's own temporary denylist.
///
/// Uncached because expiry must be exact: a cached denial could outlive the
/// denylist entry it mirrors.
pub struct DenylistCheck;

impl EligibilityCheck for DenylistCheck {
    fn name(&self) -> &'static str {
        "denylist"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Uncached
    }

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if ctx.state.is_denied(agent.id, item.id, ctx.now) {
            return Err(Denial::new(DenialReason::OnCooldownDenylist));
        }
        Ok(())
    }
}

// ── Cached checks ─────────────────────────────────────────────────────────────

/// Global kind blacklist from policy.
pub struct BlacklistCheck;

impl EligibilityCheck for BlacklistCheck {
    fn name(&self) -> &'static str {
        "blacklist"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Structural
    }

    fn check(
        &self,
        _agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if ctx.policy.blacklist.contains(&item.kind) {
            return Err(Denial::new(DenialReason::Blacklisted));
        }
        Ok(())
    }
}

/// Body-size fit.  A failure is structural for the (agent, kind) pair, so
/// it also requests a long denylist entry — the one side-effecting check in
/// the standard chain.
pub struct BodySizeCheck;

impl EligibilityCheck for BodySizeCheck {
    fn name(&self) -> &'static str {
        "body_size"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Structural
    }

    fn check(
        &self,
        agent: &AgentRecord,
        _item: &ItemRecord,
        kind: &ItemKind,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if agent.body_size < kind.min_body_size {
            return Err(Denial::with_denylist(
                DenialReason::BodySizeTooSmall,
                ctx.policy.structural_denylist_ticks,
            ));
        }
        Ok(())
    }
}

/// The agent's allow-list (outfit assignment, ideology weapon bans).
pub struct FactionCheck;

impl EligibilityCheck for FactionCheck {
    fn name(&self) -> &'static str {
        "faction"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Structural
    }

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        if let Some(filter) = &agent.kind_filter {
            if !filter.allows(item.kind) {
                return Err(Denial::new(DenialReason::FactionRestricted));
            }
        }
        Ok(())
    }
}

/// Duplicate-kind suppression: a candidate of the same kind as the current
/// primary is only eligible when it is a strict quality/condition upgrade.
///
/// Volatile: the comparison baseline changes whenever the primary does.
pub struct DuplicateCheck;

impl EligibilityCheck for DuplicateCheck {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn cache_class(&self) -> CacheClass {
        CacheClass::Volatile
    }

    fn check(
        &self,
        agent: &AgentRecord,
        item: &ItemRecord,
        _kind: &ItemKind,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), Denial> {
        let Some(primary_id) = agent.primary else {
            return Ok(());
        };
        let Some(primary) = ctx.world.item(primary_id) else {
            // Held item unknown to the world view — treat as unarmed.
            return Ok(());
        };
        if primary.kind != item.kind {
            return Ok(());
        }
        let upgrade = item.quality > primary.quality
            || (item.quality == primary.quality && item.condition > primary.condition);
        if upgrade {
            Ok(())
        } else {
            Err(Denial::new(DenialReason::DuplicateTypeNoUpgrade))
        }
    }
}

// ── Standard chain ────────────────────────────────────────────────────────────

/// The default chain, cheapest-and-most-volatile first.
pub fn standard_chain() -> Vec<Box<dyn EligibilityCheck>> {
    vec![
        Box::new(IntactCheck),
        Box::new(RegionCheck),
        Box::new(ForbiddenCheck),
        Box::new(OwnerCheck),
        Box::new(QuestCheck),
        Box::new(DenylistCheck),
        Box::new(BlacklistCheck),
        Box::new(BodySizeCheck),
        Box::new(FactionCheck),
        Box::new(DuplicateCheck),
    ]
}
