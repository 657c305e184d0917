//! `EquipEngine` — the decision scheduler.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use rearm_command::{CommandError, CommandExecutor, EquipCommand, Executed};
use rearm_core::{AgentId, EquipPolicy, ItemId, KindId, Tick};
use rearm_index::CandidateIndex;
use rearm_score::{CombatProfile, ScoreEngine};
use rearm_state::AgentStateStore;
use rearm_validate::{ValidationCache, Validator};
use rearm_world::{AgentRecord, ItemRecord, World, WorldChange};

use crate::{
    budget::TickBudget, observer::CleanupStats, providers::ProviderRegistry, Decision,
    EngineObserver, EngineResult, SkipReason, Tier,
};

// ── Advisory reservation ──────────────────────────────────────────────────────

/// Scheduler-local claim on an item, to stop several agents converging on
/// the same candidate inside one decision window.  Never authoritative: the
/// world's own reservation system is re-consulted at execution time.
#[derive(Copy, Clone, Debug)]
struct Claim {
    agent: AgentId,
    expiry: Tick,
}

// ── EquipEngine ───────────────────────────────────────────────────────────────

/// Owns every piece of engine state with a lifetime tied to one simulated
/// world: the candidate index, validation cache, per-agent store, advisory
/// reservations, and budget.  Nothing here is process-global — hosts running
/// several worlds hold several engines.
///
/// Single entry point per agent per scheduling opportunity:
/// [`evaluate`](Self::evaluate).  The decision pipeline is strictly
/// sequential within one call:
///
/// ```text
/// fast-reject → skip-if-unchanged → restriction resolution
///   → candidate scan (validate → rough → prune → full)
///   → tiered acceptance → commit
/// ```
pub struct EquipEngine {
    policy: EquipPolicy,
    score: ScoreEngine,
    validator: Validator,
    index: CandidateIndex,
    cache: ValidationCache,
    state: AgentStateStore,
    providers: ProviderRegistry,
    reservations: FxHashMap<ItemId, Claim>,
    budget: TickBudget,
    /// `max(policy.rough_prune_ratio, score.prune_bound())` — pruning with
    /// anything tighter could discard the true best candidate.
    effective_prune_ratio: f32,
    /// Provider quarantines discovered mid-pipeline, reported on the next
    /// observer boundary.
    pending_quarantines: Vec<&'static str>,
}

impl EquipEngine {
    pub(crate) fn from_parts(
        policy: EquipPolicy,
        score: ScoreEngine,
        validator: Validator,
        providers: ProviderRegistry,
        seed: u64,
    ) -> EngineResult<Self> {
        policy.validate()?;
        let effective_prune_ratio = policy.rough_prune_ratio.max(score.prune_bound());
        Ok(Self {
            policy,
            score,
            validator,
            index: CandidateIndex::new(),
            cache: ValidationCache::new(),
            state: AgentStateStore::new(seed),
            providers,
            reservations: FxHashMap::default(),
            budget: TickBudget::new(),
            effective_prune_ratio,
            pending_quarantines: Vec::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn policy(&self) -> &EquipPolicy {
        &self.policy
    }

    /// Replace the policy (host settings changed).  Re-validates and
    /// re-derives the pruning ratio.
    pub fn set_policy(&mut self, policy: EquipPolicy) -> EngineResult<()> {
        policy.validate()?;
        self.effective_prune_ratio = policy.rough_prune_ratio.max(self.score.prune_bound());
        self.policy = policy;
        Ok(())
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    pub fn state(&self) -> &AgentStateStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AgentStateStore {
        &mut self.state
    }

    // ── World-change plumbing ─────────────────────────────────────────────

    /// Forward one host change notification into the candidate index.
    pub fn apply_world_change<W: World>(&mut self, change: &WorldChange, world: &W, now: Tick) {
        self.index.apply(change, world, now);
    }

    // ── Evaluation ────────────────────────────────────────────────────────

    /// Evaluate one agent.  Returns at most one command; every other outcome
    /// is a skip, visible to the observer with its reason.
    pub fn evaluate<W: World, O: EngineObserver>(
        &mut self,
        agent: AgentId,
        world: &W,
        now: Tick,
        observer: &mut O,
    ) -> Option<EquipCommand> {
        let decision = self.evaluate_inner(agent, world, now);
        for name in self.pending_quarantines.drain(..) {
            observer.on_provider_quarantined(now, name);
        }
        observer.on_decision(now, agent, &decision);
        match decision {
            Decision::Command(cmd) => Some(cmd),
            Decision::Skip(_)      => None,
        }
    }

    fn evaluate_inner<W: World>(&mut self, agent_id: AgentId, world: &W, now: Tick) -> Decision {
        // Housekeeping on the way in: a fresh-load signal invalidates every
        // derived cache exactly once, and due denylist entries are cleared
        // before they can influence this evaluation.
        if self
            .state
            .detect_fresh_load(now, self.policy.fresh_load_warmup_ticks)
        {
            self.cache.clear();
            self.reservations.clear();
        }
        self.state.expire_due(now);

        // ── 1. Fast rejects ───────────────────────────────────────────────
        if !self.policy.enabled {
            return Decision::Skip(SkipReason::Disabled);
        }
        let Some(agent) = world.agent(agent_id) else {
            // Destroyed or permanently despawned: drop every trace of it.
            self.purge_agent(agent_id);
            return Decision::Skip(SkipReason::AgentInvalid);
        };
        if !agent.spawned {
            return Decision::Skip(SkipReason::Unspawned);
        }
        if agent.in_combat {
            return Decision::Skip(SkipReason::InCombat);
        }
        if agent.age < self.policy.minor_min_age && !self.policy.allow_minors {
            return Decision::Skip(SkipReason::Minor);
        }
        if self.budget.exhausted(now, self.policy.max_agents_per_tick) {
            // Deferred: no state write, so the agent stays eligible on a
            // later tick.
            return Decision::Skip(SkipReason::BudgetExhausted);
        }
        if let Some(st) = self.state.get(agent_id) {
            if st.last_decision_tick == Some(now) {
                return Decision::Skip(SkipReason::AlreadyProcessed);
            }
            if st.on_equip_cooldown(now, self.policy.equip_cooldown_ticks) {
                return Decision::Skip(SkipReason::OnEquipCooldown);
            }
        }

        let primary_record = agent.primary.and_then(|id| world.item(id));
        let retention_hold = agent.primary.is_some()
            && (agent.forced_retention
                || primary_record.is_some_and(|rec| self.providers.is_managed(agent, rec)));
        if retention_hold && !self.policy.allow_forced_upgrades {
            return Decision::Skip(SkipReason::ForcedRetention);
        }

        // ── 2. Index warm-up + skip-if-unchanged ──────────────────────────
        let region = agent.region;
        if self.index.is_cold(region) {
            self.index.rebuild(region, world, now);
        }
        let index_tick = self.index.last_change_tick(region);
        let fingerprint = agent.fingerprint();
        if let Some(st) = self.state.get(agent_id) {
            if st.last_scan_index_tick >= index_tick
                && st.attr_fingerprint == fingerprint
                && now < st.next_recheck_tick
            {
                // The workhorse skip: steady-state agents fall through here
                // without touching the index or the validator at all.
                return Decision::Skip(SkipReason::NothingChanged);
            }
        }

        // ── 3. Restriction resolution ─────────────────────────────────────
        //
        // A forced-retention (or provider-managed) primary with forced
        // upgrades enabled restricts the search to same-kind upgrades.
        let restricted_kind: Option<KindId> = if retention_hold {
            primary_record.map(|rec| rec.kind)
        } else {
            None
        };

        // ── 4. Candidate scan (budget consumed here) ──────────────────────
        self.budget.consume(now);

        let profile = CombatProfile::of(agent);
        let current_score = primary_record
            .and_then(|rec| world.kind(rec.kind).map(|k| self.score.full_score(&profile, k, rec)))
            .unwrap_or(0.0);

        let decision =
            self.scan(agent, world, now, &profile, current_score, restricted_kind, primary_record);

        // Commit bookkeeping happens for every completed scan, command or
        // not — recording the scan is what arms the skip-if-unchanged path.
        self.state.record_decision(agent_id, now, index_tick, fingerprint);
        self.state.schedule_recheck(
            agent_id,
            now,
            self.policy.recheck_interval_ticks,
            self.policy.recheck_jitter_ticks,
        );

        if let Decision::Command(cmd) = &decision {
            let item = cmd.item();
            self.reservations.insert(
                item,
                Claim { agent: agent_id, expiry: now + self.policy.reservation_ticks },
            );
            self.state.record_attempt(agent_id, item, now);
        }
        decision
    }

    // ── Candidate scan ────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn scan<W: World>(
        &mut self,
        agent: &AgentRecord,
        world: &W,
        now: Tick,
        profile: &CombatProfile,
        current_score: f32,
        restricted_kind: Option<KindId>,
        primary_record: Option<&ItemRecord>,
    ) -> Decision {
        let region = agent.region;

        // Candidate pull, bounded and deterministic.
        let mut candidates = match &agent.kind_filter {
            Some(filter) => self.index.items_matching(region, filter),
            None         => self.index.all_items(region),
        };
        if self.policy.search_storage_only {
            candidates.retain(|(_, meta)| meta.in_storage);
        }
        if let Some(kind) = restricted_kind {
            candidates.retain(|(_, meta)| meta.kind == kind);
        }
        // Hash-map iteration order is arbitrary; sort so truncation under
        // the candidate cap is reproducible run to run.
        candidates.sort_unstable_by_key(|&(id, _)| id);
        candidates.truncate(self.policy.max_candidates as usize);

        // Validate (cache-first) and rough-score.
        let mut scored: Vec<(ItemId, f32)> = Vec::with_capacity(candidates.len());
        for (item_id, meta) in candidates {
            if self.reserved_by_other(item_id, agent.id, now) {
                continue;
            }
            if self
                .state
                .get(agent.id)
                .is_some_and(|st| st.attempt_throttled(item_id, now, self.policy.attempt_throttle_ticks))
            {
                continue;
            }
            if self
                .validator
                .validate(agent, item_id, world, &self.policy, now, &mut self.cache, &mut self.state)
                .is_err()
            {
                continue;
            }
            let Some(kind) = world.kind(meta.kind) else {
                continue;
            };
            let rough = self.score.rough_score(profile, kind);
            if rough > 0.0 {
                scored.push((item_id, rough));
            }
        }
        let had_eligible = !scored.is_empty();

        // Prune by the monotonicity bound, then full-score best-rough-first.
        let best_rough = scored.iter().map(|&(_, r)| r).fold(0.0_f32, f32::max);
        let floor = best_rough / self.effective_prune_ratio;
        scored.retain(|&(_, rough)| rough >= floor);
        scored.sort_unstable_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0))
        });

        let unarmed = current_score <= 0.0;
        let mut best: Option<(ItemId, f32, Tier)> = None;

        for &(item_id, _) in scored.iter().take(self.policy.max_full_scores_per_search as usize) {
            let Some(rec) = world.item(item_id) else {
                continue;
            };
            let Some(kind) = world.kind(rec.kind) else {
                continue;
            };
            let full = self.score.full_score(profile, kind, rec);

            if unarmed {
                // Any positive score beats empty hands; take the first one
                // (the list is best-rough-first) and stop searching.
                if full > 0.0 {
                    best = Some((item_id, full, Tier::Amazing));
                    break;
                }
                continue;
            }

            let ratio = full / current_score;
            if let Some(tier) = Tier::classify(ratio, &self.policy) {
                let improves = match best {
                    None => true,
                    Some((_, best_full, best_tier)) => {
                        tier > best_tier || (tier == best_tier && full > best_full)
                    }
                };
                if improves {
                    best = Some((item_id, full, tier));
                }
                if tier == Tier::Amazing {
                    // Good-enough, stop searching.
                    break;
                }
            }
        }

        let Some((item_id, _full, _tier)) = best else {
            // No primary upgrade; a secondary stow may still be worth it.
            if let Some(cmd) = self.secondary_decision(agent, world, profile, now) {
                return Decision::Command(cmd);
            }
            return Decision::Skip(if had_eligible {
                SkipReason::NoUpgrade
            } else {
                SkipReason::NoCandidates
            });
        };

        // Provider veto, checked once on the final pick.
        if let Some(rec) = world.item(item_id) {
            if self.providers.validate_swap(rec, primary_record, agent).is_err() {
                return Decision::Skip(SkipReason::ProviderVeto);
            }
        }

        let command = if agent.primary.is_some() {
            EquipCommand::SwapPrimary { agent: agent.id, item: item_id }
        } else {
            EquipCommand::Equip { agent: agent.id, item: item_id }
        };
        Decision::Command(command)
    }

    // ── Secondary search ──────────────────────────────────────────────────

    /// Pick a secondary to stow, when enabled and when the primary scan
    /// produced nothing.  Provider override first, own search second.
    fn secondary_decision<W: World>(
        &mut self,
        agent: &AgentRecord,
        world: &W,
        profile: &CombatProfile,
        now: Tick,
    ) -> Option<EquipCommand> {
        if !self.policy.auto_equip_secondary {
            return None;
        }

        let provider_pick = {
            let score_engine = &self.score;
            let score_fn = |rec: &ItemRecord| {
                world
                    .kind(rec.kind)
                    .map(|k| score_engine.full_score(profile, k, rec))
                    .unwrap_or(0.0)
            };
            let (pick, quarantined) =
                self.providers.find_best_secondary(agent, world, &score_fn);
            self.pending_quarantines.extend(quarantined);
            pick
        };

        let candidate = provider_pick.or_else(|| self.best_ground_item(agent, world, profile, now));
        let candidate = candidate?;
        if self
            .validator
            .validate(agent, candidate, world, &self.policy, now, &mut self.cache, &mut self.state)
            .is_err()
        {
            return None;
        }
        let rec = world.item(candidate)?;
        let kind = world.kind(rec.kind)?;
        let cand_score = self.score.full_score(profile, kind, rec);
        if cand_score <= 0.0 {
            return None;
        }

        // Capacity: free bulk takes the item as-is; otherwise the worst
        // current secondary must lose by the upgrade threshold.
        let used_bulk: u32 = agent
            .inventory
            .iter()
            .filter_map(|id| world.item(*id))
            .filter_map(|r| world.kind(r.kind))
            .map(|k| k.bulk)
            .sum();
        if used_bulk + kind.bulk <= agent.inventory_capacity {
            return Some(EquipCommand::SwapSecondary {
                agent: agent.id,
                item: candidate,
                displace: None,
            });
        }

        let worst = agent
            .inventory
            .iter()
            .filter_map(|&id| {
                let r = world.item(id)?;
                let k = world.kind(r.kind)?;
                Some((id, self.score.full_score(profile, k, r)))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))?;
        if cand_score > worst.1 * self.policy.upgrade_threshold {
            return Some(EquipCommand::SwapSecondary {
                agent: agent.id,
                item: candidate,
                displace: Some(worst.0),
            });
        }
        None
    }

    /// Best eligible ground item by full score (secondary search fallback).
    fn best_ground_item<W: World>(
        &mut self,
        agent: &AgentRecord,
        world: &W,
        profile: &CombatProfile,
        now: Tick,
    ) -> Option<ItemId> {
        let mut candidates = match &agent.kind_filter {
            Some(filter) => self.index.items_matching(agent.region, filter),
            None         => self.index.all_items(agent.region),
        };
        if self.policy.search_storage_only {
            candidates.retain(|(_, meta)| meta.in_storage);
        }
        candidates.sort_unstable_by_key(|&(id, _)| id);
        candidates.truncate(self.policy.max_candidates as usize);

        let mut best: Option<(ItemId, f32)> = None;
        let mut scored = 0u32;
        for (item_id, _) in candidates {
            if scored >= self.policy.max_full_scores_per_search {
                break;
            }
            if self.reserved_by_other(item_id, agent.id, now) {
                continue;
            }
            if self
                .validator
                .validate(agent, item_id, world, &self.policy, now, &mut self.cache, &mut self.state)
                .is_err()
            {
                continue;
            }
            let Some(rec) = world.item(item_id) else { continue };
            let Some(kind) = world.kind(rec.kind) else { continue };
            let full = self.score.full_score(profile, kind, rec);
            scored += 1;
            if full > 0.0 && best.is_none_or(|(_, b)| full > b) {
                best = Some((item_id, full));
            }
        }
        best.map(|(id, _)| id)
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Run a command through the action layer and absorb the outcome into
    /// engine state.
    ///
    /// Failures are caught here — at the per-agent boundary — reported to
    /// the observer, and converted into the throttle/denylist bookkeeping
    /// that stops the agent busy-looping on a contended item.  They are also
    /// returned so hosts that want to surface them can.
    pub fn execute<W: World, O: EngineObserver>(
        &mut self,
        command: &EquipCommand,
        world: &mut W,
        now: Tick,
        observer: &mut O,
    ) -> EngineResult<Executed> {
        let agent = command.agent();
        let item = command.item();
        let region = world.agent(agent).map(|a| a.region);

        match CommandExecutor::execute(command, world, &self.policy) {
            Ok(executed) => {
                self.reservations.remove(&item);
                self.state.record_equip(agent, now);

                if let Some(region) = region {
                    self.index.apply(
                        &WorldChange::ItemDespawned { region, item: executed.picked },
                        world,
                        now,
                    );
                    if let Some((dropped, _)) = executed.displaced {
                        self.index.apply(
                            &WorldChange::ItemSpawned { region, item: dropped },
                            world,
                            now,
                        );
                        // Don't chase our own cast-off next scan.
                        self.state.deny_until(
                            agent,
                            dropped,
                            now + self.policy.failure_denylist_ticks,
                        );
                    }
                }

                observer.on_executed(now, agent, &executed);
                Ok(executed)
            }
            Err(err) => {
                self.reservations.remove(&item);
                // Throttle the item in every failure mode; denylist it too
                // when the world actively fought the sequence.
                self.state.record_attempt(agent, item, now);
                if matches!(
                    err,
                    CommandError::RolledBack { .. } | CommandError::RestoreFailed { .. }
                ) {
                    self.state
                        .deny_until(agent, item, now + self.policy.failure_denylist_ticks);
                }
                observer.on_execute_failed(now, agent, &err);
                Err(err.into())
            }
        }
    }

    // ── Admin hooks ───────────────────────────────────────────────────────

    /// Drop every per-agent cache for `agent` (host reports it invalid).
    pub fn invalidate_agent_cache(&mut self, agent: AgentId) {
        self.purge_agent(agent);
    }

    /// World-load/reset: drop all derived state.
    pub fn clear_all_state(&mut self) {
        self.state.clear();
        self.cache.clear();
        self.reservations.clear();
        self.budget.reset();
        self.index = CandidateIndex::new();
    }

    /// Amortized cache eviction, called on a coarse interval by the host.
    pub fn report_periodic_cleanup<O: EngineObserver>(
        &mut self,
        now: Tick,
        observer: &mut O,
    ) -> CleanupStats {
        let cache_entries_evicted = self.cache.sweep(now);
        let denylist_entries_cleared = self.state.expire_due(now);
        let before = self.reservations.len();
        self.reservations.retain(|_, claim| now < claim.expiry);
        let stats = CleanupStats {
            cache_entries_evicted,
            denylist_entries_cleared,
            reservations_dropped: before - self.reservations.len(),
        };
        observer.on_cleanup(now, &stats);
        stats
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn purge_agent(&mut self, agent: AgentId) {
        self.state.purge(agent);
        self.cache.purge_agent(agent);
        self.reservations.retain(|_, claim| claim.agent != agent);
    }

    fn reserved_by_other(&self, item: ItemId, agent: AgentId, now: Tick) -> bool {
        self.reservations
            .get(&item)
            .is_some_and(|claim| claim.agent != agent && now < claim.expiry)
    }
}
