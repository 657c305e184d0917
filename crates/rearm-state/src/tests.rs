//! Unit tests for rearm-state.

use rearm_core::{AgentId, ItemId, Tick};

use crate::{persist, AgentStateStore, ExpiryQueue, PersistedAgentState};

const A: AgentId = AgentId(0);
const B: AgentId = AgentId(1);
const SWORD: ItemId = ItemId(10);
const RIFLE: ItemId = ItemId(11);

fn store() -> AgentStateStore {
    AgentStateStore::new(42)
}

// ── ExpiryQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod expiry_queue {
    use super::*;

    #[test]
    fn push_and_drain_due() {
        let mut q = ExpiryQueue::new();
        q.push(Tick(5), A, SWORD);
        q.push(Tick(5), B, RIFLE);
        q.push(Tick(7), A, RIFLE);

        assert_eq!(q.len(), 3);
        assert_eq!(q.next_tick(), Some(Tick(5)));

        let drained = q.drain_due(Tick(5));
        assert_eq!(drained.len(), 2);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(7)));
    }

    #[test]
    fn drain_covers_skipped_ticks() {
        // The host may not invoke the scheduler every tick; entries that
        // came due in the gap must all drain.
        let mut q = ExpiryQueue::new();
        q.push(Tick(3), A, SWORD);
        q.push(Tick(6), A, RIFLE);
        q.push(Tick(9), B, SWORD);

        let drained = q.drain_due(Tick(7));
        assert_eq!(drained.len(), 2);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn drain_before_anything_due_is_free() {
        let mut q = ExpiryQueue::new();
        q.push(Tick(10), A, SWORD);
        assert!(q.drain_due(Tick(9)).is_empty());
        assert_eq!(q.len(), 1); // not consumed
    }

    #[test]
    fn tick_count_tracks_distinct_ticks() {
        let mut q = ExpiryQueue::new();
        q.push(Tick(1), A, SWORD);
        q.push(Tick(1), B, SWORD);
        q.push(Tick(3), A, RIFLE);
        assert_eq!(q.tick_count(), 2);
        assert_eq!(q.len(), 3);
    }
}

// ── Denylist behavior ─────────────────────────────────────────────────────────

#[cfg(test)]
mod denylist {
    use super::*;

    #[test]
    fn denied_strictly_before_expiry_eligible_at_expiry() {
        let mut s = store();
        s.deny_until(A, SWORD, Tick(100));

        assert!(s.is_denied(A, SWORD, Tick(0)));
        assert!(s.is_denied(A, SWORD, Tick(99)));
        assert!(!s.is_denied(A, SWORD, Tick(100)));
        assert!(!s.is_denied(A, SWORD, Tick(101)));
    }

    #[test]
    fn expiry_is_event_scheduled_not_scanned() {
        // Load the store with many agents' entries, then verify that
        // expiring tick 100's entries does bounded work: only the due
        // entries leave the queue.
        let mut s = store();
        for i in 0..100u32 {
            s.deny_until(AgentId(i), SWORD, Tick(1_000 + i as u64));
        }
        s.deny_until(A, RIFLE, Tick(100));
        assert_eq!(s.pending_expiries(), 101);

        let cleared = s.expire_due(Tick(100));
        assert_eq!(cleared, 1);
        // The 100 future entries were not visited or removed.
        assert_eq!(s.pending_expiries(), 100);
        assert!(!s.is_denied(A, RIFLE, Tick(100)));
        assert!(s.is_denied(AgentId(50), SWORD, Tick(100)));
    }

    #[test]
    fn extending_an_entry_survives_the_stale_queue_slot() {
        let mut s = store();
        s.deny_until(A, SWORD, Tick(50));
        s.deny_until(A, SWORD, Tick(200)); // extended

        let cleared = s.expire_due(Tick(50));
        assert_eq!(cleared, 0);
        assert!(s.is_denied(A, SWORD, Tick(51)));

        let cleared = s.expire_due(Tick(200));
        assert_eq!(cleared, 1);
        assert!(!s.is_denied(A, SWORD, Tick(200)));
    }

    #[test]
    fn re_denying_with_earlier_expiry_keeps_the_later_one() {
        let mut s = store();
        s.deny_until(A, SWORD, Tick(200));
        s.deny_until(A, SWORD, Tick(50));
        assert!(s.is_denied(A, SWORD, Tick(100)));
    }

    #[test]
    fn purged_agents_expiries_are_noops() {
        let mut s = store();
        s.deny_until(A, SWORD, Tick(10));
        s.purge(A);
        assert_eq!(s.expire_due(Tick(10)), 0);
    }
}

// ── Cooldowns & throttles ─────────────────────────────────────────────────────

#[cfg(test)]
mod cooldowns {
    use super::*;

    #[test]
    fn equip_cooldown_window() {
        let mut s = store();
        s.record_equip(A, Tick(100));
        let st = s.get(A).unwrap();
        assert!(st.on_equip_cooldown(Tick(100), 30));
        assert!(st.on_equip_cooldown(Tick(129), 30));
        assert!(!st.on_equip_cooldown(Tick(130), 30));
    }

    #[test]
    fn attempt_throttle_is_per_item() {
        let mut s = store();
        s.record_attempt(A, SWORD, Tick(100));
        let st = s.get(A).unwrap();
        assert!(st.attempt_throttled(SWORD, Tick(110), 60));
        assert!(!st.attempt_throttled(RIFLE, Tick(110), 60));
        assert!(!st.attempt_throttled(SWORD, Tick(160), 60));
    }

    #[test]
    fn recheck_jitter_is_deterministic_per_agent() {
        let mut s1 = store();
        let mut s2 = store();
        s1.schedule_recheck(A, Tick(0), 100, 50);
        s2.schedule_recheck(A, Tick(0), 100, 50);
        assert_eq!(
            s1.get(A).unwrap().next_recheck_tick,
            s2.get(A).unwrap().next_recheck_tick
        );

        let t = s1.get(A).unwrap().next_recheck_tick;
        assert!(t >= Tick(100) && t <= Tick(150));
    }
}

// ── Purge & fresh-load ────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn purge_removes_everything_and_next_access_is_fresh() {
        let mut s = store();
        s.record_equip(A, Tick(5));
        s.record_attempt(A, SWORD, Tick(6));
        s.deny_until(A, RIFLE, Tick(100));

        s.purge(A);
        assert!(s.get(A).is_none());
        assert!(!s.is_denied(A, RIFLE, Tick(7)));

        let st = s.get_or_create(A);
        assert!(st.last_equip_tick.is_none());
        assert!(st.last_attempt.is_none());
        assert!(st.denylist.is_empty());
    }

    #[test]
    fn fresh_load_fires_once_past_warmup() {
        let mut s = store();
        assert!(!s.detect_fresh_load(Tick(100), 600)); // inside warm-up
        assert!(s.detect_fresh_load(Tick(601), 600));
        assert!(!s.detect_fresh_load(Tick(602), 600)); // already resolved
    }

    #[test]
    fn fresh_load_suppressed_once_store_is_in_use() {
        let mut s = store();
        s.get_or_create(A);
        assert!(!s.detect_fresh_load(Tick(10_000), 600));
    }

    #[test]
    fn clear_re_arms_fresh_load_detection() {
        let mut s = store();
        s.get_or_create(A);
        s.clear();
        assert!(s.detect_fresh_load(Tick(10_000), 600));
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod persistence {
    use super::*;

    #[test]
    fn export_skips_uninteresting_agents() {
        let mut s = store();
        s.record_equip(A, Tick(500));
        // B: no equip, not forced — no row.
        let rows = persist::export(&s, &[A, B], |agent| agent == A);
        // A is both forced and cooldown-bearing; B contributes nothing.
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            PersistedAgentState {
                agent: A,
                forced_retention: true,
                last_equip_tick: Some(Tick(500)),
            }
        );
    }

    #[test]
    fn import_restores_cooldowns_and_reports_flags() {
        let rows = vec![PersistedAgentState {
            agent: B,
            forced_retention: true,
            last_equip_tick: Some(Tick(42)),
        }];
        let mut s = store();
        let flags = persist::import(&mut s, &rows);
        assert_eq!(flags, vec![(B, true)]);
        assert_eq!(s.get(B).unwrap().last_equip_tick, Some(Tick(42)));
    }

    #[test]
    fn rows_round_trip_through_serde() {
        let row = PersistedAgentState {
            agent: A,
            forced_retention: false,
            last_equip_tick: Some(Tick(7)),
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: PersistedAgentState = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
