//! Unit tests for rearm-score.

use rearm_core::{AgentId, ItemId, KindId, MapPos, RegionId};
use rearm_world::{AgentRecord, ItemKind, ItemRecord, Quality, TraitFlags, WeaponClass};

use crate::{CombatProfile, ScoreEngine, ScoreWeights};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn agent() -> AgentRecord {
    AgentRecord::new(AgentId(0), RegionId(0), MapPos::new(0.0, 0.0))
}

fn sword(power: f32) -> ItemKind {
    ItemKind {
        id: KindId(1),
        label: "sword".into(),
        class: WeaponClass::Melee,
        base_power: power,
        min_body_size: 0.5,
        bulk: 1,
    }
}

fn rifle(power: f32) -> ItemKind {
    ItemKind {
        id: KindId(2),
        label: "rifle".into(),
        class: WeaponClass::Ranged,
        base_power: power,
        min_body_size: 0.8,
        bulk: 2,
    }
}

fn instance(kind: &ItemKind, quality: Quality, condition: f32) -> ItemRecord {
    let mut rec = ItemRecord::on_ground(ItemId(9), kind.id, RegionId(0), MapPos::new(1.0, 1.0));
    rec.quality = quality;
    rec.condition = condition;
    rec
}

fn engine() -> ScoreEngine {
    ScoreEngine::new(ScoreWeights::default()).unwrap()
}

// ── CombatProfile ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod profile {
    use super::*;

    #[test]
    fn neutral_agent_has_unit_affinities() {
        let p = CombatProfile::of(&agent());
        assert_eq!(p.affinity(WeaponClass::Melee), 1.0);
        assert_eq!(p.affinity(WeaponClass::Ranged), 1.0);
    }

    #[test]
    fn brawler_skews_toward_melee() {
        let mut a = agent();
        a.traits = a.traits.with(TraitFlags::BRAWLER);
        let p = CombatProfile::of(&a);
        assert!(p.affinity(WeaponClass::Melee) > 1.0);
        assert!(p.affinity(WeaponClass::Ranged) < 1.0);
        assert!(p.affinity(WeaponClass::Ranged) > 0.0); // a gun still beats fists
    }

    #[test]
    fn pacifist_scores_zero_everywhere() {
        let mut a = agent();
        a.traits = a.traits.with(TraitFlags::PACIFIST);
        let p = CombatProfile::of(&a);
        let e = engine();
        let k = sword(10.0);
        assert_eq!(e.rough_score(&p, &k), 0.0);
        assert_eq!(e.full_score(&p, &k, &instance(&k, Quality::Legendary, 1.0)), 0.0);
    }
}

// ── Determinism & ordering ────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use super::*;

    #[test]
    fn identical_inputs_identical_scores() {
        let e = engine();
        let p = CombatProfile::of(&agent());
        let k = rifle(14.0);
        let item = instance(&k, Quality::Good, 0.8);
        let a = e.full_score(&p, &k, &item);
        let b = e.full_score(&p, &k, &item);
        assert_eq!(a, b);
    }

    #[test]
    fn quality_orders_identical_kinds() {
        let e = engine();
        let p = CombatProfile::of(&agent());
        let k = sword(10.0);
        let scores: Vec<f32> = Quality::ALL
            .iter()
            .map(|&q| e.full_score(&p, &k, &instance(&k, q, 1.0)))
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] < pair[1], "quality tiers must strictly order scores");
        }
    }

    #[test]
    fn condition_degrades_score_but_never_to_zero() {
        let e = engine();
        let p = CombatProfile::of(&agent());
        let k = sword(10.0);
        let fresh = e.full_score(&p, &k, &instance(&k, Quality::Normal, 1.0));
        let worn  = e.full_score(&p, &k, &instance(&k, Quality::Normal, 0.1));
        assert!(worn < fresh);
        assert!(worn > 0.0);
    }

    #[test]
    fn skill_alignment_favors_the_practiced_class() {
        let e = engine();
        let mut a = agent();
        a.shooting = 18;
        a.melee = 2;
        let p = CombatProfile::of(&a);

        let r = rifle(10.0);
        let s = sword(10.0);
        let rifle_score = e.full_score(&p, &r, &instance(&r, Quality::Normal, 1.0));
        let sword_score = e.full_score(&p, &s, &instance(&s, Quality::Normal, 1.0));
        assert!(rifle_score > sword_score);
    }
}

// ── Pruning bound ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod prune_bound {
    use super::*;

    #[test]
    fn full_over_rough_stays_within_ratio_bounds() {
        let e = engine();
        let (lo, hi) = e.weights().ratio_bounds();
        let k = sword(10.0);

        // Sweep the extremes of quality, condition, and skill.
        for &quality in &Quality::ALL {
            for &condition in &[0.01_f32, 0.5, 1.0] {
                for &skill in &[0u8, 10, 20] {
                    let mut a = agent();
                    a.melee = skill;
                    let p = CombatProfile::of(&a);
                    let rough = e.rough_score(&p, &k);
                    let full = e.full_score(&p, &k, &instance(&k, quality, condition));
                    let ratio = full / rough;
                    assert!(
                        (lo - 1e-4..=hi + 1e-4).contains(&ratio),
                        "ratio {ratio} escaped [{lo}, {hi}]"
                    );
                }
            }
        }
    }

    #[test]
    fn prune_bound_is_the_ratio_spread() {
        let w = ScoreWeights::default();
        let (lo, hi) = w.ratio_bounds();
        assert!((w.prune_bound() - hi / lo).abs() < 1e-6);
        assert!(w.prune_bound() >= 1.0);
    }

    #[test]
    fn invalid_weights_rejected() {
        let mut w = ScoreWeights::default();
        w.condition_floor = 0.0;
        assert!(ScoreEngine::new(w).is_err());

        let mut w = ScoreWeights::default();
        w.quality[0] = -1.0;
        assert!(ScoreEngine::new(w).is_err());
    }
}
