//! `CombatProfile` — the agent-side half of a score computation.

use rearm_world::{AgentRecord, TraitFlags, WeaponClass};

// ── Trait affinity constants ──────────────────────────────────────────────────

/// Melee multiplier for brawlers.
const BRAWLER_MELEE: f32 = 1.3;
/// Ranged multiplier for brawlers — they hate guns, but a gun still beats
/// empty hands, so this stays above zero.
const BRAWLER_RANGED: f32 = 0.4;
/// Ranged multiplier for hunters.
const HUNTER_RANGED: f32 = 1.15;

/// Per-agent affinity snapshot derived once per evaluation and reused across
/// every candidate in the scan.
///
/// Deriving it is cheap, but hoisting it out of the per-item loop keeps the
/// rough score down to two multiplies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombatProfile {
    pub melee_affinity: f32,
    pub ranged_affinity: f32,
    /// Melee skill level, 0–20.
    pub melee_skill: u8,
    /// Shooting skill level, 0–20.
    pub shooting_skill: u8,
}

impl CombatProfile {
    pub fn of(agent: &AgentRecord) -> Self {
        let mut melee = 1.0;
        let mut ranged = 1.0;

        if agent.traits.has(TraitFlags::BRAWLER) {
            melee *= BRAWLER_MELEE;
            ranged *= BRAWLER_RANGED;
        }
        if agent.traits.has(TraitFlags::HUNTER) {
            ranged *= HUNTER_RANGED;
        }
        if agent.traits.has(TraitFlags::PACIFIST) {
            // Zero affinity zeroes every score, so a pacifist never sees a
            // "positive score" candidate even when unarmed.
            melee = 0.0;
            ranged = 0.0;
        }

        Self {
            melee_affinity: melee,
            ranged_affinity: ranged,
            melee_skill: agent.melee,
            shooting_skill: agent.shooting,
        }
    }

    /// Affinity for a weapon class.
    #[inline]
    pub fn affinity(&self, class: WeaponClass) -> f32 {
        match class {
            WeaponClass::Melee  => self.melee_affinity,
            WeaponClass::Ranged => self.ranged_affinity,
        }
    }

    /// Skill level relevant to a weapon class.
    #[inline]
    pub fn skill(&self, class: WeaponClass) -> u8 {
        match class {
            WeaponClass::Melee  => self.melee_skill,
            WeaponClass::Ranged => self.shooting_skill,
        }
    }
}
