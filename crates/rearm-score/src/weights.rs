//! `ScoreWeights` — the multiplier tables behind the full score.
//!
//! Tuning values are policy, not architecture: the defaults below exist to
//! make relative comparisons behave sensibly, and hosts override them freely.
//! What the engine *does* depend on is that every multiplier stays inside
//! the bounds [`validate`](ScoreWeights::validate) enforces, because the
//! pruning bound is computed from those extremes.

use rearm_world::Quality;

use crate::{ScoreError, ScoreResult};

/// Maximum trainable skill level.
pub const SKILL_CAP: u8 = 20;

/// Multiplier tables applied on top of the rough score.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    /// Quality multiplier per tier, indexed by `Quality::rank()`.
    pub quality: [f32; 7],
    /// Condition multiplier at condition 0; scales linearly up to 1.0 at
    /// full condition.
    pub condition_floor: f32,
    /// Skill-alignment multiplier at skill 0.
    pub skill_base: f32,
    /// Additional skill-alignment multiplier earned at `SKILL_CAP`.
    pub skill_span: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            //        awful poor  norm  good  exc   mstr  lgnd
            quality: [0.80, 0.90, 1.00, 1.10, 1.20, 1.35, 1.50],
            condition_floor: 0.5,
            skill_base: 0.75,
            skill_span: 0.5,
        }
    }
}

impl ScoreWeights {
    /// Check the bounds the pruning invariant needs.
    pub fn validate(&self) -> ScoreResult<()> {
        if self.quality.iter().any(|&q| q <= 0.0) {
            return Err(ScoreError::Config("quality multipliers must be > 0".into()));
        }
        if !(0.0 < self.condition_floor && self.condition_floor <= 1.0) {
            return Err(ScoreError::Config(format!(
                "condition_floor {} must be in (0, 1]",
                self.condition_floor
            )));
        }
        if self.skill_base <= 0.0 || self.skill_span < 0.0 {
            return Err(ScoreError::Config(
                "skill_base must be > 0 and skill_span >= 0".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn quality_mult(&self, quality: Quality) -> f32 {
        self.quality[quality.rank()]
    }

    /// Linear condition multiplier: `floor` at 0 condition, 1.0 at full.
    #[inline]
    pub fn condition_mult(&self, condition: f32) -> f32 {
        let c = condition.clamp(0.0, 1.0);
        self.condition_floor + (1.0 - self.condition_floor) * c
    }

    /// Skill-alignment multiplier for a 0–20 skill level.
    #[inline]
    pub fn skill_mult(&self, skill: u8) -> f32 {
        let s = skill.min(SKILL_CAP) as f32 / SKILL_CAP as f32;
        self.skill_base + self.skill_span * s
    }

    // ── Pruning bound ─────────────────────────────────────────────────────

    /// Smallest and largest possible full/rough ratio under these tables.
    pub fn ratio_bounds(&self) -> (f32, f32) {
        let q_min = self.quality.iter().copied().fold(f32::INFINITY, f32::min);
        let q_max = self.quality.iter().copied().fold(0.0_f32, f32::max);
        let min = q_min * self.condition_floor * self.skill_base;
        let max = q_max * 1.0 * (self.skill_base + self.skill_span);
        (min, max)
    }

    /// A candidate whose rough score trails the best rough score by more
    /// than this factor cannot win at full precision.  The scheduler widens
    /// any tighter policy ratio to at least this value.
    pub fn prune_bound(&self) -> f32 {
        let (min, max) = self.ratio_bounds();
        max / min
    }
}
