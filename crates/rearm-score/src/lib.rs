//! `rearm-score` — weapon desirability scoring.
//!
//! Two-phase design: [`ScoreEngine::rough_score`] is the cheap pre-filter
//! computed from static item properties only; [`ScoreEngine::full_score`]
//! folds in per-instance quality, condition, and skill alignment.  The
//! scheduler rough-scores every candidate, then fully scores only the
//! survivors of the pruning bound.
//!
//! # Determinism
//!
//! Both scores are pure functions of `(agent state, item state)` — no RNG,
//! no interior mutability, no clocks.  Identical inputs always produce
//! identical scores; the test suite and the no-oscillation guarantee both
//! rely on this.
//!
//! # Pruning safety
//!
//! For any (agent, item), `full = rough × m` where `m` is bounded by the
//! weight-table extremes.  [`ScoreWeights::prune_bound`] returns
//! `m_max / m_min`; a candidate whose rough score trails the best rough
//! score by more than that factor cannot out-score it at full precision, so
//! skipping its full score is always safe.
//!
//! # Crate layout
//!
//! | Module      | Contents                                 |
//! |-------------|------------------------------------------|
//! | [`profile`] | `CombatProfile` — per-agent class affinity |
//! | [`weights`] | `ScoreWeights` — the multiplier tables   |
//! | [`engine`]  | `ScoreEngine` — rough/full entry points  |
//! | [`error`]   | `ScoreError`, `ScoreResult<T>`           |

pub mod engine;
pub mod error;
pub mod profile;
pub mod weights;

#[cfg(test)]
mod tests;

pub use engine::ScoreEngine;
pub use error::{ScoreError, ScoreResult};
pub use profile::CombatProfile;
pub use weights::ScoreWeights;
