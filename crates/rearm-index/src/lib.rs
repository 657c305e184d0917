//! `rearm-index` — the candidate item index.
//!
//! One [`RegionIndex`] per world region tracks every loose item eligible for
//! pickup: a hash map for identity/metadata plus an R-tree (via `rstar`) for
//! bounded spatial queries.  [`CandidateIndex`] routes queries and change
//! notifications to the right region.
//!
//! # Maintenance model
//!
//! Item-level adds/removes/moves are O(1) amortized via
//! [`CandidateIndex::apply`].  A full rebuild happens only when the host
//! signals a coarse change (map load, batch mutation) through
//! [`CandidateIndex::invalidate`], after which the region reports **cold**
//! and queries return empty until the scheduler lazily triggers
//! [`CandidateIndex::rebuild`] — never an error.
//!
//! Every mutation stamps the region with the current tick;
//! [`CandidateIndex::last_change_tick`] lets the scheduler detect staleness
//! with a single comparison instead of diffing contents.
//!
//! # Crate layout
//!
//! | Module     | Contents                                  |
//! |------------|-------------------------------------------|
//! | [`region`] | `RegionIndex`, `ItemMeta` (rstar-backed)  |
//! | [`index`]  | `CandidateIndex` (per-region routing)     |

pub mod index;
pub mod region;

#[cfg(test)]
mod tests;

pub use index::CandidateIndex;
pub use region::{ItemMeta, RegionIndex};
