//! `rearm-core` — foundational types for the `rearm` auto-equip engine.
//!
//! This crate is a dependency of every other `rearm-*` crate.  It
//! intentionally has no `rearm-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `ItemId`, `KindId`, `RegionId`             |
//! | [`pos`]    | `MapPos`, Euclidean distance                          |
//! | [`time`]   | `Tick`                                                |
//! | [`rng`]    | `AgentRng` (per-agent deterministic jitter source)    |
//! | [`policy`] | `EquipPolicy` — the host-configurable settings surface|
//! | [`error`]  | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by hosts that persist policy or cooldown state.   |

pub mod error;
pub mod ids;
pub mod policy;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, ItemId, KindId, RegionId};
pub use policy::EquipPolicy;
pub use pos::MapPos;
pub use rng::AgentRng;
pub use time::Tick;
