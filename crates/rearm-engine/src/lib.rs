//! `rearm-engine` — the decision scheduler.
//!
//! One [`EquipEngine`] per simulated world.  The host calls
//! [`EquipEngine::evaluate`] once per agent per scheduling opportunity; the
//! engine applies its budgets, skip paths, and bounded scan, and hands back
//! at most one [`EquipCommand`][rearm_command::EquipCommand] to run through
//! [`EquipEngine::execute`].
//!
//! # Pipeline per evaluation
//!
//! ```text
//! ① Fast-reject   — disabled, invalid/unspawned, in combat, minor, budget
//!                   exhausted, already processed, equip cooldown, forced hold.
//! ② Skip-check    — index change tick + agent fingerprint unchanged and the
//!                   jittered re-check not yet due → done, no scan.
//! ③ Restriction   — forced-retention/provider-managed primaries restrict the
//!                   search to same-kind upgrades.
//! ④ Scan          — bounded candidate pull → validate (cache-first) → rough
//!                   score → prune → full score, early-exit on Amazing.
//! ⑤ Acceptance    — highest tier found wins; unarmed agents take the first
//!                   positive score.
//! ⑥ Commit        — advisory reservation, attempt record, command out.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                        |
//! |---------------|-------------------------------------------------|
//! | [`engine`]    | `EquipEngine` — the orchestrator                |
//! | [`builder`]   | `EngineBuilder`                                 |
//! | [`outcome`]   | `Decision`, `Tier`, `SkipReason`                |
//! | [`budget`]    | `TickBudget`                                    |
//! | [`providers`] | `CompatProvider`, `ProviderRegistry`            |
//! | [`observer`]  | `EngineObserver`, `NoopObserver`, `CleanupStats`|
//! | [`error`]     | `EngineError`, `EngineResult<T>`                |

pub mod budget;
pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod providers;


pub use builder::EngineBuilder;
pub use engine::EquipEngine;
pub use error::{EngineError, EngineResult};
pub use observer::{CleanupStats, EngineObserver, NoopObserver};
pub use outcome::{Decision, SkipReason, Tier};
pub use providers::{CompatProvider, ProviderRegistry, ProviderVerdict};
