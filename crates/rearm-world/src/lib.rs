//! `rearm-world` — entity view types and the host simulation boundary.
//!
//! The engine never owns agents or items; the host simulation does.  This
//! crate defines the read-side records the engine evaluates, the [`World`]
//! trait through which all authoritative checks and mutations flow, and
//! [`LocalWorld`], a complete in-memory implementation used by tests and by
//! hosts without their own entity store.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`item`]   | `WeaponClass`, `Quality`, `ItemKind`, `ItemRecord`        |
//! | [`agent`]  | `TraitFlags`, `AgentRecord`, attribute fingerprinting     |
//! | [`filter`] | `KindFilter` — per-agent allow-list with revision counter |
//! | [`world`]  | `World` trait, `WorldChange` notifications                |
//! | [`local`]  | `LocalWorld` in-memory implementation                     |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                            |

pub mod agent;
pub mod error;
pub mod filter;
pub mod item;
pub mod local;
pub mod world;


pub use agent::{AgentRecord, TraitFlags};
pub use error::{WorldError, WorldResult};
pub use filter::KindFilter;
pub use item::{ItemKind, ItemRecord, Quality, WeaponClass};
pub use local::LocalWorld;
pub use world::{World, WorldChange};
