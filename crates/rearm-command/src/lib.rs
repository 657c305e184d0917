//! `rearm-command` — turning decisions into world mutations.
//!
//! The scheduler emits an [`EquipCommand`]; the [`CommandExecutor`] runs it
//! against the host through the `World` trait as a short sequence of
//! primitive steps with explicit rollback.  The invariant the executor
//! guarantees: **a failed sequence never leaves the agent holding neither
//! weapon** — on a mid-sequence failure the original item is restored before
//! the error surfaces.
//!
//! # Crate layout
//!
//! | Module       | Contents                                   |
//! |--------------|--------------------------------------------|
//! | [`command`]  | `EquipCommand`, `Executed`                 |
//! | [`executor`] | `CommandExecutor` — sequencing + rollback  |
//! | [`error`]    | `CommandError`, `CommandResult<T>`         |

pub mod command;
pub mod error;
pub mod executor;


pub use command::{EquipCommand, Executed};
pub use error::{CommandError, CommandResult};
pub use executor::CommandExecutor;
