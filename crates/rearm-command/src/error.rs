use thiserror::Error;

use rearm_core::ItemId;
use rearm_world::WorldError;

/// Execution failures, graded by how much of the sequence ran.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The authoritative reservation was refused — another agent or job got
    /// the item first.  Transient; the scheduler throttles the item.
    #[error("authoritative reservation denied for item {0}")]
    ReservationDenied(ItemId),

    /// A step failed before any state changed.  Nothing to undo.
    #[error("command rejected: {0}")]
    Rejected(#[from] WorldError),

    /// A mid-sequence step failed and the original state was restored.
    #[error("command rolled back after step failure: {failed}")]
    RolledBack { failed: WorldError },

    /// The nightmare case: a step failed *and* restoring the original item
    /// failed.  The agent still holds the original in hand (never
    /// destroyed), but it is no longer equipped.
    #[error("command failed ({failed}) and restore also failed ({restore})")]
    RestoreFailed {
        failed: WorldError,
        restore: WorldError,
    },
}

pub type CommandResult<T> = Result<T, CommandError>;
