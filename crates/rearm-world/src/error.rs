use thiserror::Error;

use rearm_core::{AgentId, ItemId};

/// Errors surfaced by [`World`][crate::World] mutation primitives.
///
/// Each maps onto the engine's failure taxonomy: `AlreadyReserved` and
/// `Rejected` are transient (retry-safe, throttled); `InventoryFull` and
/// `NotHolding` indicate the command layer sequenced steps against stale
/// state and must roll back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("agent {0} not found")]
    AgentMissing(AgentId),

    #[error("item {0} not found")]
    ItemMissing(ItemId),

    #[error("item {0} is reserved by another agent")]
    AlreadyReserved(ItemId),

    #[error("agent {0} has no free inventory capacity")]
    InventoryFull(AgentId),

    #[error("agent {0} is not holding item {1}")]
    NotHolding(AgentId, ItemId),

    #[error("host rejected the operation: {0}")]
    Rejected(&'static str),
}

pub type WorldResult<T> = Result<T, WorldError>;
