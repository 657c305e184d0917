//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `CoreError` via `From` impls, or keep them separate and wrap `CoreError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

use crate::{AgentId, ItemId};

/// The top-level error type for `rearm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rearm-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
