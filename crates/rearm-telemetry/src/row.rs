//! Plain data row types written by telemetry backends.

/// One evaluation outcome (command or skip).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRow {
    pub tick: u64,
    pub agent_id: u32,
    /// Command kind (`equip`, `swap_primary`, `swap_secondary`) or skip
    /// reason label.
    pub outcome: &'static str,
    /// Target item for commands; `u32::MAX` for skips.
    pub item_id: u32,
}

/// One command execution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRow {
    pub tick: u64,
    pub agent_id: u32,
    /// Item acquired; `u32::MAX` on failure.
    pub picked: u32,
    /// Item dropped in the exchange; `u32::MAX` if none.
    pub displaced: u32,
    pub ok: bool,
    /// Error description for failures; empty on success.
    pub detail: String,
}
