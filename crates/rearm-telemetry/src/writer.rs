//! The `TelemetryWriter` trait implemented by all backend writers.

use crate::{DecisionRow, ExecutionRow, TelemetryResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TelemetryObserver::take_error`][crate::TelemetryObserver::take_error].
pub trait TelemetryWriter {
    /// Record one evaluation outcome.
    fn write_decision(&mut self, row: &DecisionRow) -> TelemetryResult<()>;

    /// Record one command execution attempt.
    fn write_execution(&mut self, row: &ExecutionRow) -> TelemetryResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> TelemetryResult<()>;
}
