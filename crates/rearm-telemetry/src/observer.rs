//! `TelemetryObserver<W>` — bridges `EngineObserver` to a `TelemetryWriter`.

use rearm_command::{CommandError, Executed};
use rearm_core::{AgentId, ItemId, Tick};
use rearm_engine::{Decision, EngineObserver};

use crate::row::{DecisionRow, ExecutionRow};
use crate::writer::TelemetryWriter;
use crate::TelemetryError;

/// An [`EngineObserver`] that writes decision and execution rows to any
/// [`TelemetryWriter`] backend.
///
/// Writer errors are stored internally because observer methods have no
/// return value — the engine is never blocked or failed by telemetry.
/// After the host's update loop, check for errors with
/// [`take_error`][Self::take_error].
pub struct TelemetryObserver<W: TelemetryWriter> {
    writer:     W,
    last_error: Option<TelemetryError>,
}

impl<W: TelemetryWriter> TelemetryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes so far succeeded.
    pub fn take_error(&mut self) -> Option<TelemetryError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to call `finish` and inspect files).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::TelemetryResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TelemetryWriter> EngineObserver for TelemetryObserver<W> {
    fn on_decision(&mut self, tick: Tick, agent: AgentId, decision: &Decision) {
        let row = match decision {
            Decision::Command(cmd) => DecisionRow {
                tick: tick.0,
                agent_id: agent.0,
                outcome: cmd.kind_str(),
                item_id: cmd.item().0,
            },
            Decision::Skip(reason) => DecisionRow {
                tick: tick.0,
                agent_id: agent.0,
                outcome: reason.as_str(),
                item_id: ItemId::INVALID.0,
            },
        };
        let result = self.writer.write_decision(&row);
        self.store_err(result);
    }

    fn on_executed(&mut self, tick: Tick, agent: AgentId, executed: &Executed) {
        let row = ExecutionRow {
            tick: tick.0,
            agent_id: agent.0,
            picked: executed.picked.0,
            displaced: executed
                .displaced
                .map_or(ItemId::INVALID.0, |(item, _)| item.0),
            ok: true,
            detail: String::new(),
        };
        let result = self.writer.write_execution(&row);
        self.store_err(result);
    }

    fn on_execute_failed(&mut self, tick: Tick, agent: AgentId, error: &CommandError) {
        let row = ExecutionRow {
            tick: tick.0,
            agent_id: agent.0,
            picked: ItemId::INVALID.0,
            displaced: ItemId::INVALID.0,
            ok: false,
            detail: error.to_string(),
        };
        let result = self.writer.write_execution(&row);
        self.store_err(result);
    }
}
