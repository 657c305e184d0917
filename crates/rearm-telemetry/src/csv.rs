//! CSV telemetry backend.
//!
//! Creates two files in the configured output directory:
//! - `decisions.csv`
//! - `executions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TelemetryWriter;
use crate::{DecisionRow, ExecutionRow, TelemetryResult};

/// Writes decision traces to two CSV files.
pub struct CsvWriter {
    decisions:  Writer<File>,
    executions: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> TelemetryResult<Self> {
        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(["tick", "agent_id", "outcome", "item_id"])?;

        let mut executions = Writer::from_path(dir.join("executions.csv"))?;
        executions.write_record(["tick", "agent_id", "picked", "displaced", "ok", "detail"])?;

        Ok(Self {
            decisions,
            executions,
            finished: false,
        })
    }
}

impl TelemetryWriter for CsvWriter {
    fn write_decision(&mut self, row: &DecisionRow) -> TelemetryResult<()> {
        self.decisions.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.outcome.to_string(),
            row.item_id.to_string(),
        ])?;
        Ok(())
    }

    fn write_execution(&mut self, row: &ExecutionRow) -> TelemetryResult<()> {
        self.executions.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.picked.to_string(),
            row.displaced.to_string(),
            (row.ok as u8).to_string(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TelemetryResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.decisions.flush()?;
        self.executions.flush()?;
        Ok(())
    }
}
