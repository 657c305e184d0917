//! SQLite telemetry backend (feature `sqlite`).
//!
//! Creates a single `telemetry.db` file in the configured output directory
//! with two tables: `decisions` and `executions`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::TelemetryWriter;
use crate::{DecisionRow, ExecutionRow, TelemetryResult};

/// Writes decision traces to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `telemetry.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> TelemetryResult<Self> {
        let conn = Connection::open(dir.join("telemetry.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS decisions (
                 tick     INTEGER NOT NULL,
                 agent_id INTEGER NOT NULL,
                 outcome  TEXT    NOT NULL,
                 item_id  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS executions (
                 tick      INTEGER NOT NULL,
                 agent_id  INTEGER NOT NULL,
                 picked    INTEGER NOT NULL,
                 displaced INTEGER NOT NULL,
                 ok        INTEGER NOT NULL,
                 detail    TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TelemetryWriter for SqliteWriter {
    fn write_decision(&mut self, row: &DecisionRow) -> TelemetryResult<()> {
        self.conn.execute(
            "INSERT INTO decisions (tick, agent_id, outcome, item_id) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.agent_id, row.outcome, row.item_id],
        )?;
        Ok(())
    }

    fn write_execution(&mut self, row: &ExecutionRow) -> TelemetryResult<()> {
        self.conn.execute(
            "INSERT INTO executions (tick, agent_id, picked, displaced, ok, detail) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick,
                row.agent_id,
                row.picked,
                row.displaced,
                row.ok as i64,
                row.detail,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> TelemetryResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
