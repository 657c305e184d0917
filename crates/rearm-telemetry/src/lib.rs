//! `rearm-telemetry` — decision-trace output for the auto-equip engine.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                       |
//! |-----------|---------|-------------------------------------|
//! | *(none)*  | CSV     | `decisions.csv`, `executions.csv`   |
//! | `sqlite`  | SQLite  | `telemetry.db`                      |
//!
//! Both implement [`TelemetryWriter`] and are driven by
//! [`TelemetryObserver`], which implements `rearm_engine::EngineObserver`.
//! Writer errors are stored, never raised: the engine must keep deciding
//! even when the disk is full.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rearm_telemetry::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./telemetry"))?;
//! let mut obs = TelemetryObserver::new(writer);
//! for agent in host.pawns() {
//!     engine.evaluate(agent, &world, now, &mut obs);
//! }
//! obs.take_error().map(|e| eprintln!("telemetry error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{TelemetryError, TelemetryResult};
pub use observer::TelemetryObserver;
pub use row::{DecisionRow, ExecutionRow};
pub use writer::TelemetryWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
