//! `sf-output`: report writers for the store simulation.
//!
//! Three backends are provided:
//!
//! | Feature   | Backend  | Files created                                                                  |
//! |-----------|----------|--------------------------------------------------------------------------------|
//! | *(none)*  | CSV      | `agent_paths.csv`, `agent_outcomes.csv`, `popular_zones.csv`, `shelf_statistics.csv` |
//! | *(none)*  | JSON     | `report.json`                                                                  |
//! | `sqlite`  | SQLite   | `output.db`                                                                    |
//!
//! All backends implement [`ReportWriter`] and are driven by
//! [`ReportObserver`], which implements `sf_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sf_output::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! let report = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonWriter;
pub use observer::ReportObserver;
pub use row::{OutcomeRow, PathRow, ShelfRow, ZoneRow};
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
