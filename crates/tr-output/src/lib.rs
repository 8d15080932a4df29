//! `tr-output` — simulation output writers for the traffic routing workspace.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                  |
//! |-----------|-------------|----------------------------------------------------------------|
//! | *(none)*  | CSV         | `edge_snapshots.csv`, `tick_summaries.csv`, `incidents.csv`    |
//! | `sqlite`  | SQLite      | `output.db`                                                    |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `tr_sim::SimObserver`.
//!
//! [`write_traffic_data`] is a separate one-shot export of the current
//! network in the fixed `traffic_data.csv` layout.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tr_output::{CsvWriter, SimOutputObserver, write_traffic_data};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! write_traffic_data(Path::new("traffic_data.csv"), &sim.export_snapshot())?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod traffic;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{IncidentRow, TickSummaryRow};
pub use traffic::{TRAFFIC_DATA_HEADER, write_traffic_data};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
