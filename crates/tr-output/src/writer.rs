//! The `OutputWriter` trait implemented by all backend writers.

use tr_network::EdgeSnapshot;

use crate::{IncidentRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write every edge of one network snapshot taken at `tick`.
    fn write_snapshot(&mut self, tick: u64, rows: &[EdgeSnapshot]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one generated incident.
    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
