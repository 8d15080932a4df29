//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;
use tr_core::Tick;
use tr_incident::Incident;
use tr_network::RoadNetwork;
use tr_sim::{SimObserver, SimStatus};

use crate::row::{IncidentRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes edge snapshots, tick summaries, and
/// generated incidents to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_incident(&mut self, tick: Tick, incident: &Incident) {
        let result = self.writer.write_incident(&IncidentRow::new(tick.0, incident));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, _tick: Tick, status: &SimStatus) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(status));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, network: &RoadNetwork) {
        let rows = network.snapshot();
        if !rows.is_empty() {
            let result = self.writer.write_snapshot(tick.0, &rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
