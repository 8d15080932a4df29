//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `edge_snapshots.csv`
//! - `tick_summaries.csv`
//! - `incidents.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tr_network::EdgeSnapshot;

use crate::writer::OutputWriter;
use crate::{IncidentRow, OutputResult, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    incidents: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("edge_snapshots.csv"))?;
        snapshots.write_record([
            "tick",
            "source",
            "destination",
            "road_type",
            "base_weight",
            "current_weight",
            "signal_delay",
            "blocked",
            "congestion",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "elapsed_secs",
            "weather",
            "active_incidents",
            "blocked_edges",
            "congested_edges",
        ])?;

        let mut incidents = Writer::from_path(dir.join("incidents.csv"))?;
        incidents.write_record(["tick", "location", "kind", "severity", "affected", "created_at_secs"])?;

        Ok(Self {
            snapshots,
            summaries,
            incidents,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshot(&mut self, tick: u64, rows: &[EdgeSnapshot]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                tick.to_string(),
                row.source.clone(),
                row.destination.clone(),
                row.road_type.to_string(),
                row.base_weight.to_string(),
                format!("{:.3}", row.current_weight),
                row.signal_delay.to_string(),
                (row.blocked as u8).to_string(),
                row.congestion.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.weather.to_string(),
            row.active_incidents.to_string(),
            row.blocked_edges.to_string(),
            row.congested_edges.to_string(),
        ])?;
        Ok(())
    }

    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()> {
        self.incidents.write_record(&[
            row.tick.to_string(),
            row.location.clone(),
            row.kind.to_owned(),
            row.severity.to_string(),
            row.affected.clone(),
            row.created_at_secs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.incidents.flush()?;
        Ok(())
    }
}
