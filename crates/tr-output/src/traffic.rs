//! One-shot export of the current network state to `traffic_data.csv`.
//!
//! The column layout is fixed and shared with existing reporting tools:
//!
//! ```text
//! Source,Destination,RoadType,OriginalWeight,CurrentWeight,SignalDelay,Blocked,Congestion
//! ```
//!
//! `Blocked` is written as `TRUE` / `FALSE`; `CurrentWeight` with two
//! decimals.

use std::path::Path;

use csv::Writer;
use tracing::info;
use tr_network::EdgeSnapshot;

use crate::OutputResult;

pub const TRAFFIC_DATA_HEADER: [&str; 8] = [
    "Source",
    "Destination",
    "RoadType",
    "OriginalWeight",
    "CurrentWeight",
    "SignalDelay",
    "Blocked",
    "Congestion",
];

/// Write `rows` (usually `sim.export_snapshot()`) to `path`, replacing any
/// existing file.
pub fn write_traffic_data(path: &Path, rows: &[EdgeSnapshot]) -> OutputResult<()> {
    let mut out = Writer::from_path(path)?;
    out.write_record(TRAFFIC_DATA_HEADER)?;
    for row in rows {
        out.write_record(&[
            row.source.clone(),
            row.destination.clone(),
            row.road_type.to_string(),
            row.base_weight.to_string(),
            format!("{:.2}", row.current_weight),
            row.signal_delay.to_string(),
            (if row.blocked { "TRUE" } else { "FALSE" }).to_owned(),
            row.congestion.to_string(),
        ])?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = rows.len(), "traffic data exported");
    Ok(())
}
