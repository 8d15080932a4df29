//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `edge_snapshots`, `tick_summaries`, and `incidents`.
//! Opening a writer clears rows left by an earlier run in the same directory.

use std::path::Path;

use rusqlite::Connection;
use tr_network::EdgeSnapshot;

use crate::writer::OutputWriter;
use crate::{IncidentRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir`, initialise the schema, and empty
    /// every table.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS edge_snapshots (
                 tick           INTEGER NOT NULL,
                 source         TEXT    NOT NULL,
                 destination    TEXT    NOT NULL,
                 road_type      TEXT    NOT NULL,
                 base_weight    INTEGER NOT NULL,
                 current_weight REAL    NOT NULL,
                 signal_delay   INTEGER NOT NULL,
                 blocked        INTEGER NOT NULL,
                 congestion     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick             INTEGER NOT NULL,
                 elapsed_secs     INTEGER NOT NULL,
                 weather          TEXT    NOT NULL,
                 active_incidents INTEGER NOT NULL,
                 blocked_edges    INTEGER NOT NULL,
                 congested_edges  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS incidents (
                 tick            INTEGER NOT NULL,
                 location        TEXT    NOT NULL,
                 kind            TEXT    NOT NULL,
                 severity        INTEGER NOT NULL,
                 affected        TEXT    NOT NULL,
                 created_at_secs INTEGER NOT NULL
             );
             DELETE FROM edge_snapshots;
             DELETE FROM tick_summaries;
             DELETE FROM incidents;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshot(&mut self, tick: u64, rows: &[EdgeSnapshot]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO edge_snapshots \
                 (tick, source, destination, road_type, base_weight, current_weight, \
                  signal_delay, blocked, congestion) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    tick as i64,
                    row.source,
                    row.destination,
                    row.road_type.as_str(),
                    row.base_weight,
                    row.current_weight,
                    row.signal_delay,
                    row.blocked as i64,
                    row.congestion,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, weather, active_incidents, blocked_edges, congested_edges) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_secs,
                row.weather.as_str(),
                row.active_incidents as i64,
                row.blocked_edges as i64,
                row.congested_edges as i64,
            ],
        )?;
        Ok(())
    }

    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO incidents (tick, location, kind, severity, affected, created_at_secs) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.location,
                row.kind,
                row.severity,
                row.affected,
                row.created_at_secs,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
