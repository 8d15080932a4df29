//! Integration tests for tr-output.

#[cfg(test)]
mod fixtures {
    use tr_core::{RoadType, Weather};
    use tr_incident::{AffectedRoads, Incident, IncidentKind};
    use tr_network::EdgeSnapshot;

    use crate::row::{IncidentRow, TickSummaryRow};

    pub fn edge_row(source: &str, destination: &str, blocked: bool) -> EdgeSnapshot {
        EdgeSnapshot {
            source:         source.to_owned(),
            destination:    destination.to_owned(),
            road_type:      RoadType::BikeLane,
            base_weight:    100,
            current_weight: 100.0 / 0.6,
            signal_delay:   15,
            blocked,
            congestion:     2,
        }
    }

    pub fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs:     tick as i64 * 5,
            weather:          Weather::Fog,
            active_incidents: 2,
            blocked_edges:    1,
            congested_edges:  0,
        }
    }

    pub fn incident_row(tick: u64) -> IncidentRow {
        let incident = Incident::new(
            "City Hall",
            IncidentKind::Flooding,
            2,
            AffectedRoads::Only(RoadType::Tunnel),
            tick as i64,
        );
        IncidentRow::new(tick, &incident)
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::fixtures::{edge_row, incident_row, summary_row};
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("edge_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("incidents.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("edge_snapshots.csv")),
            [
                "tick", "source", "destination", "road_type", "base_weight",
                "current_weight", "signal_delay", "blocked", "congestion",
            ]
        );
        assert_eq!(
            headers(&dir.path().join("tick_summaries.csv")),
            ["tick", "elapsed_secs", "weather", "active_incidents", "blocked_edges", "congested_edges"]
        );
        assert_eq!(
            headers(&dir.path().join("incidents.csv")),
            ["tick", "location", "kind", "severity", "affected", "created_at_secs"]
        );
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshot(5, &[edge_row("A", "B", true), edge_row("B", "A", false)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("edge_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");
        assert_eq!(&rows[0][1], "A");
        assert_eq!(&rows[0][3], "Bike Lane");
        assert_eq!(&rows[0][4], "100");
        assert_eq!(&rows[0][5], "166.667");
        assert_eq!(&rows[0][7], "1");
        assert_eq!(&rows[1][7], "0");
    }

    #[test]
    fn csv_tick_summary_and_incident() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.write_incident(&incident_row(40)).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "15");
        assert_eq!(&rows[0][2], "fog");

        let rows = records(&dir.path().join("incidents.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "City Hall");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[0][4], "Tunnel");
        assert_eq!(&rows[0][5], "40");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshot(0, &[]).unwrap();
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── Observer integration ──────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use tr_core::{RoadType, SimConfig};
    use tr_network::{DijkstraRouter, RoadNetwork};
    use tr_sim::SimBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            total_ticks:             25,
            incident_interval_ticks: 10,
            incident_chance:         (1, 1),
            output_interval_ticks:   10,
            ..SimConfig::default()
        };

        let mut net = RoadNetwork::new();
        net.add_road("Downtown", "Midtown", 300, 60, RoadType::Highway).unwrap();
        net.add_road("Midtown", "Uptown", 400, 80, RoadType::Highway).unwrap();

        let mut sim = SimBuilder::new(config, DijkstraRouter)
            .network(net)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 10 → snapshots at ticks 0, 10, 20 (3 × 4 directed edges)
        let mut rdr = csv::Reader::from_path(dir.path().join("edge_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 12, "expected 3 snapshots × 4 edges, got {}", rows.len());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 25);

        // chance 1/1 → one incident at ticks 10 and 20
        let mut rdr = csv::Reader::from_path(dir.path().join("incidents.csv")).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(ticks, ["10", "20"]);
    }
}

// ── traffic_data.csv export ───────────────────────────────────────────────────

#[cfg(test)]
mod traffic_tests {
    use tr_core::{RoadType, Weather};
    use tr_network::RoadNetwork;

    use super::fixtures::edge_row;
    use crate::traffic::{TRAFFIC_DATA_HEADER, write_traffic_data};

    #[test]
    fn header_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traffic_data.csv");
        write_traffic_data(&path, &[edge_row("A", "B", true), edge_row("B", "A", false)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Source,Destination,RoadType,OriginalWeight,CurrentWeight,SignalDelay,Blocked,Congestion")
        );
        assert_eq!(lines.next(), Some("A,B,Bike Lane,100,166.67,15,TRUE,2"));
        assert_eq!(lines.next(), Some("B,A,Bike Lane,100,166.67,15,FALSE,2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn exports_live_network() {
        let mut net = RoadNetwork::new();
        net.add_road("Downtown", "Airport", 500, 120, RoadType::Highway).unwrap();
        net.apply_weather_effect(Weather::Snow.multiplier()).unwrap();
        net.manual_block("Airport", "Downtown", true).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traffic_data.csv");
        write_traffic_data(&path, &net.snapshot()).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let header: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(header, TRAFFIC_DATA_HEADER);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        // Sorted by source: Airport first.
        assert_eq!(&rows[0][0], "Airport");
        assert_eq!(&rows[0][3], "500");
        assert_eq!(&rows[0][4], "714.29");
        assert_eq!(&rows[0][6], "TRUE");
        assert_eq!(&rows[1][6], "FALSE");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traffic_data.csv");
        std::fs::write(&path, "stale\nstale\nstale\n").unwrap();
        write_traffic_data(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::fixtures::{edge_row, incident_row, summary_row};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows = vec![edge_row("A", "B", false), edge_row("B", "A", true), edge_row("B", "C", false)];
        w.write_snapshot(1, &rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM edge_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_blocked_as_integer() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshot(0, &[edge_row("A", "B", true)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (blocked, road): (i64, String) = conn.query_row(
            "SELECT blocked, road_type FROM edge_snapshots WHERE source = 'A'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(blocked, 1, "blocked=true should be stored as 1");
        assert_eq!(road, "Bike Lane");
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, elapsed, weather): (i64, i64, String) = conn.query_row(
            "SELECT tick, elapsed_secs, weather FROM tick_summaries WHERE tick = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(tick, 7);
        assert_eq!(elapsed, 35);
        assert_eq!(weather, "fog");
    }

    #[test]
    fn sqlite_incident() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_incident(&incident_row(30)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (location, affected): (String, String) = conn.query_row(
            "SELECT location, affected FROM incidents WHERE tick = 30",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(location, "City Hall");
        assert_eq!(affected, "Tunnel");
    }

    #[test]
    fn sqlite_reopen_starts_empty() {
        let dir = tmp();
        {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_tick_summary(&summary_row(0)).unwrap();
            w.write_incident(&incident_row(0)).unwrap();
            w.finish().unwrap();
        }
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(0)).expect("second run reuses tick 0");
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let summaries: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tick_summaries", [], |r| r.get(0)
        ).unwrap();
        let incidents: i64 = conn.query_row(
            "SELECT COUNT(*) FROM incidents", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(summaries, 1);
        assert_eq!(incidents, 0);
    }
}
