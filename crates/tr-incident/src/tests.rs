//! Unit tests for tr-incident.

#[cfg(test)]
mod helpers {
    use tr_core::RoadType;

    use crate::{AffectedRoads, Incident, IncidentKind};

    pub fn incident_at(location: &str, road: RoadType, created_at_secs: i64) -> Incident {
        Incident::new(location, IncidentKind::Accident, 2, AffectedRoads::Only(road), created_at_secs)
    }
}

// ── Blocking predicate ────────────────────────────────────────────────────────

#[cfg(test)]
mod blocking {
    use tr_core::RoadType;

    use super::helpers::incident_at;
    use crate::{AffectedRoads, Incident, IncidentKind, IncidentRegistry};

    #[test]
    fn matches_source_or_destination() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(incident_at("B", RoadType::General, 0));

        assert!(reg.is_blocking("A", "B", RoadType::General, 10));
        assert!(reg.is_blocking("B", "C", RoadType::General, 10));
        assert!(!reg.is_blocking("A", "C", RoadType::General, 10));
    }

    #[test]
    fn road_type_must_match() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(incident_at("A", RoadType::Highway, 0));

        assert!(reg.is_blocking("A", "B", RoadType::Highway, 0));
        assert!(!reg.is_blocking("A", "B", RoadType::General, 0));
    }

    #[test]
    fn wildcard_matches_every_type() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(Incident::new("A", IncidentKind::Flooding, 3, AffectedRoads::All, 0));
        for rt in RoadType::ALL {
            assert!(reg.is_blocking("A", "B", rt, 0), "{rt} should be blocked");
        }
    }

    #[test]
    fn expired_incident_is_ignored_before_purge() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(incident_at("A", RoadType::General, 0));

        // Age == TTL is still active; one second later it is gone.
        assert!(reg.is_blocking("A", "B", RoadType::General, 300));
        assert!(!reg.is_blocking("A", "B", RoadType::General, 301));
        // Still physically stored until a list/purge call.
        assert_eq!(reg.stored_len(), 1);
    }
}

// ── Listing and expiry ────────────────────────────────────────────────────────

#[cfg(test)]
mod listing {
    use tr_core::RoadType;

    use super::helpers::incident_at;
    use crate::IncidentRegistry;

    #[test]
    fn newest_first() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(incident_at("A", RoadType::General, 10));
        reg.report(incident_at("B", RoadType::General, 50));
        reg.report(incident_at("C", RoadType::General, 30));

        let names: Vec<_> = reg.list_active(60).into_iter().map(|i| i.location).collect();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn same_timestamp_latest_report_first() {
        let mut reg = IncidentRegistry::new(300);
        reg.report(incident_at("first", RoadType::General, 20));
        reg.report(incident_at("older", RoadType::General, 5));
        reg.report(incident_at("second", RoadType::General, 20));
        reg.report(incident_at("third", RoadType::General, 20));

        let names: Vec<_> = reg.list_active(30).into_iter().map(|i| i.location).collect();
        assert_eq!(names, ["third", "second", "first", "older"]);
    }

    #[test]
    fn list_purges_expired() {
        let mut reg = IncidentRegistry::new(100);
        reg.report(incident_at("old", RoadType::General, 0));
        reg.report(incident_at("new", RoadType::General, 150));

        let active = reg.list_active(200);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].location, "new");
        assert_eq!(reg.stored_len(), 1);
    }

    #[test]
    fn active_count_does_not_mutate() {
        let mut reg = IncidentRegistry::new(100);
        reg.report(incident_at("old", RoadType::General, 0));
        assert_eq!(reg.active_count(500), 0);
        assert_eq!(reg.stored_len(), 1);
        assert_eq!(reg.purge_expired(500), 1);
        assert_eq!(reg.stored_len(), 0);
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use tr_core::SimRng;

    use crate::{AffectedRoads, DEFAULT_LOCATIONS, IncidentRegistry};

    #[test]
    fn certain_draw_always_generates() {
        let mut reg = IncidentRegistry::default();
        let mut rng = SimRng::new(1);
        for t in 0..20 {
            let inc = reg.generate(&mut rng, t, 1, 1).cloned().unwrap();
            assert!(DEFAULT_LOCATIONS.contains(&inc.location.as_str()));
            assert!((1..=3).contains(&inc.severity));
            assert!(matches!(inc.affected, AffectedRoads::Only(_)));
            assert_eq!(inc.created_at_secs, t);
        }
        assert_eq!(reg.stored_len(), 20);
    }

    #[test]
    fn zero_probability_never_generates() {
        let mut reg = IncidentRegistry::default();
        let mut rng = SimRng::new(1);
        for t in 0..100 {
            assert!(reg.generate(&mut rng, t, 0, 3).is_none());
        }
        assert_eq!(reg.stored_len(), 0);
    }

    #[test]
    fn one_in_three_is_roughly_a_third() {
        let mut reg = IncidentRegistry::new(i64::MAX);
        let mut rng = SimRng::new(7);
        for t in 0..3_000 {
            reg.generate(&mut rng, t, 1, 3);
        }
        let n = reg.stored_len();
        assert!((800..1_200).contains(&n), "got {n}");
    }

    #[test]
    fn custom_locations() {
        let mut reg = IncidentRegistry::default().with_locations(["X"]);
        let mut rng = SimRng::new(2);
        let inc = reg.generate(&mut rng, 0, 1, 1).unwrap();
        assert_eq!(inc.location, "X");

        let mut empty = IncidentRegistry::default().with_locations(Vec::<String>::new());
        assert!(empty.generate(&mut rng, 0, 1, 1).is_none());
    }
}
