//! Incident registry: generation, TTL expiry, and the blocking predicate.
//!
//! # Expiry
//!
//! Incidents are never deleted explicitly.  Every read path filters on
//! `age > ttl`, so an expired record is invisible even while it is still
//! stored; [`IncidentRegistry::list_active`] and
//! [`IncidentRegistry::purge_expired`] drop the dead records.

use tracing::{debug, info};

use tr_core::{RoadType, SimRng};

use crate::{AffectedRoads, Incident, IncidentKind};

/// Incidents older than this many simulated seconds are ignored.
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Location catalog used by [`IncidentRegistry::generate`] unless replaced
/// with [`IncidentRegistry::with_locations`].
pub const DEFAULT_LOCATIONS: [&str; 6] = [
    "Main St",
    "Highway 1",
    "Downtown",
    "Central Bridge",
    "Suburban Tunnel",
    "Industrial Zone",
];

/// Time-bounded incident store owned by the simulation context.
#[derive(Clone, Debug)]
pub struct IncidentRegistry {
    incidents: Vec<Incident>,
    locations: Vec<String>,
    ttl_secs:  i64,
}

impl IncidentRegistry {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            incidents: Vec::new(),
            locations: DEFAULT_LOCATIONS.iter().map(|s| (*s).to_owned()).collect(),
            ttl_secs,
        }
    }

    /// Replace the location catalog (e.g. with the network's node names).
    /// An empty catalog disables generation.
    #[must_use]
    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Stored records, including any that have expired but not been purged.
    pub fn stored_len(&self) -> usize {
        self.incidents.len()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// With probability `numerator / denominator`, create one incident with a
    /// uniformly random location, kind, severity (1..=3), and road type.
    ///
    /// Returns the new incident, or `None` when the draw fails or the
    /// location catalog is empty.
    pub fn generate(
        &mut self,
        rng: &mut SimRng,
        now_secs: i64,
        numerator: u32,
        denominator: u32,
    ) -> Option<&Incident> {
        if !rng.gen_ratio(numerator, denominator) {
            return None;
        }
        let location = rng.choose(&self.locations)?.clone();
        let kind     = IncidentKind::ALL[rng.gen_range(0..IncidentKind::ALL.len())];
        let severity = rng.gen_range(1..=3u8);
        let road     = RoadType::ALL[rng.gen_range(0..RoadType::ALL.len())];

        let incident = Incident::new(location, kind, severity, AffectedRoads::Only(road), now_secs);
        info!(%incident, at_secs = now_secs, "incident generated");
        self.incidents.push(incident);
        self.incidents.last()
    }

    /// Insert a known incident (operator report, fixed test fixture).
    pub fn report(&mut self, incident: Incident) {
        debug!(%incident, "incident reported");
        self.incidents.push(incident);
    }

    /// Drop every expired record.  Returns how many were removed.
    pub fn purge_expired(&mut self, now_secs: i64) -> usize {
        let before = self.incidents.len();
        let ttl = self.ttl_secs;
        self.incidents.retain(|i| !i.is_expired(now_secs, ttl));
        before - self.incidents.len()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Non-expired incidents, newest first.  Expired records are purged as a
    /// side effect.
    pub fn list_active(&mut self, now_secs: i64) -> Vec<Incident> {
        self.purge_expired(now_secs);
        // Insertion order reversed first so equal timestamps list latest report first.
        let mut active: Vec<Incident> = self.incidents.iter().rev().cloned().collect();
        active.sort_by_key(|i| std::cmp::Reverse(i.created_at_secs));
        active
    }

    /// Iterator over non-expired incidents without purging (read-only path).
    pub fn active(&self, now_secs: i64) -> impl Iterator<Item = &Incident> + '_ {
        let ttl = self.ttl_secs;
        self.incidents.iter().filter(move |i| !i.is_expired(now_secs, ttl))
    }

    pub fn active_count(&self, now_secs: i64) -> usize {
        self.active(now_secs).count()
    }

    /// `true` iff a non-expired incident sits on either endpoint of the edge
    /// `from → to` and affects roads of category `road_type`.
    pub fn is_blocking(&self, from: &str, to: &str, road_type: RoadType, now_secs: i64) -> bool {
        self.active(now_secs).any(|i| {
            (i.location == from || i.location == to) && i.affected.matches(road_type)
        })
    }
}

impl Default for IncidentRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
