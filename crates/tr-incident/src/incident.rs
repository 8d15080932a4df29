//! Incident records.

use std::fmt;

use tr_core::RoadType;

/// What happened.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncidentKind {
    Construction,
    Accident,
    SmartLightOutage,
    Roadwork,
    MetroDelay,
    Flooding,
}

impl IncidentKind {
    pub const ALL: [IncidentKind; 6] = [
        IncidentKind::Construction,
        IncidentKind::Accident,
        IncidentKind::SmartLightOutage,
        IncidentKind::Roadwork,
        IncidentKind::MetroDelay,
        IncidentKind::Flooding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IncidentKind::Construction     => "Construction",
            IncidentKind::Accident         => "Accident",
            IncidentKind::SmartLightOutage => "Smart Light Outage",
            IncidentKind::Roadwork         => "Roadwork",
            IncidentKind::MetroDelay       => "Metro Delay",
            IncidentKind::Flooding         => "Flooding",
        }
    }
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which road categories an incident closes at its location.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AffectedRoads {
    /// Wildcard: every road category.
    All,
    Only(RoadType),
}

impl AffectedRoads {
    /// `true` if an edge of category `rt` is affected.
    ///
    /// Road types form a closed set whose labels never contain one another,
    /// so "equal or contained in the edge's type" reduces to equality.
    #[inline]
    pub fn matches(self, rt: RoadType) -> bool {
        match self {
            AffectedRoads::All     => true,
            AffectedRoads::Only(t) => t == rt,
        }
    }
}

impl fmt::Display for AffectedRoads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AffectedRoads::All     => f.write_str("All"),
            AffectedRoads::Only(t) => f.write_str(t.as_str()),
        }
    }
}

/// A time-bounded event at a named location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    /// Node name the incident sits on.
    pub location: String,
    pub kind: IncidentKind,
    /// 1 (minor) ..= 3 (severe).
    pub severity: u8,
    pub affected: AffectedRoads,
    /// Simulated seconds at which the incident was created.
    pub created_at_secs: i64,
}

impl Incident {
    pub fn new(
        location: impl Into<String>,
        kind: IncidentKind,
        severity: u8,
        affected: AffectedRoads,
        created_at_secs: i64,
    ) -> Self {
        Self {
            location: location.into(),
            kind,
            severity: severity.clamp(1, 3),
            affected,
            created_at_secs,
        }
    }

    #[inline]
    pub fn age_secs(&self, now_secs: i64) -> i64 {
        now_secs - self.created_at_secs
    }

    /// Expired once the age strictly exceeds the TTL.
    #[inline]
    pub fn is_expired(&self, now_secs: i64, ttl_secs: i64) -> bool {
        self.age_secs(now_secs) > ttl_secs
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (severity {}/3) affecting {} roads",
            self.kind, self.location, self.severity, self.affected
        )
    }
}
