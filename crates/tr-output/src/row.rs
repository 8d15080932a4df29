//! Plain data row types written by output backends.

use tr_core::Weather;
use tr_incident::Incident;
use tr_sim::SimStatus;

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub elapsed_secs:     i64,
    pub weather:          Weather,
    pub active_incidents: u64,
    pub blocked_edges:    u64,
    pub congested_edges:  u64,
}

impl From<&SimStatus> for TickSummaryRow {
    fn from(s: &SimStatus) -> Self {
        Self {
            tick:             s.tick.0,
            elapsed_secs:     s.elapsed_secs,
            weather:          s.weather,
            active_incidents: s.active_incidents as u64,
            blocked_edges:    s.network.blocked_edges as u64,
            congested_edges:  s.network.congested_edges as u64,
        }
    }
}

/// One generated incident, flattened for tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRow {
    pub tick:            u64,
    pub location:        String,
    pub kind:            &'static str,
    pub severity:        u8,
    /// Road type label, or `All`.
    pub affected:        String,
    pub created_at_secs: i64,
}

impl IncidentRow {
    pub fn new(tick: u64, incident: &Incident) -> Self {
        Self {
            tick,
            location:        incident.location.clone(),
            kind:            incident.kind.as_str(),
            severity:        incident.severity,
            affected:        incident.affected.to_string(),
            created_at_secs: incident.created_at_secs,
        }
    }
}
