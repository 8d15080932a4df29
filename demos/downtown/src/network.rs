//! The default city.
//!
//! Thirteen two-way roads around Downtown: a highway ring to Midtown, Uptown
//! and the Airport, a grid of general streets, and one road of every special
//! category (bike lane, bus lane, emergency access, tunnel, bridge).

use tr_core::RoadType;
use tr_network::{NetworkResult, RoadNetwork};

/// `(u, v, weight_secs, signal_delay_secs, road_type)`
const DEFAULT_ROADS: [(&str, &str, i64, i64, RoadType); 13] = [
    ("Downtown",         "Midtown",             300,  60, RoadType::Highway),
    ("Midtown",          "Uptown",              400,  80, RoadType::Highway),
    ("Downtown",         "Airport",             500, 120, RoadType::Highway),
    ("Downtown",         "Market St",           120,  30, RoadType::General),
    ("Market St",        "City Hall",            90,  20, RoadType::General),
    ("City Hall",        "Uptown",              180,  40, RoadType::General),
    ("Downtown",         "Residential Area",    150,  25, RoadType::General),
    ("Market St",        "Industrial Zone",     250,  50, RoadType::General),
    ("Midtown",          "Bike Trail",          150,  10, RoadType::BikeLane),
    ("City Hall",        "Bus Terminal",        200,  30, RoadType::BusLane),
    ("Airport",          "Emergency Hospital",  100,  10, RoadType::Emergency),
    ("Uptown",           "Suburban Tunnel",     350,  70, RoadType::Tunnel),
    ("Residential Area", "Central Bridge",      200,  40, RoadType::Bridge),
];

/// Build the default city.
pub fn build_network() -> NetworkResult<RoadNetwork> {
    let mut net = RoadNetwork::with_capacity(16, DEFAULT_ROADS.len());
    for (u, v, weight, delay, road_type) in DEFAULT_ROADS {
        net.add_road(u, v, weight, delay, road_type)?;
    }
    Ok(net)
}
