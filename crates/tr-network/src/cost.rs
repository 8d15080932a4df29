//! Edge cost model.
//!
//! ```text
//! cost = floor((weight × (1 + 0.1 × congestion) + signal_delay) / speed_multiplier)
//! ```
//!
//! `weight` is the edge's *current* weight (weather / rush-hour adjusted).
//! The result is the only quantity the router minimizes.  Tolls are reported
//! next to a route but never enter the cost: the router finds the fastest
//! route, not the cheapest.

use tr_core::{RoadType, VehicleProfile};

use crate::network::EdgeRef;

/// Highest congestion level an edge can carry.
pub const MAX_CONGESTION: u8 = 5;

/// Fractional slowdown per congestion level.
const CONGESTION_STEP: f64 = 0.1;

/// Traversal cost of `edge` for `vehicle`, in whole seconds.
///
/// Truncates toward zero.  Not capped at `u32::MAX`: large base weights
/// scaled by congestion and a slow vehicle keep their full value.
#[inline]
pub fn effective_cost(edge: EdgeRef<'_>, vehicle: &VehicleProfile) -> u64 {
    let congested = edge.state.weight * (1.0 + CONGESTION_STEP * edge.state.congestion as f64);
    let secs = (congested + edge.base.signal_delay_secs as f64) / vehicle.speed_multiplier();
    // `as` truncates toward zero; NaN → 0.
    secs as u64
}

/// Flat toll for entering a road of category `rt`.
pub fn toll_fee(rt: RoadType) -> u32 {
    match rt {
        RoadType::Highway => 5,
        RoadType::Bridge  => 3,
        RoadType::Tunnel  => 7,
        _                 => 0,
    }
}
