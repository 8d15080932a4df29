//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait, so a simulation can swap in a
//! different search (A*, bidirectional Dijkstra) without touching the
//! network or the incident registry.  [`DijkstraRouter`] is the default.
//!
//! # Consistency
//!
//! A query borrows the network and registry immutably through
//! [`RoutingContext`] for its whole duration, so no weather update or new
//! incident can land mid-search.  All scratch state (distance array, parent
//! edges, frontier) is local to the call.
//!
//! # Tie-breaking
//!
//! The frontier is ordered by `(cost, NodeId)`: among equal costs, the node
//! that was first added to the network is settled first.  A node's parent is
//! only replaced by a strictly cheaper candidate, so among equal-cost parents
//! the first one relaxed wins.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use tr_core::{EdgeId, NodeId, VehicleProfile};
use tr_incident::IncidentRegistry;

use crate::cost::{effective_cost, toll_fee};
use crate::network::{EdgeRef, RoadNetwork};
use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Node names from source to destination, inclusive.
    pub path: Vec<String>,
    /// Edges traversed, in order.
    pub edges: Vec<EdgeId>,
    /// Minimized cost: sum of `effective_cost` over `edges`.
    pub total_time_secs: u64,
    /// Sum of tolls over `edges`.
    pub total_toll: u32,
    /// Sum of base weights over `edges`, unaffected by weather or congestion.
    pub total_distance: u64,
}

impl Route {
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }
}

// ── RoutingContext ────────────────────────────────────────────────────────────

/// Everything a query reads: the network, the incident registry, and the
/// simulated time used for incident expiry.
#[derive(Clone, Copy)]
pub struct RoutingContext<'a> {
    pub network:   &'a RoadNetwork,
    pub incidents: &'a IncidentRegistry,
    pub now_secs:  i64,
}

impl<'a> RoutingContext<'a> {
    pub fn new(network: &'a RoadNetwork, incidents: &'a IncidentRegistry, now_secs: i64) -> Self {
        Self { network, incidents, now_secs }
    }

    /// `true` if `vehicle` may traverse `edge` right now.
    fn admits(&self, edge: EdgeRef<'_>, vehicle: &VehicleProfile) -> bool {
        if edge.state.blocked {
            trace!(edge = %edge.id, "skip: manually blocked");
            return false;
        }
        let from = self.network.node_name(edge.base.from);
        let to   = self.network.node_name(edge.base.to);
        if self.incidents.is_blocking(from, to, edge.base.road_type, self.now_secs) {
            trace!(from, to, "skip: incident");
            return false;
        }
        if !vehicle.can_use(edge.base.road_type) {
            trace!(from, to, road = %edge.base.road_type, vehicle = %vehicle.kind, "skip: vehicle");
            return false;
        }
        true
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a router can be shared by the
/// simulation and any caller threads that hold a read view of the network.
pub trait Router: Send + Sync {
    /// Compute the fastest route from `from` to `to` for `vehicle`.
    ///
    /// Errors: `TrivialRoute` if `from == to`, `UnknownNode` if either end is
    /// absent, `NoPathFound` if the destination is unreachable.
    fn route(
        &self,
        ctx: &RoutingContext<'_>,
        from: &str,
        to: &str,
        vehicle: &VehicleProfile,
    ) -> NetworkResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with lazy deletion and early exit at the destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        ctx: &RoutingContext<'_>,
        from: &str,
        to: &str,
        vehicle: &VehicleProfile,
    ) -> NetworkResult<Route> {
        if from == to {
            return Err(NetworkError::TrivialRoute(from.to_owned()));
        }
        let network = ctx.network;
        let src = network
            .node_id(from)
            .ok_or_else(|| NetworkError::UnknownNode(from.to_owned()))?;
        let dst = network
            .node_id(to)
            .ok_or_else(|| NetworkError::UnknownNode(to.to_owned()))?;

        dijkstra(ctx, src, dst, vehicle)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    ctx: &RoutingContext<'_>,
    src: NodeId,
    dst: NodeId,
    vehicle: &VehicleProfile,
) -> NetworkResult<Route> {
    let network = ctx.network;
    let n = network.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist      = vec![u64::MAX; n];
    // prev_edge[v] = edge that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled   = 0usize;

    dist[src.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, src)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Costs are non-negative, so the first pop of dst is final.
        if node == dst {
            break;
        }
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        settled += 1;

        for e in network.out_edges(node) {
            let edge = network.edge(e);
            if !ctx.admits(edge, vehicle) {
                continue;
            }
            let neighbor = edge.base.to;
            let candidate = cost.saturating_add(effective_cost(edge, vehicle));
            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev_edge[neighbor.index()] = e;
                heap.push(Reverse((candidate, neighbor)));
            }
        }
    }

    let total = dist[dst.index()];
    if total == u64::MAX {
        debug!(from = network.node_name(src), to = network.node_name(dst), settled, "no path");
        return Err(NetworkError::NoPathFound {
            from: network.node_name(src).to_owned(),
            to:   network.node_name(dst).to_owned(),
        });
    }

    let route = reconstruct(network, &prev_edge, dst, total);
    debug!(
        from = network.node_name(src),
        to = network.node_name(dst),
        vehicle = %vehicle.kind,
        cost = total,
        hops = route.hop_count(),
        settled,
        "route computed"
    );
    Ok(route)
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], dst: NodeId, total: u64) -> Route {
    let mut edges = Vec::new();
    let mut cur = dst;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge(e).base.from;
    }
    edges.reverse();

    let mut path = Vec::with_capacity(edges.len() + 1);
    path.push(network.node_name(cur).to_owned());
    let mut total_toll = 0u32;
    let mut total_distance = 0u64;
    for &e in &edges {
        let base = network.edge(e).base;
        path.push(network.node_name(base.to).to_owned());
        total_toll += toll_fee(base.road_type);
        total_distance += base.weight_secs as u64;
    }

    Route {
        path,
        edges,
        total_time_secs: total,
        total_toll,
        total_distance,
    }
}
