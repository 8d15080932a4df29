//! Road network representation.
//!
//! # Data layout
//!
//! Nodes are named locations interned to dense [`NodeId`]s on first sight.
//! Edge data lives in two parallel arrays indexed by [`EdgeId`]:
//!
//! ```text
//! base[e]   immutable  BaseEdge  { from, to, weight_secs, signal_delay_secs, road_type }
//! state[e]  mutable    EdgeState { weight, congestion, blocked }
//! ```
//!
//! Every road appends exactly two edges, `u → v` then `v → u`, so an edge and
//! its mirror are always `EdgeId(2k)` / `EdgeId(2k + 1)`.  Outgoing edges per
//! node are kept in insertion order in `node_out`; the network is append-only
//! (no road removal), so a plain adjacency `Vec` per node is enough and the
//! graph can grow between queries.
//!
//! # Dynamic weights
//!
//! `state[e].weight` is always derived from `base[e].weight_secs`, never from
//! a previous `state[e].weight`: weather divides the base by the current
//! multiplier, rush hour scales the base by 1.5.  Re-applying either one
//! therefore never compounds.

use std::collections::HashMap;

use tracing::debug;

use tr_core::{EdgeId, NodeId, RoadType, SimRng};

use crate::cost::MAX_CONGESTION;
use crate::{NetworkError, NetworkResult};

/// Rush-hour scaling applied to base travel times.
const RUSH_HOUR_FACTOR: f64 = 1.5;

// ── Edge records ──────────────────────────────────────────────────────────────

/// Immutable attributes of one direction of a road, fixed by `add_road`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseEdge {
    pub from:              NodeId,
    pub to:                NodeId,
    /// Free-flow travel time in seconds (> 0).
    pub weight_secs:       u32,
    /// Fixed signal delay in seconds.
    pub signal_delay_secs: u32,
    pub road_type:         RoadType,
}

/// Runtime state of one direction of a road.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeState {
    /// Current travel time in seconds (weather / rush-hour adjusted).
    pub weight:     f64,
    /// Load level, `0..=MAX_CONGESTION`.
    pub congestion: u8,
    /// Manual closure, independent of incidents.
    pub blocked:    bool,
}

/// Borrowed view of one edge: its id, base record, and current state.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef<'a> {
    pub id:    EdgeId,
    pub base:  &'a BaseEdge,
    pub state: &'a EdgeState,
}

/// One row of the exported network snapshot.
///
/// Field order is the export contract consumed by reporting tools.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSnapshot {
    pub source:         String,
    pub destination:    String,
    pub road_type:      RoadType,
    pub base_weight:    u32,
    pub current_weight: f64,
    pub signal_delay:   u32,
    pub blocked:        bool,
    pub congestion:     u8,
}

/// Aggregate counts for status displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    pub nodes:           usize,
    pub edges:           usize,
    pub blocked_edges:   usize,
    pub congested_edges: usize,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Bidirectional road multigraph with base and current edge state.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    node_names: Vec<String>,
    node_index: HashMap<String, NodeId>,
    /// Outgoing edges of each node, in insertion order.
    node_out:   Vec<Vec<EdgeId>>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    base:  Vec<BaseEdge>,
    state: Vec<EdgeState>,

    /// Weather multiplier last applied; new roads start from it.
    weather_multiplier: f64,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and roads.
    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            node_names: Vec::with_capacity(nodes),
            node_index: HashMap::with_capacity(nodes),
            node_out:   Vec::with_capacity(nodes),
            base:       Vec::with_capacity(roads * 2),
            state:      Vec::with_capacity(roads * 2),
            weather_multiplier: 1.0,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    /// Number of directed edges (two per road).
    pub fn edge_count(&self) -> usize {
        self.base.len()
    }

    pub fn road_count(&self) -> usize {
        self.base.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_names.is_empty()
    }

    pub fn weather_multiplier(&self) -> f64 {
        self.weather_multiplier
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Name of an interned node.
    ///
    /// # Panics
    /// Panics if `id` did not come from this network.
    #[inline]
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.node_names[id.index()]
    }

    /// Node names in the order they were first seen.
    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.node_names.iter().map(String::as_str)
    }

    fn require_node(&self, name: &str) -> NetworkResult<NodeId> {
        self.node_id(name)
            .ok_or_else(|| NetworkError::UnknownNode(name.to_owned()))
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.node_index.get(name) {
            return *id;
        }
        let id = NodeId(self.node_names.len() as u32);
        self.node_names.push(name.to_owned());
        self.node_index.insert(name.to_owned(), id);
        self.node_out.push(Vec::new());
        id
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add a bidirectional road between `u` and `v`.
    ///
    /// Rejects empty names, `u == v`, `weight_secs <= 0`, and
    /// `signal_delay_secs < 0` with [`NetworkError::InvalidInput`]; the
    /// network is unchanged on error.  Adding a road between an already
    /// connected pair creates a parallel edge pair.
    ///
    /// Returns the ids of the `u → v` and `v → u` edges.
    pub fn add_road(
        &mut self,
        u: &str,
        v: &str,
        weight_secs: i64,
        signal_delay_secs: i64,
        road_type: RoadType,
    ) -> NetworkResult<(EdgeId, EdgeId)> {
        if u.is_empty() || v.is_empty() {
            return Err(NetworkError::InvalidInput("node names must not be empty".into()));
        }
        if u == v {
            return Err(NetworkError::InvalidInput(format!("road from {u:?} to itself")));
        }
        let weight = u32::try_from(weight_secs)
            .ok()
            .filter(|&w| w > 0)
            .ok_or_else(|| {
                NetworkError::InvalidInput(format!("weight must be a positive integer, got {weight_secs}"))
            })?;
        let delay = u32::try_from(signal_delay_secs).map_err(|_| {
            NetworkError::InvalidInput(format!("signal delay must be >= 0, got {signal_delay_secs}"))
        })?;

        let a = self.intern(u);
        let b = self.intern(v);
        let forward  = self.push_edge(a, b, weight, delay, road_type);
        let backward = self.push_edge(b, a, weight, delay, road_type);
        debug_assert_eq!(forward.reverse(), backward);

        debug!(from = u, to = v, weight, delay, %road_type, "road added");
        Ok((forward, backward))
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, weight: u32, delay: u32, road_type: RoadType) -> EdgeId {
        let id = EdgeId(self.base.len() as u32);
        self.base.push(BaseEdge {
            from,
            to,
            weight_secs: weight,
            signal_delay_secs: delay,
            road_type,
        });
        self.state.push(EdgeState {
            weight:     weight as f64 / self.weather_multiplier,
            congestion: 0,
            blocked:    false,
        });
        self.node_out[from.index()].push(id);
        id
    }

    /// Recompute every edge weight as `base / multiplier`.
    ///
    /// Idempotent for a fixed multiplier.  Congestion and blocked flags are
    /// untouched.  Rejects non-positive or non-finite multipliers.
    pub fn apply_weather_effect(&mut self, multiplier: f64) -> NetworkResult<()> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(NetworkError::InvalidInput(format!(
                "weather multiplier must be > 0, got {multiplier}"
            )));
        }
        self.weather_multiplier = multiplier;
        for (base, state) in self.base.iter().zip(self.state.iter_mut()) {
            state.weight = base.weight_secs as f64 / multiplier;
        }
        debug!(multiplier, edges = self.base.len(), "weather applied");
        Ok(())
    }

    /// Scale every edge to `base × 1.5` and draw a fresh congestion level in
    /// `1..=MAX_CONGESTION`.  Each call re-randomizes congestion.
    pub fn apply_rush_hour(&mut self, rng: &mut SimRng) {
        for (base, state) in self.base.iter().zip(self.state.iter_mut()) {
            state.weight = base.weight_secs as f64 * RUSH_HOUR_FACTOR;
            state.congestion = rng.gen_range(1..=MAX_CONGESTION);
        }
        debug!(edges = self.base.len(), "rush hour applied");
    }

    /// Set the blocked flag on every `u → v` edge (parallel roads included).
    ///
    /// Only that direction is affected.  Returns how many edges changed
    /// flag, or `RoadNotFound` if no `u → v` edge exists.
    pub fn manual_block(&mut self, u: &str, v: &str, blocked: bool) -> NetworkResult<usize> {
        let from = self.require_node(u)?;
        let to   = self.require_node(v)?;

        let mut found = false;
        let mut changed = 0;
        for &e in &self.node_out[from.index()] {
            if self.base[e.index()].to == to {
                found = true;
                let state = &mut self.state[e.index()];
                if state.blocked != blocked {
                    state.blocked = blocked;
                    changed += 1;
                }
            }
        }
        if !found {
            return Err(NetworkError::RoadNotFound { from: u.to_owned(), to: v.to_owned() });
        }
        debug!(from = u, to = v, blocked, changed, "manual block");
        Ok(changed)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `EdgeId`s of all outgoing edges from `node`, in insertion order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.node_out[node.index()].iter().copied()
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> EdgeRef<'_> {
        EdgeRef {
            id,
            base:  &self.base[id.index()],
            state: &self.state[id.index()],
        }
    }

    /// Outgoing edges of the named node.  Fails with `UnknownNode` if the
    /// name never appeared in `add_road`.
    pub fn neighbors(&self, node: &str) -> NetworkResult<impl Iterator<Item = EdgeRef<'_>> + '_> {
        let id = self.require_node(node)?;
        Ok(self.out_edges(id).map(|e| self.edge(e)))
    }

    // ── Export ────────────────────────────────────────────────────────────

    /// Every directed edge, grouped by source node in name order and in
    /// insertion order within a node.
    pub fn snapshot(&self) -> Vec<EdgeSnapshot> {
        let mut sources: Vec<NodeId> = (0..self.node_names.len() as u32).map(NodeId).collect();
        sources.sort_by(|a, b| self.node_name(*a).cmp(self.node_name(*b)));

        sources
            .into_iter()
            .flat_map(|n| self.out_edges(n))
            .map(|e| {
                let EdgeRef { base, state, .. } = self.edge(e);
                EdgeSnapshot {
                    source:         self.node_name(base.from).to_owned(),
                    destination:    self.node_name(base.to).to_owned(),
                    road_type:      base.road_type,
                    base_weight:    base.weight_secs,
                    current_weight: state.weight,
                    signal_delay:   base.signal_delay_secs,
                    blocked:        state.blocked,
                    congestion:     state.congestion,
                }
            })
            .collect()
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            nodes:           self.node_count(),
            edges:           self.edge_count(),
            blocked_edges:   self.state.iter().filter(|s| s.blocked).count(),
            congested_edges: self.state.iter().filter(|s| s.congestion > 0).count(),
        }
    }
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}
