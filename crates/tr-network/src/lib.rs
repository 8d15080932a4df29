//! `tr-network` — road network, cost model, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork`, `BaseEdge`, `EdgeState`, `EdgeSnapshot`      |
//! | [`cost`]    | `effective_cost`, `toll_fee`, `MAX_CONGESTION`              |
//! | [`router`]  | `Router` trait, `RoutingContext`, `Route`, `DijkstraRouter` |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod cost;
pub mod error;
pub mod network;
pub mod router;


pub use cost::{MAX_CONGESTION, effective_cost, toll_fee};
pub use error::{NetworkError, NetworkResult};
pub use network::{BaseEdge, EdgeRef, EdgeSnapshot, EdgeState, NetworkStats, RoadNetwork};
pub use router::{DijkstraRouter, Route, Router, RoutingContext};
