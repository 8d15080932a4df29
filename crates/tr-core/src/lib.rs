//! `tr-core` — foundational types for the traffic routing workspace.
//!
//! This crate is a dependency of every other `tr-*` crate.  It intentionally
//! has no `tr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`road`]        | `RoadType`, `RoadTypeSet`, `RoadAccess`               |
//! | [`weather`]     | `Weather` and its travel-time multiplier              |
//! | [`vehicle`]     | `VehicleKind`, `VehicleProfile`                       |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and value types.  |

pub mod error;
pub mod ids;
pub mod rng;
pub mod road;
pub mod time;
pub mod vehicle;
pub mod weather;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId};
pub use rng::SimRng;
pub use road::{RoadAccess, RoadType, RoadTypeSet};
pub use time::{SimClock, SimConfig, Tick};
pub use vehicle::{EMERGENCY_SPEED_BOOST, VehicleKind, VehicleProfile};
pub use weather::Weather;
