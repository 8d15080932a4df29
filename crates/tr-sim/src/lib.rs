//! `tr-sim` — discrete-event loop for the traffic routing workspace.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Weather    — on every weather-interval boundary (never at t = 0),
//!                  draw a new Weather and re-derive all edge weights.
//!   ② Incidents  — every incident_interval_ticks (never at t = 0), one
//!                  generation attempt with probability incident_chance.
//!   ③ Observers  — on_tick_end with a SimStatus; on_snapshot on the
//!                  output interval.
//! ```
//!
//! Route queries take `&Sim`, mutation steps take `&mut Sim`, so the borrow
//! checker keeps every query consistent with a single network state.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tr_core::{SimConfig, VehicleKind, VehicleProfile};
//! use tr_network::DijkstraRouter;
//! use tr_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), DijkstraRouter)
//!     .network(network)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! let route = sim.compute_route("Downtown", "Airport", &VehicleKind::Car.into())?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimStatus};
