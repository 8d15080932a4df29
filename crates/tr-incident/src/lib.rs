//! `tr-incident` — transient road incidents.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`incident`]   | `Incident`, `IncidentKind`, `AffectedRoads`             |
//! | [`registry`]   | `IncidentRegistry`: generation, TTL expiry, blocking    |
//!
//! The registry is an ordinary value owned by the simulation and handed to
//! the router by reference; there is no global store.

pub mod incident;
pub mod registry;

#[cfg(test)]
mod tests;

pub use incident::{AffectedRoads, Incident, IncidentKind};
pub use registry::{DEFAULT_LOCATIONS, DEFAULT_TTL_SECS, IncidentRegistry};
