//! Vehicle kinds and their routing profiles.
//!
//! A [`VehicleKind`] selects a precomputed row of the vehicle catalog; the
//! resulting [`VehicleProfile`] is built per query and carries everything the
//! router and cost model need.
//!
//! # Emergency boost
//!
//! The profile stores the catalog speed multiplier and the emergency flag
//! separately.  The effective multiplier is recomputed from the stored base
//! on every read, so toggling emergency mode any number of times never
//! accumulates floating-point drift.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, RoadAccess, RoadType, RoadTypeSet};

/// Speed factor applied on top of the base multiplier in emergency mode.
pub const EMERGENCY_SPEED_BOOST: f64 = 1.5;

/// CO₂ emitted per unit of base distance, in kg, before vehicle adjustments.
const CO2_KG_PER_DISTANCE_UNIT: f64 = 0.12;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleKind {
    #[default]
    Car,
    Bike,
    Bus,
    Ambulance,
    Police,
    FireTruck,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 6] = [
        VehicleKind::Car,
        VehicleKind::Bike,
        VehicleKind::Bus,
        VehicleKind::Ambulance,
        VehicleKind::Police,
        VehicleKind::FireTruck,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Car       => "Car",
            VehicleKind::Bike      => "Bike",
            VehicleKind::Bus       => "Bus",
            VehicleKind::Ambulance => "Ambulance",
            VehicleKind::Police    => "Police",
            VehicleKind::FireTruck => "Fire Truck",
        }
    }

    /// `(base speed multiplier, fuel rate, allowed roads)` for this kind.
    fn catalog(self) -> (f64, f64, RoadTypeSet) {
        use RoadType::*;
        let core = RoadTypeSet::of(&[General, Highway, Bridge, Tunnel]);
        match self {
            VehicleKind::Car       => (1.0, 0.7, core),
            VehicleKind::Bike      => (1.2, 0.3, core.with(BikeLane)),
            VehicleKind::Bus       => (0.7, 1.5, core.with(BusLane)),
            VehicleKind::Ambulance => (1.0, 1.0, core.with(Emergency)),
            VehicleKind::Police    => (1.0, 1.1, core.with(Emergency)),
            VehicleKind::FireTruck => (1.0, 1.8, core.with(Emergency)),
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        VehicleKind::ALL
            .into_iter()
            .find(|k| {
                k.as_str().eq_ignore_ascii_case(wanted)
                    || k.as_str().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::UnknownVehicle(s.to_owned()))
    }
}

// ── VehicleProfile ────────────────────────────────────────────────────────────

/// Capability and speed data for one routing query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    pub kind:       VehicleKind,
    base_speed:     f64,
    pub fuel_rate:  f64,
    emergency:      bool,
    pub access:     RoadAccess,
}

impl VehicleProfile {
    /// Look up `kind` in the catalog.  `emergency` enables the speed boost.
    pub fn new(kind: VehicleKind, emergency: bool) -> Self {
        let (base_speed, fuel_rate, allowed) = kind.catalog();
        Self {
            kind,
            base_speed,
            fuel_rate,
            emergency,
            access: RoadAccess::Only(allowed),
        }
    }

    /// Replace the catalog access set (e.g. `RoadAccess::Any` for a
    /// wildcard vehicle).
    #[must_use]
    pub fn with_access(mut self, access: RoadAccess) -> Self {
        self.access = access;
        self
    }

    /// Catalog multiplier, unaffected by emergency mode.
    pub fn base_speed_multiplier(&self) -> f64 {
        self.base_speed
    }

    /// Effective multiplier: `base × boost` in emergency mode, `base` otherwise.
    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        if self.emergency {
            self.base_speed * EMERGENCY_SPEED_BOOST
        } else {
            self.base_speed
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    pub fn set_emergency(&mut self, on: bool) {
        self.emergency = on;
    }

    /// Flip emergency mode and return the new state.
    pub fn toggle_emergency(&mut self) -> bool {
        self.emergency = !self.emergency;
        self.emergency
    }

    #[inline]
    pub fn can_use(&self, rt: RoadType) -> bool {
        self.access.permits(rt)
    }

    /// Approximate CO₂ in kg for a trip covering `distance` base units.
    pub fn co2_kg(&self, distance: f64) -> f64 {
        let per_unit = match self.kind {
            VehicleKind::Bike => 0.0,
            VehicleKind::Bus  => CO2_KG_PER_DISTANCE_UNIT * 2.5,
            _                 => CO2_KG_PER_DISTANCE_UNIT,
        };
        distance * per_unit
    }

    /// Distance units per unit of fuel (higher is better); 0 when the
    /// vehicle burns no fuel.
    pub fn fuel_efficiency(&self) -> f64 {
        if self.fuel_rate > 0.0 { 1.0 / self.fuel_rate } else { 0.0 }
    }
}

impl From<VehicleKind> for VehicleProfile {
    fn from(kind: VehicleKind) -> Self {
        VehicleProfile::new(kind, false)
    }
}
