//! Road categories and vehicle access sets.
//!
//! The category set is closed.  Display names match the labels used in the
//! exported traffic data (`"Bike Lane"`, `"Bus Lane"`, …) and parse back with
//! [`str::parse`].

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// The physical category of a road segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadType {
    #[default]
    General,
    Highway,
    Bridge,
    Tunnel,
    BikeLane,
    BusLane,
    Emergency,
}

impl RoadType {
    /// Every category, in declaration order.
    pub const ALL: [RoadType; 7] = [
        RoadType::General,
        RoadType::Highway,
        RoadType::Bridge,
        RoadType::Tunnel,
        RoadType::BikeLane,
        RoadType::BusLane,
        RoadType::Emergency,
    ];

    /// Human-readable label, also the CSV column value.
    pub fn as_str(self) -> &'static str {
        match self {
            RoadType::General   => "General",
            RoadType::Highway   => "Highway",
            RoadType::Bridge    => "Bridge",
            RoadType::Tunnel    => "Tunnel",
            RoadType::BikeLane  => "Bike Lane",
            RoadType::BusLane   => "Bus Lane",
            RoadType::Emergency => "Emergency",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadType {
    type Err = CoreError;

    /// Accepts the display label case-insensitively; `"BikeLane"` style
    /// spellings without the space are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoadType::ALL
            .into_iter()
            .find(|rt| {
                rt.as_str().eq_ignore_ascii_case(wanted)
                    || rt.as_str().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::UnknownRoadType(s.to_owned()))
    }
}

// ── RoadTypeSet ───────────────────────────────────────────────────────────────

/// A compact set of [`RoadType`]s (one bit per category).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadTypeSet(u8);

impl RoadTypeSet {
    pub const EMPTY: RoadTypeSet = RoadTypeSet(0);

    pub fn of(types: &[RoadType]) -> Self {
        types.iter().fold(Self::EMPTY, |set, &rt| set.with(rt))
    }

    #[must_use]
    pub fn with(self, rt: RoadType) -> Self {
        RoadTypeSet(self.0 | rt.bit())
    }

    #[inline]
    pub fn contains(self, rt: RoadType) -> bool {
        self.0 & rt.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = RoadType> {
        RoadType::ALL.into_iter().filter(move |&rt| self.contains(rt))
    }
}

// ── RoadAccess ────────────────────────────────────────────────────────────────

/// Which roads a vehicle may drive on.
///
/// `Any` is the wildcard entry: it grants every category, including ones a
/// caller never listed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadAccess {
    Any,
    Only(RoadTypeSet),
}

impl RoadAccess {
    #[inline]
    pub fn permits(self, rt: RoadType) -> bool {
        match self {
            RoadAccess::Any      => true,
            RoadAccess::Only(s)  => s.contains(rt),
        }
    }
}
