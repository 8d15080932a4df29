//! Process-wide weather state.
//!
//! Weather is a single value replaced wholesale on every rotation.  Its
//! multiplier divides base travel times (`< 1.0` means slower roads); it is
//! never composed with the previous value.

use std::fmt;

use crate::SimRng;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Sunny,
    Rain,
    Snow,
    Fog,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Rain,
        Weather::Snow,
        Weather::Fog,
        Weather::Storm,
    ];

    /// Speed factor applied to every edge: `current = base / multiplier`.
    pub fn multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Rain  => 0.85,
            Weather::Snow  => 0.7,
            Weather::Fog   => 0.8,
            Weather::Storm => 0.6,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Weather::Sunny => "normal conditions",
            Weather::Rain  => "wet roads (15% slower)",
            Weather::Snow  => "icy roads (30% slower)",
            Weather::Fog   => "low visibility (20% slower)",
            Weather::Storm => "dangerous conditions (40% slower)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Rain  => "rain",
            Weather::Snow  => "snow",
            Weather::Fog   => "fog",
            Weather::Storm => "storm",
        }
    }

    /// Uniform draw over all five states (may repeat the current one).
    pub fn random(rng: &mut SimRng) -> Weather {
        Weather::ALL[rng.gen_range(0..Weather::ALL.len())]
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
