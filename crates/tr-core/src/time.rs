//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit means every cadence
//! (weather rotation, incident generation, incident TTL) is exact integer
//! arithmetic with no floating-point drift.
//!
//! The default tick duration is 1 s, so the default 30 s weather cadence and
//! 300 s incident TTL map to 30 and 300 ticks.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Discrete tick source.  Converts tick counts to simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 1.
    pub tick_duration_secs: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds at `tick` under this clock's resolution.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> i64 {
        tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.secs_at(self.current_tick)
    }

    /// Break elapsed time into (hours, minutes, seconds) for log lines.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total = self.elapsed_secs().max(0) as u64;
        (total / 3_600, ((total % 3_600) / 60) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (feature
/// `serde`) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Total ticks for `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Weather rotates every time this many simulated seconds elapse.
    pub weather_interval_secs: u32,

    /// An incident generation attempt happens every N ticks.
    pub incident_interval_ticks: u64,

    /// Probability of an attempt producing an incident, as
    /// `(numerator, denominator)`.
    pub incident_chance: (u32, u32),

    /// Incidents older than this are treated as non-existent.
    pub incident_ttl_secs: i64,

    /// Emit an edge snapshot to observers every N ticks (0 = never).
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:      1,
            total_ticks:             600,
            seed:                    42,
            weather_interval_secs:   30,
            incident_interval_ticks: 10,
            incident_chance:         (1, 3),
            incident_ttl_secs:       300,
            output_interval_ticks:   60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Reject settings the tick loop cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be > 0".into()));
        }
        if self.weather_interval_secs == 0 {
            return Err(CoreError::Config("weather_interval_secs must be > 0".into()));
        }
        if self.incident_interval_ticks == 0 {
            return Err(CoreError::Config("incident_interval_ticks must be > 0".into()));
        }
        let (num, den) = self.incident_chance;
        if den == 0 || num > den {
            return Err(CoreError::Config(format!(
                "incident_chance {num}/{den} is not a probability"
            )));
        }
        if self.incident_ttl_secs < 0 {
            return Err(CoreError::Config("incident_ttl_secs must be >= 0".into()));
        }
        Ok(())
    }
}
