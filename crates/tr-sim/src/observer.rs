//! Simulation observer trait for progress reporting and data collection.

use tr_core::{Tick, Weather};
use tr_incident::Incident;
use tr_network::RoadNetwork;

use crate::SimStatus;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — weather logger
///
/// ```rust,ignore
/// struct WeatherLog(Vec<(Tick, Weather)>);
///
/// impl SimObserver for WeatherLog {
///     fn on_weather_change(&mut self, tick: Tick, weather: Weather) {
///         self.0.push((tick, weather));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a weather rotation has been applied to the network.
    fn on_weather_change(&mut self, _tick: Tick, _weather: Weather) {}

    /// Called when the generator produced a new incident this tick.
    fn on_incident(&mut self, _tick: Tick, _incident: &Incident) {}

    /// Called at the end of each tick with the post-tick status.
    fn on_tick_end(&mut self, _tick: Tick, _status: &SimStatus) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to the network so output writers can record
    /// an edge snapshot without the sim knowing any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _network: &RoadNetwork) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
