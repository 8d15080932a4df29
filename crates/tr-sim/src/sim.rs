//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use tr_core::{SimClock, SimConfig, SimRng, Tick, VehicleProfile, Weather};
use tr_incident::{Incident, IncidentRegistry};
use tr_network::{EdgeSnapshot, NetworkResult, NetworkStats, RoadNetwork, Route, Router, RoutingContext};

use crate::{SimObserver, SimResult};

// ── SimStatus ─────────────────────────────────────────────────────────────────

/// Point-in-time summary of the simulation, for status lines and per-tick
/// output rows.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimStatus {
    pub tick:             Tick,
    pub elapsed_secs:     i64,
    pub weather:          Weather,
    pub active_incidents: usize,
    pub network:          NetworkStats,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<R>` owns every piece of mutable state: the clock, the RNG, the
/// current weather, the road network, and the incident registry.  Each tick:
///
/// 1. **Weather**: if a weather-interval boundary was crossed since the
///    previous tick, draw a new [`Weather`] and re-derive every edge weight.
/// 2. **Incidents**: every `incident_interval_ticks` ticks (never at tick 0),
///    attempt to generate one incident with probability `incident_chance`.
/// 3. **Observers**: tick-end status and, on the output interval, a network
///    snapshot.
///
/// Route queries ([`compute_route`](Self::compute_route)) borrow `&self`, so
/// a query can never interleave with a mutation step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    /// Global configuration (total ticks, seed, cadences, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Single RNG stream for weather, incidents, and rush hour.
    pub rng: SimRng,

    /// Current weather; replaced wholesale on rotation.
    pub weather: Weather,

    pub network: RoadNetwork,

    pub incidents: IncidentRegistry,

    pub router: R,
}

impl<R: Router> Sim<R> {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock, weather = %self.weather, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;

        let status = self.status();
        observer.on_tick_end(now, &status);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.network);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        let now_secs = self.clock.secs_at(now);

        // ── Phase 0: drop expired incidents ───────────────────────────────
        let purged = self.incidents.purge_expired(now_secs);
        if purged > 0 {
            debug!(tick = %now, purged, "expired incidents purged");
        }

        // ── Phase 1: weather rotation ─────────────────────────────────────
        if self.weather_boundary_crossed(now) {
            let weather = self.rotate_weather()?;
            observer.on_weather_change(now, weather);
        }

        // ── Phase 2: incident generation ──────────────────────────────────
        if now.0 > 0 && now.0.is_multiple_of(self.config.incident_interval_ticks) {
            let (num, den) = self.config.incident_chance;
            if let Some(incident) = self.incidents.generate(&mut self.rng, now_secs, num, den) {
                observer.on_incident(now, incident);
            }
        }
        Ok(())
    }

    /// `true` if a multiple of `weather_interval_secs` lies in
    /// `(secs_at(now - 1), secs_at(now)]`.
    fn weather_boundary_crossed(&self, now: Tick) -> bool {
        if now.0 == 0 {
            return false;
        }
        let interval = self.config.weather_interval_secs as i64;
        let prev = self.clock.secs_at(Tick(now.0 - 1)) / interval;
        let cur  = self.clock.secs_at(now) / interval;
        cur > prev
    }

    // ── Mutation steps ────────────────────────────────────────────────────

    /// Draw a new weather state and apply it.  Returns the new weather.
    pub fn rotate_weather(&mut self) -> SimResult<Weather> {
        let weather = Weather::random(&mut self.rng);
        self.set_weather(weather)?;
        info!(
            tick = %self.clock,
            %weather,
            multiplier = weather.multiplier(),
            description = weather.description(),
            "weather changed"
        );
        Ok(weather)
    }

    /// Replace the current weather and re-derive every edge weight from it.
    pub fn set_weather(&mut self, weather: Weather) -> SimResult<()> {
        self.network.apply_weather_effect(weather.multiplier())?;
        self.weather = weather;
        Ok(())
    }

    /// Put the whole network into rush hour (see
    /// [`RoadNetwork::apply_rush_hour`]).  Stays in effect until the next
    /// weather application.
    pub fn apply_rush_hour(&mut self) {
        self.network.apply_rush_hour(&mut self.rng);
        info!(tick = %self.clock, "rush hour applied");
    }

    /// Block or unblock the `from → to` direction of a road.
    pub fn block_road(&mut self, from: &str, to: &str, blocked: bool) -> SimResult<usize> {
        Ok(self.network.manual_block(from, to, blocked)?)
    }

    /// Attempt one incident draw at the current time with the configured
    /// chance, outside the regular cadence.
    pub fn generate_incident(&mut self) -> Option<Incident> {
        let now_secs = self.clock.elapsed_secs();
        let (num, den) = self.config.incident_chance;
        self.incidents.generate(&mut self.rng, now_secs, num, den).cloned()
    }

    /// Insert a known incident, stamped with the current simulated time.
    pub fn report_incident(&mut self, mut incident: Incident) {
        incident.created_at_secs = self.clock.elapsed_secs();
        self.incidents.report(incident);
    }

    /// Non-expired incidents, newest first.  Purges expired records.
    pub fn active_incidents(&mut self) -> Vec<Incident> {
        self.incidents.list_active(self.clock.elapsed_secs())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Fastest route for `vehicle` against the current network state.
    pub fn compute_route(&self, from: &str, to: &str, vehicle: &VehicleProfile) -> NetworkResult<Route> {
        let ctx = RoutingContext::new(&self.network, &self.incidents, self.clock.elapsed_secs());
        self.router.route(&ctx, from, to, vehicle)
    }

    /// The same query for several vehicles against one network state.
    /// Results are in `vehicles` order.
    pub fn compare_routes(
        &self,
        from: &str,
        to: &str,
        vehicles: &[VehicleProfile],
    ) -> Vec<NetworkResult<Route>> {
        let ctx = RoutingContext::new(&self.network, &self.incidents, self.clock.elapsed_secs());
        vehicles
            .iter()
            .map(|v| self.router.route(&ctx, from, to, v))
            .collect()
    }

    pub fn export_snapshot(&self) -> Vec<EdgeSnapshot> {
        self.network.snapshot()
    }

    pub fn status(&self) -> SimStatus {
        SimStatus {
            tick:             self.clock.current_tick,
            elapsed_secs:     self.clock.elapsed_secs(),
            weather:          self.weather,
            active_incidents: self.incidents.active_count(self.clock.elapsed_secs()),
            network:          self.network.stats(),
        }
    }
}
