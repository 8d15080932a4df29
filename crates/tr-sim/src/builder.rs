//! Fluent builder for constructing a [`Sim`].

use tr_core::{SimConfig, SimRng, Weather};
use tr_incident::IncidentRegistry;
use tr_network::{RoadNetwork, Router};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, cadences, …
/// - `R: Router` — the routing algorithm (e.g. [`tr_network::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                              |
/// |--------------------|------------------------------------------------------|
/// | `.network(n)`      | `RoadNetwork::new()`                                 |
/// | `.incidents(r)`    | `IncidentRegistry::new(config.incident_ttl_secs)`    |
/// | `.weather(w)`      | `Weather::Sunny`                                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, DijkstraRouter)
///     .network(network)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router> {
    config:    SimConfig,
    network:   Option<RoadNetwork>,
    incidents: Option<IncidentRegistry>,
    weather:   Weather,
    router:    R,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, router: R) -> Self {
        Self {
            config,
            network:   None,
            incidents: None,
            weather:   Weather::default(),
            router,
        }
    }

    /// Supply the road network.  Roads can still be added later through
    /// `sim.network`.
    pub fn network(mut self, network: RoadNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Supply a pre-populated incident registry (custom locations or
    /// fixture incidents).  Its TTL takes precedence over the config's.
    pub fn incidents(mut self, incidents: IncidentRegistry) -> Self {
        self.incidents = Some(incidents);
        self
    }

    /// Initial weather, applied to the network by `build`.
    pub fn weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    /// Validate the config, apply the initial weather, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut network = self.network.unwrap_or_default();
        network.apply_weather_effect(self.weather.multiplier())?;

        let incidents = self
            .incidents
            .unwrap_or_else(|| IncidentRegistry::new(self.config.incident_ttl_secs));

        Ok(Sim {
            clock:   self.config.make_clock(),
            rng:     SimRng::new(self.config.seed),
            config:  self.config,
            weather: self.weather,
            network,
            incidents,
            router:  self.router,
        })
    }
}
