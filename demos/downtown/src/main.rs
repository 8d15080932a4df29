//! downtown — runnable demo for the traffic routing workspace.
//!
//! Seeds the 13-road default city, runs ten simulated minutes of weather and
//! incidents with CSV output, then compares vehicles on a few queries and
//! exports `traffic_data.csv`.
//!
//! Usage: `downtown [config.json]`.  Any `SimConfig` field may be given in
//! the JSON file; missing fields keep their defaults.

mod network;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tr_core::{SimConfig, Tick, VehicleKind, VehicleProfile, Weather};
use tr_incident::Incident;
use tr_network::{DijkstraRouter, NetworkResult, Route, RoadNetwork};
use tr_output::{CsvWriter, OutputWriter, SimOutputObserver, write_traffic_data};
use tr_sim::{Sim, SimBuilder, SimObserver, SimStatus};

use network::build_network;

const OUTPUT_DIR: &str = "output/downtown";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    incidents:     usize,
    weather_flips: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, incidents: 0, weather_flips: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_weather_change(&mut self, tick: Tick, weather: Weather) {
        self.weather_flips += 1;
        self.inner.on_weather_change(tick, weather);
    }

    fn on_incident(&mut self, tick: Tick, incident: &Incident) {
        self.incidents += 1;
        self.inner.on_incident(tick, incident);
    }

    fn on_tick_end(&mut self, tick: Tick, status: &SimStatus) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, status);
    }

    fn on_snapshot(&mut self, tick: Tick, network: &RoadNetwork) {
        self.snapshot_rows += network.edge_count();
        self.inner.on_snapshot(tick, network);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn print_route(label: &str, result: &NetworkResult<Route>) {
    match result {
        Ok(route) => println!(
            "  {label:<22} {:>5} s  toll ${:<3} {}",
            route.total_time_secs,
            route.total_toll,
            route.path.join(" -> "),
        ),
        Err(e) => println!("  {label:<22} {e}"),
    }
}

fn print_status(sim: &Sim<DijkstraRouter>) {
    let s = sim.status();
    println!(
        "Tick {} ({} s): weather {} [{}], {} active incidents, {} / {} edges blocked / congested",
        s.tick.0,
        s.elapsed_secs,
        s.weather,
        s.weather.description(),
        s.active_incidents,
        s.network.blocked_edges,
        s.network.congested_edges,
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== downtown — dynamic-cost routing demo ===");

    // 1. Config.
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    println!(
        "Sim: {} ticks × {} s, weather every {} s, incidents every {} ticks (chance {}/{})",
        config.total_ticks,
        config.tick_duration_secs,
        config.weather_interval_secs,
        config.incident_interval_ticks,
        config.incident_chance.0,
        config.incident_chance.1,
    );

    // 2. Network.
    let network = build_network()?;
    println!("Road network: {} nodes, {} roads", network.node_count(), network.road_count());
    println!();

    // 3. Sim.
    let mut sim = SimBuilder::new(config, DijkstraRouter)
        .network(network)
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output incomplete");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  weather changes     : {}", obs.weather_flips);
    println!("  incidents generated : {}", obs.incidents);
    println!("  edge_snapshots.csv  : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();
    print_status(&sim);
    for incident in sim.active_incidents() {
        println!("  ! {incident} (age {} s)", incident.age_secs(sim.clock.elapsed_secs()));
    }
    println!();

    // 6. Vehicle comparison.
    let car       = VehicleProfile::from(VehicleKind::Car);
    let bike      = VehicleProfile::from(VehicleKind::Bike);
    let bus       = VehicleProfile::from(VehicleKind::Bus);
    let ambulance = VehicleProfile::new(VehicleKind::Ambulance, true);
    let fleet     = [car.clone(), bike, bus, ambulance.clone()];

    for (from, to) in [("Downtown", "Uptown"), ("Market St", "Bus Terminal"), ("Downtown", "Emergency Hospital")] {
        println!("{from} -> {to}:");
        for (vehicle, result) in fleet.iter().zip(sim.compare_routes(from, to, &fleet)) {
            let label = if vehicle.is_emergency() {
                format!("{} (emergency)", vehicle.kind)
            } else {
                vehicle.kind.to_string()
            };
            print_route(&label, &result);
        }
    }
    println!();

    // 7. Rush hour and a manual closure.
    sim.apply_rush_hour();
    println!("Rush hour:");
    print_route("Car", &sim.compute_route("Downtown", "Uptown", &car));
    sim.block_road("Downtown", "Midtown", true)?;
    println!("Downtown -> Midtown closed:");
    print_route("Car", &sim.compute_route("Downtown", "Uptown", &car));
    print_route("Ambulance (emergency)", &sim.compute_route("Downtown", "Uptown", &ambulance));
    println!();

    // 8. Eco stats.
    if let Ok(route) = sim.compute_route("Downtown", "Uptown", &car) {
        let distance = route.total_distance as f64;
        println!("Eco stats, Downtown -> Uptown ({distance} distance units):");
        for vehicle in &fleet {
            println!(
                "  {:<10} CO2 {:>6.2} kg   fuel efficiency {:.2}",
                vehicle.kind.to_string(),
                vehicle.co2_kg(distance),
                vehicle.fuel_efficiency(),
            );
        }
        println!();
    }

    // 9. Snapshot export.
    let path = Path::new(OUTPUT_DIR).join("traffic_data.csv");
    write_traffic_data(&path, &sim.export_snapshot())?;
    println!("Data exported to {}", path.display());
    print_status(&sim);

    Ok(())
}
