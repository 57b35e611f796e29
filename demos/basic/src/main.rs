//! basic: smallest driver for the lift_sim elevator simulation.
//!
//! Runs two sessions in a 12-floor building with three cars:
//!
//! 1. a short scripted rush loaded from an embedded CSV, and
//! 2. one simulated hour of random traffic.
//!
//! Set `RUST_LOG=lift_sim=debug` to watch individual stops.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lift_car::{Car, CarSpec};
use lift_core::{CallId, CarId, Direction, Tick};
use lift_dispatch::{load_script_reader, Interarrival, Policy};
use lift_sim::{SessionBuilder, SessionConfig, SessionObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOORS:  u32 = 12;
const SEED:    u64 = 42;
const RUNTIME: u64 = 36_000; // 1 tick = 0.1 s → one hour

// ── Morning rush script ───────────────────────────────────────────────────────

// time_ticks,origin,destination; everyone arriving in the lobby heads up,
// a few early leavers head down.
const RUSH_CSV: &str = "\
time_ticks,origin,destination\n\
0,1,9\n\
0,1,4\n\
20,1,12\n\
40,1,7\n\
60,10,1\n\
90,1,5\n\
150,6,1\n\
150,1,11\n\
300,3,8\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts stops and remembers the fullest any car has been.
#[derive(Default)]
struct StopCounter {
    stops:        usize,
    peak_load:    u32,
    last_dropoff: Option<(CallId, CarId, Tick)>,
}

impl SessionObserver for StopCounter {
    fn on_stop(&mut self, _car: &Car, _now: Tick) {
        self.stops += 1;
    }

    fn on_pickup(&mut self, car: &Car, _call: CallId, _now: Tick) {
        self.peak_load = self.peak_load.max(car.occupancy());
    }

    fn on_dropoff(&mut self, car: &Car, call: CallId, now: Tick) {
        self.last_dropoff = Some((call, car.id(), now));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cars = vec![
        CarSpec { capacity: Some(8), ..CarSpec::default() },
        CarSpec { capacity: Some(8), idle_preference: Direction::Down, start_floor: Some(FLOORS), ..CarSpec::default() },
        CarSpec { capacity: Some(4), service_range: Some((1, 6)), ..CarSpec::default() },
    ];

    // 1. Scripted rush.
    let script = load_script_reader(Cursor::new(RUSH_CSV))?;
    println!("=== scripted rush: {} calls ===", script.len());
    let config = SessionConfig {
        floor_count:  FLOORS,
        runtime:      3_000,
        seed:         SEED,
        interarrival: Interarrival::default(),
        policy:       Policy::LeastLoaded,
        cars:         cars.clone(),
    };
    let mut session = SessionBuilder::new(config).script(script).build()?;
    let mut counter = StopCounter::default();
    let report = session.run(&mut counter)?;
    println!("{report}");
    println!("Stops: {}  |  peak load: {}", counter.stops, counter.peak_load);
    if let Some((call, car, at)) = counter.last_dropoff {
        println!("Last delivery: {call} by {car} at {at}");
    }
    println!();

    // 2. One hour of random traffic.
    let config = SessionConfig {
        floor_count:  FLOORS,
        runtime:      RUNTIME,
        seed:         SEED,
        interarrival: Interarrival::Uniform { min: 20, max: 120 },
        policy:       Policy::Random,
        cars,
    };
    println!("=== random traffic: {} ===", Tick(RUNTIME));
    let mut session = SessionBuilder::new(config).build()?;
    let mut counter = StopCounter::default();
    let t0 = Instant::now();
    let report = session.run(&mut counter)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "random session finished");
    println!("{report}");
    println!("Stops: {}  |  peak load: {}", counter.stops, counter.peak_load);

    for car in session.building().cars() {
        println!(
            "{:<8} floor {:>2}  {:<5} aboard {}",
            car.id().to_string(),
            car.floor(),
            car.heading().to_string(),
            car.occupancy(),
        );
    }

    Ok(())
}
