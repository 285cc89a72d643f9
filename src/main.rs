// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Vigil - Premises Alarm Decision Engine
//!
//! Runs a headless, scripted demo: simulated sensors and camera frames drive
//! the alarm engine while every status notification is logged from the event
//! bus. The final repository state is printed when the run ends.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vigil::{
    AlarmEngine, ArmingStatus, Config, EventBus, MemoryRepository, RandomImageClassifier,
    Sensor, SensorSimulator, VERSION,
};

/// Vigil - Premises Alarm Decision Engine
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author = "Vigil Project")]
#[command(version = VERSION)]
#[command(about = "Alarm decision engine demo with simulated sensors and camera")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Seed for the simulated sensors and classifier
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulated sensor events
    #[arg(long)]
    steps: Option<usize>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(seed) = args.seed {
        config.demo.seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        config.demo.steps = steps;
    }
    config.validate()?;

    // Initialize logging
    let log_level = if args.trace {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Vigil v{} - Premises Alarm Decision Engine", VERSION);
    info!("Configuration loaded from {:?}", config_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_demo(config, args.json))
}

/// Drive the engine with simulated traffic until the script ends or Ctrl+C.
async fn run_demo(config: Config, json: bool) -> Result<()> {
    let seed = config.demo.seed.unwrap_or_else(rand::random);
    info!("Demo seed: {}", seed);

    let repository = Arc::new(MemoryRepository::new());
    let classifier = Arc::new(RandomImageClassifier::with_seed(seed));
    let engine = AlarmEngine::new(repository, classifier, &config.engine)?;

    let bus = Arc::new(EventBus::new(1024));
    engine.add_status_listener(bus.clone());

    let mut events = bus.subscribe_events();
    let logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(id = event.id, kind = ?event.event_type, "{:?}", event.payload),
                Err(RecvError::Lagged(skipped)) => warn!("Event log skipped {} events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut sensors = Vec::with_capacity(config.demo.sensors.len());
    for entry in &config.demo.sensors {
        let sensor = Sensor::new(&entry.name, entry.sensor_type)?;
        engine.add_sensor(&sensor)?;
        sensors.push(sensor);
    }

    let mut simulator = SensorSimulator::new(sensors, seed);
    engine.set_arming_status(ArmingStatus::ArmedAway)?;
    simulator.reset();

    let tick = Duration::from_millis(config.demo.tick_ms);
    let switch_at = config.demo.steps / 2;

    for step in 1..=config.demo.steps {
        tokio::select! {
            _ = tokio::time::sleep(tick) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping demo");
                break;
            }
        }

        if step == switch_at {
            engine.set_arming_status(ArmingStatus::ArmedHome)?;
            simulator.reset();
        }

        if let Some(event) = simulator.next_event() {
            let sensor = engine.apply_event(event)?;
            simulator.acknowledge(&sensor);
        }

        if step % config.demo.scan_every == 0 {
            let frame = simulator.capture_frame()?;
            engine.process_image(&frame)?;
        }
    }

    let snapshot = engine.snapshot()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Alarm:  {} ({})", snapshot.alarm_status, snapshot.alarm_status.description());
        println!("Arming: {}", snapshot.arming_status.description());
        for sensor in &snapshot.sensors {
            println!("  {}", sensor);
        }
    }

    engine.set_arming_status(ArmingStatus::Disarmed)?;

    // Closing the bus ends the logger task
    drop(engine);
    drop(bus);
    logger.await?;

    info!("Vigil demo complete");
    Ok(())
}
