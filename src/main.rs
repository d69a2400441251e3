mod clock;
mod config;
mod geo;
mod predict;
mod runner;
mod shutdown;
mod signal;
mod tracker;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "iss-beacon")]
#[command(about = "Signals how close the ISS is while it passes overhead")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate { config: String },
    /// Track and signal until interrupted
    Run { config: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Run { config } => run(&config),
    }
}

fn load(path: &str) -> Option<Config> {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return None;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return None;
    }
    Some(config)
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load(path) else {
        return ExitCode::FAILURE;
    };

    println!("Configuration is valid");
    println!(
        "  observer: {}, {} (r = {} km)",
        config.observer.latitude, config.observer.longitude, config.observer.radius_km
    );
    println!("  target radius: {} km", config.target.radius_km);
    println!(
        "  thresholds: {} km .. {} km",
        config.tracking.close_threshold_km, config.tracking.far_threshold_km
    );
    println!(
        "  poll every {}s, timeout {}s, signal period {}s",
        config.tracking.poll_interval_seconds,
        config.tracking.collaborator_timeout_seconds,
        config.signal.period_seconds
    );
    println!("  output: {:?}", config.signal.output);
    match &config.web {
        Some(web) => println!("  status server: {}", web.bind),
        None => println!("  status server: disabled"),
    }
    ExitCode::SUCCESS
}

fn run(path: &str) -> ExitCode {
    let Some(config) = load(path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(runner::run(config)) {
        Ok(()) => {
            log::info!("Stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
