//! Command line interface for springmass

use crate::config::{ConfigError, SetupError, SimulationConfig};
use crate::physics::integrators::{IntegratorRegistry, RegistryError};
use crate::physics::math::Scalar;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[source] ConfigError),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(#[source] ConfigError),

    #[error("Invalid integrator: {0}")]
    InvalidIntegrator(#[from] RegistryError),

    #[error("Invalid simulation settings: {0}")]
    InvalidSimulation(#[from] SetupError),
}

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// springmass - spring-mass-damper simulation with a live schematic and chart
#[derive(Parser, Debug, Default)]
#[command(version = VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mass in kg (overrides config file)
    #[arg(short, long, value_name = "KG")]
    pub mass: Option<Scalar>,

    /// Spring constant in N/m (overrides config file)
    #[arg(short = 'k', long, value_name = "N_PER_M")]
    pub spring_constant: Option<Scalar>,

    /// Damping coefficient in Ns/m (overrides config file)
    #[arg(short, long, value_name = "NS_PER_M")]
    pub damping: Option<Scalar>,

    /// Constant external force in N (overrides config file)
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub force: Option<Scalar>,

    /// Initial displacement in m (overrides config file)
    #[arg(long, value_name = "M", allow_hyphen_values = true)]
    pub initial_displacement: Option<Scalar>,

    /// Initial velocity in m/s (overrides config file)
    #[arg(long, value_name = "M_PER_S", allow_hyphen_values = true)]
    pub initial_velocity: Option<Scalar>,

    /// Simulated duration in s (overrides config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub duration: Option<Scalar>,

    /// Fixed integration step in s (overrides config file)
    #[arg(long, value_name = "SECONDS")]
    pub time_step: Option<Scalar>,

    /// Integrator type (e.g., semi_implicit_euler, explicit_euler)
    #[arg(short, long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Start the simulation as soon as the window opens
    #[arg(short, long)]
    pub autostart: bool,

    /// Run to completion without a window and print the series as CSV
    #[arg(long)]
    pub headless: bool,

    /// CSV destination for --headless (stdout if omitted)
    #[arg(short, long, value_name = "FILE", requires = "headless")]
    pub output: Option<PathBuf>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::default();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Handles the --write-config flag
pub fn handle_write_config(config: &SimulationConfig, path: &std::path::Path) -> Result<(), CliError> {
    config.save(path).map_err(CliError::ConfigWrite)?;
    println!("Wrote configuration to {}", path.display());
    Ok(())
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            eprintln!("Loading configuration from: {}", path.display());
            SimulationConfig::load(Some(path)).map_err(CliError::ConfigLoad)?
        }
        None => SimulationConfig::load_from_user_config(),
    };

    let parameters = &mut config.physics.parameters;
    let overrides = [
        (args.mass, &mut parameters.mass, "mass"),
        (
            args.spring_constant,
            &mut parameters.spring_constant,
            "spring constant",
        ),
        (
            args.damping,
            &mut parameters.damping_coefficient,
            "damping coefficient",
        ),
        (args.force, &mut parameters.external_force, "external force"),
        (
            args.initial_displacement,
            &mut parameters.initial_displacement,
            "initial displacement",
        ),
        (
            args.initial_velocity,
            &mut parameters.initial_velocity,
            "initial velocity",
        ),
        (args.duration, &mut parameters.duration, "duration"),
        (args.time_step, &mut config.physics.time_step, "time step"),
    ];
    for (value, slot, name) in overrides {
        if let Some(value) = value {
            eprintln!("Overriding {name} to: {value}");
            *slot = value;
        }
    }

    if let Some(integrator_type) = &args.integrator {
        let registry = IntegratorRegistry::default();
        let integrator = registry.create(integrator_type)?;

        eprintln!("Using integrator: {}", integrator.name());
        config.physics.integrator = integrator.name().to_string();
    }

    Ok(config)
}

/// Rejects a configuration that cannot produce a runnable simulation, such
/// as a zero time step or an integrator set in the file that does not exist
pub fn validate_config(config: &SimulationConfig) -> Result<(), CliError> {
    config.build_simulation(&IntegratorRegistry::default())?;
    Ok(())
}
