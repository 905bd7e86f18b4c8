//! Windowless runner
//!
//! Drives the same [`Simulation`] loop as the app, with a scheduler that
//! delivers every tick immediately, and writes the chart series as CSV.

use crate::config::{SetupError, SimulationConfig};
use crate::physics::integrators::IntegratorRegistry;
use crate::simulation::scheduler::FrameScheduler;
use crate::simulation::sinks::{LogRenderSink, TimeSeries};
use crate::simulation::{Simulation, SimulationError};
use bevy::log::Level;
use bevy::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeadlessError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Installs a plain stderr subscriber for the log macros
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Starts `simulation` and delivers ticks until it stops on its own
pub fn run_to_completion(simulation: &mut Simulation) -> Result<TimeSeries, SimulationError> {
    let mut scheduler = FrameScheduler::new();
    let mut render = LogRenderSink;
    let mut series = TimeSeries::new();

    simulation.start(&mut scheduler)?;
    while let Some(handle) = scheduler.take_due() {
        simulation.tick(handle, &mut scheduler, &mut render, &mut series)?;
    }

    Ok(series)
}

/// Runs the configured simulation and writes its series to `output`, or to
/// stdout when no path is given
pub fn run_headless(config: &SimulationConfig, output: Option<&Path>) -> Result<(), HeadlessError> {
    let registry = IntegratorRegistry::default();
    let mut simulation = config.build_simulation(&registry)?;

    info!(
        "Running {} headless: dt = {} s, duration = {} s",
        simulation.integrator_name(),
        simulation.time_step(),
        simulation.parameters().duration
    );
    let series = run_to_completion(&mut simulation)?;
    info!("Recorded {} samples", series.len());

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            series.write_csv(&mut writer)?;
            writer.flush()?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut writer = io::stdout().lock();
            series.write_csv(&mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
