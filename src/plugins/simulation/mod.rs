//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`Simulation`] resource and drives it from the frame loop: user
//! commands are applied first, then at most one pending tick is delivered per
//! `Update`, then the app state is brought in line with the lifecycle.

use crate::prelude::*;
use crate::simulation::DEFAULT_TIME_STEP;

mod actions;
mod frame;

pub use actions::handle_simulation_commands;
pub use frame::{RenderedState, SimulationStatus, advance_simulation, sync_app_state};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Commands,
    Advance,
    Present,
}

#[derive(Default)]
pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
    autostart: bool,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
            ..default()
        }
    }

    /// Issue a Start command once startup has drawn the initial state
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let registry = IntegratorRegistry::default();
        // The binary rejects such configs before startup; embedders get the
        // default integrator and step with their parameters kept
        let simulation = config.build_simulation(&registry).unwrap_or_else(|e| {
            error!("{e}; using semi_implicit_euler with dt = {DEFAULT_TIME_STEP} s");
            Simulation::with_parameters(config.physics.parameters)
        });
        info!(
            "Using {} with dt = {} s",
            simulation.integrator_name(),
            simulation.time_step()
        );

        app.insert_resource(config);
        app.insert_resource(registry);
        app.insert_resource(simulation);
        app.init_resource::<FrameScheduler>();
        app.init_resource::<TimeSeries>();
        app.init_resource::<RenderedState>();
        app.init_resource::<SimulationStatus>();

        app.add_event::<SimulationCommand>();
        app.init_state::<AppState>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Commands,
                SimulationSet::Advance,
                SimulationSet::Present,
            )
                .chain(),
        );

        app.add_systems(Startup, frame::draw_initial_state);
        if self.autostart {
            app.add_systems(
                PostStartup,
                |mut commands: EventWriter<SimulationCommand>| {
                    commands.write(SimulationCommand::Start);
                },
            );
        }

        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Commands),
                (advance_simulation, sync_app_state)
                    .chain()
                    .in_set(SimulationSet::Advance),
            ),
        );
    }
}
