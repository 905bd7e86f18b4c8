//! Action handlers for simulation commands
//!
//! Every [`SimulationCommand`] ends up here, whether it came from a button,
//! a key or autostart.

use super::frame::{RenderedState, SimulationStatus};
use crate::prelude::*;

#[allow(clippy::too_many_arguments)]
pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut scheduler: ResMut<FrameScheduler>,
    mut rendered: ResMut<RenderedState>,
    mut series: ResMut<TimeSeries>,
    mut status: ResMut<SimulationStatus>,
    config: Res<SimulationConfig>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        match *command {
            SimulationCommand::Start => {
                start(&mut simulation, &mut scheduler, &mut status);
            }
            SimulationCommand::Stop => simulation.stop(&mut *scheduler),
            SimulationCommand::ToggleRunning => {
                if simulation.is_running() {
                    simulation.stop(&mut *scheduler);
                } else {
                    start(&mut simulation, &mut scheduler, &mut status);
                }
            }
            SimulationCommand::Reset => {
                simulation.reset(&mut *scheduler, &mut *rendered, &mut *series);
                *status = SimulationStatus::Ready;
            }
            SimulationCommand::AdjustParameter { field, direction } => {
                let mut parameters = *simulation.editable_parameters();
                field.nudge(
                    &mut parameters,
                    direction.signum() * config.controls.parameter_step,
                );
                debug!("{field} -> {}", field.get(&parameters));
                simulation.set_parameters(parameters);

                // Nothing has run yet, so show the edit straight away
                if simulation.lifecycle() == Lifecycle::Idle {
                    simulation.reset(&mut *scheduler, &mut *rendered, &mut *series);
                }
            }
            SimulationCommand::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

fn start(
    simulation: &mut Simulation,
    scheduler: &mut FrameScheduler,
    status: &mut SimulationStatus,
) {
    match simulation.start(scheduler) {
        Ok(()) => *status = SimulationStatus::Ready,
        Err(err) => status.report(err),
    }
}
