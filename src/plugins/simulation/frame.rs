//! Per-frame delivery of simulation ticks

use crate::prelude::*;
use crate::simulation::TickOutcome;
use crate::simulation::sinks::{RenderSink, SinkError};

/// Render sink backing the schematic and the readout
///
/// Holds the last state the simulation pushed; the drawing systems read it
/// every frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct RenderedState {
    pub state: Option<PhysicsState>,
    pub frames: u64,
}

impl RenderSink for RenderedState {
    fn render(&mut self, state: &PhysicsState) -> Result<(), SinkError> {
        self.state = Some(*state);
        self.frames += 1;
        Ok(())
    }
}

/// Last notable outcome, shown in the readout
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub enum SimulationStatus {
    #[default]
    Ready,
    Completed,
    Failed(SimulationError),
}

impl SimulationStatus {
    pub fn report(&mut self, error: SimulationError) {
        error!("{error}");
        *self = SimulationStatus::Failed(error);
    }
}

pub fn draw_initial_state(
    mut simulation: ResMut<Simulation>,
    mut scheduler: ResMut<FrameScheduler>,
    mut rendered: ResMut<RenderedState>,
    mut series: ResMut<TimeSeries>,
) {
    simulation.reset(&mut *scheduler, &mut *rendered, &mut *series);
}

pub fn advance_simulation(
    mut simulation: ResMut<Simulation>,
    mut scheduler: ResMut<FrameScheduler>,
    mut rendered: ResMut<RenderedState>,
    mut series: ResMut<TimeSeries>,
    mut status: ResMut<SimulationStatus>,
) {
    let Some(handle) = scheduler.take_due() else {
        return;
    };

    match simulation.tick(handle, &mut *scheduler, &mut *rendered, &mut *series) {
        Ok(TickOutcome::Completed) => *status = SimulationStatus::Completed,
        Ok(TickOutcome::Stepped | TickOutcome::Stale) => {}
        // Already logged by the simulation
        Err(err) => *status = SimulationStatus::Failed(err),
    }
}

pub fn sync_app_state(
    simulation: Res<Simulation>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let target = AppState::from(simulation.lifecycle());
    if *state.get() != target {
        next_state.set(target);
    }
}
