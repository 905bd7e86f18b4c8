//! Frame-driven simulation loop
//!
//! [`Simulation`] owns the physics state of one run and is its only writer.
//! It moves through a small lifecycle:
//!
//! ```text
//!            start                 t ≥ duration / stop
//!   Idle ───────────▶ Running ─────────────────────────▶ Stopped
//!    ▲                   ▲                                 │
//!    │                   └────────────── start ────────────┘
//!    └──────────────── reset (from any state) ─────────────┘
//! ```
//!
//! While running, exactly one tick is scheduled at a time. Each tick advances
//! the state by one fixed step, hands the new state to the render and chart
//! sinks and schedules the next tick. Stop and reset cancel the outstanding
//! tick, and any tick whose handle is no longer the pending one is ignored.

pub mod scheduler;
pub mod sinks;

use crate::physics::dynamics::StepStability;
use crate::physics::integrators::{Integrator, SemiImplicitEuler};
use crate::physics::math::Scalar;
use crate::physics::parameters::{ParameterError, Parameters};
use crate::physics::state::PhysicsState;
use bevy::prelude::*;
use scheduler::{TickHandle, TickScheduler};
use sinks::{ChartSink, RenderSink, Sample};
use thiserror::Error;

/// Default fixed step, one 60 Hz frame
pub const DEFAULT_TIME_STEP: Scalar = 0.016;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("time step must be a positive finite number, got {0} s")]
    InvalidTimeStep(Scalar),

    #[error("integration diverged at step {step} (t = {time:.3} s); simulation stopped")]
    Diverged { step: u64, time: Scalar },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Not started since the last reset
    #[default]
    Idle,
    Running,
    /// Halted mid-run, by request or by reaching the duration
    Stopped,
}

/// What a delivered tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One step was taken and the next tick scheduled
    Stepped,
    /// The run reached its duration and stopped
    Completed,
    /// The tick was cancelled or superseded and had no effect
    Stale,
}

#[derive(Resource)]
pub struct Simulation {
    integrator: Box<dyn Integrator>,
    time_step: Scalar,
    /// Parameters of the current run
    parameters: Parameters,
    /// Edits waiting for the next start or reset
    staged: Option<Parameters>,
    state: PhysicsState,
    lifecycle: Lifecycle,
    pending: Option<TickHandle>,
    steps: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_parameters(Parameters::default())
    }
}

impl Simulation {
    /// Semi-implicit Euler at the default time step
    pub fn with_parameters(parameters: Parameters) -> Self {
        Self {
            integrator: Box::new(SemiImplicitEuler),
            time_step: DEFAULT_TIME_STEP,
            state: PhysicsState::initial(&parameters),
            parameters,
            staged: None,
            lifecycle: Lifecycle::Idle,
            pending: None,
            steps: 0,
        }
    }

    pub fn new(
        parameters: Parameters,
        integrator: Box<dyn Integrator>,
        time_step: Scalar,
    ) -> Result<Self, SimulationError> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(SimulationError::InvalidTimeStep(time_step));
        }

        Ok(Self {
            integrator,
            time_step,
            state: PhysicsState::initial(&parameters),
            parameters,
            staged: None,
            lifecycle: Lifecycle::Idle,
            pending: None,
            steps: 0,
        })
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    /// Parameters in effect for the current run
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Parameters the next start or reset will use
    pub fn editable_parameters(&self) -> &Parameters {
        self.staged.as_ref().unwrap_or(&self.parameters)
    }

    pub fn has_staged_edits(&self) -> bool {
        self.staged
            .is_some_and(|staged| staged != self.parameters)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    /// Steps taken since the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Stages new parameters.
    ///
    /// They take effect at the next [`Simulation::start`] or
    /// [`Simulation::reset`], never in the middle of a run. Validation also
    /// waits for `start`, so half-edited values are accepted here.
    pub fn set_parameters(&mut self, parameters: Parameters) {
        if self.is_running() {
            debug!("Parameters staged; they apply on the next start or reset");
        }
        self.staged = Some(parameters);
    }

    /// Idle/Stopped → Running.
    ///
    /// Rejects invalid parameters without changing the lifecycle. Starting a
    /// running simulation does nothing. Starting after the duration has
    /// elapsed schedules one tick, which stops again without stepping.
    pub fn start(&mut self, scheduler: &mut dyn TickScheduler) -> Result<(), SimulationError> {
        if self.is_running() {
            debug!("Start ignored: simulation already running");
            return Ok(());
        }

        let candidate = *self.editable_parameters();
        candidate.validate()?;
        self.parameters = candidate;
        self.staged = None;

        if let StepStability::Unstable(coefficients) =
            self.integrator.stability(&self.parameters, self.time_step)
        {
            warn!(
                "{} with dt = {} s is unstable for these parameters \
                 (k·dt²/m = {:.3}, c·dt/m = {:.3}); the motion may diverge",
                self.integrator.name(),
                self.time_step,
                coefficients.alpha,
                coefficients.beta
            );
        }

        self.lifecycle = Lifecycle::Running;
        self.pending = Some(scheduler.schedule());
        info!(
            "Simulation started at t = {:.3} s (x = {:.3} m, v = {:.3} m/s)",
            self.state.elapsed, self.state.displacement, self.state.velocity
        );
        Ok(())
    }

    /// Running → Stopped, keeping the state as it is. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn TickScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }

        if self.is_running() {
            self.lifecycle = Lifecycle::Stopped;
            info!(
                "Simulation stopped at t = {:.3} s after {} steps",
                self.state.elapsed, self.steps
            );
        }
    }

    /// Any state → Idle with the initial conditions restored.
    ///
    /// Clears the chart and draws the initial state once.
    pub fn reset(
        &mut self,
        scheduler: &mut dyn TickScheduler,
        render: &mut dyn RenderSink,
        chart: &mut dyn ChartSink,
    ) {
        self.stop(scheduler);

        if let Some(staged) = self.staged.take() {
            self.parameters = staged;
        }
        self.state = PhysicsState::initial(&self.parameters);
        self.steps = 0;
        self.lifecycle = Lifecycle::Idle;

        chart.clear();
        if let Err(err) = chart.redraw() {
            warn!("Chart redraw skipped after reset: {err}");
        }
        if let Err(err) = render.render(&self.state) {
            warn!("Render skipped after reset: {err}");
        }
        debug!("Simulation reset to {:?}", self.state);
    }

    /// Handles one delivered tick.
    ///
    /// Only the currently pending handle is honored. A step whose result is
    /// not finite is discarded and stops the run with
    /// [`SimulationError::Diverged`]. Sink failures are logged and skipped.
    pub fn tick(
        &mut self,
        handle: TickHandle,
        scheduler: &mut dyn TickScheduler,
        render: &mut dyn RenderSink,
        chart: &mut dyn ChartSink,
    ) -> Result<TickOutcome, SimulationError> {
        if self.pending != Some(handle) || !self.is_running() {
            trace!("Ignoring stale tick {}", handle.id());
            return Ok(TickOutcome::Stale);
        }
        self.pending = None;

        if self.is_complete() {
            self.complete();
            return Ok(TickOutcome::Completed);
        }

        let next = self
            .integrator
            .step(&self.state, &self.parameters, self.time_step);
        if !next.is_finite() {
            self.lifecycle = Lifecycle::Stopped;
            let error = SimulationError::Diverged {
                step: self.steps + 1,
                time: next.elapsed,
            };
            error!("{error}");
            return Err(error);
        }

        self.state = next;
        self.steps += 1;
        self.publish(render, chart);

        if self.is_complete() {
            self.complete();
            return Ok(TickOutcome::Completed);
        }

        self.pending = Some(scheduler.schedule());
        Ok(TickOutcome::Stepped)
    }

    fn is_complete(&self) -> bool {
        self.state.elapsed >= self.parameters.duration
    }

    fn complete(&mut self) {
        self.lifecycle = Lifecycle::Stopped;
        info!(
            "Simulation completed: t = {:.3} s after {} steps",
            self.state.elapsed, self.steps
        );
    }

    fn publish(&self, render: &mut dyn RenderSink, chart: &mut dyn ChartSink) {
        if let Err(err) = render.render(&self.state) {
            warn!("Render skipped at step {}: {err}", self.steps);
        }

        chart.append(Sample::from(&self.state));
        if let Err(err) = chart.redraw() {
            warn!("Chart redraw skipped at step {}: {err}", self.steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scheduler::FrameScheduler;
    use super::sinks::{SinkError, TimeSeries};
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<PhysicsState>,
        fail: bool,
    }

    impl RenderSink for RecordingRenderer {
        fn render(&mut self, state: &PhysicsState) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::SurfaceUnavailable("no context".to_string()));
            }
            self.frames.push(*state);
            Ok(())
        }
    }

    fn simulation(parameters: Parameters) -> Simulation {
        Simulation::new(parameters, Box::new(SemiImplicitEuler), DEFAULT_TIME_STEP).unwrap()
    }

    fn deliver(
        simulation: &mut Simulation,
        scheduler: &mut FrameScheduler,
        render: &mut RecordingRenderer,
        chart: &mut TimeSeries,
    ) -> Option<TickOutcome> {
        let handle = scheduler.take_due()?;
        Some(simulation.tick(handle, scheduler, render, chart).unwrap())
    }

    #[test]
    fn test_new_rejects_bad_time_step() {
        for dt in [0.0, -0.01, Scalar::NAN, Scalar::INFINITY] {
            let result = Simulation::new(Parameters::default(), Box::new(SemiImplicitEuler), dt);
            assert!(matches!(result, Err(SimulationError::InvalidTimeStep(_))));
        }
    }

    #[test]
    fn test_new_simulation_is_idle_at_initial_conditions() {
        let simulation = simulation(Parameters::default());
        assert_eq!(simulation.lifecycle(), Lifecycle::Idle);
        assert_eq!(*simulation.state(), PhysicsState::new(1.0, 0.0, 0.0));
        assert_eq!(simulation.pending_tick(), None);
    }

    #[test]
    fn test_start_schedules_one_tick() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();

        simulation.start(&mut scheduler).unwrap();

        assert!(simulation.is_running());
        assert!(scheduler.is_pending());
        assert_eq!(simulation.pending_tick(), scheduler.take_due());
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();

        simulation.start(&mut scheduler).unwrap();
        let pending = simulation.pending_tick();
        simulation.start(&mut scheduler).unwrap();

        assert_eq!(simulation.pending_tick(), pending);
    }

    #[test]
    fn test_start_rejects_invalid_parameters() {
        let mut simulation = simulation(Parameters {
            mass: 0.0,
            ..Default::default()
        });
        let mut scheduler = FrameScheduler::new();

        let result = simulation.start(&mut scheduler);

        assert_eq!(
            result,
            Err(SimulationError::InvalidParameters(
                ParameterError::NonPositiveMass(0.0)
            ))
        );
        assert_eq!(simulation.lifecycle(), Lifecycle::Idle);
        assert!(!scheduler.is_pending());
        assert!(simulation.state().is_finite());
    }

    #[test]
    fn test_tick_steps_and_feeds_sinks() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        let outcome = deliver(&mut simulation, &mut scheduler, &mut render, &mut chart);

        assert_eq!(outcome, Some(TickOutcome::Stepped));
        assert_eq!(simulation.steps(), 1);
        assert_eq!(render.frames, vec![*simulation.state()]);
        assert_eq!(chart.samples(), &[Sample::from(simulation.state())]);
        assert_eq!(chart.revision(), 1);
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_stale_tick_after_stop_is_ignored() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        // The host has already picked up the frame when stop arrives
        let in_flight = scheduler.take_due().unwrap();
        simulation.stop(&mut scheduler);
        let frozen = *simulation.state();

        let outcome = simulation
            .tick(in_flight, &mut scheduler, &mut render, &mut chart)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Stale);
        assert_eq!(*simulation.state(), frozen);
        assert!(render.frames.is_empty());
        assert!(chart.is_empty());
    }

    #[test]
    fn test_superseded_tick_is_ignored_after_restart() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        let old = scheduler.take_due().unwrap();
        simulation.stop(&mut scheduler);
        simulation.start(&mut scheduler).unwrap();

        let outcome = simulation
            .tick(old, &mut scheduler, &mut render, &mut chart)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Stale);
        assert_eq!(simulation.steps(), 0);

        assert_eq!(
            deliver(&mut simulation, &mut scheduler, &mut render, &mut chart),
            Some(TickOutcome::Stepped)
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        deliver(&mut simulation, &mut scheduler, &mut render, &mut chart);
        simulation.stop(&mut scheduler);
        let after_first = *simulation.state();

        simulation.stop(&mut scheduler);

        assert_eq!(*simulation.state(), after_first);
        assert_eq!(simulation.lifecycle(), Lifecycle::Stopped);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_stop_while_idle_stays_idle() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();

        simulation.stop(&mut scheduler);

        assert_eq!(simulation.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn test_reset_restores_initial_conditions_and_draws_once() {
        let mut simulation = simulation(Parameters {
            initial_displacement: 0.5,
            initial_velocity: -1.0,
            ..Default::default()
        });
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        for _ in 0..5 {
            deliver(&mut simulation, &mut scheduler, &mut render, &mut chart);
        }
        render.frames.clear();

        simulation.reset(&mut scheduler, &mut render, &mut chart);

        let initial = PhysicsState::new(0.5, -1.0, 0.0);
        assert_eq!(*simulation.state(), initial);
        assert_eq!(simulation.lifecycle(), Lifecycle::Idle);
        assert_eq!(simulation.steps(), 0);
        assert!(chart.is_empty());
        assert_eq!(render.frames, vec![initial]);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_edits_while_running_apply_on_next_start() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        let edited = Parameters {
            spring_constant: 40.0,
            ..Default::default()
        };
        simulation.set_parameters(edited);

        assert_eq!(simulation.parameters().spring_constant, 10.0);
        assert_eq!(simulation.editable_parameters().spring_constant, 40.0);
        assert!(simulation.has_staged_edits());

        deliver(&mut simulation, &mut scheduler, &mut render, &mut chart);
        assert_eq!(simulation.parameters().spring_constant, 10.0);

        simulation.stop(&mut scheduler);
        simulation.start(&mut scheduler).unwrap();
        assert_eq!(simulation.parameters().spring_constant, 40.0);
        assert!(!simulation.has_staged_edits());
    }

    #[test]
    fn test_invalid_edit_is_kept_staged_when_start_fails() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();

        simulation.set_parameters(Parameters {
            duration: 0.0,
            ..Default::default()
        });

        assert!(simulation.start(&mut scheduler).is_err());
        assert_eq!(simulation.parameters().duration, 10.0);
        assert_eq!(simulation.editable_parameters().duration, 0.0);
    }

    #[test]
    fn test_reset_applies_staged_initial_conditions() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.set_parameters(Parameters {
            initial_displacement: -2.0,
            ..Default::default()
        });
        simulation.reset(&mut scheduler, &mut render, &mut chart);

        assert_eq!(simulation.state().displacement, -2.0);
        assert_eq!(simulation.parameters().initial_displacement, -2.0);
    }

    #[test]
    fn test_render_failure_does_not_stop_the_loop() {
        let mut simulation = simulation(Parameters::default());
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        for _ in 0..3 {
            assert_eq!(
                deliver(&mut simulation, &mut scheduler, &mut render, &mut chart),
                Some(TickOutcome::Stepped)
            );
        }

        assert!(simulation.is_running());
        assert_eq!(chart.len(), 3);
    }

    #[test]
    fn test_divergence_stops_without_committing() {
        // Stiff enough that the amplitude overflows within a few hundred steps
        let mut simulation = Simulation::new(
            Parameters {
                mass: 1e-12,
                spring_constant: 1e12,
                damping_coefficient: 0.0,
                duration: 1e6,
                ..Default::default()
            },
            Box::new(SemiImplicitEuler),
            DEFAULT_TIME_STEP,
        )
        .unwrap();
        let mut scheduler = FrameScheduler::new();
        let mut render = RecordingRenderer::default();
        let mut chart = TimeSeries::new();

        simulation.start(&mut scheduler).unwrap();
        let mut failure = None;
        while let Some(handle) = scheduler.take_due() {
            match simulation.tick(handle, &mut scheduler, &mut render, &mut chart) {
                Ok(_) => {}
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        assert!(matches!(failure, Some(SimulationError::Diverged { .. })));
        assert_eq!(simulation.lifecycle(), Lifecycle::Stopped);
        assert!(simulation.state().is_finite());
        assert!(!scheduler.is_pending());
        assert_eq!(chart.len() as u64, simulation.steps());
    }
}
