//! springmass prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - States and events
pub use crate::events::{Adjustment, SimulationCommand};
pub use crate::states::AppState;

// Internal re-exports - Physics
pub use crate::physics::integrators::IntegratorRegistry;
pub use crate::physics::math::Scalar;
pub use crate::physics::parameters::{ParameterField, Parameters};
pub use crate::physics::state::PhysicsState;

// Internal re-exports - Simulation loop
pub use crate::simulation::scheduler::FrameScheduler;
pub use crate::simulation::sinks::TimeSeries;
pub use crate::simulation::{Lifecycle, Simulation, SimulationError};
