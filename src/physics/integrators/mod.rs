//! Fixed-step integration methods for the spring-mass-damper
//!
//! Both methods are first order and evaluate the acceleration once per step.
//! They differ only in whether the position update sees the old or the new
//! velocity.

use crate::physics::dynamics::StepStability;
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::PhysicsState;

pub mod explicit_euler;
pub mod registry;
pub mod semi_implicit_euler;

pub use explicit_euler::ExplicitEuler;
pub use registry::{IntegratorRegistry, RegistryError};
pub use semi_implicit_euler::SemiImplicitEuler;

/// Advances a [`PhysicsState`] by one fixed time step
///
/// Implementations are stateless: `step` is a pure function of its inputs.
pub trait Integrator: Send + Sync {
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Produce the state one step of `dt` after `state`
    ///
    /// # Arguments
    /// * `state` - State at time `t`
    /// * `parameters` - Physical constants; `mass` must be positive
    /// * `dt` - Time step
    fn step(&self, state: &PhysicsState, parameters: &Parameters, dt: Scalar) -> PhysicsState;

    /// Whether repeated steps of `dt` stay bounded for these parameters
    fn stability(&self, parameters: &Parameters, dt: Scalar) -> StepStability;

    fn convergence_order(&self) -> usize;

    /// Canonical name used in configuration and on the command line
    fn name(&self) -> &'static str;

    fn aliases(&self) -> Vec<&'static str> {
        vec![]
    }
}
