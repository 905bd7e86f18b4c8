//! Explicit Euler integration method (forward Euler)
//!
//! Provided for comparison with [`super::SemiImplicitEuler`]. On an undamped
//! oscillator it gains energy every step, so the mass spirals outward in
//! phase space no matter how small the step.

use super::Integrator;
use crate::physics::dynamics::{StepCoefficients, StepStability, acceleration};
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::PhysicsState;

/// Explicit Euler integrator
///
/// ```text
/// x(t+dt) = x(t) + v(t)·dt
/// v(t+dt) = v(t) + a(x(t), v(t))·dt
/// ```
///
/// The one-step map has determinant `1 − β + α` (with `α = k·dt²/m`,
/// `β = c·dt/m`), so it only contracts when damping per step outweighs
/// stiffness per step: `α < β` and `β < 2`.
#[derive(Debug, Clone, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(self.clone())
    }

    fn step(&self, state: &PhysicsState, parameters: &Parameters, dt: Scalar) -> PhysicsState {
        let acceleration = acceleration(parameters, state.displacement, state.velocity);

        // Position first, from the velocity at the start of the step
        let displacement = state.displacement + state.velocity * dt;
        let velocity = state.velocity + acceleration * dt;

        PhysicsState::new(displacement, velocity, state.elapsed + dt)
    }

    fn stability(&self, parameters: &Parameters, dt: Scalar) -> StepStability {
        let coefficients = StepCoefficients::new(parameters, dt);
        let free_motion = parameters.spring_constant == 0.0;
        if coefficients.beta < 2.0 && (free_motion || coefficients.alpha < coefficients.beta) {
            StepStability::Stable
        } else {
            StepStability::Unstable(coefficients)
        }
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["forward_euler", "euler"]
    }
}
