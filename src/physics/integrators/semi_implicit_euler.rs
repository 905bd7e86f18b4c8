//! Semi-implicit Euler integration method (Euler-Cromer)

use super::Integrator;
use crate::physics::dynamics::{StepCoefficients, StepStability, acceleration};
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::PhysicsState;

/// Semi-implicit Euler integrator
///
/// Updates the velocity from the current acceleration first, then moves the
/// position with the *updated* velocity:
///
/// ```text
/// a(t)    = (F − k·x(t) − c·v(t)) / m
/// v(t+dt) = v(t) + a(t)·dt
/// x(t+dt) = x(t) + v(t+dt)·dt
/// ```
///
/// For an undamped oscillator the energy error stays bounded instead of
/// growing, which keeps long demonstrations visually faithful.
///
/// # Stability
///
/// With `α = k·dt²/m` and `β = c·dt/m` the one-step map has trace `2 − α − β`
/// and determinant `1 − β`, so iterates stay bounded while `β < 2` and
/// `α < 4 − 2β`. Undamped, this is the familiar `ω₀·dt < 2`.
#[derive(Debug, Clone, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(self.clone())
    }

    fn step(&self, state: &PhysicsState, parameters: &Parameters, dt: Scalar) -> PhysicsState {
        let acceleration = acceleration(parameters, state.displacement, state.velocity);

        // Update velocity first: v(t+dt) = v(t) + a(t) * dt
        let velocity = state.velocity + acceleration * dt;

        // Then update position using new velocity: x(t+dt) = x(t) + v(t+dt) * dt
        let displacement = state.displacement + velocity * dt;

        PhysicsState::new(displacement, velocity, state.elapsed + dt)
    }

    fn stability(&self, parameters: &Parameters, dt: Scalar) -> StepStability {
        let coefficients = StepCoefficients::new(parameters, dt);
        if coefficients.beta < 2.0 && coefficients.alpha < 4.0 - 2.0 * coefficients.beta {
            StepStability::Stable
        } else {
            StepStability::Unstable(coefficients)
        }
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "semi_implicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["symplectic_euler", "euler_cromer"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_parameters() -> Parameters {
        Parameters {
            mass: 1.0,
            spring_constant: 10.0,
            damping_coefficient: 0.5,
            external_force: 0.0,
            initial_displacement: 1.0,
            initial_velocity: 0.0,
            duration: 1.0,
        }
    }

    #[test]
    fn test_first_step_matches_reference_values() {
        let parameters = reference_parameters();
        let state = PhysicsState::initial(&parameters);
        let dt = 0.016;

        let next = SemiImplicitEuler.step(&state, &parameters, dt);

        // a = -10, so v = -0.16 and x uses the new velocity
        assert!((next.velocity - (-0.16)).abs() < 1e-15);
        assert!((next.displacement - (1.0 - 0.16 * 0.016)).abs() < 1e-15);
        assert!((next.displacement - 0.99744).abs() < 1e-12);
        assert_eq!(next.elapsed, dt);
    }

    #[test]
    fn test_step_does_not_mutate_input() {
        let parameters = reference_parameters();
        let state = PhysicsState::initial(&parameters);
        let copy = state;

        let _ = SemiImplicitEuler.step(&state, &parameters, 0.016);

        assert_eq!(state, copy);
    }

    #[test]
    fn test_position_uses_updated_velocity() {
        // Free particle under constant force: a = F/m = 2
        let parameters = Parameters {
            mass: 1.0,
            spring_constant: 0.0,
            damping_coefficient: 0.0,
            external_force: 2.0,
            ..Default::default()
        };
        let state = PhysicsState::new(0.0, 0.0, 0.0);

        let next = SemiImplicitEuler.step(&state, &parameters, 0.5);

        assert_eq!(next.velocity, 1.0);
        assert_eq!(next.displacement, 0.5);
    }

    #[test]
    fn test_energy_stays_bounded_without_damping() {
        let parameters = Parameters {
            mass: 1.0,
            spring_constant: 1.0,
            damping_coefficient: 0.0,
            external_force: 0.0,
            initial_displacement: 1.0,
            initial_velocity: 0.0,
            duration: 100.0,
        };
        let mut state = PhysicsState::initial(&parameters);
        let initial_energy = crate::physics::dynamics::mechanical_energy(&parameters, &state);

        for _ in 0..10_000 {
            state = SemiImplicitEuler.step(&state, &parameters, 0.01);
        }

        let energy = crate::physics::dynamics::mechanical_energy(&parameters, &state);
        assert!(
            (energy - initial_energy).abs() / initial_energy < 0.01,
            "Energy drifted to {energy}"
        );
    }

    #[test]
    fn test_stability_region() {
        let integrator = SemiImplicitEuler;
        assert!(
            integrator
                .stability(&reference_parameters(), 0.016)
                .is_stable()
        );

        // ω₀ = √(100000) ≈ 316 rad/s, ω₀·dt ≈ 5
        let stiff = Parameters {
            spring_constant: 100_000.0,
            ..reference_parameters()
        };
        assert!(!integrator.stability(&stiff, 0.016).is_stable());
    }

    #[test]
    fn test_unstable_parameters_diverge() {
        let stiff = Parameters {
            spring_constant: 100_000.0,
            damping_coefficient: 0.0,
            ..reference_parameters()
        };
        let mut state = PhysicsState::initial(&stiff);
        for _ in 0..200 {
            state = SemiImplicitEuler.step(&state, &stiff, 0.016);
        }
        assert!(!state.is_finite() || state.displacement.abs() > 1e6);
    }

    #[test]
    fn test_properties() {
        let integrator = SemiImplicitEuler;
        assert_eq!(integrator.name(), "semi_implicit_euler");
        assert_eq!(integrator.convergence_order(), 1);
        assert!(integrator.aliases().contains(&"symplectic_euler"));
    }
}
