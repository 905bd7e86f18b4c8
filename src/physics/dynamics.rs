//! Equation of motion of the damped, driven harmonic oscillator
//!
//! ```text
//! m·x'' + c·x' + k·x = F
//! ```
//!
//! Besides the acceleration used by the integrators, this module derives the
//! quantities the readout and the stability check need: natural frequency,
//! damping ratio, static equilibrium and mechanical energy.

use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::PhysicsState;

/// Acceleration `(F − k·x − c·v) / m`.
///
/// Requires `mass > 0`; callers validate parameters before stepping.
#[inline]
pub fn acceleration(parameters: &Parameters, displacement: Scalar, velocity: Scalar) -> Scalar {
    (parameters.external_force
        - parameters.spring_constant * displacement
        - parameters.damping_coefficient * velocity)
        / parameters.mass
}

/// Undamped natural angular frequency `ω₀ = √(k/m)` in rad/s
pub fn natural_frequency(parameters: &Parameters) -> Scalar {
    (parameters.spring_constant / parameters.mass).sqrt()
}

/// Damping ratio `ζ = c / (2·√(k·m))`, undefined without a spring
pub fn damping_ratio(parameters: &Parameters) -> Option<Scalar> {
    if parameters.spring_constant > 0.0 {
        Some(
            parameters.damping_coefficient
                / (2.0 * (parameters.spring_constant * parameters.mass).sqrt()),
        )
    } else {
        None
    }
}

/// Displacement at which the spring balances the external force
pub fn equilibrium_displacement(parameters: &Parameters) -> Option<Scalar> {
    if parameters.spring_constant > 0.0 {
        Some(parameters.external_force / parameters.spring_constant)
    } else {
        None
    }
}

/// Kinetic plus spring potential energy, measured from the spring's rest length
pub fn mechanical_energy(parameters: &Parameters, state: &PhysicsState) -> Scalar {
    0.5 * parameters.mass * state.velocity * state.velocity
        + 0.5 * parameters.spring_constant * state.displacement * state.displacement
}

/// Dimensionless step coefficients of a linear oscillator
///
/// `alpha = k·dt²/m` measures the spring stiffness per step and
/// `beta = c·dt/m` the damping per step. First-order schemes are stable
/// inside a region of this plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    pub alpha: Scalar,
    pub beta: Scalar,
}

impl StepCoefficients {
    pub fn new(parameters: &Parameters, dt: Scalar) -> Self {
        Self {
            alpha: parameters.spring_constant * dt * dt / parameters.mass,
            beta: parameters.damping_coefficient * dt / parameters.mass,
        }
    }
}

/// Whether a fixed step keeps the discrete oscillator bounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStability {
    Stable,
    Unstable(StepCoefficients),
}

impl StepStability {
    pub fn is_stable(&self) -> bool {
        matches!(self, StepStability::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Scalar, b: Scalar) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_acceleration_from_rest_is_spring_only() {
        let parameters = Parameters {
            mass: 2.0,
            spring_constant: 8.0,
            damping_coefficient: 0.0,
            external_force: 0.0,
            ..Default::default()
        };
        let x0 = 0.75;
        assert!(approx_eq(
            acceleration(&parameters, x0, 0.0),
            -parameters.spring_constant * x0 / parameters.mass
        ));
    }

    #[test]
    fn test_acceleration_includes_force_and_damping() {
        let parameters = Parameters {
            mass: 1.0,
            spring_constant: 10.0,
            damping_coefficient: 0.5,
            external_force: 2.0,
            ..Default::default()
        };
        // (2 - 10·0.1 - 0.5·(-2)) / 1
        assert!(approx_eq(acceleration(&parameters, 0.1, -2.0), 2.0));
    }

    #[test]
    fn test_natural_frequency_and_damping_ratio() {
        let parameters = Parameters {
            mass: 4.0,
            spring_constant: 16.0,
            damping_coefficient: 8.0,
            ..Default::default()
        };
        assert!(approx_eq(natural_frequency(&parameters), 2.0));
        // Critical damping is 2·√(k·m) = 16
        assert_eq!(damping_ratio(&parameters), Some(0.5));

        let no_spring = Parameters {
            spring_constant: 0.0,
            ..Default::default()
        };
        assert_eq!(damping_ratio(&no_spring), None);
        assert_eq!(equilibrium_displacement(&no_spring), None);
    }

    #[test]
    fn test_equilibrium_displacement() {
        let parameters = Parameters {
            spring_constant: 10.0,
            external_force: 5.0,
            ..Default::default()
        };
        assert_eq!(equilibrium_displacement(&parameters), Some(0.5));
    }

    #[test]
    fn test_mechanical_energy() {
        let parameters = Parameters {
            mass: 2.0,
            spring_constant: 10.0,
            ..Default::default()
        };
        let state = PhysicsState::new(1.0, 3.0, 0.0);
        // 0.5·2·9 + 0.5·10·1
        assert!(approx_eq(mechanical_energy(&parameters, &state), 14.0));
    }

    #[test]
    fn test_step_coefficients() {
        let parameters = Parameters {
            mass: 2.0,
            spring_constant: 100.0,
            damping_coefficient: 4.0,
            ..Default::default()
        };
        let coefficients = StepCoefficients::new(&parameters, 0.1);
        assert!(approx_eq(coefficients.alpha, 0.5));
        assert!(approx_eq(coefficients.beta, 0.2));
    }
}
