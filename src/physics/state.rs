use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;

/// Kinematic state of the mass at one instant of a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsState {
    /// Displacement from the spring's rest position in m
    pub displacement: Scalar,
    /// Velocity in m/s
    pub velocity: Scalar,
    /// Simulated time since the run began in s
    pub elapsed: Scalar,
}

impl PhysicsState {
    pub fn new(displacement: Scalar, velocity: Scalar, elapsed: Scalar) -> Self {
        Self {
            displacement,
            velocity,
            elapsed,
        }
    }

    /// State at t = 0 for the given initial conditions
    pub fn initial(parameters: &Parameters) -> Self {
        Self::new(
            parameters.initial_displacement,
            parameters.initial_velocity,
            0.0,
        )
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.displacement.is_finite() && self.velocity.is_finite() && self.elapsed.is_finite()
    }
}
