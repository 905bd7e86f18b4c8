//! Physical parameters of a spring-mass-damper run
//!
//! `Parameters` holds the seven user inputs:
//! - mass, spring constant and damping coefficient,
//! - constant external force,
//! - initial displacement and velocity,
//! - duration (the stop condition for elapsed time)

use crate::physics::math::{Scalar, snap_to_step};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a parameter set cannot be simulated
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("mass must be positive, got {0} kg")]
    NonPositiveMass(Scalar),

    #[error("spring constant must not be negative, got {0} N/m")]
    NegativeSpringConstant(Scalar),

    #[error("damping coefficient must not be negative, got {0} N·s/m")]
    NegativeDamping(Scalar),

    #[error("duration must be positive, got {0} s")]
    NonPositiveDuration(Scalar),

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: ParameterField, value: Scalar },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Parameters {
    /// Mass in kg
    pub mass: Scalar,
    /// Spring constant in N/m
    pub spring_constant: Scalar,
    /// Damping coefficient in N·s/m
    pub damping_coefficient: Scalar,
    /// Constant external force in N
    pub external_force: Scalar,
    /// Displacement at t = 0 in m
    pub initial_displacement: Scalar,
    /// Velocity at t = 0 in m/s
    pub initial_velocity: Scalar,
    /// Simulated time after which a run stops, in s
    pub duration: Scalar,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mass: 1.0,
            spring_constant: 10.0,
            damping_coefficient: 0.5,
            external_force: 0.0,
            initial_displacement: 1.0,
            initial_velocity: 0.0,
            duration: 10.0,
        }
    }
}

impl Parameters {
    /// Checks that a run with these parameters is well defined.
    ///
    /// Non-finite values are reported before range violations so that a NaN
    /// mass reads as "not a number" rather than "not positive".
    pub fn validate(&self) -> Result<(), ParameterError> {
        for field in ParameterField::ALL {
            let value = field.get(self);
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field, value });
            }
        }

        if self.mass <= 0.0 {
            return Err(ParameterError::NonPositiveMass(self.mass));
        }
        if self.spring_constant < 0.0 {
            return Err(ParameterError::NegativeSpringConstant(
                self.spring_constant,
            ));
        }
        if self.damping_coefficient < 0.0 {
            return Err(ParameterError::NegativeDamping(self.damping_coefficient));
        }
        if self.duration <= 0.0 {
            return Err(ParameterError::NonPositiveDuration(self.duration));
        }

        Ok(())
    }
}

/// One editable entry of [`Parameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    Mass,
    SpringConstant,
    DampingCoefficient,
    ExternalForce,
    InitialDisplacement,
    InitialVelocity,
    Duration,
}

impl ParameterField {
    /// Fields in the order the control surface lists them
    pub const ALL: [ParameterField; 7] = [
        ParameterField::Mass,
        ParameterField::SpringConstant,
        ParameterField::DampingCoefficient,
        ParameterField::ExternalForce,
        ParameterField::InitialDisplacement,
        ParameterField::InitialVelocity,
        ParameterField::Duration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::Mass => "Mass",
            ParameterField::SpringConstant => "Spring Constant",
            ParameterField::DampingCoefficient => "Damping Coefficient",
            ParameterField::ExternalForce => "External Force",
            ParameterField::InitialDisplacement => "Initial Displacement",
            ParameterField::InitialVelocity => "Initial Velocity",
            ParameterField::Duration => "Duration",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ParameterField::Mass => "kg",
            ParameterField::SpringConstant => "N/m",
            ParameterField::DampingCoefficient => "Ns/m",
            ParameterField::ExternalForce => "N",
            ParameterField::InitialDisplacement => "m",
            ParameterField::InitialVelocity => "m/s",
            ParameterField::Duration => "s",
        }
    }

    pub fn get(&self, parameters: &Parameters) -> Scalar {
        match self {
            ParameterField::Mass => parameters.mass,
            ParameterField::SpringConstant => parameters.spring_constant,
            ParameterField::DampingCoefficient => parameters.damping_coefficient,
            ParameterField::ExternalForce => parameters.external_force,
            ParameterField::InitialDisplacement => parameters.initial_displacement,
            ParameterField::InitialVelocity => parameters.initial_velocity,
            ParameterField::Duration => parameters.duration,
        }
    }

    pub fn set(&self, parameters: &mut Parameters, value: Scalar) {
        let slot = match self {
            ParameterField::Mass => &mut parameters.mass,
            ParameterField::SpringConstant => &mut parameters.spring_constant,
            ParameterField::DampingCoefficient => &mut parameters.damping_coefficient,
            ParameterField::ExternalForce => &mut parameters.external_force,
            ParameterField::InitialDisplacement => &mut parameters.initial_displacement,
            ParameterField::InitialVelocity => &mut parameters.initial_velocity,
            ParameterField::Duration => &mut parameters.duration,
        };
        *slot = value;
    }

    /// Moves the field by `delta`, snapped to the grid of `|delta|`.
    ///
    /// Out-of-range results are allowed here; `Parameters::validate` rejects
    /// them when a run starts.
    pub fn nudge(&self, parameters: &mut Parameters, delta: Scalar) {
        let value = snap_to_step(self.get(parameters) + delta, delta.abs());
        self.set(parameters, value);
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Parameters::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_non_positive_mass() {
        let zero = Parameters {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ParameterError::NonPositiveMass(0.0)));

        let negative = Parameters {
            mass: -2.0,
            ..Default::default()
        };
        assert_eq!(
            negative.validate(),
            Err(ParameterError::NonPositiveMass(-2.0))
        );
    }

    #[test]
    fn test_validate_rejects_negative_constants_and_duration() {
        let spring = Parameters {
            spring_constant: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            spring.validate(),
            Err(ParameterError::NegativeSpringConstant(_))
        ));

        let damping = Parameters {
            damping_coefficient: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            damping.validate(),
            Err(ParameterError::NegativeDamping(_))
        ));

        let duration = Parameters {
            duration: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            duration.validate(),
            Err(ParameterError::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn test_validate_allows_zero_spring_and_damping() {
        let free = Parameters {
            spring_constant: 0.0,
            damping_coefficient: 0.0,
            ..Default::default()
        };
        assert_eq!(free.validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_non_finite_field() {
        let parameters = Parameters {
            initial_velocity: Scalar::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            parameters.validate(),
            Err(ParameterError::NonFinite {
                field: ParameterField::InitialVelocity,
                value: Scalar::INFINITY,
            })
        );

        let nan_mass = Parameters {
            mass: Scalar::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_mass.validate(),
            Err(ParameterError::NonFinite {
                field: ParameterField::Mass,
                ..
            })
        ));
    }

    #[test]
    fn test_field_accessors_cover_every_parameter() {
        let mut parameters = Parameters::default();
        for (index, field) in ParameterField::ALL.iter().enumerate() {
            field.set(&mut parameters, index as Scalar + 100.0);
        }
        for (index, field) in ParameterField::ALL.iter().enumerate() {
            assert_eq!(field.get(&parameters), index as Scalar + 100.0);
        }
    }

    #[test]
    fn test_nudge_steps_on_grid() {
        let mut parameters = Parameters::default();
        for _ in 0..3 {
            ParameterField::DampingCoefficient.nudge(&mut parameters, 0.1);
        }
        assert_eq!(parameters.damping_coefficient, 0.8);

        ParameterField::Mass.nudge(&mut parameters, -0.1);
        assert_eq!(parameters.mass, 0.9);
    }

    #[test]
    fn test_nudge_can_leave_valid_range() {
        let mut parameters = Parameters {
            mass: 0.1,
            ..Default::default()
        };
        ParameterField::Mass.nudge(&mut parameters, -0.1);
        assert_eq!(parameters.mass, 0.0);
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_field_display_includes_unit() {
        assert_eq!(
            ParameterField::SpringConstant.to_string(),
            "Spring Constant (N/m)"
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parameters: Parameters = toml::from_str("mass = 2.5\n").unwrap();
        assert_eq!(parameters.mass, 2.5);
        assert_eq!(parameters.spring_constant, 10.0);
        assert_eq!(parameters.duration, 10.0);
    }
}
