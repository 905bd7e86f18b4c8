//! Centralized event definitions
//!
//! Every user intent, whether it comes from a button, a key or the command
//! line, is turned into a [`SimulationCommand`] and handled in one place by
//! the simulation plugin.

use crate::physics::math::Scalar;
use crate::physics::parameters::ParameterField;
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    Start,
    Stop,
    Reset,
    ToggleRunning,
    AdjustParameter {
        field: ParameterField,
        direction: Adjustment,
    },
    Quit,
}

/// Direction of a parameter -/+ press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjustment {
    Decrease,
    Increase,
}

impl Adjustment {
    pub fn signum(self) -> Scalar {
        match self {
            Adjustment::Decrease => -1.0,
            Adjustment::Increase => 1.0,
        }
    }
}
