use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct ResetButton;

impl ButtonWithLabel for ResetButton {
    fn command() -> SimulationCommand {
        SimulationCommand::Reset
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Reset"
    }

    fn shortcut() -> &'static str {
        "R"
    }
}
