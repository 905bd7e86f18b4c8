use crate::plugins::controls::ButtonWithLabel;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct StopButton;

impl ButtonWithLabel for StopButton {
    fn command() -> SimulationCommand {
        SimulationCommand::Stop
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Stop"
    }

    fn shortcut() -> &'static str {
        "X"
    }
}
