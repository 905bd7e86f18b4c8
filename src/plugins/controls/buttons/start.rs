//! Start/resume button component

use crate::plugins::controls::ButtonWithLabel;
use crate::plugins::simulation::SimulationStatus;
use crate::prelude::*;

#[derive(Component, Default)]
pub struct StartButton;

impl ButtonWithLabel for StartButton {
    fn command() -> SimulationCommand {
        SimulationCommand::Start
    }

    fn marker() -> Self {
        Self
    }

    fn base_text() -> &'static str {
        "Start"
    }

    fn shortcut() -> &'static str {
        "S"
    }
}

/// A run stopped by request picks up where it left off, so the button says
/// so. A finished or failed run has nothing left to resume.
pub fn start_button_text(state: &AppState, status: &SimulationStatus) -> String {
    match (state, status) {
        (AppState::Stopped, SimulationStatus::Ready) => {
            format!("Resume ({})", StartButton::shortcut())
        }
        _ => StartButton::label(),
    }
}

pub fn sync_start_button_text(
    state: Res<State<AppState>>,
    status: Res<SimulationStatus>,
    mut initialized: Local<bool>,
    mut button_children_query: Query<&Children, With<StartButton>>,
    mut text_query: Query<&mut Text>,
) {
    // Sync on first run or when state changes
    if !*initialized || state.is_changed() || status.is_changed() {
        *initialized = true;

        for children in button_children_query.iter_mut() {
            let dynamic_text = start_button_text(state.get(), &status);

            for child in children {
                if let Ok(mut text) = text_query.get_mut(*child) {
                    *text = Text::new(dynamic_text.clone());
                    break;
                }
            }
        }
    }
}
