use crate::simulation::Lifecycle;
use bevy::prelude::*;

/// Mirrors the simulation lifecycle so UI systems can use state conditions
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl From<Lifecycle> for AppState {
    fn from(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Idle => AppState::Idle,
            Lifecycle::Running => AppState::Running,
            Lifecycle::Stopped => AppState::Stopped,
        }
    }
}
