//! Readout HUD
//!
//! An overlay in the top-right corner with the values the schematic shows
//! (time, displacement and velocity to two decimals) plus mechanical energy,
//! the characteristics of the current parameters and the loop status.
//!
//! Rows refresh whenever the simulation pushes a new state or changes
//! lifecycle.

use crate::physics::dynamics::{damping_ratio, mechanical_energy, natural_frequency};
use crate::plugins::simulation::{RenderedState, SimulationSet, SimulationStatus};
use crate::prelude::*;
use crate::simulation::sinks::Readout;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutField {
    Time,
    Displacement,
    Velocity,
    Energy,
    NaturalFrequency,
    DampingRatio,
    Integrator,
    Status,
}

impl ReadoutField {
    const ALL: [ReadoutField; 8] = [
        ReadoutField::Time,
        ReadoutField::Displacement,
        ReadoutField::Velocity,
        ReadoutField::Energy,
        ReadoutField::NaturalFrequency,
        ReadoutField::DampingRatio,
        ReadoutField::Integrator,
        ReadoutField::Status,
    ];

    fn title(&self) -> &'static str {
        match self {
            ReadoutField::Time => "Time",
            ReadoutField::Displacement => "Displacement",
            ReadoutField::Velocity => "Velocity",
            ReadoutField::Energy => "Energy",
            ReadoutField::NaturalFrequency => "Natural frequency",
            ReadoutField::DampingRatio => "Damping ratio",
            ReadoutField::Integrator => "Integrator",
            ReadoutField::Status => "Status",
        }
    }
}

pub fn status_text(lifecycle: Lifecycle, status: &SimulationStatus) -> String {
    match (lifecycle, status) {
        (_, SimulationStatus::Failed(error)) => format!("Error: {error}"),
        (Lifecycle::Running, _) => "Running".to_string(),
        (Lifecycle::Stopped, SimulationStatus::Completed) => "Completed".to_string(),
        (Lifecycle::Stopped, _) => "Stopped".to_string(),
        (Lifecycle::Idle, _) => "Ready".to_string(),
    }
}

fn field_text(
    field: ReadoutField,
    simulation: &Simulation,
    state: &PhysicsState,
    status: &SimulationStatus,
) -> String {
    let readout = Readout::from(state);
    let parameters = simulation.parameters();
    match field {
        ReadoutField::Time => readout.time_text(),
        ReadoutField::Displacement => readout.displacement_text(),
        ReadoutField::Velocity => readout.velocity_text(),
        ReadoutField::Energy => format!("{:.3} J", mechanical_energy(parameters, state)),
        ReadoutField::NaturalFrequency => {
            format!("{:.2} rad/s", natural_frequency(parameters))
        }
        ReadoutField::DampingRatio => damping_ratio(parameters)
            .map(|ratio| format!("{ratio:.3}"))
            .unwrap_or_else(|| "-".to_string()),
        ReadoutField::Integrator => simulation.integrator_name().to_string(),
        ReadoutField::Status => status_text(simulation.lifecycle(), status),
    }
}

pub struct ReadoutPlugin;

impl ReadoutPlugin {
    fn spawn_readout(mut commands: Commands, config: Res<SimulationConfig>) {
        let font_size = config.controls.font_size;
        let title_font = TextFont::from_font_size(font_size);
        let value_font = TextFont::from_font_size(font_size);

        let hud_node = Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            right: Val::Px(8.0),
            padding: UiRect::all(Val::Px(6.0)),
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(1.0),
            ..default()
        };
        let hud_row_node = Node {
            display: Display::Flex,
            justify_content: JustifyContent::SpaceBetween,
            column_gap: Val::Px(20.0),
            ..default()
        };

        commands
            .spawn((
                Name::new("Readout"),
                hud_node,
                BorderRadius::all(Val::Px(5.0)),
                BackgroundColor(Color::srgba(0.12, 0.12, 0.12, 0.85)),
            ))
            .with_children(|parent| {
                for field in ReadoutField::ALL {
                    parent.spawn((
                        hud_row_node.clone(),
                        children![
                            (
                                Text::new(field.title()),
                                title_font.clone(),
                                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                            ),
                            (field, Text::new("-"), value_font.clone()),
                        ],
                    ));
                }
            });
    }

    fn update_readout(
        simulation: Res<Simulation>,
        rendered: Res<RenderedState>,
        status: Res<SimulationStatus>,
        mut fields: Query<(&ReadoutField, &mut Text)>,
    ) {
        if !(rendered.is_changed() || simulation.is_changed() || status.is_changed()) {
            return;
        }
        let state = rendered.state.unwrap_or(*simulation.state());

        for (field, mut text) in &mut fields {
            let value = field_text(*field, &simulation, &state, &status);
            if text.0 != value {
                text.0 = value;
            }
        }
    }
}

impl Plugin for ReadoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::spawn_readout);
        app.add_systems(
            Update,
            Self::update_readout.in_set(SimulationSet::Present),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::create_test_app;

    #[test]
    fn test_status_text() {
        assert_eq!(
            status_text(Lifecycle::Idle, &SimulationStatus::Ready),
            "Ready"
        );
        assert_eq!(
            status_text(Lifecycle::Running, &SimulationStatus::Ready),
            "Running"
        );
        assert_eq!(
            status_text(Lifecycle::Stopped, &SimulationStatus::Completed),
            "Completed"
        );
        assert_eq!(
            status_text(Lifecycle::Stopped, &SimulationStatus::Ready),
            "Stopped"
        );

        let failed = SimulationStatus::Failed(SimulationError::Diverged {
            step: 12,
            time: 0.192,
        });
        assert!(status_text(Lifecycle::Stopped, &failed).starts_with("Error: integration diverged"));
    }

    #[test]
    fn test_readout_follows_simulation() {
        let mut app = create_test_app();
        app.add_plugins((
            SimulationPlugin::with_config(SimulationConfig::default()),
            ReadoutPlugin,
        ));
        app.update();
        app.world_mut().send_event(SimulationCommand::Start);
        app.update();

        let mut fields = app.world_mut().query::<(&ReadoutField, &Text)>();
        let mut text_of = |field: ReadoutField, app: &App| {
            fields
                .iter(app.world())
                .find(|(f, _)| **f == field)
                .map(|(_, text)| text.0.clone())
        };

        assert_eq!(
            text_of(ReadoutField::Time, &app),
            Some("0.02 s".to_string())
        );
        assert_eq!(
            text_of(ReadoutField::Displacement, &app),
            Some("1.00 m".to_string())
        );
        assert_eq!(
            text_of(ReadoutField::Velocity, &app),
            Some("-0.16 m/s".to_string())
        );
        assert_eq!(
            text_of(ReadoutField::Integrator, &app),
            Some("semi_implicit_euler".to_string())
        );
        assert_eq!(
            text_of(ReadoutField::Status, &app),
            Some("Running".to_string())
        );
    }
}
