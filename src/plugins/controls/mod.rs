//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin handles all user input (keyboard, command buttons and the
//! parameter editor) and translates it into SimulationCommand events. It
//! never touches the simulation directly.

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;

mod builder;
mod buttons;
mod constants;

pub use builder::{ButtonWithLabel, ParameterStepper, ParameterValueText};
use builder::{ControlsCommandsExt, format_value};
use buttons::*;
use constants::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_controls_ui);

        app.add_systems(
            Update,
            (
                keyboard_input_handler,
                button_interaction_handler::<StartButton>,
                button_interaction_handler::<StopButton>,
                button_interaction_handler::<ResetButton>,
                #[cfg(not(target_arch = "wasm32"))]
                button_interaction_handler::<QuitButton>,
                parameter_stepper_handler,
            )
                .in_set(SimulationSet::Input),
        );

        app.add_systems(
            Startup,
            start::sync_start_button_text.after(setup_controls_ui),
        );
        app.add_systems(
            Update,
            (start::sync_start_button_text, sync_parameter_values).in_set(SimulationSet::Present),
        );
    }
}

/// Maps a pressed key to its command
fn command_for_key(key: &Key) -> Option<SimulationCommand> {
    match key {
        Key::Character(c) => match c.to_lowercase().as_str() {
            "s" => Some(SimulationCommand::Start),
            "x" => Some(SimulationCommand::Stop),
            "r" => Some(SimulationCommand::Reset),
            #[cfg(not(target_arch = "wasm32"))]
            "q" => Some(SimulationCommand::Quit),
            _ => None,
        },
        Key::Space => Some(SimulationCommand::ToggleRunning),
        #[cfg(not(target_arch = "wasm32"))]
        Key::Escape => Some(SimulationCommand::Quit),
        _ => None,
    }
}

fn keyboard_input_handler(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed || event.repeat {
            continue;
        }

        if let Some(command) = command_for_key(&event.logical_key) {
            commands.write(command);
        }
    }
}

/// Shared hover/press feedback; returns true on press
fn apply_interaction(
    commands: &mut Commands,
    window: Entity,
    interaction: Interaction,
    color: &mut BackgroundColor,
) -> bool {
    let (cursor, background) = match interaction {
        Interaction::Pressed => (SystemCursorIcon::Pointer, BUTTON_COLOR_PRESSED),
        Interaction::Hovered => (SystemCursorIcon::Pointer, BUTTON_COLOR_HOVERED),
        Interaction::None => (SystemCursorIcon::Default, BUTTON_COLOR_NORMAL),
    };

    commands
        .entity(window)
        .insert(CursorIcon::System(cursor));
    *color = BackgroundColor(background);

    interaction == Interaction::Pressed
}

#[allow(clippy::type_complexity)]
fn button_interaction_handler<T: ButtonWithLabel>(
    mut commands: Commands,
    window: Single<Entity, With<Window>>,
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<T>),
    >,
    mut command_writer: EventWriter<SimulationCommand>,
) {
    for (interaction, mut color) in &mut interaction_query {
        if apply_interaction(&mut commands, *window, *interaction, &mut color) {
            command_writer.write(T::command());
        }
    }
}

#[allow(clippy::type_complexity)]
fn parameter_stepper_handler(
    mut commands: Commands,
    window: Single<Entity, With<Window>>,
    mut interaction_query: Query<
        (&Interaction, &ParameterStepper, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut command_writer: EventWriter<SimulationCommand>,
) {
    for (interaction, stepper, mut color) in &mut interaction_query {
        if apply_interaction(&mut commands, *window, *interaction, &mut color) {
            command_writer.write(stepper.command());
        }
    }
}

fn sync_parameter_values(
    simulation: Res<Simulation>,
    mut values: Query<(&ParameterValueText, &mut Text, &mut TextColor)>,
) {
    if !simulation.is_changed() {
        return;
    }

    let editable = simulation.editable_parameters();
    let applied = simulation.parameters();
    for (ParameterValueText(field), mut text, mut color) in &mut values {
        let value = field.get(editable);
        let formatted = format_value(value);
        if text.0 != formatted {
            text.0 = formatted;
        }

        let staged = value != field.get(applied);
        color.0 = if staged {
            VALUE_COLOR_STAGED
        } else {
            VALUE_COLOR_APPLIED
        };
    }
}

#[derive(Component)]
pub struct UIRoot;

fn setup_controls_ui(
    mut commands: Commands,
    simulation: Res<Simulation>,
    config: Res<SimulationConfig>,
) {
    let font = TextFont::from_font_size(config.controls.font_size);
    let title_font = TextFont::from_font_size(PANEL_TITLE_FONT_SIZE_PX);
    let button_font = TextFont::from_font_size(BUTTON_FONT_SIZE_PX);
    let parameters = *simulation.editable_parameters();

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(BUTTON_MARGIN_PX),
                left: Val::Px(BUTTON_MARGIN_PX),
                padding: UiRect::all(Val::Px(BUTTON_MARGIN_PX)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                row_gap: Val::Px(BUTTON_GAP_PX),
                ..default()
            },
            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
            BackgroundColor(PANEL_COLOR),
            UIRoot,
        ))
        .with_children(|parent| {
            parent.spawn((Text::new("Simulation Parameters"), title_font));

            for field in ParameterField::ALL {
                parent.spawn_parameter_row(field, &parameters, &font);
            }

            parent
                .spawn(Node {
                    margin: UiRect::top(Val::Px(BUTTON_MARGIN_PX)),
                    column_gap: Val::Px(BUTTON_GAP_PX),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn_control_button::<StartButton>(&button_font);
                    row.spawn_control_button::<StopButton>(&button_font);
                    row.spawn_control_button::<ResetButton>(&button_font);
                    #[cfg(not(target_arch = "wasm32"))]
                    row.spawn_control_button::<QuitButton>(&button_font);
                });
        });
}
