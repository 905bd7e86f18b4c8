//! Builder utilities for the control panel
//!
//! A CommandsExt trait that spawns command buttons and parameter rows with
//! the shared styling.

use crate::plugins::controls::constants::*;
use crate::prelude::*;
use bevy::ecs::hierarchy::ChildSpawnerCommands;

/// Text node showing the editable value of one parameter
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterValueText(pub ParameterField);

/// One of the -/+ buttons beside a parameter
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterStepper {
    pub field: ParameterField,
    pub direction: Adjustment,
}

impl ParameterStepper {
    pub fn command(&self) -> SimulationCommand {
        SimulationCommand::AdjustParameter {
            field: self.field,
            direction: self.direction,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.direction {
            Adjustment::Decrease => "-",
            Adjustment::Increase => "+",
        }
    }
}

pub trait ControlsCommandsExt {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self, font: &TextFont) -> Entity;

    fn spawn_parameter_row(
        &mut self,
        field: ParameterField,
        parameters: &Parameters,
        font: &TextFont,
    ) -> Entity;
}

impl ControlsCommandsExt for ChildSpawnerCommands<'_> {
    fn spawn_control_button<T: ButtonWithLabel>(&mut self, font: &TextFont) -> Entity {
        self.spawn((
            Button,
            Node {
                width: Val::Px(BUTTON_WIDTH_PX),
                height: Val::Auto,
                padding: UiRect::all(Val::Px(BUTTON_PADDING_PX)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
            BackgroundColor(BUTTON_COLOR_NORMAL),
            T::marker(),
        ))
        .with_children(|parent| {
            parent.spawn((Text::new(T::label()), TextColor(Color::WHITE), font.clone()));
        })
        .id()
    }

    fn spawn_parameter_row(
        &mut self,
        field: ParameterField,
        parameters: &Parameters,
        font: &TextFont,
    ) -> Entity {
        let stepper_node = Node {
            width: Val::Px(STEPPER_WIDTH_PX),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        };
        let decrease = ParameterStepper {
            field,
            direction: Adjustment::Decrease,
        };
        let increase = ParameterStepper {
            field,
            direction: Adjustment::Increase,
        };

        self.spawn((
            Node {
                display: Display::Flex,
                align_items: AlignItems::Center,
                column_gap: Val::Px(BUTTON_GAP_PX),
                ..default()
            },
            children![
                (
                    Node {
                        width: Val::Px(PARAMETER_LABEL_WIDTH_PX),
                        ..default()
                    },
                    Text::new(field.to_string()),
                    font.clone(),
                ),
                (
                    Button,
                    stepper_node.clone(),
                    BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
                    BackgroundColor(BUTTON_COLOR_NORMAL),
                    decrease,
                    children![(Text::new(decrease.symbol()), font.clone())],
                ),
                (
                    Node {
                        width: Val::Px(PARAMETER_VALUE_WIDTH_PX),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    Text::new(format_value(field.get(parameters))),
                    TextColor(VALUE_COLOR_APPLIED),
                    font.clone(),
                    ParameterValueText(field),
                ),
                (
                    Button,
                    stepper_node,
                    BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS_PX)),
                    BackgroundColor(BUTTON_COLOR_NORMAL),
                    increase,
                    children![(Text::new(increase.symbol()), font.clone())],
                ),
            ],
        ))
        .id()
    }
}

pub fn format_value(value: Scalar) -> String {
    format!("{value:.2}")
}

pub trait ButtonWithLabel: Component + 'static {
    /// The command this button triggers
    fn command() -> SimulationCommand;

    /// The marker component instance
    fn marker() -> Self;

    /// The base text for the button (without shortcut)
    fn base_text() -> &'static str;

    /// The keyboard shortcut for this button
    fn shortcut() -> &'static str;

    /// The base text with shortcut appended
    fn label() -> String {
        format!("{} ({})", Self::base_text(), Self::shortcut())
    }
}
