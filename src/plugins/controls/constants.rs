//! Shared styling constants for controls UI
//!
//! This module defines the visual constants used across the control panel
//! to ensure consistent appearance and behavior.

use bevy::prelude::Color;

pub const BUTTON_BORDER_RADIUS_PX: f32 = 4.0;
pub const BUTTON_FONT_SIZE_PX: f32 = 12.0;
pub const BUTTON_GAP_PX: f32 = 4.0;
pub const BUTTON_MARGIN_PX: f32 = 8.0;
pub const BUTTON_PADDING_PX: f32 = 4.0;
pub const BUTTON_WIDTH_PX: f32 = 90.0;

pub const STEPPER_WIDTH_PX: f32 = 22.0;
pub const PARAMETER_LABEL_WIDTH_PX: f32 = 170.0;
pub const PARAMETER_VALUE_WIDTH_PX: f32 = 56.0;
pub const PANEL_TITLE_FONT_SIZE_PX: f32 = 16.0;

pub const BUTTON_COLOR_NORMAL: Color = Color::srgba(1.0, 1.0, 1.0, 0.05);
pub const BUTTON_COLOR_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
pub const BUTTON_COLOR_PRESSED: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);

pub const PANEL_COLOR: Color = Color::srgba(0.12, 0.12, 0.12, 0.85);
pub const VALUE_COLOR_APPLIED: Color = Color::WHITE;
/// Edited but waiting for the next start or reset
pub const VALUE_COLOR_STAGED: Color = Color::srgb(1.0, 0.8, 0.3);
