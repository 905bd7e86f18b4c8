//! Chart plugin
//!
//! Plots the displacement and velocity series of [`TimeSeries`] against time.
//! The axes refit whenever the series changes: time always starts at zero and
//! the value range always includes zero.

use crate::config::ChartConfig;
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use crate::simulation::sinks::SeriesBounds;
use bevy::color::palettes::css;
use bevy::sprite::Anchor;

/// World position of the chart center
pub const CHART_CENTER: Vec2 = Vec2::new(170.0, -150.0);

const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 32.0;
const LABEL_FONT_SIZE: f32 = 11.0;

const AXIS_COLOR: Srgba = css::DIM_GRAY;
const DISPLACEMENT_COLOR: Srgba = css::BLUE;
const VELOCITY_COLOR: Srgba = css::RED;

/// Drawing area of the plot in world coordinates
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot: Rect,
    pub show_velocity: bool,
}

impl From<&ChartConfig> for ChartLayout {
    fn from(config: &ChartConfig) -> Self {
        let half = Vec2::new(config.width, config.height) / 2.0;
        Self {
            plot: Rect::from_corners(
                CHART_CENTER - half + Vec2::new(MARGIN_LEFT, MARGIN_BOTTOM),
                CHART_CENTER + half - Vec2::new(MARGIN_RIGHT, MARGIN_TOP),
            ),
            show_velocity: config.show_velocity,
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

/// Affine map from data space `(t, value)` into the plot rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMapping {
    pub plot: Rect,
    pub max_time: Scalar,
    pub min_value: Scalar,
    pub max_value: Scalar,
}

impl PlotMapping {
    /// Fits the axes to `bounds`; an empty series gets a unit range
    pub fn fit(plot: Rect, bounds: Option<SeriesBounds>) -> Self {
        let bounds = bounds.unwrap_or(SeriesBounds {
            max_time: 1.0,
            min_value: -1.0,
            max_value: 1.0,
        });

        let mut min_value = bounds.min_value.min(0.0);
        let mut max_value = bounds.max_value.max(0.0);
        if max_value - min_value < Scalar::EPSILON {
            min_value -= 1.0;
            max_value += 1.0;
        }
        let max_time = if bounds.max_time > 0.0 {
            bounds.max_time
        } else {
            1.0
        };

        Self {
            plot,
            max_time,
            min_value,
            max_value,
        }
    }

    pub fn to_world(&self, time: Scalar, value: Scalar) -> Vec2 {
        let u = (time / self.max_time) as f32;
        let v = ((value - self.min_value) / (self.max_value - self.min_value)) as f32;
        self.plot.min + self.plot.size() * Vec2::new(u, v)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLabel {
    MaxTime,
    MinValue,
    MaxValue,
}

pub struct ChartPlugin;

impl Plugin for ChartPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChartLayout>();

        app.add_systems(Startup, (configure_layout, spawn_chart_labels).chain());
        app.add_systems(
            Update,
            (draw_chart, update_axis_labels).in_set(SimulationSet::Present),
        );
    }
}

fn configure_layout(mut layout: ResMut<ChartLayout>, config: Res<SimulationConfig>) {
    *layout = ChartLayout::from(&config.chart);
}

fn spawn_chart_labels(mut commands: Commands, layout: Res<ChartLayout>) {
    let font = TextFont::from_font_size(LABEL_FONT_SIZE);
    let plot = layout.plot;
    let text_color = TextColor(Color::BLACK);

    let static_labels = [
        (
            "Time (s)",
            Vec2::new(plot.center().x, plot.min.y - 22.0),
            Anchor::Center,
        ),
        (
            "Displacement (m)",
            Vec2::new(plot.min.x, plot.max.y + 16.0),
            Anchor::CenterLeft,
        ),
    ];
    for (text, position, anchor) in static_labels {
        commands.spawn((
            Text2d::new(text),
            font.clone(),
            text_color,
            anchor,
            Transform::from_translation(position.extend(1.0)),
        ));
    }

    if layout.show_velocity {
        commands.spawn((
            Text2d::new("Velocity (m/s)"),
            font.clone(),
            TextColor(VELOCITY_COLOR.into()),
            Anchor::CenterRight,
            Transform::from_translation(Vec2::new(plot.max.x, plot.max.y + 16.0).extend(1.0)),
        ));
    }

    let axis_labels = [
        (
            AxisLabel::MaxTime,
            Vec2::new(plot.max.x, plot.min.y - 8.0),
            Anchor::TopRight,
        ),
        (
            AxisLabel::MinValue,
            Vec2::new(plot.min.x - 6.0, plot.min.y),
            Anchor::CenterRight,
        ),
        (
            AxisLabel::MaxValue,
            Vec2::new(plot.min.x - 6.0, plot.max.y),
            Anchor::CenterRight,
        ),
    ];
    for (label, position, anchor) in axis_labels {
        commands.spawn((
            label,
            Text2d::new("-"),
            font.clone(),
            text_color,
            anchor,
            Transform::from_translation(position.extend(1.0)),
        ));
    }
}

fn draw_chart(mut gizmos: Gizmos, series: Res<TimeSeries>, layout: Res<ChartLayout>) {
    let mapping = PlotMapping::fit(layout.plot, series.bounds());
    let plot = layout.plot;

    gizmos.line_2d(plot.min, Vec2::new(plot.min.x, plot.max.y), AXIS_COLOR);
    gizmos.line_2d(plot.min, Vec2::new(plot.max.x, plot.min.y), AXIS_COLOR);

    let zero = mapping.to_world(0.0, 0.0).y;
    gizmos.line_2d(
        Vec2::new(plot.min.x, zero),
        Vec2::new(plot.max.x, zero),
        AXIS_COLOR.with_alpha(0.4),
    );

    if series.len() < 2 {
        return;
    }

    gizmos.linestrip_2d(
        series
            .samples()
            .iter()
            .map(|sample| mapping.to_world(sample.time, sample.displacement)),
        DISPLACEMENT_COLOR,
    );
    if layout.show_velocity {
        gizmos.linestrip_2d(
            series
                .samples()
                .iter()
                .map(|sample| mapping.to_world(sample.time, sample.velocity)),
            VELOCITY_COLOR,
        );
    }
}

fn update_axis_labels(
    series: Res<TimeSeries>,
    layout: Res<ChartLayout>,
    mut last_revision: Local<Option<u64>>,
    mut labels: Query<(&AxisLabel, &mut Text2d)>,
) {
    if *last_revision == Some(series.revision()) {
        return;
    }
    *last_revision = Some(series.revision());

    let mapping = PlotMapping::fit(layout.plot, series.bounds());
    for (label, mut text) in &mut labels {
        text.0 = match label {
            AxisLabel::MaxTime => format!("{:.2}", mapping.max_time),
            AxisLabel::MinValue => format!("{:.2}", mapping.min_value),
            AxisLabel::MaxValue => format!("{:.2}", mapping.max_value),
        };
    }
}
