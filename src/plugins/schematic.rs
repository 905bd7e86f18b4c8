//! Schematic plugin
//!
//! Draws the wall, floor, spring, damper and mass block for the state last
//! pushed to [`RenderedState`]. Geometry is laid out in canvas coordinates
//! (origin top left, y down, one unit per pixel) by [`SchematicGeometry::at`]
//! and mapped into the world only when drawing.

use crate::config::RenderingConfig;
use crate::plugins::simulation::{RenderedState, SimulationSet};
use crate::prelude::*;
use bevy::color::palettes::css;

/// World position of the canvas center
pub const SCHEMATIC_CENTER: Vec2 = Vec2::new(170.0, 190.0);

const WALL_X: f32 = 20.0;
const WALL_TOP: f32 = 80.0;
const FLOOR_Y: f32 = 180.0;
const FLOOR_LEFT: f32 = 10.0;
const FLOOR_RIGHT: f32 = 560.0;
const SPRING_ANCHOR_X: f32 = 30.0;
const SPRING_SEGMENTS: usize = 110;
const SPRING_AMPLITUDE: f32 = 20.0;
const MASS_SIZE: Vec2 = Vec2::new(80.0, 70.0);
const DAMPER_BODY_MIN: Vec2 = Vec2::new(150.0, 140.0);
const DAMPER_BODY_SIZE: Vec2 = Vec2::new(20.0, 40.0);
const DAMPER_ROD_Y: f32 = 160.0;
const PISTON_RADIUS: f32 = 10.0;

const LINE_COLOR: Srgba = css::BLACK;
const SPRING_COLOR: Srgba = css::BLUE;
const MASS_COLOR: Srgba = css::RED;

/// Canvas size, scale and placement of the schematic
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SchematicLayout {
    pub width: f32,
    pub height: f32,
    pub pixels_per_meter: f32,
    pub center: Vec2,
}

impl From<&RenderingConfig> for SchematicLayout {
    fn from(config: &RenderingConfig) -> Self {
        Self {
            width: config.schematic_width,
            height: config.schematic_height,
            pixels_per_meter: config.pixels_per_meter,
            center: SCHEMATIC_CENTER,
        }
    }
}

impl Default for SchematicLayout {
    fn default() -> Self {
        Self::from(&RenderingConfig::default())
    }
}

impl SchematicLayout {
    /// Canvas point to world point
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        self.center + Vec2::new(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    /// Left edge of the mass block at rest
    fn mass_anchor_x(&self) -> f32 {
        self.width / 1.6
    }

    fn spring_y(&self) -> f32 {
        self.height / 1.6
    }
}

/// Axis-aligned box in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl CanvasRect {
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

/// Everything the schematic draws for one displacement
#[derive(Debug, Clone, PartialEq)]
pub struct SchematicGeometry {
    pub wall: [Vec2; 2],
    pub floor: [Vec2; 2],
    /// Zigzag from the wall anchor to the mass
    pub spring: Vec<Vec2>,
    pub mass: CanvasRect,
    pub damper_body: CanvasRect,
    pub damper_rod: [Vec2; 2],
    pub piston: Vec2,
}

impl SchematicGeometry {
    pub fn at(displacement: Scalar, layout: &SchematicLayout) -> Self {
        let mass_x = layout.mass_anchor_x() + displacement as f32 * layout.pixels_per_meter;
        let spring_y = layout.spring_y();

        let spring_start = Vec2::new(SPRING_ANCHOR_X, spring_y);
        let spring_end = Vec2::new(mass_x, spring_y);
        let step = (spring_end.x - spring_start.x) / SPRING_SEGMENTS as f32;
        let spring = std::iter::once(spring_start)
            .chain((0..SPRING_SEGMENTS).map(|i| {
                let offset = if i % 2 == 0 {
                    SPRING_AMPLITUDE
                } else {
                    -SPRING_AMPLITUDE
                };
                Vec2::new(spring_start.x + step * (i + 1) as f32, spring_y + offset)
            }))
            .chain(std::iter::once(spring_end))
            .collect();

        let piston = Vec2::new(mass_x, DAMPER_ROD_Y);

        Self {
            wall: [Vec2::new(WALL_X, WALL_TOP), Vec2::new(WALL_X, FLOOR_Y)],
            floor: [Vec2::new(FLOOR_RIGHT, FLOOR_Y), Vec2::new(FLOOR_LEFT, FLOOR_Y)],
            spring,
            mass: CanvasRect {
                min: Vec2::new(mass_x, layout.height / 1.9),
                size: MASS_SIZE,
            },
            damper_body: CanvasRect {
                min: DAMPER_BODY_MIN,
                size: DAMPER_BODY_SIZE,
            },
            damper_rod: [
                Vec2::new(DAMPER_BODY_MIN.x + DAMPER_BODY_SIZE.x, DAMPER_ROD_Y),
                piston,
            ],
            piston,
        }
    }
}

#[derive(Component)]
pub struct MassBlock;

pub struct SchematicPlugin;

impl Plugin for SchematicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SchematicLayout>();
        app.insert_resource(ClearColor(Color::srgb(0.96, 0.96, 0.96)));

        app.add_systems(Startup, (configure_layout, spawn_schematic).chain());
        app.add_systems(
            Update,
            (update_mass_block, draw_schematic).in_set(SimulationSet::Present),
        );
    }
}

fn configure_layout(mut layout: ResMut<SchematicLayout>, config: Res<SimulationConfig>) {
    *layout = SchematicLayout::from(&config.rendering);
}

fn spawn_schematic(mut commands: Commands, layout: Res<SchematicLayout>) {
    commands.spawn((Name::new("Main Camera"), Camera2d));

    let geometry = SchematicGeometry::at(0.0, &layout);
    commands.spawn((
        Name::new("Mass Block"),
        MassBlock,
        Sprite::from_color(MASS_COLOR, geometry.mass.size),
        Transform::from_translation(layout.to_world(geometry.mass.center()).extend(1.0)),
    ));
}

fn update_mass_block(
    rendered: Res<RenderedState>,
    layout: Res<SchematicLayout>,
    mut block: Single<&mut Transform, With<MassBlock>>,
) {
    if !rendered.is_changed() {
        return;
    }
    let Some(state) = rendered.state else {
        return;
    };

    let geometry = SchematicGeometry::at(state.displacement, &layout);
    let center = layout.to_world(geometry.mass.center());
    block.translation.x = center.x;
    block.translation.y = center.y;
}

fn draw_schematic(mut gizmos: Gizmos, rendered: Res<RenderedState>, layout: Res<SchematicLayout>) {
    let Some(state) = rendered.state else {
        return;
    };
    let geometry = SchematicGeometry::at(state.displacement, &layout);
    let world = |point: Vec2| layout.to_world(point);

    gizmos.line_2d(world(geometry.wall[0]), world(geometry.wall[1]), LINE_COLOR);
    gizmos.line_2d(world(geometry.floor[0]), world(geometry.floor[1]), LINE_COLOR);

    gizmos.line_2d(
        world(geometry.spring[0]),
        world(geometry.spring[geometry.spring.len() - 1]),
        SPRING_COLOR,
    );
    gizmos.linestrip_2d(geometry.spring.iter().copied().map(world), LINE_COLOR);

    gizmos.rect_2d(
        Isometry2d::from_translation(world(geometry.damper_body.center())),
        geometry.damper_body.size,
        LINE_COLOR,
    );
    gizmos.line_2d(
        world(geometry.damper_rod[0]),
        world(geometry.damper_rod[1]),
        LINE_COLOR,
    );
    gizmos.circle_2d(
        Isometry2d::from_translation(world(geometry.piston)),
        PISTON_RADIUS,
        LINE_COLOR,
    );

    gizmos.rect_2d(
        Isometry2d::from_translation(world(geometry.mass.center())),
        geometry.mass.size,
        LINE_COLOR,
    );
}
