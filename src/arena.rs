// arena.rs

use bevy::prelude::*;
use bevy_prototype_lyon::{
    draw::Fill,
    entity::ShapeBundle,
    geometry::GeometryBuilder,
    shapes::{self},
};
use bevy_rapier2d::prelude::*;
use shape_drop::{AppState, GameConfig};

pub const WALL_THICKNESS: f32 = 20.0;
pub const GROUND_THICKNESS: f32 = 60.0;
/// Ground center sits this far above the bottom edge of the arena.
const GROUND_LIFT: f32 = 10.0;
/// Overhang past the arena width so corners are closed.
const OVERHANG: f32 = 10.0;

const GROUND_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const WALL_COLOR: Color = Color::srgb(0.75, 0.75, 0.75);

/// The floor. Shapes touching it are checked against the armed tags.
#[derive(Component)]
pub struct Ground;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Left,
    Right,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(AppState::InitialGameSetup), spawn_arena);
}

/// Ground center and half extents for an arena of size `arena`.
pub fn ground_placement(arena: Vec2) -> (Vec2, Vec2) {
    let center = Vec2::new(0.0, -arena.y / 2.0 + GROUND_LIFT);
    let half_extents =
        Vec2::new((arena.x + OVERHANG) / 2.0, GROUND_THICKNESS / 2.0);
    (center, half_extents)
}

impl Wall {
    /// Wall center and half extents for an arena of size `arena`.
    pub fn placement(self, arena: Vec2) -> (Vec2, Vec2) {
        let half = arena / 2.0;
        match self {
            Wall::Top => (
                Vec2::new(0.0, half.y),
                Vec2::new((arena.x + OVERHANG) / 2.0, WALL_THICKNESS / 2.0),
            ),
            Wall::Left => (
                Vec2::new(-half.x, 0.0),
                Vec2::new(WALL_THICKNESS / 2.0, half.y),
            ),
            Wall::Right => (
                Vec2::new(half.x, 0.0),
                Vec2::new(WALL_THICKNESS / 2.0, half.y),
            ),
        }
    }
}

fn static_block(center: Vec2, half_extents: Vec2, color: Color) -> impl Bundle {
    let rect = shapes::Rectangle {
        extents: half_extents * 2.0,
        ..Default::default()
    };
    (
        ShapeBundle {
            path: GeometryBuilder::build_as(&rect),
            spatial: SpatialBundle::from_transform(Transform::from_xyz(
                center.x, center.y, 0.0,
            )),
            ..default()
        },
        Fill::color(color),
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y),
    )
}

pub fn spawn_arena(mut commands: Commands, config: Res<GameConfig>) {
    let (center, half_extents) = ground_placement(config.arena);
    /* Create the ground. */
    let ground = commands
        .spawn(static_block(center, half_extents, GROUND_COLOR))
        .insert(ActiveEvents::COLLISION_EVENTS)
        .insert(Ground)
        .insert(Name::new("ground"))
        .id();
    info!("spawned ground: {:?}", ground);

    for wall in [Wall::Top, Wall::Left, Wall::Right] {
        let (center, half_extents) = wall.placement(config.arena);
        commands
            .spawn(static_block(center, half_extents, WALL_COLOR))
            .insert(wall)
            .insert(Name::new(format!("{wall:?} wall")));
    }
}
