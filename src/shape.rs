// shape.rs
//! Random shape spawning.
//!
//! A shape is described by a `ShapeBlueprint` (color, kind, size, position)
//! rolled from `GameConfig` with the seeded `ShapeRng`. The blueprint builds
//! both the rapier collider and the lyon path from the same vertex list.
//!
//! Shapes enter the world two ways:
//! - `SpawnQueue`: the initial fill, released a batch at a time so bodies
//!   don't start on top of each other
//! - `SpawnShape`: one replacement per destroyed shape

use std::time::Duration;

use bevy::prelude::*;
use bevy_prototype_lyon::{
    draw::Fill,
    entity::{Path, ShapeBundle},
    geometry::GeometryBuilder,
    shapes::{self, RectangleOrigin},
};
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use shape_drop::{
    geometry, palette::Material, AppState, GameConfig, ShapeColor, ShapeKind,
};

pub mod components;

use crate::arena::WALL_THICKNESS;
use crate::schedule::InGameSet;
use components::*;

pub fn plugin(app: &mut App) {
    app.add_event::<SpawnShape>()
        .add_systems(
            OnEnter(AppState::InitialGameSetup),
            queue_initial_shapes,
        )
        .add_systems(
            Update,
            (spawn_requested_shapes, drain_spawn_queue).in_set(InGameSet::Spawn),
        );
}

/// Seeded when `GameConfig::seed` is set, otherwise from entropy.
#[derive(Resource, Deref, DerefMut)]
pub struct ShapeRng(pub StdRng);

impl ShapeRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ShapeRng(StdRng::seed_from_u64(seed)),
            None => ShapeRng(StdRng::from_entropy()),
        }
    }
}

/// Request one new random shape.
#[derive(Event, Debug)]
pub struct SpawnShape;

/// Shapes waiting to be dropped in.
#[derive(Resource, Debug)]
pub struct SpawnQueue {
    pending: usize,
    batch: usize,
    timer: Timer,
}

impl SpawnQueue {
    pub fn new(batch: usize, interval_secs: f32) -> Self {
        SpawnQueue {
            pending: 0,
            batch: batch.max(1),
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.spawn_batch, config.spawn_interval_secs)
    }

    pub fn enqueue(&mut self, count: usize) {
        self.pending += count;
    }

    pub fn clear(&mut self) {
        self.pending = 0;
        self.timer.reset();
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Advance the release timer, returning how many shapes to spawn now.
    pub fn tick(&mut self, delta: Duration) -> usize {
        if self.pending == 0 {
            return 0;
        }
        if !self.timer.tick(delta).just_finished() {
            return 0;
        }
        let n = self.batch.min(self.pending);
        self.pending -= n;
        n
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBlueprint {
    pub color: ShapeColor,
    pub kind: ShapeKind,
    pub size: f32,
    pub position: Vec2,
}

impl ShapeBlueprint {
    /// Roll a shape from the configured palette and shape set. `None` if
    /// either is empty.
    pub fn random(config: &GameConfig, rng: &mut impl Rng) -> Option<Self> {
        let color = *config.colors.choose(rng)?;
        let kind = *config.shapes.choose(rng)?;
        let size = if config.max_size > config.min_size {
            rng.gen_range(config.min_size..config.max_size)
        } else {
            config.min_size
        };
        let x_range = config.spawn_x_range();
        let x = if x_range.is_empty() {
            0.0
        } else {
            rng.gen_range(x_range)
        };
        let y = config.spawn_y(WALL_THICKNESS);
        Some(ShapeBlueprint {
            color,
            kind,
            size,
            position: Vec2::new(x, y),
        })
    }

    /// Outline of polygonal kinds, local space.
    fn outline(&self) -> Option<Vec<Vec2>> {
        match self.kind {
            ShapeKind::Star => Some(geometry::star(self.size)),
            kind => kind
                .sides()
                .map(|sides| geometry::regular_polygon(sides, self.size)),
        }
    }

    pub fn collider(&self) -> Option<Collider> {
        let size = self.size;
        match self.kind {
            ShapeKind::Circle => Some(Collider::ball(size)),
            ShapeKind::Square => Some(Collider::cuboid(size, size)),
            ShapeKind::Star => {
                let points = self.outline()?;
                let indices = geometry::closed_loop_indices(points.len());
                Some(Collider::convex_decomposition(&points, &indices))
            }
            _ => {
                let points = self.outline()?;
                match self.kind.material().chamfer {
                    // rounding grows the hull, shrink it back to `size`
                    Some(radius) if radius < size => {
                        let scale = (size - radius) / size;
                        let inner: Vec<Vec2> =
                            points.iter().map(|p| *p * scale).collect();
                        Collider::round_convex_hull(&inner, radius)
                    }
                    _ => Collider::convex_hull(&points),
                }
            }
        }
    }

    pub fn path(&self) -> Path {
        match self.kind {
            ShapeKind::Circle => GeometryBuilder::build_as(&shapes::Circle {
                radius: self.size,
                center: Vec2::ZERO,
            }),
            ShapeKind::Square => {
                GeometryBuilder::build_as(&shapes::Rectangle {
                    extents: Vec2::splat(self.size * 2.0),
                    origin: RectangleOrigin::Center,
                })
            }
            _ => GeometryBuilder::build_as(&shapes::Polygon {
                points: self.outline().unwrap_or_default(),
                closed: true,
            }),
        }
    }

    pub fn material(&self) -> Material {
        self.kind.material()
    }
}

/// Spawn the body for `blueprint`. Returns `None` (and spawns nothing) if
/// the collider could not be built.
pub fn spawn_shape(
    commands: &mut Commands,
    blueprint: &ShapeBlueprint,
) -> Option<Entity> {
    let Some(collider) = blueprint.collider() else {
        warn!("spawn_shape: degenerate collider for {:?}", blueprint);
        return None;
    };
    let Material {
        restitution,
        friction,
        ..
    } = blueprint.material();
    let Vec2 { x, y } = blueprint.position;

    let id = commands
        .spawn((
            ShapeBundle {
                path: blueprint.path(),
                spatial: SpatialBundle::from_transform(Transform::from_xyz(
                    x, y, 0.0,
                )),
                ..default()
            },
            Fill::color(blueprint.color.color()),
        ))
        .insert(RigidBody::Dynamic)
        .insert(collider)
        .insert(Restitution::coefficient(restitution))
        .insert(Friction::coefficient(friction))
        .insert(Sleeping::default())
        .insert(ActiveShape)
        .insert(blueprint.color)
        .insert(blueprint.kind)
        .insert(ShapeSize(blueprint.size))
        .insert(Name::new(format!("{} {}", blueprint.color, blueprint.kind)))
        .id();
    debug!("spawned {} {}: {:?}", blueprint.color, blueprint.kind, id);
    Some(id)
}

pub fn spawn_random_shape(
    commands: &mut Commands,
    config: &GameConfig,
    rng: &mut ShapeRng,
) -> Option<Entity> {
    let Some(blueprint) = ShapeBlueprint::random(config, &mut rng.0) else {
        warn!("spawn_random_shape: empty palette or shape set");
        return None;
    };
    spawn_shape(commands, &blueprint)
}

pub fn queue_initial_shapes(
    mut queue: ResMut<SpawnQueue>,
    config: Res<GameConfig>,
) {
    queue.enqueue(config.initial_count);
    info!("queued {} initial shapes", config.initial_count);
}

/// One shape per `SpawnShape`.
pub fn spawn_requested_shapes(
    mut cmds: Commands,
    mut requests: EventReader<SpawnShape>,
    config: Res<GameConfig>,
    mut rng: ResMut<ShapeRng>,
) {
    for _ in requests.read() {
        spawn_random_shape(&mut cmds, &config, &mut rng);
    }
}

pub fn drain_spawn_queue(
    mut cmds: Commands,
    time: Res<Time>,
    mut queue: ResMut<SpawnQueue>,
    config: Res<GameConfig>,
    mut rng: ResMut<ShapeRng>,
) {
    let n = queue.tick(time.delta());
    for _ in 0..n {
        spawn_random_shape(&mut cmds, &config, &mut rng);
    }
    if n > 0 && queue.pending() == 0 {
        info!("initial fill complete");
    }
}
