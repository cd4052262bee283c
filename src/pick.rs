//! Click-to-arm.
//!
//! A click or touch on a shape replaces the armed tags with that shape's
//! color and kind, and remembers it for the armed info panel.

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_rapier2d::prelude::*;
use shape_drop::{ArmMode, GameConfig, ShapeColor, ShapeKind};

use crate::arming::ArmRequest;
use crate::schedule::InGameSet;
use crate::setup::MainCamera;
use crate::shape::components::ActiveShape;

pub fn plugin(app: &mut App) {
    app.insert_resource(ChosenShape::default()).add_systems(
        Update,
        pick_shape.run_if(click_to_arm).in_set(InGameSet::Input),
    );
}

/// Color and kind of the last picked shape.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChosenShape(pub Option<(ShapeColor, ShapeKind)>);

pub fn click_to_arm(config: Res<GameConfig>) -> bool {
    config.arm_mode == ArmMode::ClickToArm
}

/// Arm requests for picking a shape: forget everything, then arm its color
/// and its kind.
pub fn pick_requests(color: ShapeColor, kind: ShapeKind) -> [ArmRequest; 3] {
    [
        ArmRequest::Clear,
        ArmRequest::Toggle(color.into()),
        ArmRequest::Toggle(kind.into()),
    ]
}

/// Window position of a click or touch started this frame.
fn pointer_pressed(
    mouse: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> Option<Vec2> {
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(position) = window.cursor_position() {
            return Some(position);
        }
    }
    touches.iter_just_pressed().next().map(|t| t.position())
}

#[allow(clippy::too_many_arguments)]
pub fn pick_shape(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    rc: Res<RapierContext>,
    shapes: Query<(&ShapeColor, &ShapeKind), With<ActiveShape>>,
    mut requests: EventWriter<ArmRequest>,
    mut chosen: ResMut<ChosenShape>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(screen) = pointer_pressed(&mouse, &touches, window) else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        warn!("pick_shape: no camera");
        return;
    };
    let Some(point) = camera.viewport_to_world_2d(camera_transform, screen)
    else {
        return;
    };

    pick_at(&rc, &shapes, point, &mut requests, &mut chosen);
}

/// Active shape under `point`. Fixed bodies (ground, walls) are skipped.
pub fn shape_at(
    rc: &RapierContext,
    shapes: &Query<(&ShapeColor, &ShapeKind), With<ActiveShape>>,
    point: Vec2,
) -> Option<(Entity, ShapeColor, ShapeKind)> {
    let mut hit = None;
    rc.intersections_with_point(point, QueryFilter::only_dynamic(), |e| {
        if shapes.contains(e) {
            hit = Some(e);
            false
        } else {
            true
        }
    });
    let entity = hit?;
    let (&color, &kind) = shapes.get(entity).ok()?;
    Some((entity, color, kind))
}

/// Arm the shape under `point`. Empty space leaves the armed tags and the
/// chosen shape alone.
pub fn pick_at(
    rc: &RapierContext,
    shapes: &Query<(&ShapeColor, &ShapeKind), With<ActiveShape>>,
    point: Vec2,
    requests: &mut EventWriter<ArmRequest>,
    chosen: &mut ResMut<ChosenShape>,
) -> Option<Entity> {
    let Some((entity, color, kind)) = shape_at(rc, shapes, point) else {
        debug!("pick_shape: nothing at {}", point);
        return None;
    };
    info!("picked {} {}", color, kind);
    requests.send_batch(pick_requests(color, kind));
    chosen.0 = Some((color, kind));
    Some(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::scene::ScenePlugin;
    use shape_drop::{ArmTag, ArmedTags};

    #[test]
    fn picking_replaces_armed_tags() {
        let mut armed = ArmedTags::new(3);
        armed.arm(ShapeColor::Red);
        armed.arm(ShapeColor::Blue);

        for request in pick_requests(ShapeColor::Amber, ShapeKind::Pentagon) {
            match request {
                ArmRequest::Clear => armed.clear(),
                ArmRequest::Toggle(tag) => {
                    armed.arm(tag);
                }
            }
        }

        let tags: Vec<_> = armed.iter().copied().collect();
        assert_eq!(
            tags,
            vec![
                ArmTag::Color(ShapeColor::Amber),
                ArmTag::Kind(ShapeKind::Pentagon)
            ]
        );
    }

    #[test]
    fn click_to_arm_follows_config() {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        let system = world.register_system(click_to_arm);
        assert!(!world.run_system(system).unwrap());

        world.insert_resource(GameConfig {
            arm_mode: ArmMode::ClickToArm,
            ..Default::default()
        });
        assert!(world.run_system(system).unwrap());
    }

    fn physics_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin::default(),
            ScenePlugin,
            TransformPlugin,
            HierarchyPlugin,
        ))
        .init_asset::<Mesh>()
        .insert_resource(RapierConfiguration {
            gravity: Vec2::ZERO,
            ..RapierConfiguration::new(1.0)
        })
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_event::<ArmRequest>()
        .insert_resource(ChosenShape(Some((
            ShapeColor::Green,
            ShapeKind::Square,
        ))));

        let ball = app
            .world_mut()
            .spawn((
                ActiveShape,
                ShapeColor::Blue,
                ShapeKind::Circle,
                RigidBody::Dynamic,
                Collider::ball(20.0),
                TransformBundle::from(Transform::from_xyz(100.0, 0.0, 0.0)),
            ))
            .id();
        app.world_mut().spawn((
            RigidBody::Fixed,
            Collider::cuboid(40.0, 20.0),
            TransformBundle::from(Transform::from_xyz(-100.0, 0.0, 0.0)),
        ));
        // colliders are created and the query pipeline refreshed in PostUpdate
        for _ in 0..3 {
            app.update();
        }
        (app, ball)
    }

    fn click(app: &mut App, point: Vec2) -> Option<Entity> {
        app.world_mut().run_system_once(
            move |rc: Res<RapierContext>,
                  shapes: Query<(&ShapeColor, &ShapeKind), With<ActiveShape>>,
                  mut requests: EventWriter<ArmRequest>,
                  mut chosen: ResMut<ChosenShape>| {
                pick_at(&rc, &shapes, point, &mut requests, &mut chosen)
            },
        )
    }

    fn arm_requests(app: &App) -> usize {
        app.world().resource::<Events<ArmRequest>>().len()
    }

    #[test]
    fn clicking_a_shape_arms_it() {
        let (mut app, ball) = physics_app();
        assert_eq!(click(&mut app, Vec2::new(105.0, 5.0)), Some(ball));
        assert_eq!(arm_requests(&app), 3);
        assert_eq!(
            *app.world().resource::<ChosenShape>(),
            ChosenShape(Some((ShapeColor::Blue, ShapeKind::Circle)))
        );
    }

    #[test]
    fn clicking_empty_space_changes_nothing() {
        let (mut app, _) = physics_app();
        let before = *app.world().resource::<ChosenShape>();
        // nothing there, then the fixed body
        for point in [Vec2::new(0.0, 300.0), Vec2::new(-100.0, 0.0)] {
            assert_eq!(click(&mut app, point), None);
        }
        assert_eq!(arm_requests(&app), 0);
        assert_eq!(*app.world().resource::<ChosenShape>(), before);
    }
}
