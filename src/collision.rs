//! Floor contacts and shape destruction.
//!
//! Two sources report a shape touching the ground:
//! - `ground_collisions`: rapier `CollisionEvent::Started` between the ground
//!   and an active shape
//! - `recheck_ground`: after arming, every active shape currently in contact
//!   with the ground
//!
//! Both emit `GroundContact`, and `destroy_matching` decides which of those
//! shapes the armed tags take out.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use itertools::Itertools;
use shape_drop::{ArmedTags, GameConfig, ShapeColor, ShapeKind};

use crate::arena::Ground;
use crate::schedule::InGameSet;
use crate::score::Score;
use crate::shape::{components::ActiveShape, SpawnShape};

pub fn plugin(app: &mut App) {
    app.add_event::<GroundContact>()
        .add_event::<RecheckGround>()
        .add_systems(
            Update,
            (ground_collisions, recheck_ground).in_set(InGameSet::Collision),
        )
        .add_systems(Update, destroy_matching.in_set(InGameSet::Destroy));
}

/// An active shape is touching the ground.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundContact(pub Entity);

/// Look for shapes already resting on the ground.
#[derive(Event, Debug, Clone, Copy)]
pub struct RecheckGround;

/// Returns the entity of the pair that isn't `ground`, if `ground` is one of
/// them.
fn other_than(ground: Entity, a: Entity, b: Entity) -> Option<Entity> {
    if a == ground {
        Some(b)
    } else if b == ground {
        Some(a)
    } else {
        None
    }
}

pub fn ground_collisions(
    mut collisions: EventReader<CollisionEvent>,
    mut contacts: EventWriter<GroundContact>,
    ground: Query<Entity, With<Ground>>,
    shapes: Query<(), With<ActiveShape>>,
) {
    let Ok(ground) = ground.get_single() else {
        collisions.clear();
        return;
    };
    // rapier may report a pair in either order
    let touching = collisions
        .read()
        .filter_map(|event| match event {
            CollisionEvent::Started(a, b, _) => other_than(ground, *a, *b),
            CollisionEvent::Stopped(..) => None,
        })
        .filter(|e| shapes.contains(*e))
        .unique()
        .map(GroundContact)
        .collect_vec();
    contacts.send_batch(touching);
}

pub fn recheck_ground(
    mut recheck: EventReader<RecheckGround>,
    mut contacts: EventWriter<GroundContact>,
    ground: Query<Entity, With<Ground>>,
    shapes: Query<(), With<ActiveShape>>,
    rc: Res<RapierContext>,
) {
    if recheck.is_empty() {
        return;
    }
    recheck.clear();
    let Ok(ground) = ground.get_single() else {
        warn!("recheck_ground: no ground");
        return;
    };
    for pair in rc.contact_pairs_with(ground) {
        if !pair.has_any_active_contact() {
            continue;
        }
        if let Some(other) =
            other_than(ground, pair.collider1(), pair.collider2())
        {
            if shapes.contains(other) {
                contacts.send(GroundContact(other));
            }
        }
    }
}

/// Destroy every contacted shape matching the armed tags: wake sleeping
/// bodies so the pile settles, despawn, score, and request a replacement.
#[allow(clippy::too_many_arguments)]
pub fn destroy_matching(
    mut cmds: Commands,
    mut contacts: EventReader<GroundContact>,
    shapes: Query<(&ShapeColor, &ShapeKind), With<ActiveShape>>,
    mut sleepers: Query<(&RigidBody, &mut Sleeping)>,
    armed: Res<ArmedTags>,
    config: Res<GameConfig>,
    mut score: ResMut<Score>,
    mut spawns: EventWriter<SpawnShape>,
) {
    if armed.is_empty() {
        contacts.clear();
        return;
    }
    // a shape can be reported by both a collision event and a re-check
    let doomed = contacts
        .read()
        .map(|GroundContact(e)| *e)
        .unique()
        .filter_map(|e| {
            let (color, kind) = shapes.get(e).ok()?;
            armed
                .matches(*color, *kind, config.match_rule)
                .then_some((e, *color, *kind))
        })
        .collect_vec();
    if doomed.is_empty() {
        return;
    }

    for (body, mut sleeping) in sleepers.iter_mut() {
        if *body == RigidBody::Dynamic && sleeping.sleeping {
            sleeping.sleeping = false;
        }
    }

    for (entity, color, kind) in doomed {
        cmds.entity(entity).despawn_recursive();
        score.0 += 1;
        spawns.send(SpawnShape);
        info!("destroyed {} {} ({:?}), {}", color, kind, entity, score.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
    use shape_drop::{ArmTag, MatchRule};

    use crate::arena::Wall;

    fn app(match_rule: MatchRule) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<GroundContact>()
            .add_event::<SpawnShape>()
            .insert_resource(ArmedTags::new(3))
            .insert_resource(GameConfig {
                match_rule,
                ..Default::default()
            })
            .insert_resource(Score::default())
            .add_systems(Update, destroy_matching);
        app
    }

    fn spawn_shape(app: &mut App, color: ShapeColor, kind: ShapeKind) -> Entity {
        app.world_mut()
            .spawn((
                ActiveShape,
                color,
                kind,
                RigidBody::Dynamic,
                Sleeping {
                    sleeping: true,
                    ..Default::default()
                },
            ))
            .id()
    }

    fn arm(app: &mut App, tag: impl Into<ArmTag>) {
        app.world_mut().resource_mut::<ArmedTags>().arm(tag);
    }

    fn contact_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_event::<GroundContact>()
            .add_event::<RecheckGround>()
            .insert_resource(RapierContext::default())
            .add_systems(Update, (ground_collisions, recheck_ground));
        app
    }

    fn sent_contacts(app: &App) -> Vec<GroundContact> {
        app.world()
            .resource::<Events<GroundContact>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn other_than_picks_the_non_ground_entity() {
        let mut world = World::new();
        let ground = world.spawn_empty().id();
        let shape = world.spawn_empty().id();
        let wall = world.spawn_empty().id();
        assert_eq!(other_than(ground, ground, shape), Some(shape));
        assert_eq!(other_than(ground, shape, ground), Some(shape));
        assert_eq!(other_than(ground, shape, wall), None);
    }

    #[test]
    fn ground_collision_reports_each_shape_once() {
        let mut app = contact_app();
        let world = app.world_mut();
        let ground = world.spawn(Ground).id();
        let wall = world.spawn(Wall::Left).id();
        let shape = world.spawn(ActiveShape).id();
        let loose = world.spawn_empty().id();
        let flags = CollisionEventFlags::empty();
        world.send_event_batch([
            CollisionEvent::Started(ground, shape, flags),
            CollisionEvent::Started(shape, ground, flags),
            CollisionEvent::Stopped(ground, shape, flags),
            CollisionEvent::Started(wall, shape, flags),
            CollisionEvent::Started(ground, loose, flags),
        ]);
        app.update();

        assert_eq!(sent_contacts(&app), vec![GroundContact(shape)]);
    }

    #[test]
    fn stopped_and_foreign_collisions_are_ignored() {
        let mut app = contact_app();
        let world = app.world_mut();
        let ground = world.spawn(Ground).id();
        let wall = world.spawn(Wall::Right).id();
        let shape = world.spawn(ActiveShape).id();
        let loose = world.spawn_empty().id();
        let flags = CollisionEventFlags::empty();
        world.send_event_batch([
            CollisionEvent::Stopped(shape, ground, flags),
            CollisionEvent::Started(shape, wall, flags),
            CollisionEvent::Started(loose, ground, flags),
        ]);
        app.update();

        assert!(sent_contacts(&app).is_empty());
    }

    #[test]
    fn recheck_needs_a_request() {
        let mut app = contact_app();
        app.world_mut().spawn(Ground);
        app.world_mut().spawn(ActiveShape);
        app.update();
        assert!(sent_contacts(&app).is_empty());

        // nothing rests on the ground in an empty physics world
        app.world_mut().send_event(RecheckGround);
        app.update();
        assert!(sent_contacts(&app).is_empty());
    }

    #[test]
    fn matching_shape_is_destroyed_and_replaced() {
        let mut app = app(MatchRule::ColorOnly);
        let red = spawn_shape(&mut app, ShapeColor::Red, ShapeKind::Circle);
        let bystander =
            spawn_shape(&mut app, ShapeColor::Blue, ShapeKind::Square);
        arm(&mut app, ShapeColor::Red);

        app.world_mut().send_event(GroundContact(red));
        app.update();

        assert!(app.world().get_entity(red).is_none());
        assert_eq!(*app.world().resource::<Score>(), Score(1));
        assert_eq!(app.world().resource::<Events<SpawnShape>>().len(), 1);
        // everyone else got woken up
        let sleeping = app.world().get::<Sleeping>(bystander).unwrap();
        assert!(!sleeping.sleeping);
    }

    #[test]
    fn unarmed_contact_changes_nothing() {
        let mut app = app(MatchRule::ColorOnly);
        let green = spawn_shape(&mut app, ShapeColor::Green, ShapeKind::Circle);
        arm(&mut app, ShapeColor::Red);

        app.world_mut().send_event(GroundContact(green));
        app.update();

        assert!(app.world().get_entity(green).is_some());
        assert_eq!(*app.world().resource::<Score>(), Score(0));
        assert!(app.world().get::<Sleeping>(green).unwrap().sleeping);
    }

    #[test]
    fn kind_match_depends_on_rule() {
        for (rule, destroyed) in
            [(MatchRule::ColorOnly, false), (MatchRule::ColorOrKind, true)]
        {
            let mut app = app(rule);
            let star = spawn_shape(&mut app, ShapeColor::Amber, ShapeKind::Star);
            arm(&mut app, ShapeKind::Star);

            app.world_mut().send_event(GroundContact(star));
            app.update();

            assert_eq!(app.world().get_entity(star).is_none(), destroyed);
        }
    }

    #[test]
    fn duplicate_contacts_score_once() {
        let mut app = app(MatchRule::ColorOnly);
        let purple =
            spawn_shape(&mut app, ShapeColor::Purple, ShapeKind::Triangle);
        arm(&mut app, ShapeColor::Purple);

        app.world_mut().send_event(GroundContact(purple));
        app.world_mut().send_event(GroundContact(purple));
        app.update();

        assert_eq!(*app.world().resource::<Score>(), Score(1));
        assert_eq!(app.world().resource::<Events<SpawnShape>>().len(), 1);
    }

    #[test]
    fn contact_with_already_despawned_shape_is_ignored() {
        let mut app = app(MatchRule::ColorOnly);
        let red = spawn_shape(&mut app, ShapeColor::Red, ShapeKind::Square);
        arm(&mut app, ShapeColor::Red);
        app.world_mut().despawn(red);

        app.world_mut().send_event(GroundContact(red));
        app.update();

        assert_eq!(*app.world().resource::<Score>(), Score(0));
    }
}
