use bevy::{
    input::common_conditions::{input_just_pressed, input_toggle_active},
    prelude::*,
};
use bevy_dev_tools::fps_overlay::FpsOverlayPlugin;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use bevy_rapier2d::prelude::RapierDebugRenderPlugin;
use shape_drop::{ArmedTags, GameConfig};

use crate::collision::GroundContact;
use crate::pick::ChosenShape;
use crate::schedule::InGameSet;
use crate::score::Score;
use crate::shape::{components::ActiveShape, SpawnQueue, SpawnShape};

/// Reset key and world inspector (F12).
pub fn plugin(app: &mut App) {
    app.add_plugins(
        WorldInspectorPlugin::new()
            .run_if(input_toggle_active(false, KeyCode::F12)),
    )
    .add_systems(
        Update,
        request_reset
            .run_if(input_just_pressed(KeyCode::KeyR))
            .in_set(InGameSet::Input),
    )
    .observe(reset_game);
}

/// Collider outlines and an FPS counter, enabled with `--debug`.
pub fn overlay_plugin(app: &mut App) {
    app.add_plugins((
        RapierDebugRenderPlugin::default(),
        FpsOverlayPlugin::default(),
    ));
}

#[derive(Event, Debug)]
pub struct ResetGame;

fn request_reset(mut cmds: Commands) {
    cmds.trigger(ResetGame);
}

/// Despawn every shape, zero the score, forget armed tags and queue a fresh
/// initial fill. Replacements and contacts still in flight are dropped.
#[allow(clippy::too_many_arguments)]
pub fn reset_game(
    _trigger: Trigger<ResetGame>,
    mut cmds: Commands,
    shapes: Query<Entity, With<ActiveShape>>,
    mut score: ResMut<Score>,
    mut armed: ResMut<ArmedTags>,
    mut chosen: ResMut<ChosenShape>,
    mut queue: ResMut<SpawnQueue>,
    mut spawns: ResMut<Events<SpawnShape>>,
    mut contacts: ResMut<Events<GroundContact>>,
    config: Res<GameConfig>,
) {
    let mut despawned = 0;
    for shape in shapes.iter() {
        cmds.entity(shape).despawn_recursive();
        despawned += 1;
    }
    *score = Score::default();
    armed.clear();
    chosen.0 = None;
    queue.clear();
    queue.enqueue(config.initial_count);
    spawns.clear();
    contacts.clear();
    info!("reset: despawned {} shapes", despawned);
}
