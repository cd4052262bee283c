// setup.rs
//! Exposes setup plugin that handles:
//!
//! - camera, scaled so the whole arena is always in view
//! - background color
//! - rapier gravity from `GameConfig`
//! - leaving `AppState::InitialGameSetup` once the arena and UI exist

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy_rapier2d::prelude::*;
use shape_drop::{AppState, GameConfig};

pub const BACKGROUND: Color = Color::srgb(
    0xf4 as f32 / 255.0,
    0xf4 as f32 / 255.0,
    0xf4 as f32 / 255.0,
);

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(BACKGROUND))
        .add_systems(Startup, (setup_graphics, configure_physics))
        .add_systems(
            Update,
            finish_setup.run_if(in_state(AppState::InitialGameSetup)),
        );
}

#[derive(Component)]
pub struct MainCamera;

fn setup_graphics(mut commands: Commands, config: Res<GameConfig>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scaling_mode = ScalingMode::AutoMin {
        min_width: config.arena.x,
        min_height: config.arena.y,
    };
    commands.spawn(camera).insert(MainCamera);
}

fn configure_physics(
    mut rapier_config: ResMut<RapierConfiguration>,
    config: Res<GameConfig>,
) {
    rapier_config.gravity = Vec2::new(0.0, -config.gravity);
    info!("{} variant, gravity {}", config.variant.name(), rapier_config.gravity);
}

/// `OnEnter(InitialGameSetup)` systems have run by the first `Update`.
fn finish_setup(mut next_state: ResMut<NextState<AppState>>) {
    info!("setup done, entering game");
    next_state.set(AppState::InGame);
}
