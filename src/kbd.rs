use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;
use shape_drop::{AppState, ArmMode, GameConfig, PausedState, ShapeColor};

use crate::arming::ArmRequest;
use crate::schedule::InGameSet;

const DIGITS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

#[derive(Event, Debug)]
pub struct Pause;

pub fn plugin(app: &mut App) {
    app.add_event::<Pause>().add_systems(
        Update,
        (
            digit_arming
                .run_if(buttons_mode)
                .in_set(InGameSet::Input),
            (get_pause_input, toggle_pause)
                .chain()
                .run_if(in_state(AppState::InGame)),
        ),
    );
}

fn buttons_mode(config: Res<GameConfig>) -> bool {
    config.arm_mode == ArmMode::Buttons
}

/// Digit `n` selects the `n`th palette color.
pub fn digit_color(key: KeyCode) -> Option<ShapeColor> {
    DIGITS
        .iter()
        .position(|k| *k == key)
        .and_then(ShapeColor::from_idx)
}

/// Toggle the pause state, virtual time and the physics pipeline.
pub fn toggle_pause(
    mut time: ResMut<Time<Virtual>>,
    mut pause: EventReader<Pause>,
    mut next_state: ResMut<NextState<PausedState>>,
    mut rapier_config: ResMut<RapierConfiguration>,
) {
    for _ in pause.read() {
        if time.is_paused() {
            time.unpause();
            rapier_config.physics_pipeline_active = true;
            next_state.set(PausedState::Playing);
            info!("unpaused");
        } else {
            time.pause();
            rapier_config.physics_pipeline_active = false;
            next_state.set(PausedState::Paused);
            info!("paused");
        }
    }
}

/// Handle pause input in isolation so it still works while paused.
pub fn get_pause_input(
    kbd_input: Res<ButtonInput<KeyCode>>,
    mut pause: EventWriter<Pause>,
) {
    if kbd_input.just_pressed(KeyCode::Escape) {
        pause.send(Pause);
    }
}

/// Digits 1-5 arm the matching palette color, same as its button.
pub fn digit_arming(
    kbd_input: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut requests: EventWriter<ArmRequest>,
) {
    for key in kbd_input.get_just_pressed() {
        let Some(color) = digit_color(*key) else {
            continue;
        };
        if config.colors.contains(&color) {
            requests.send(ArmRequest::Toggle(color.into()));
        }
    }
}
