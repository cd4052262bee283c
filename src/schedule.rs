//! `Update` ordering for the in-game systems.
//!
//! Input produces arm requests, arming produces floor re-checks, contacts feed
//! destruction, destruction feeds spawning and the UI reflects the result.

use bevy::prelude::*;
use shape_drop::{AppState, PausedState};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InGameSet {
    Input,
    Arm,
    Collision,
    Destroy,
    Spawn,
    Ui,
}

pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            InGameSet::Input,
            InGameSet::Arm,
            InGameSet::Collision,
            InGameSet::Destroy,
            InGameSet::Spawn,
        )
            .chain()
            .run_if(in_state(PausedState::Playing)),
    )
    .configure_sets(
        Update,
        InGameSet::Ui
            .after(InGameSet::Spawn)
            .run_if(in_state(AppState::InGame)),
    );
}
