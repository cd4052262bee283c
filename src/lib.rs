//! Provides app states, the shape palette, armed tag bookkeeping and the game
//! configuration.
//!
//! Everything in here is plain data or logic with no systems attached, the
//! binary wires it into bevy plugins.

use bevy::prelude::*;

pub mod armed;
pub mod config;
pub mod geometry;
pub mod palette;

pub use armed::{ArmOutcome, ArmTag, ArmedTags, MatchRule};
pub use config::{ArmMode, GameConfig, GameVariant};
pub use palette::{ShapeColor, ShapeKind};

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Spawn arena and UI, queue the initial shapes.
    #[default]
    InitialGameSetup,
    InGame,
}

#[derive(SubStates, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[source(AppState = AppState::InGame)]
pub enum PausedState {
    Paused,
    #[default]
    Playing,
}

pub const PIXELS_PER_METER: f32 = 100.0;
