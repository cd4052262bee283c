//! Game tunables.
//!
//! Defaults reproduce the classic game: five colors, circles/squares/triangles,
//! color buttons, three armed tags at most.

use bevy::prelude::*;
use clap::ValueEnum;

use crate::armed::{MatchRule, DEFAULT_MAX_ARMED};
use crate::palette::{ShapeColor, ShapeKind};

/// How the player arms tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmMode {
    /// On-screen buttons (and digit keys).
    #[default]
    Buttons,
    /// Click or touch a shape to arm its color and kind.
    ClickToArm,
}

/// Preset picked with `--variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GameVariant {
    /// Color buttons, classic shape set, color matching.
    #[default]
    Classic,
    /// Color and kind buttons, extended shape set.
    Extended,
    /// Click a shape to arm it, extended shape set.
    Picker,
}

impl GameVariant {
    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Classic => "classic",
            GameVariant::Extended => "extended",
            GameVariant::Picker => "picker",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub variant: GameVariant,
    pub colors: Vec<ShapeColor>,
    pub shapes: Vec<ShapeKind>,
    /// Shapes dropped at (re)start.
    pub initial_count: usize,
    /// Shapes released per spawn queue tick.
    pub spawn_batch: usize,
    pub spawn_interval_secs: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub max_armed: usize,
    /// Distance of the spawn line below the top of the arena.
    pub spawn_height: f32,
    /// Left and right spawn margin.
    pub spawn_margin: f32,
    pub arena: Vec2,
    /// Downward acceleration, pixels per second squared.
    pub gravity: f32,
    pub arm_mode: ArmMode,
    pub match_rule: MatchRule,
    /// Show a button per shape kind next to the color buttons.
    pub kind_buttons: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            variant: GameVariant::Classic,
            colors: ShapeColor::ALL.to_vec(),
            shapes: ShapeKind::CLASSIC.to_vec(),
            initial_count: 300,
            spawn_batch: 10,
            spawn_interval_secs: 0.1,
            min_size: 20.0,
            max_size: 25.0,
            max_armed: DEFAULT_MAX_ARMED,
            spawn_height: 10.0,
            spawn_margin: 50.0,
            arena: Vec2::new(800.0, 1000.0),
            gravity: 490.0,
            arm_mode: ArmMode::Buttons,
            match_rule: MatchRule::ColorOnly,
            kind_buttons: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn for_variant(variant: GameVariant) -> Self {
        let classic = GameConfig::default();
        match variant {
            GameVariant::Classic => classic,
            GameVariant::Extended => GameConfig {
                variant,
                shapes: ShapeKind::EXTENDED.to_vec(),
                match_rule: MatchRule::ColorOrKind,
                kind_buttons: true,
                ..classic
            },
            GameVariant::Picker => GameConfig {
                variant,
                shapes: ShapeKind::EXTENDED.to_vec(),
                match_rule: MatchRule::ColorOrKind,
                arm_mode: ArmMode::ClickToArm,
                ..classic
            },
        }
    }

    pub fn half_arena(&self) -> Vec2 {
        self.arena / 2.0
    }

    /// World y of the spawn line. Kept below the top wall so new bodies
    /// don't start inside it.
    pub fn spawn_y(&self, wall_thickness: f32) -> f32 {
        self.half_arena().y - wall_thickness / 2.0 - self.spawn_height - self.max_size
    }

    /// Horizontal spawn range in world coordinates.
    pub fn spawn_x_range(&self) -> std::ops::Range<f32> {
        let half = self.half_arena().x;
        (self.spawn_margin - half)..(half - self.spawn_margin)
    }
}
