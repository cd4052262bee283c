use std::path::PathBuf;

use anyhow::Context;
use bevy::{prelude::*, window::WindowResolution};
use bevy_prototype_lyon::plugin::ShapePlugin;
use bevy_rapier2d::prelude::*;
use clap::Parser;
use itertools::Itertools;
use shape_drop::{
    AppState, ArmedTags, GameConfig, GameVariant, PausedState, ShapeKind,
    PIXELS_PER_METER,
};

mod arena;
mod arming;
mod collision;
mod debug;
mod kbd;
mod pick;
mod schedule;
mod score;
mod setup;
mod shape;
mod ui;

use shape::{ShapeRng, SpawnQueue};

/// Falling shapes arcade: arm a color or shape, matching shapes that touch
/// the floor are destroyed.
#[derive(Parser, Debug)]
#[command(name = "shape-drop", version)]
struct Cli {
    /// Game preset.
    #[arg(short, long, value_enum, default_value_t)]
    variant: GameVariant,

    /// Replace the variant's shape set, e.g. `circle,star`.
    #[arg(long, value_enum, value_delimiter = ',')]
    shapes: Option<Vec<ShapeKind>>,

    /// Shapes dropped at start and after a reset.
    #[arg(long)]
    initial_count: Option<usize>,

    /// Seed the shape generator for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Collider outlines and FPS counter.
    #[arg(long)]
    debug: bool,

    /// Write the `Update` schedule graph (graphviz dot) and exit.
    #[arg(long, value_name = "PATH")]
    dump_schedule: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::for_variant(self.variant);
        if let Some(count) = self.initial_count {
            config.initial_count = count;
        }
        if let Some(shapes) = &self.shapes {
            config.shapes = shapes.iter().copied().unique().collect();
        }
        config.seed = self.seed;
        config
    }
}

fn app(config: GameConfig, debug: bool) -> App {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Shape Drop".into(),
                name: Some("shape-drop".into()),
                resolution: WindowResolution::new(
                    config.arena.x,
                    config.arena.y,
                )
                .with_scale_factor_override(1.0),
                ..Default::default()
            }),
            ..Default::default()
        }),
    )
    .init_state::<AppState>()
    .add_sub_state::<PausedState>()
    // Physics plugins
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
        PIXELS_PER_METER,
    ))
    .add_plugins(ShapePlugin)
    .insert_resource(ArmedTags::new(config.max_armed))
    .insert_resource(ShapeRng::new(config.seed))
    .insert_resource(SpawnQueue::from_config(&config))
    .insert_resource(config)
    // my plugins
    .add_plugins((
        schedule::plugin,
        setup::plugin,
        arena::plugin,
        shape::plugin,
        arming::plugin,
        collision::plugin,
        score::plugin,
        ui::plugin,
        pick::plugin,
        kbd::plugin,
        debug::plugin,
    ));
    if debug {
        app.add_plugins(debug::overlay_plugin);
    }
    app
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    let mut app = app(config, cli.debug);

    if let Some(path) = &cli.dump_schedule {
        let dot = bevy_mod_debugdump::schedule_graph_dot(
            &mut app,
            Update,
            &bevy_mod_debugdump::schedule_graph::Settings::default(),
        );
        std::fs::write(path, dot).with_context(|| {
            format!("writing schedule graph to {}", path.display())
        })?;
        return Ok(());
    }

    app.run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_drop::ArmMode;

    #[test]
    fn cli_defaults_to_classic() {
        let cli = Cli::parse_from(["shape-drop"]);
        let config = cli.config();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from([
            "shape-drop",
            "--variant",
            "picker",
            "--initial-count",
            "40",
            "--seed",
            "7",
        ]);
        let config = cli.config();
        assert_eq!(config.arm_mode, ArmMode::ClickToArm);
        assert_eq!(config.initial_count, 40);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["shape-drop", "-v", "tetris"]).is_err());
    }

    #[test]
    fn cli_shapes_override() {
        let cli = Cli::parse_from([
            "shape-drop",
            "--variant",
            "extended",
            "--shapes",
            "circle,star,star",
        ]);
        let config = cli.config();
        assert_eq!(config.shapes, vec![ShapeKind::Circle, ShapeKind::Star]);
        // everything else still comes from the preset
        assert!(config.kind_buttons);
        assert!(Cli::try_parse_from(["shape-drop", "--shapes", "rhombus"]).is_err());
    }
}
