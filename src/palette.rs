// palette.rs

use std::fmt;

use bevy::prelude::*;
use clap::ValueEnum;

/// The five shape colors. Order matters: it is the button order and the
/// digit key order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeColor {
    Red,
    Green,
    Blue,
    Amber,
    Purple,
}

impl ShapeColor {
    pub const ALL: [ShapeColor; 5] = [
        ShapeColor::Red,
        ShapeColor::Green,
        ShapeColor::Blue,
        ShapeColor::Amber,
        ShapeColor::Purple,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            ShapeColor::Red => "#FF5252",
            ShapeColor::Green => "#4CAF50",
            ShapeColor::Blue => "#2196F3",
            ShapeColor::Amber => "#FFC107",
            ShapeColor::Purple => "#9C27B0",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ShapeColor::Red => Color::srgb_u8(0xFF, 0x52, 0x52),
            ShapeColor::Green => Color::srgb_u8(0x4C, 0xAF, 0x50),
            ShapeColor::Blue => Color::srgb_u8(0x21, 0x96, 0xF3),
            ShapeColor::Amber => Color::srgb_u8(0xFF, 0xC1, 0x07),
            ShapeColor::Purple => Color::srgb_u8(0x9C, 0x27, 0xB0),
        }
    }

    /// Position in `ALL`.
    pub fn as_idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Button text, numbered from one.
    pub fn label(self) -> String {
        format!("Color {}", self.as_idx() + 1)
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Surface properties handed to rapier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    /// Rounded corner radius, polygons only.
    pub chamfer: Option<f32>,
}

#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum,
)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Star,
    ];

    /// circle, square, triangle
    pub const CLASSIC: [ShapeKind; 3] =
        [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    /// circle, square, pentagon, hexagon
    pub const EXTENDED: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
        }
    }

    pub fn material(self) -> Material {
        let (restitution, friction, chamfer) = match self {
            ShapeKind::Circle => (0.6, 0.01, None),
            ShapeKind::Square => (0.4, 0.05, None),
            ShapeKind::Triangle => (0.5, 0.03, None),
            ShapeKind::Pentagon => (0.5, 0.04, Some(2.0)),
            ShapeKind::Hexagon => (0.45, 0.035, Some(1.0)),
            ShapeKind::Star => (0.4, 0.06, None),
        };
        Material {
            restitution,
            friction,
            chamfer,
        }
    }

    /// Number of polygon sides, `None` for shapes that aren't regular
    /// polygons.
    pub fn sides(self) -> Option<usize> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Pentagon => Some(5),
            ShapeKind::Hexagon => Some(6),
            ShapeKind::Circle | ShapeKind::Square | ShapeKind::Star => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
