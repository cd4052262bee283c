//! # Components
//!
//! Nominal components to label shape states.
//!
//! Every spawned shape gets `ActiveShape` together with its `ShapeColor` and
//! `ShapeKind`. The set of entities carrying `ActiveShape` is the list of
//! shapes currently simulated. A shape leaves it only by being despawned.

use bevy::ecs::component::Component;

/// Marks a falling or resting shape body.
#[derive(Component, Debug)]
pub struct ActiveShape;

/// Circumradius (or half side for squares) the shape was built with.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShapeSize(pub f32);
