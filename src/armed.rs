//! # Armed tags
//!
//! The player selects up to `max_armed` tags (colors or shape kinds). A shape
//! touching the ground is destroyed if it matches any of them.
//!
//! Arming a tag that is already armed disarms it instead. Arming past the cap
//! evicts the oldest tag.

use std::fmt;

use bevy::prelude::*;

use crate::palette::{ShapeColor, ShapeKind};

pub const DEFAULT_MAX_ARMED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmTag {
    Color(ShapeColor),
    Kind(ShapeKind),
}

impl From<ShapeColor> for ArmTag {
    fn from(color: ShapeColor) -> Self {
        ArmTag::Color(color)
    }
}

impl From<ShapeKind> for ArmTag {
    fn from(kind: ShapeKind) -> Self {
        ArmTag::Kind(kind)
    }
}

impl fmt::Display for ArmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmTag::Color(c) => fmt::Display::fmt(c, f),
            ArmTag::Kind(k) => fmt::Display::fmt(k, f),
        }
    }
}

/// Which tags of a shape are compared against the armed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchRule {
    #[default]
    ColorOnly,
    ColorOrKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// Tag added (possibly evicting the oldest one).
    Armed { evicted: Option<ArmTag> },
    /// Tag was already armed and has been removed.
    Disarmed,
}

/// Armed tags, oldest first. Never longer than `max`, never holds
/// duplicates.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ArmedTags {
    tags: Vec<ArmTag>,
    max: usize,
}

impl Default for ArmedTags {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ARMED)
    }
}

impl ArmedTags {
    pub fn new(max: usize) -> Self {
        ArmedTags {
            tags: Vec::with_capacity(max + 1),
            max,
        }
    }

    /// Toggle `tag`.
    pub fn arm(&mut self, tag: impl Into<ArmTag>) -> ArmOutcome {
        let tag = tag.into();
        if let Some(idx) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(idx);
            return ArmOutcome::Disarmed;
        }
        self.tags.push(tag);
        let evicted = if self.tags.len() > self.max {
            Some(self.tags.remove(0))
        } else {
            None
        };
        ArmOutcome::Armed { evicted }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: impl Into<ArmTag>) -> bool {
        self.tags.contains(&tag.into())
    }

    pub fn matches(
        &self,
        color: ShapeColor,
        kind: ShapeKind,
        rule: MatchRule,
    ) -> bool {
        match rule {
            MatchRule::ColorOnly => self.contains(color),
            MatchRule::ColorOrKind => {
                self.contains(color) || self.contains(kind)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArmTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
