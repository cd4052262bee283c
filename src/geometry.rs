//! Vertex lists shared by colliders and rendered paths.
//!
//! All points are in the shape's local space, y up, centered on the origin.

use std::f32::consts::{PI, TAU};

use bevy::math::Vec2;

/// Inner radius of a star relative to its outer radius.
pub const STAR_INNER_RATIO: f32 = 0.4;
pub const STAR_SPIKES: usize = 5;

/// Vertices of a regular polygon with circumradius `radius`, first vertex
/// straight up, counter clockwise.
pub fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = PI / 2.0 + TAU * i as f32 / sides as f32;
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Outline of a five pointed star, alternating outer and inner vertices.
///
/// Outer points sit at `radius`, inner points at
/// `radius * STAR_INNER_RATIO` half a spike further round.
pub fn star(radius: f32) -> Vec<Vec2> {
    let inner = radius * STAR_INNER_RATIO;
    let step = TAU / STAR_SPIKES as f32;
    (0..STAR_SPIKES)
        .flat_map(|i| {
            // start pointing up
            let outer_angle = PI / 2.0 + step * i as f32;
            let inner_angle = outer_angle + PI / STAR_SPIKES as f32;
            [
                Vec2::from_angle(outer_angle) * radius,
                Vec2::from_angle(inner_angle) * inner,
            ]
        })
        .collect()
}

/// Closed polyline indices for `n` vertices, `[0, 1], [1, 2], .., [n-1, 0]`.
///
/// Used to feed a (possibly concave) outline to a convex decomposition.
pub fn closed_loop_indices(n: usize) -> Vec<[u32; 2]> {
    (0..n as u32).map(|i| [i, (i + 1) % n as u32]).collect()
}

/// Even-odd point in polygon test. Works for concave outlines like the star.
pub fn contains_point(outline: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let mut prev = match outline.last() {
        Some(p) => *p,
        None => return false,
    };
    for &curr in outline {
        if (curr.y > point.y) != (prev.y > point.y) {
            let t = (point.y - curr.y) / (prev.y - curr.y);
            if point.x < curr.x + t * (prev.x - curr.x) {
                inside = !inside;
            }
        }
        prev = curr;
    }
    inside
}
