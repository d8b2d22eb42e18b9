//! Radial placement of skill nodes around a shared center.

use glam::DVec2;

/// A node placed at a fixed angle and distance from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillNode {
    pub id: &'static str,
    /// Degrees, clockwise from the positive x axis in screen space.
    pub angle: f64,
    pub distance: f64,
}

pub fn polar_to_cartesian(angle_degrees: f64, distance: f64) -> DVec2 {
    let rad = angle_degrees.to_radians();
    DVec2::new(rad.cos() * distance, rad.sin() * distance)
}

/// Zero gravity wobble, at most 5px horizontally and 8px vertically.
///
/// `seed_angle` is added to the phase as is (no degree conversion), so nodes at
/// different angles drift out of phase with each other.
pub fn float_offset(seed_angle: f64, now_ms: f64) -> DVec2 {
    DVec2::new(
        (now_ms * 0.001 + seed_angle).sin() * 5.0,
        (now_ms * 0.0008 + seed_angle).cos() * 8.0,
    )
}

pub fn node_position(node: &SkillNode, now_ms: f64) -> DVec2 {
    polar_to_cartesian(node.angle, node.distance) + float_offset(node.angle, now_ms)
}

pub struct RadialLayout<'a> {
    nodes: &'a [SkillNode],
}

impl<'a> RadialLayout<'a> {
    pub fn new(nodes: &'a [SkillNode]) -> Self {
        Self { nodes }
    }

    pub fn positions(&self, now_ms: f64) -> impl Iterator<Item = (&'a SkillNode, DVec2)> + 'a {
        self.nodes
            .iter()
            .map(move |node| (node, node_position(node, now_ms)))
    }
}
