//! Shared motion state for every entity
//!
//! Ships, bullets and rocks all embed a [`KinematicState`]; there is no
//! entity hierarchy, just this value plus the helpers below.

use glam::Vec2;

/// Playfield size in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Wrap a point onto the torus `[0, width) x [0, height)`
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }
}

/// Euclidean remainder, folding the rounding case `-tiny % dim == dim` to 0.
#[inline]
fn wrap_axis(v: f32, dim: f32) -> f32 {
    let w = v.rem_euclid(dim);
    if w >= dim {
        0.0
    } else {
        w
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl KinematicState {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Advance by `dt` seconds and wrap around the screen edges
    pub fn integrate_wrapping(&mut self, dt: f32, bounds: Bounds) {
        self.integrate(dt);
        self.position = bounds.wrap(self.position);
    }

    /// Advance by `dt` seconds without wrapping
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Circle-circle test
    pub fn overlaps(&self, other: &KinematicState) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn wraps_across_left_and_top_edges() {
        let mut body = KinematicState::new(Vec2::new(5.0, 5.0), Vec2::new(-100.0, -100.0), 1.0);
        body.integrate_wrapping(0.1, FIELD);
        assert!((body.position.x - 795.0).abs() < 1e-3);
        assert!((body.position.y - 595.0).abs() < 1e-3);
    }

    #[test]
    fn wraps_across_right_and_bottom_edges() {
        let mut body = KinematicState::new(Vec2::new(799.0, 599.0), Vec2::new(20.0, 30.0), 1.0);
        body.integrate_wrapping(0.1, FIELD);
        assert!((body.position.x - 1.0).abs() < 1e-3);
        assert!((body.position.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn tiny_negative_position_does_not_land_on_the_far_edge() {
        assert_eq!(FIELD.wrap(Vec2::new(-1e-9, -1e-9)), Vec2::ZERO);
    }

    #[test]
    fn plain_integration_leaves_the_field() {
        let mut body = KinematicState::new(Vec2::new(5.0, 5.0), Vec2::new(-100.0, 0.0), 1.0);
        body.integrate(0.1);
        assert!((body.position.x + 5.0).abs() < 1e-3);
        assert!(!FIELD.contains(body.position));
    }

    #[test]
    fn overlap_is_strict() {
        let a = KinematicState::new(Vec2::ZERO, Vec2::ZERO, 10.0);
        let touching = KinematicState::new(Vec2::new(15.0, 0.0), Vec2::ZERO, 5.0);
        let inside = KinematicState::new(Vec2::new(14.9, 0.0), Vec2::ZERO, 5.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    proptest! {
        #[test]
        fn integration_always_lands_inside_the_field(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -5000.0f32..5000.0,
            vy in -5000.0f32..5000.0,
            dt in 0.0f32..0.5,
        ) {
            let mut body = KinematicState::new(Vec2::new(x, y), Vec2::new(vx, vy), 1.0);
            body.integrate_wrapping(dt, FIELD);
            prop_assert!(body.position.x >= 0.0 && body.position.x < FIELD.width);
            prop_assert!(body.position.y >= 0.0 && body.position.y < FIELD.height);
        }
    }
}
