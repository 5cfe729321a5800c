//! Bullets fired by the ship. They fly straight, never wrap, and expire.

use glam::Vec2;

use super::kinematic::{Bounds, KinematicState};
use crate::config::SimulationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: KinematicState,
    /// Seconds
    pub remaining_lifetime: f32,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2, config: &SimulationConfig) -> Self {
        Self {
            body: KinematicState::new(position, velocity, config.bullet_radius),
            remaining_lifetime: config.bullet_lifetime,
        }
    }

    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.body.integrate(dt);
        self.remaining_lifetime -= dt;
        if !bounds.contains(self.body.position) {
            self.remaining_lifetime = 0.0;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_lifetime <= 0.0
    }
}

/// Advance every bullet and drop the ones that expired or left the field
pub fn update_all(projectiles: &mut Vec<Projectile>, dt: f32, bounds: Bounds) {
    for projectile in projectiles.iter_mut() {
        projectile.update(dt, bounds);
    }
    projectiles.retain(|p| !p.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(position: Vec2, velocity: Vec2, lifetime: f32) -> Projectile {
        let mut p = Projectile::new(position, velocity, &SimulationConfig::default());
        p.remaining_lifetime = lifetime;
        p
    }

    #[test]
    fn expires_when_lifetime_runs_out() {
        let bounds = SimulationConfig::default().bounds();
        let mut bullets = vec![bullet(Vec2::new(400.0, 300.0), Vec2::ZERO, 0.01)];
        update_all(&mut bullets, 0.02, bounds);
        assert!(bullets.is_empty());
    }

    #[test]
    fn survives_while_lifetime_remains() {
        let bounds = SimulationConfig::default().bounds();
        let mut bullets = vec![bullet(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0), 1.0)];
        update_all(&mut bullets, 0.5, bounds);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].body.position, Vec2::new(450.0, 300.0));
        assert!((bullets[0].remaining_lifetime - 0.5).abs() < 1e-6);
    }

    #[test]
    fn leaving_the_field_kills_the_bullet_instead_of_wrapping() {
        let bounds = SimulationConfig::default().bounds();
        let mut bullets = vec![
            bullet(Vec2::new(798.0, 300.0), Vec2::new(500.0, 0.0), 2.0),
            bullet(Vec2::new(400.0, 2.0), Vec2::new(0.0, -500.0), 2.0),
            bullet(Vec2::new(400.0, 300.0), Vec2::new(0.0, 500.0), 2.0),
        ];
        update_all(&mut bullets, 0.1, bounds);
        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].body.position.distance(Vec2::new(400.0, 350.0)) < 1e-3);
    }

    #[test]
    fn edge_counts_as_on_screen() {
        let bounds = SimulationConfig::default().bounds();
        let mut p = bullet(Vec2::new(800.0, 600.0), Vec2::ZERO, 2.0);
        p.update(0.1, bounds);
        assert!(!p.is_expired());
    }
}
