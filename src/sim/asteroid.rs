//! Asteroids: size tiers, edge spawning, spin and splitting

use glam::Vec2;
use rand::Rng;

use super::kinematic::{Bounds, KinematicState};
use crate::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small];

    /// 3 = large, 2 = medium, 1 = small
    pub fn tier(&self) -> u8 {
        match self {
            AsteroidSize::Large => 3,
            AsteroidSize::Medium => 2,
            AsteroidSize::Small => 1,
        }
    }

    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            3 => Some(AsteroidSize::Large),
            2 => Some(AsteroidSize::Medium),
            1 => Some(AsteroidSize::Small),
            _ => None,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 25.0,
            AsteroidSize::Small => 15.0,
        }
    }

    /// Grey level used to draw the outline
    pub fn shade(&self) -> u8 {
        match self {
            AsteroidSize::Large => 150,
            AsteroidSize::Medium => 120,
            AsteroidSize::Small => 90,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    pub fn split(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Spawn speed; smaller rocks are faster
    pub fn speed(&self, config: &SimulationConfig) -> f32 {
        config.asteroid_base_speed + f32::from(4 - self.tier()) * config.asteroid_speed_step
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: KinematicState,
    pub size: AsteroidSize,
    /// Degrees in [0, 360)
    pub rotation_angle: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    /// Outline variation, only used for drawing
    pub shape_seed: u8,
}

/// Rotate `v` by `degrees` (counter-clockwise in y-up terms)
fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    rng.gen_range(-max..=max)
}

impl Asteroid {
    /// A rock with random spin and outline
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        position: Vec2,
        velocity: Vec2,
        size: AsteroidSize,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            body: KinematicState::new(position, velocity, size.radius()),
            size,
            rotation_angle: rng.gen_range(0.0..360.0),
            rotation_rate: symmetric(rng, config.asteroid_max_spin),
            shape_seed: rng.gen(),
        }
    }

    /// Place a rock just outside a random screen edge, heading roughly at
    /// the center.
    pub fn spawn_at_edge<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Bounds,
        size: AsteroidSize,
        config: &SimulationConfig,
    ) -> Self {
        let r = size.radius();
        let position = match rng.gen_range(0..4) {
            0 => Vec2::new(rng.gen_range(0.0..=bounds.width), -r),
            1 => Vec2::new(bounds.width + r, rng.gen_range(0.0..=bounds.height)),
            2 => Vec2::new(rng.gen_range(0.0..=bounds.width), bounds.height + r),
            _ => Vec2::new(-r, rng.gen_range(0.0..=bounds.height)),
        };

        let toward_center = (bounds.center() - position).normalize_or_zero();
        let heading = rotate_deg(toward_center, symmetric(rng, config.spawn_deflection));
        let velocity = heading * size.speed(config);

        Self::new(rng, position, velocity, size, config)
    }

    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.body.integrate_wrapping(dt, bounds);
        self.rotation_angle = (self.rotation_angle + self.rotation_rate * dt).rem_euclid(360.0);
    }

    /// Two fragments one tier down at this position, or nothing for the
    /// smallest rocks.
    pub fn break_apart<R: Rng + ?Sized>(&self, rng: &mut R, config: &SimulationConfig) -> Vec<Asteroid> {
        let Some(next) = self.size.split() else {
            return Vec::new();
        };
        (0..2)
            .map(|_| {
                let deflection = symmetric(rng, config.split_deflection);
                let velocity = rotate_deg(self.body.velocity, deflection) * config.split_speed_factor;
                Asteroid::new(rng, self.body.position, velocity, next, config)
            })
            .collect()
    }
}
