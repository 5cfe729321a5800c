//! The player's ship: rotation, thrust, drag, respawn and invulnerability

use glam::Vec2;

use super::kinematic::KinematicState;
use super::projectile::Projectile;
use crate::config::SimulationConfig;

/// What the player is holding down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipIntent {
    pub accelerating: bool,
    pub rotating_left: bool,
    pub rotating_right: bool,
}

/// Unit vector for a heading in degrees. 0 points up the screen (y-down),
/// increasing heading turns clockwise.
pub fn forward(heading: f32) -> Vec2 {
    Vec2::from_angle((heading - 90.0).to_radians())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub body: KinematicState,
    /// Degrees in [0, 360)
    pub heading: f32,
    pub lives: u32,
    /// Seconds left in the respawn window; collisions are ignored while > 0
    pub invulnerable_time: f32,
    /// Last intent applied by `update`
    pub intent: ShipIntent,
}

impl Ship {
    pub fn new(config: &SimulationConfig) -> Self {
        let center = config.bounds().center();
        Self {
            body: KinematicState::new(center, Vec2::ZERO, config.ship_radius),
            heading: 0.0,
            lives: config.starting_lives,
            invulnerable_time: 0.0,
            intent: ShipIntent::default(),
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_time > 0.0
    }

    pub fn forward(&self) -> Vec2 {
        forward(self.heading)
    }

    pub fn update(&mut self, dt: f32, intent: ShipIntent, config: &SimulationConfig) {
        self.intent = intent;

        if intent.rotating_left {
            self.heading -= config.rotation_rate * dt;
        }
        if intent.rotating_right {
            self.heading += config.rotation_rate * dt;
        }
        self.heading = self.heading.rem_euclid(360.0);
        if self.heading >= 360.0 {
            self.heading = 0.0;
        }

        if intent.accelerating {
            self.body.velocity += self.forward() * config.thrust_accel * dt;
            self.body.velocity = self.body.velocity.clamp_length_max(config.max_speed);
        } else {
            // Per frame, not per second
            self.body.velocity *= config.drag_factor;
        }

        self.body.integrate_wrapping(dt, config.bounds());

        self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
    }

    /// Back to the center, at rest, pointing up, with a fresh respawn window
    pub fn reset(&mut self, config: &SimulationConfig) {
        self.body.position = config.bounds().center();
        self.body.velocity = Vec2::ZERO;
        self.heading = 0.0;
        self.invulnerable_time = config.invulnerable_duration;
    }

    /// Lose a life unless invulnerable. Returns whether a life was lost.
    ///
    /// On the last life the ship stays where it was hit so the final frame
    /// can still be drawn.
    pub fn try_destroy(&mut self, config: &SimulationConfig) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.reset(config);
        }
        true
    }

    /// Spawn a bullet just ahead of the nose
    pub fn shoot(&self, config: &SimulationConfig) -> Projectile {
        let dir = self.forward();
        let position = self.body.position + dir * (self.body.radius * 1.5 + config.muzzle_margin);
        let velocity = self.body.velocity + dir * config.bullet_speed;
        Projectile::new(position, velocity, config)
    }
}
