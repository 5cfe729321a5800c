//! Session state machine: owns the populations, score and level

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::collision::{self, CollisionReport};
use super::projectile::{self, Projectile};
use super::ship::{Ship, ShipIntent};
use super::EntityRef;
use crate::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Simulation frozen, waiting for a restart
    GameOver,
}

/// Commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub intent: ShipIntent,
    /// Edge-triggered
    pub fire: bool,
    /// Edge-triggered, only honored after game over
    pub restart: bool,
}

pub struct Session {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub asteroids: Vec<Asteroid>,
    pub score: u32,
    /// Starts at 1
    pub level: u32,
    pub phase: Phase,
    config: SimulationConfig,
    rng: StdRng,
}

impl Session {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        let mut session = Self {
            ship: Ship::new(&config),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            level: 1,
            phase: Phase::Playing,
            config,
            rng: StdRng::seed_from_u64(seed),
        };
        session.spawn_wave();
        session
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Fresh ship, score and first wave. The RNG carries on so consecutive
    /// games differ.
    pub fn restart(&mut self) {
        self.ship = Ship::new(&self.config);
        self.projectiles.clear();
        self.asteroids.clear();
        self.score = 0;
        self.level = 1;
        self.phase = Phase::Playing;
        self.spawn_wave();
        info!("session restarted");
    }

    /// Fire a bullet if the ship is still alive. No cooldown.
    pub fn fire(&mut self) -> bool {
        if self.is_game_over() || self.ship.lives == 0 {
            return false;
        }
        self.projectiles.push(self.ship.shoot(&self.config));
        true
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32, input: &FrameInput) {
        if self.is_game_over() {
            if input.restart {
                self.restart();
            }
            return;
        }

        if input.fire {
            self.fire();
        }

        let bounds = self.config.bounds();
        self.ship.update(dt, input.intent, &self.config);
        projectile::update_all(&mut self.projectiles, dt, bounds);
        for asteroid in &mut self.asteroids {
            asteroid.update(dt, bounds);
        }

        let report = collision::resolve(
            &mut self.ship,
            &mut self.projectiles,
            &mut self.asteroids,
            &mut self.rng,
            &self.config,
        );
        self.apply(report);

        if self.asteroids.is_empty() && self.ship.lives > 0 {
            self.level += 1;
            info!("wave cleared, advancing to level {}", self.level);
            self.spawn_wave();
            self.ship.reset(&self.config);
        }

        if self.ship.lives == 0 {
            self.phase = Phase::GameOver;
            info!("game over at level {} with {} points", self.level, self.score);
        }
    }

    fn apply(&mut self, report: CollisionReport) {
        self.score += report.points;
        if report.ship_destroyed {
            info!("ship destroyed, {} lives left", self.ship.lives);
        }
    }

    fn spawn_wave(&mut self) {
        let count = self.config.wave_size(self.level);
        let bounds = self.config.bounds();
        for _ in 0..count {
            let asteroid = Asteroid::spawn_at_edge(&mut self.rng, bounds, AsteroidSize::Large, &self.config);
            self.asteroids.push(asteroid);
        }
        info!("level {}: spawned {} asteroids", self.level, count);
    }

    /// Everything the renderer needs to draw, ship first
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Ship(&self.ship))
            .chain(self.asteroids.iter().map(EntityRef::Asteroid))
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
    }
}
