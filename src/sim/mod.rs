//! Asteroids simulation
//!
//! All gameplay logic lives here, with no terminal or input dependencies:
//! - Time is passed in as `dt` seconds
//! - Tunables come from an explicit `SimulationConfig`
//! - Randomness comes from the session's seeded RNG

pub mod asteroid;
pub mod collision;
pub mod kinematic;
pub mod projectile;
pub mod session;
pub mod ship;

pub use asteroid::{Asteroid, AsteroidSize};
pub use collision::{resolve, CollisionReport};
pub use kinematic::{Bounds, KinematicState};
pub use projectile::Projectile;
pub use session::{FrameInput, Phase, Session};
pub use ship::{forward, Ship, ShipIntent};

/// Borrowed view of any entity, for code that walks all of them at once
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Asteroid(&'a Asteroid),
    Projectile(&'a Projectile),
}

impl<'a> EntityRef<'a> {
    pub fn body(&self) -> &'a KinematicState {
        match self {
            EntityRef::Ship(s) => &s.body,
            EntityRef::Asteroid(a) => &a.body,
            EntityRef::Projectile(p) => &p.body,
        }
    }
}
