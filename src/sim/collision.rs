//! Per-frame collision resolution
//!
//! Nothing is removed from a population while it is being scanned: hits are
//! collected into index lists and applied once the scan is done.

use log::debug;
use rand::Rng;

use super::asteroid::Asteroid;
use super::projectile::Projectile;
use super::ship::Ship;
use crate::config::SimulationConfig;

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub points: u32,
    pub asteroids_destroyed: u32,
    pub ship_destroyed: bool,
}

/// Resolve bullet hits first, then ship impacts.
pub fn resolve<R: Rng + ?Sized>(
    ship: &mut Ship,
    projectiles: &mut Vec<Projectile>,
    asteroids: &mut Vec<Asteroid>,
    rng: &mut R,
    config: &SimulationConfig,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut bullets_to_remove: Vec<usize> = Vec::new();
    let mut asteroids_to_remove: Vec<usize> = Vec::new();
    let mut fragments: Vec<Asteroid> = Vec::new();

    for (bi, bullet) in projectiles.iter().enumerate() {
        for (ai, asteroid) in asteroids.iter().enumerate() {
            if asteroids_to_remove.contains(&ai) {
                continue;
            }
            if bullet.body.overlaps(&asteroid.body) {
                report.points += asteroid.size.points();
                report.asteroids_destroyed += 1;
                bullets_to_remove.push(bi);
                asteroids_to_remove.push(ai);
                fragments.extend(asteroid.break_apart(rng, config));
                debug!(
                    "tier {} asteroid shot at ({:.0}, {:.0})",
                    asteroid.size.tier(),
                    asteroid.body.position.x,
                    asteroid.body.position.y
                );
                break;
            }
        }
    }

    remove_indices(projectiles, &bullets_to_remove);
    remove_indices(asteroids, &asteroids_to_remove);
    asteroids.extend(fragments);

    if !ship.is_invulnerable() {
        let hit = asteroids.iter().position(|a| ship.body.overlaps(&a.body));
        if let Some(ai) = hit {
            report.ship_destroyed = ship.try_destroy(config);
            // Consumed whole, no fragments
            asteroids.remove(ai);
            report.asteroids_destroyed += 1;
        }
    }

    report
}

/// Drop the elements at `indices` (each index at most once), keeping order.
fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut i = 0;
    items.retain(|_| {
        let keep = !indices.contains(&i);
        i += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::AsteroidSize;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        config: SimulationConfig,
        rng: StdRng,
        ship: Ship,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SimulationConfig::default();
            let mut ship = Ship::new(&config);
            // Park the ship in a corner, out of the way
            ship.body.position = Vec2::new(700.0, 500.0);
            Self {
                rng: StdRng::seed_from_u64(5),
                ship,
                config,
            }
        }

        fn rock(&mut self, size: AsteroidSize, x: f32, y: f32) -> Asteroid {
            Asteroid::new(&mut self.rng, Vec2::new(x, y), Vec2::new(10.0, 0.0), size, &self.config)
        }

        fn bullet(&self, x: f32, y: f32) -> Projectile {
            Projectile::new(Vec2::new(x, y), Vec2::ZERO, &self.config)
        }

        fn resolve(&mut self, projectiles: &mut Vec<Projectile>, asteroids: &mut Vec<Asteroid>) -> CollisionReport {
            resolve(&mut self.ship, projectiles, asteroids, &mut self.rng, &self.config)
        }
    }

    #[test]
    fn bullet_splits_large_rock_and_scores() {
        let mut fx = Fixture::new();
        let mut bullets = vec![fx.bullet(100.0, 100.0), fx.bullet(300.0, 300.0)];
        let mut rocks = vec![fx.rock(AsteroidSize::Large, 105.0, 100.0)];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert_eq!(report.points, 20);
        assert_eq!(report.asteroids_destroyed, 1);
        assert!(!report.ship_destroyed);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].body.position, Vec2::new(300.0, 300.0));
        assert_eq!(rocks.len(), 2);
        assert!(rocks.iter().all(|r| r.size == AsteroidSize::Medium));
    }

    #[test]
    fn one_bullet_destroys_at_most_one_rock() {
        let mut fx = Fixture::new();
        let mut bullets = vec![fx.bullet(100.0, 100.0)];
        let mut rocks = vec![
            fx.rock(AsteroidSize::Small, 100.0, 100.0),
            fx.rock(AsteroidSize::Small, 102.0, 100.0),
        ];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert_eq!(report.points, 100);
        assert!(bullets.is_empty());
        assert_eq!(rocks.len(), 1);
        assert_eq!(rocks[0].body.position, Vec2::new(102.0, 100.0));
    }

    #[test]
    fn two_bullets_on_one_rock_only_use_one_bullet() {
        let mut fx = Fixture::new();
        let mut bullets = vec![fx.bullet(100.0, 100.0), fx.bullet(101.0, 100.0)];
        let mut rocks = vec![fx.rock(AsteroidSize::Small, 100.0, 100.0)];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert_eq!(report.points, 100);
        assert_eq!(bullets.len(), 1);
        assert!(rocks.is_empty());
    }

    #[test]
    fn score_by_tier_adds_up() {
        let mut fx = Fixture::new();
        let mut bullets = vec![fx.bullet(100.0, 100.0), fx.bullet(300.0, 100.0), fx.bullet(500.0, 100.0)];
        let mut rocks = vec![
            fx.rock(AsteroidSize::Large, 100.0, 100.0),
            fx.rock(AsteroidSize::Medium, 300.0, 100.0),
            fx.rock(AsteroidSize::Small, 500.0, 100.0),
        ];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert_eq!(report.points, 170);
        assert_eq!(report.asteroids_destroyed, 3);
        // Large -> 2 mediums, medium -> 2 smalls, small -> nothing
        assert_eq!(rocks.len(), 4);
    }

    #[test]
    fn ship_impact_consumes_the_rock_without_fragments() {
        let mut fx = Fixture::new();
        let mut bullets = Vec::new();
        let mut rocks = vec![
            fx.rock(AsteroidSize::Large, 700.0, 500.0),
            fx.rock(AsteroidSize::Large, 705.0, 500.0),
        ];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert!(report.ship_destroyed);
        assert_eq!(report.points, 0);
        assert_eq!(fx.ship.lives, 2);
        assert!(fx.ship.is_invulnerable());
        // Only the first rock is used up, the second stays
        assert_eq!(rocks.len(), 1);
        assert_eq!(rocks[0].body.position, Vec2::new(705.0, 500.0));
    }

    #[test]
    fn invulnerable_ship_ignores_rocks() {
        let mut fx = Fixture::new();
        fx.ship.reset(&fx.config);
        let center = fx.ship.body.position;
        let mut bullets = Vec::new();
        let mut rocks = vec![fx.rock(AsteroidSize::Small, center.x, center.y)];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert!(!report.ship_destroyed);
        assert_eq!(fx.ship.lives, 3);
        assert_eq!(rocks.len(), 1);
    }

    #[test]
    fn fragments_from_a_shot_can_hit_the_ship_in_the_same_frame() {
        let mut fx = Fixture::new();
        let mut bullets = vec![fx.bullet(690.0, 500.0)];
        let mut rocks = vec![fx.rock(AsteroidSize::Medium, 680.0, 500.0)];

        let report = fx.resolve(&mut bullets, &mut rocks);

        assert_eq!(report.points, 50);
        assert!(report.ship_destroyed);
        // Two smalls spawned, one consumed by the ship
        assert_eq!(rocks.len(), 1);
    }

    #[test]
    fn remove_indices_keeps_order() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut v, &[3, 0]);
        assert_eq!(v, vec!['b', 'c', 'e']);
    }
}
