use asteroids::config::SimulationConfig;
use asteroids::sim::{Asteroid, AsteroidSize, FrameInput, Phase, Projectile, Session, ShipIntent};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn idle() -> FrameInput {
    FrameInput::default()
}

/// Replace the wave with motionless rocks at the given spots
fn place_rocks(session: &mut Session, rocks: &[(AsteroidSize, Vec2)]) {
    let mut rng = StdRng::seed_from_u64(0);
    let config = session.config().clone();
    session.asteroids = rocks
        .iter()
        .map(|&(size, pos)| Asteroid::new(&mut rng, pos, Vec2::ZERO, size, &config))
        .collect();
}

fn bullet_at(session: &mut Session, pos: Vec2) {
    let bullet = Projectile::new(pos, Vec2::ZERO, session.config());
    session.projectiles.push(bullet);
}

#[test]
fn rock_hitting_the_ship_costs_a_life_and_respawns_it() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    let center = session.config().bounds().center();
    place_rocks(
        &mut session,
        &[
            (AsteroidSize::Small, center + Vec2::new(10.0, 0.0)),
            (AsteroidSize::Large, Vec2::new(100.0, 100.0)),
        ],
    );
    session.ship.body.position = center + Vec2::new(5.0, 0.0);
    session.ship.body.velocity = Vec2::new(40.0, 0.0);
    session.ship.heading = 45.0;

    session.step(DT, &idle());

    assert_eq!(session.ship.lives, 2);
    assert_eq!(session.ship.body.position, center);
    assert_eq!(session.ship.body.velocity, Vec2::ZERO);
    assert_eq!(session.ship.heading, 0.0);
    assert!(session.ship.is_invulnerable());
    // The rock that hit is gone without splitting
    assert_eq!(session.asteroids.len(), 1);
    assert_eq!(session.asteroids[0].size, AsteroidSize::Large);
    assert_eq!(session.score, 0);
}

#[test]
fn respawn_window_protects_the_ship() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    let center = session.config().bounds().center();
    session.ship.invulnerable_time = 3.0;
    place_rocks(
        &mut session,
        &[
            (AsteroidSize::Large, center),
            (AsteroidSize::Large, Vec2::new(100.0, 100.0)),
        ],
    );

    for _ in 0..30 {
        session.step(DT, &idle());
    }
    assert_eq!(session.ship.lives, 3);
    assert_eq!(session.asteroids.len(), 2);
    assert!(session.ship.invulnerable_time < 3.0);
}

#[test]
fn one_of_each_tier_scores_170() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    let rocks = [
        (AsteroidSize::Large, Vec2::new(100.0, 100.0)),
        (AsteroidSize::Medium, Vec2::new(700.0, 100.0)),
        (AsteroidSize::Small, Vec2::new(100.0, 500.0)),
    ];
    place_rocks(&mut session, &rocks);
    for &(_, pos) in &rocks {
        bullet_at(&mut session, pos);
    }

    session.step(DT, &idle());

    assert_eq!(session.score, 20 + 50 + 100);
    assert!(session.projectiles.is_empty());
    let mediums = session.asteroids.iter().filter(|a| a.size == AsteroidSize::Medium).count();
    let smalls = session.asteroids.iter().filter(|a| a.size == AsteroidSize::Small).count();
    assert_eq!((mediums, smalls), (2, 2));
}

#[test]
fn clearing_the_field_starts_the_next_wave() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    session.ship.lives = 1;
    session.ship.body.position = Vec2::new(300.0, 300.0);
    place_rocks(&mut session, &[(AsteroidSize::Small, Vec2::new(600.0, 150.0))]);
    bullet_at(&mut session, Vec2::new(600.0, 150.0));

    session.step(DT, &idle());

    assert_eq!(session.score, 100);
    assert_eq!(session.level, 2);
    assert_eq!(session.asteroids.len(), 8);
    assert!(session.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    assert_eq!(session.ship.body.position, session.config().bounds().center());
    assert!(session.ship.is_invulnerable());
    assert_eq!(session.phase, Phase::Playing);
}

#[test]
fn last_life_ends_the_game_until_restart() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    session.ship.lives = 1;
    session.score = 120;
    let spot = Vec2::new(250.0, 250.0);
    session.ship.body.position = spot;
    place_rocks(
        &mut session,
        &[
            (AsteroidSize::Large, spot),
            (AsteroidSize::Large, Vec2::new(700.0, 500.0)),
        ],
    );

    session.step(DT, &idle());
    assert_eq!(session.phase, Phase::GameOver);
    assert_eq!(session.ship.lives, 0);
    // Left where it died for the final frame
    assert_eq!(session.ship.body.position, spot);

    // Frozen: thrust and time do nothing
    let thrust = FrameInput {
        intent: ShipIntent {
            accelerating: true,
            ..ShipIntent::default()
        },
        ..FrameInput::default()
    };
    session.step(1.0, &thrust);
    assert_eq!(session.ship.body.position, spot);
    assert_eq!(session.score, 120);

    let restart = FrameInput {
        restart: true,
        ..FrameInput::default()
    };
    session.step(DT, &restart);
    assert_eq!(session.phase, Phase::Playing);
    assert_eq!((session.score, session.level, session.ship.lives), (0, 1, 3));
    assert_eq!(session.asteroids.len(), 6);
}

#[test]
fn bullets_fly_off_the_field_and_expire() {
    let mut session = Session::new(SimulationConfig::default(), 7);
    place_rocks(&mut session, &[(AsteroidSize::Large, Vec2::new(60.0, 560.0))]);
    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    session.step(DT, &fire);
    assert_eq!(session.projectiles.len(), 1);

    // Heading up at 500 px/s from the center: gone well inside a second
    for _ in 0..60 {
        session.step(DT, &idle());
    }
    assert!(session.projectiles.is_empty());
    assert_eq!(session.score, 0);
}
