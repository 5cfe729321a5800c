//! Game configuration
//!
//! Everything tunable lives in [`Config`]. The simulation only ever sees the
//! immutable [`SimulationConfig`] half of it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::Bounds;

/// Env var naming an explicit config file
pub const CONFIG_ENV: &str = "ASTEROIDS_CONFIG";
const CONFIG_FILE_NAME: &str = "asteroids.json";
const LOG_FILE_NAME: &str = "asteroids.log";
/// Upper bound on rocks spawned for a single wave
pub const MAX_WAVE_SIZE: u32 = 200;

/// Simulation tunables. Distances are world units (pixels of an 800x600
/// field), times are seconds and angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    /// Pixels per second squared
    pub thrust_accel: f32,
    pub max_speed: f32,
    /// Multiplicative decay applied once per frame while not thrusting
    pub drag_factor: f32,
    pub invulnerable_duration: f32,
    pub starting_lives: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_lifetime: f32,
    /// Gap between the ship's nose and a freshly fired bullet
    pub muzzle_margin: f32,

    // === Asteroids ===
    pub asteroid_base_speed: f32,
    /// Extra speed per tier below 4 (smaller rocks are faster)
    pub asteroid_speed_step: f32,
    /// Spin rate is drawn from +-max_spin degrees per second
    pub asteroid_max_spin: f32,
    /// Max deviation from a straight line to the center at spawn
    pub spawn_deflection: f32,
    /// Max deviation from the parent's heading for split fragments
    pub split_deflection: f32,
    pub split_speed_factor: f32,

    // === Waves ===
    pub base_wave_size: u32,
    pub wave_growth: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,

            ship_radius: 15.0,
            rotation_rate: 250.0,
            thrust_accel: 150.0,
            max_speed: 300.0,
            drag_factor: 0.99,
            invulnerable_duration: 3.0,
            starting_lives: 3,

            bullet_speed: 500.0,
            bullet_radius: 3.0,
            bullet_lifetime: 2.0,
            muzzle_margin: 5.0,

            asteroid_base_speed: 50.0,
            asteroid_speed_step: 30.0,
            asteroid_max_spin: 60.0,
            spawn_deflection: 45.0,
            split_deflection: 45.0,
            split_speed_factor: 1.5,

            base_wave_size: 4,
            wave_growth: 2,
        }
    }
}

impl SimulationConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.screen_width, self.screen_height)
    }

    /// Number of large asteroids spawned when `level` starts, capped at
    /// [`MAX_WAVE_SIZE`] for very high levels.
    pub fn wave_size(&self, level: u32) -> usize {
        let size = level
            .saturating_mul(self.wave_growth)
            .saturating_add(self.base_wave_size);
        size.min(MAX_WAVE_SIZE) as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_radius", self.ship_radius),
            ("thrust_accel", self.thrust_accel),
            ("max_speed", self.max_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("bullet_lifetime", self.bullet_lifetime),
            ("asteroid_base_speed", self.asteroid_base_speed),
            ("split_speed_factor", self.split_speed_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("rotation_rate", self.rotation_rate),
            ("invulnerable_duration", self.invulnerable_duration),
            ("muzzle_margin", self.muzzle_margin),
            ("asteroid_speed_step", self.asteroid_speed_step),
            ("asteroid_max_spin", self.asteroid_max_spin),
            ("spawn_deflection", self.spawn_deflection),
            ("split_deflection", self.split_deflection),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        if !(self.drag_factor > 0.0 && self.drag_factor <= 1.0) {
            return Err(ConfigError::invalid(
                "drag_factor",
                format!("must be in (0, 1], got {}", self.drag_factor),
            ));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::invalid("starting_lives", "must be at least 1"));
        }
        match self.base_wave_size.checked_add(self.wave_growth) {
            Some(0) => {
                return Err(ConfigError::invalid("base_wave_size", "first wave would be empty"));
            }
            Some(first) if first <= MAX_WAVE_SIZE => {}
            _ => {
                let field = if self.base_wave_size > MAX_WAVE_SIZE { "base_wave_size" } else { "wave_growth" };
                return Err(ConfigError::invalid(
                    field,
                    format!("first wave may have at most {MAX_WAVE_SIZE} asteroids"),
                ));
            }
        }
        Ok(())
    }
}

/// Top-level configuration for the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_fps: u32,
    /// Fixed RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Where log output goes (the terminal is busy drawing the game)
    pub log_file: Option<PathBuf>,
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_fps: 60,
            seed: None,
            log_file: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Resolve the config: `$ASTEROIDS_CONFIG`, then `asteroids.json` next to
    /// the executable, then built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let path = Self::beside_exe(CONFIG_FILE_NAME);
        if path.is_file() {
            return Self::from_file(&path);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 || self.target_fps > 1000 {
            return Err(ConfigError::invalid(
                "target_fps",
                format!("must be in 1..=1000, got {}", self.target_fps),
            ));
        }
        self.simulation.validate()
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Self::beside_exe(LOG_FILE_NAME))
    }

    fn beside_exe(name: &str) -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(name);
            }
        }
        PathBuf::from(name)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed config {}: {source}", path.display())
            }
            Self::Invalid { field, reason } => write!(f, "invalid config field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}
