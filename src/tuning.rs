//! World and movement tuning
//!
//! Every gameplay constant lives here so a level can be tweaked from JSON
//! without touching the simulation. Defaults reproduce the reference values
//! in [`crate::consts`]. Overrides are persisted separately in LocalStorage
//! on the web and read from a file by the native runner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::MS_PER_SECOND;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A static square placed in the level (centre + edge length)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl BoxSpec {
    pub const fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }
}

/// Horizontal control parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub ground_damping: f32,
    pub air_damping: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            ground_accel: GROUND_ACCEL,
            air_accel: AIR_ACCEL,
            ground_damping: GROUND_DAMPING,
            air_damping: AIR_DAMPING,
        }
    }
}

/// Vertical parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub jump_speed: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
        }
    }
}

/// Level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub width: f32,
    pub height: f32,
    pub kill_plane_y: f32,
    pub spawn: [f32; 2],
    pub player_size: f32,
    pub goal: BoxSpec,
    /// Resolved in this order every tick
    pub solids: Vec<BoxSpec>,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            kill_plane_y: KILL_PLANE_Y,
            spawn: [SPAWN_X, SPAWN_Y],
            player_size: PLAYER_SIZE,
            goal: BoxSpec::new(100.0, 150.0, 50.0),
            solids: vec![
                BoxSpec::new(0.0, 200.0, 50.0),
                BoxSpec::new(-100.0, 180.0, 50.0),
                BoxSpec::new(50.0, 530.0, 500.0),
            ],
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation ticks per second
    pub sim_rate_hz: f64,
    /// Wall-clock delta clamp, as a multiple of the fixed step
    pub max_delta_steps: f64,
    pub movement: MovementTuning,
    pub physics: PhysicsTuning,
    pub level: LevelTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_rate_hz: SIM_RATE_HZ,
            max_delta_steps: MAX_DELTA_STEPS,
            movement: MovementTuning::default(),
            physics: PhysicsTuning::default(),
            level: LevelTuning::default(),
        }
    }
}

impl Tuning {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pixel_platformer_tuning";

    /// Fixed step length in milliseconds
    pub fn step_ms(&self) -> f64 {
        MS_PER_SECOND / self.sim_rate_hz
    }

    /// Fixed step length in seconds, as handed to the systems
    pub fn step_secs(&self) -> f32 {
        (1.0 / self.sim_rate_hz) as f32
    }

    /// Largest wall-clock delta accepted per frame, in milliseconds
    pub fn max_delta_ms(&self) -> f64 {
        self.step_ms() * self.max_delta_steps
    }

    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a JSON tuning file
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read a tuning file, falling back to defaults if it is missing or invalid
    pub fn from_json_file_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::from_json_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sim_rate_hz", self.sim_rate_hz)?;
        if !(self.max_delta_steps >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "max_delta_steps",
                reason: format!("must be at least 1, got {}", self.max_delta_steps),
            });
        }

        let m = &self.movement;
        positive("movement.max_speed", m.max_speed as f64)?;
        non_negative("movement.ground_accel", m.ground_accel as f64)?;
        non_negative("movement.air_accel", m.air_accel as f64)?;
        non_negative("movement.ground_damping", m.ground_damping as f64)?;
        non_negative("movement.air_damping", m.air_damping as f64)?;

        non_negative("physics.gravity", self.physics.gravity as f64)?;
        non_negative("physics.jump_speed", self.physics.jump_speed as f64)?;

        let l = &self.level;
        positive("level.width", l.width as f64)?;
        positive("level.height", l.height as f64)?;
        at_most("level.width", l.width as f64, MAX_WORLD_SIDE as f64)?;
        at_most("level.height", l.height as f64, MAX_WORLD_SIDE as f64)?;
        positive("level.player_size", l.player_size as f64)?;
        finite("level.kill_plane_y", l.kill_plane_y as f64)?;
        finite("level.spawn", l.spawn[0] as f64)?;
        finite("level.spawn", l.spawn[1] as f64)?;
        if l.player_size > l.width {
            return Err(ConfigError::Invalid {
                field: "level.player_size",
                reason: format!("{} does not fit in a world {} wide", l.player_size, l.width),
            });
        }
        check_box("level.goal", &l.goal)?;
        for solid in &l.solids {
            check_box("level.solids", solid)?;
        }
        Ok(())
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::info!("Using default tuning");
        Self::default()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {}", value),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {}", value),
        })
    }
}

fn at_most(field: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be at most {}, got {}", max, value),
        })
    }
}

fn check_box(field: &'static str, b: &BoxSpec) -> Result<(), ConfigError> {
    finite(field, b.x as f64)?;
    finite(field, b.y as f64)?;
    positive(field, b.size as f64)
}
