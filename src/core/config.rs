//! Game configuration.
//!
//! Every tunable constant lives here so tests can run the game with scaled
//! constants and players can override individual values from a JSON file.

use crate::core::constants::*;
use crate::error::{Error, Result};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Thresholds for turning MAR readings into jump triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Readings below this count as closed-mouth progress.
    pub mar_threshold: f64,
    /// Closed readings required before an open reading fires a jump.
    pub consecutive_frames: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            mar_threshold: MAR_THRESHOLD,
            consecutive_frames: MAR_CONSECUTIVE_FRAMES,
        }
    }
}

/// Bird motion, wall layout and world bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Ticks a jump lasts.
    pub jump_height: u32,
    /// Initial gravity accumulator, restored on every jump and reset.
    pub gravity: f64,
    /// Added to the gravity accumulator each falling tick.
    pub gravity_acceleration: f64,
    /// Jump speed at the start of a jump.
    pub jump_speed: f64,
    /// Subtracted from jump speed each jumping tick.
    pub jump_speed_decay: f64,
    /// Left edge of the bird sprite.
    pub bird_x: i32,
    /// Left edge of the bird collision box.
    pub bird_hitbox_x: i32,
    pub bird_y_default: f64,
    pub bird_size: i32,

    pub wall_gap: i32,
    pub wall_start_x: i32,
    /// Walls wrap once their x drops below this.
    pub wall_exit_x: i32,
    pub wall_scroll_speed: i32,
    /// Offsets are drawn uniformly from `-range..=range`.
    pub wall_offset_range: i32,
    pub wall_width: i32,
    pub wall_height: i32,
    /// Hitboxes are shrunk horizontally and pushed away from the gap by this.
    pub wall_hitbox_inset: i32,
    pub wall_band_center: i32,

    pub world_width: i32,
    pub world_height: i32,
    /// The bird respawns when its box top reaches either band edge.
    pub play_band_top: i32,
    pub play_band_bottom: i32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            jump_height: JUMP_HEIGHT,
            gravity: JUMP_GRAVITY,
            gravity_acceleration: GRAVITY_ACCELERATION,
            jump_speed: JUMP_SPEED,
            jump_speed_decay: JUMP_SPEED_DECAY,
            bird_x: BIRD_X,
            bird_hitbox_x: BIRD_HITBOX_X,
            bird_y_default: BIRD_Y_DEFAULT,
            bird_size: BIRD_SIZE,

            wall_gap: WALL_GAP,
            wall_start_x: WALL_START_X,
            wall_exit_x: WALL_EXIT_X,
            wall_scroll_speed: WALL_SCROLL_SPEED,
            wall_offset_range: WALL_OFFSET_RANGE,
            wall_width: WALL_WIDTH,
            wall_height: WALL_HEIGHT,
            wall_hitbox_inset: WALL_HITBOX_INSET,
            wall_band_center: WALL_BAND_CENTER,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            play_band_top: PLAY_BAND_TOP,
            play_band_bottom: PLAY_BAND_BOTTOM,
        }
    }
}

/// Loop pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub tick_rate_hz: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl LoopConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate_hz.max(1)))
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gesture: GestureConfig,
    pub physics: PhysicsConfig,
    #[serde(rename = "loop")]
    pub tick: LoopConfig,
}

/// Largest magnitude accepted for any pixel-valued physics setting.
pub const MAX_COORD: i32 = 1_000_000;

/// File name of the user config inside the app directory.
pub const CONFIG_FILE: &str = "config.json";

impl GameConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from an explicit file. Any failure is fatal.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolve the config: explicit path if given, else the user config file
    /// if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_file = persistence::config_path(CONFIG_FILE).ok();
        Self::resolve(explicit, user_file.as_deref())
    }

    /// [`GameConfig::load`] with the user config location supplied. Never
    /// creates files or directories.
    pub fn resolve(explicit: Option<&Path>, user_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match user_file {
            Some(path) if path.is_file() => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        let g = &self.gesture;
        let p = &self.physics;

        if !(g.mar_threshold.is_finite() && g.mar_threshold > 0.0) {
            return Err(invalid("gesture.mar_threshold must be positive"));
        }
        if g.consecutive_frames == 0 {
            return Err(invalid("gesture.consecutive_frames must be at least 1"));
        }
        let coords = [
            ("bird_x", p.bird_x),
            ("bird_hitbox_x", p.bird_hitbox_x),
            ("bird_size", p.bird_size),
            ("wall_gap", p.wall_gap),
            ("wall_start_x", p.wall_start_x),
            ("wall_exit_x", p.wall_exit_x),
            ("wall_scroll_speed", p.wall_scroll_speed),
            ("wall_offset_range", p.wall_offset_range),
            ("wall_width", p.wall_width),
            ("wall_height", p.wall_height),
            ("wall_hitbox_inset", p.wall_hitbox_inset),
            ("wall_band_center", p.wall_band_center),
            ("world_width", p.world_width),
            ("world_height", p.world_height),
            ("play_band_top", p.play_band_top),
            ("play_band_bottom", p.play_band_bottom),
        ];
        // Keeps every sum in the wall and bird rectangles inside i32
        if let Some((name, _)) = coords
            .iter()
            .find(|(_, v)| !(-MAX_COORD..=MAX_COORD).contains(v))
        {
            return Err(Error::InvalidConfig(format!(
                "physics.{} must be within +/-{}",
                name, MAX_COORD
            )));
        }
        if !p.bird_y_default.is_finite() {
            return Err(invalid("physics.bird_y_default must be finite"));
        }
        if p.bird_size <= 0 {
            return Err(invalid("physics.bird_size must be positive"));
        }
        if p.wall_width <= p.wall_hitbox_inset || p.wall_height <= 0 {
            return Err(invalid("physics wall dimensions must exceed the hitbox inset"));
        }
        if p.wall_scroll_speed <= 0 {
            return Err(invalid("physics.wall_scroll_speed must be positive"));
        }
        if p.wall_offset_range < 0 {
            return Err(invalid("physics.wall_offset_range must not be negative"));
        }
        if p.wall_exit_x >= p.wall_start_x {
            return Err(invalid("physics.wall_exit_x must be left of wall_start_x"));
        }
        if p.play_band_top >= p.play_band_bottom {
            return Err(invalid("physics play band is empty"));
        }
        let default_y = p.bird_y_default as i32;
        if default_y <= p.play_band_top || default_y >= p.play_band_bottom {
            return Err(invalid("physics.bird_y_default must lie inside the play band"));
        }
        if ![p.gravity, p.gravity_acceleration, p.jump_speed, p.jump_speed_decay]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("physics motion constants must be finite"));
        }
        if self.tick.tick_rate_hz == 0 {
            return Err(invalid("loop.tick_rate_hz must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfig(message.to_string())
}
