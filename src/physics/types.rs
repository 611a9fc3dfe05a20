//! Physics data structures.

use crate::core::config::PhysicsConfig;
use crate::geometry::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Vertical motion state of the bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdState {
    /// Top edge of the bird in world pixels (grows downward).
    pub vertical_position: f64,
    /// Upward speed for the current jump tick.
    pub jump_speed: f64,
    /// Jump ticks left; zero means the bird is falling.
    pub remaining_jump_ticks: u32,
    /// Downward step applied on the next falling tick.
    pub gravity_accumulator: f64,
    pub is_dead: bool,
}

impl BirdState {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            vertical_position: config.bird_y_default,
            jump_speed: config.jump_speed,
            remaining_jump_ticks: 0,
            gravity_accumulator: config.gravity,
            is_dead: false,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.remaining_jump_ticks > 0
    }
}

/// The single active wall pair plus the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallState {
    /// Left edge of both walls in world pixels.
    pub horizontal_position: i32,
    /// Shifts the gap up (positive) or down (negative).
    pub vertical_offset: i32,
    /// Walls passed since the last respawn.
    pub passed_count: u32,
}

impl WallState {
    pub fn new<R: Rng>(config: &PhysicsConfig, rng: &mut R) -> Self {
        Self {
            horizontal_position: config.wall_start_x,
            vertical_offset: random_offset(config, rng),
            passed_count: 0,
        }
    }
}

/// Draw a gap offset from `-range..=range`.
pub fn random_offset<R: Rng>(config: &PhysicsConfig, rng: &mut R) -> i32 {
    let range = config.wall_offset_range;
    rng.gen_range(-range..=range)
}

/// Events produced by one [`PhysicsEngine::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// The bird hit a wall this tick while alive.
    pub died: bool,
    /// The bird left the play band and was reset.
    pub respawned: bool,
    /// The wall wrapped and the score went up.
    pub wall_passed: bool,
}

/// Sprite selection for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BirdSprite {
    Idle,
    Flapping,
    Dead,
}

/// Owns all bird and wall state.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    pub config: PhysicsConfig,
    pub bird: BirdState,
    pub wall: WallState,
    /// Bird hitbox as of the last advance.
    pub bird_box: Rect,
}

impl PhysicsEngine {
    pub fn new<R: Rng>(config: PhysicsConfig, rng: &mut R) -> Self {
        let bird = BirdState::new(&config);
        let wall = WallState::new(&config, rng);
        let bird_box = Rect::new(
            config.bird_hitbox_x,
            bird.vertical_position as i32,
            config.bird_size,
            config.bird_size,
        );
        Self {
            config,
            bird,
            wall,
            bird_box,
        }
    }
}
