// Gesture detection
pub const MAR_THRESHOLD: f64 = 1.5;
pub const MAR_CONSECUTIVE_FRAMES: u32 = 3;

// 68-point landmark scheme; the mouth occupies indices 48..68
pub const LANDMARK_COUNT: usize = 68;
pub const MOUTH_LM_INDEX_START: usize = 48;
pub const MOUTH_LM_INDEX_END: usize = 68;
pub const MOUTH_LM_COUNT: usize = MOUTH_LM_INDEX_END - MOUTH_LM_INDEX_START;

// Mouth-relative index pairs used for the aspect ratio
pub const MAR_VERTICAL_PAIR_1: (usize, usize) = (2, 10);
pub const MAR_VERTICAL_PAIR_2: (usize, usize) = (4, 8);
pub const MAR_HORIZONTAL_PAIR: (usize, usize) = (0, 6);

// Bird
pub const JUMP_HEIGHT: u32 = 17;
pub const JUMP_GRAVITY: f64 = 5.0;
pub const GRAVITY_ACCELERATION: f64 = 0.15;
pub const JUMP_SPEED: f64 = 10.0;
pub const JUMP_SPEED_DECAY: f64 = 1.0;
pub const BIRD_Y_DEFAULT: f64 = 150.0;
pub const BIRD_X: i32 = 70;
// Collision box sits 5 px left of the sprite
pub const BIRD_HITBOX_X: i32 = 65;
pub const BIRD_SIZE: i32 = 50;

// Walls
pub const WALL_GAP: i32 = 220;
pub const WALL_START_X: i32 = 400;
pub const WALL_EXIT_X: i32 = -80;
pub const WALL_SCROLL_SPEED: i32 = 2;
pub const WALL_OFFSET_RANGE: i32 = 110;
pub const WALL_WIDTH: i32 = 80;
pub const WALL_HEIGHT: i32 = 500;
pub const WALL_HITBOX_INSET: i32 = 10;
pub const WALL_BAND_CENTER: i32 = 360;

// World
pub const WORLD_WIDTH: i32 = 500;
pub const WORLD_HEIGHT: i32 = 800;
pub const PLAY_BAND_TOP: i32 = 0;
pub const PLAY_BAND_BOTTOM: i32 = 720;

// Tick and timing
pub const TICK_RATE_HZ: u32 = 60;

// Keyboard puppet
pub const PUPPET_OPEN_TICKS: u32 = 4;
