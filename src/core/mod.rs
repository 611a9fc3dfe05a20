//! Configuration, per-tick orchestration and the game loop.

pub mod config;
pub mod constants;
pub mod game_loop;
pub mod render;
pub mod tick;

pub use config::*;
pub use constants::*;
pub use game_loop::*;
pub use render::*;
pub use tick::*;
