//! mouthflap - a side-scroller steered by opening your mouth.
//!
//! The library holds the game core: mouth aspect ratio classification with
//! frame debouncing, bird and wall physics, and a fixed-tick loop wired to
//! external camera, landmark detector and renderer collaborators.

pub mod build_info;
pub mod core;
mod error;
pub mod geometry;
pub mod gesture;
pub mod physics;
pub mod puppet;
pub mod replay;
pub mod utils;

pub use crate::core::{
    FaceObservation, FrameSource, GameConfig, GameLoop, GameSession, GestureConfig,
    LandmarkDetector, LoopConfig, LoopSummary, PhysicsConfig, QuitSignal, RenderSnapshot,
    Renderer, StopReason, TickEvent, TickResult,
};
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use gesture::{FrameResult, GestureState, LandmarkSet, MouthLandmarks};
pub use physics::{BirdSprite, BirdState, PhysicsEngine, WallState};
