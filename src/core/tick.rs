//! The per-tick orchestration of gesture classification and physics.
//!
//! [`GameSession::tick`] runs one tick against an already-detected face
//! observation. It returns a [`TickResult`] describing what happened, so the
//! loop and tests can react without reaching into physics internals.

use crate::core::config::GameConfig;
use crate::core::render::RenderSnapshot;
use crate::gesture::{classify_frame, FrameResult, GestureState, MouthLandmarks};
use crate::physics::{AdvanceOutcome, PhysicsEngine};
use rand::Rng;

/// What the detector saw in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceObservation {
    pub face_count: usize,
    /// Present only when exactly one face was found.
    pub mouth: Option<MouthLandmarks>,
}

impl FaceObservation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(mouth: MouthLandmarks) -> Self {
        Self {
            face_count: 1,
            mouth: Some(mouth),
        }
    }

    pub fn crowd(face_count: usize) -> Self {
        Self {
            face_count,
            mouth: None,
        }
    }
}

/// A single event produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    JumpTriggered { mar: f64 },
    BirdDied { score: u32 },
    Respawned { lost_score: u32 },
    WallPassed { score: u32 },
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub classification: FrameResult,
    pub jump_applied: bool,
    pub physics: AdvanceOutcome,
    pub events: Vec<TickEvent>,
}

/// All mutable game state, owned in one place.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub gesture: GestureState,
    pub physics: PhysicsEngine,
    pub tick_count: u64,
    last_classification: FrameResult,
    last_mouth: Option<MouthLandmarks>,
}

impl GameSession {
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let physics = PhysicsEngine::new(config.physics.clone(), rng);
        Self {
            config,
            gesture: GestureState::default(),
            physics,
            tick_count: 0,
            last_classification: FrameResult::NoFace,
            last_mouth: None,
        }
    }

    /// Classify, apply any jump, then advance physics unconditionally.
    pub fn tick<R: Rng>(&mut self, observation: &FaceObservation, rng: &mut R) -> TickResult {
        let mut events = Vec::new();
        let score_before = self.physics.score();

        let classification = classify_frame(
            &self.config.gesture,
            &mut self.gesture,
            observation.face_count,
            observation.mouth.as_ref(),
            self.physics.is_dead(),
        );

        let jump_applied = if let FrameResult::JumpTriggered(mar) = classification {
            self.physics.apply_jump_impulse();
            events.push(TickEvent::JumpTriggered { mar });
            true
        } else {
            false
        };

        let outcome = self.physics.advance(rng);
        if outcome.died {
            events.push(TickEvent::BirdDied {
                score: score_before,
            });
        }
        if outcome.respawned {
            events.push(TickEvent::Respawned {
                lost_score: score_before,
            });
        }
        if outcome.wall_passed {
            events.push(TickEvent::WallPassed {
                score: self.physics.score(),
            });
        }

        self.tick_count += 1;
        self.last_classification = classification;
        self.last_mouth = if observation.face_count == 1 {
            observation.mouth
        } else {
            None
        };

        TickResult {
            classification,
            jump_applied,
            physics: outcome,
            events,
        }
    }

    pub fn last_classification(&self) -> FrameResult {
        self.last_classification
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let (upper_wall, lower_wall) = self.physics.wall_rects();
        let config = &self.physics.config;
        RenderSnapshot {
            tick: self.tick_count,
            world_width: config.world_width,
            world_height: config.world_height,

            bird_box: self.physics.bird_box,
            bird_sprite_box: self.physics.sprite_box(),
            bird_sprite: self.physics.sprite(),
            is_dead: self.physics.is_dead(),
            upper_wall,
            lower_wall,
            score: self.physics.score(),

            classification: self.last_classification,
            status_lines: self.last_classification.status_lines(),
            mouth_points: self.last_mouth.map(|m| m.points().to_vec()),
            closed_frames: self.gesture.consecutive_below_threshold,
            total_triggers: self.gesture.total_triggers,
        }
    }
}
