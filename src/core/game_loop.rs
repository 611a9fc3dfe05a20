//! The fixed-tick game loop and the collaborator contracts it drives.
//!
//! Camera capture, landmark detection, drawing and quit handling all live
//! outside the core. The loop only sees them through the traits below, which
//! keeps each tick strictly sequential: acquire, classify, advance, render.

use crate::core::config::GameConfig;
use crate::core::render::RenderSnapshot;
use crate::core::tick::{FaceObservation, GameSession, TickEvent, TickResult};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::gesture::LandmarkSet;
use rand::Rng;

/// Region of a detected face in frame coordinates.
pub type FaceRegion = Rect;

/// Blocking supplier of camera frames.
pub trait FrameSource {
    type Frame;

    /// Block until the next frame is ready. [`Error::SourceExhausted`] ends
    /// the loop cleanly; any other error aborts it.
    fn next_frame(&mut self) -> Result<Self::Frame>;
}

/// Face detector plus 68-point landmark model.
pub trait LandmarkDetector {
    type Frame;

    fn detect_faces(&mut self, frame: &Self::Frame) -> Result<Vec<FaceRegion>>;

    fn locate_landmarks(&mut self, frame: &Self::Frame, face: &FaceRegion)
        -> Result<LandmarkSet>;
}

/// Consumer of one snapshot per tick.
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()>;
}

/// Polled once per tick; true ends the loop.
pub trait QuitSignal {
    fn should_quit(&mut self) -> Result<bool>;
}

/// Run the detector on a frame and keep only what the classifier needs.
/// Landmarks are located only when exactly one face is present.
pub fn observe<D: LandmarkDetector>(detector: &mut D, frame: &D::Frame) -> Result<FaceObservation> {
    let faces = detector.detect_faces(frame)?;
    match faces.as_slice() {
        [face] => {
            let landmarks = detector.locate_landmarks(frame, face)?;
            Ok(FaceObservation::single(landmarks.mouth()))
        }
        _ => Ok(FaceObservation::crowd(faces.len())),
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    SourceExhausted,
    TickLimit,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub jumps: u64,
    pub deaths: u64,
    pub respawns: u64,
    pub best_score: u32,
    pub stop_reason: StopReason,
}

/// Owns the session and its collaborators.
pub struct GameLoop<S, D, R, Q, G> {
    pub session: GameSession,
    source: S,
    detector: D,
    renderer: R,
    quit: Q,
    rng: G,
    max_ticks: Option<u64>,
}

impl<S, D, R, Q, G> GameLoop<S, D, R, Q, G>
where
    S: FrameSource,
    D: LandmarkDetector<Frame = S::Frame>,
    R: Renderer,
    Q: QuitSignal,
    G: Rng,
{
    pub fn new(config: GameConfig, source: S, detector: D, renderer: R, quit: Q, mut rng: G) -> Self {
        let session = GameSession::new(config, &mut rng);
        Self {
            session,
            source,
            detector,
            renderer,
            quit,
            rng,
            max_ticks: None,
        }
    }

    /// Stop after this many ticks.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Acquire one frame and run one full tick.
    pub fn step(&mut self) -> Result<TickResult> {
        let frame = self.source.next_frame()?;
        let observation = observe(&mut self.detector, &frame)?;
        let result = self.session.tick(&observation, &mut self.rng);
        self.renderer.render(&self.session.snapshot())?;
        Ok(result)
    }

    /// Tick until quit, source exhaustion or the tick limit.
    pub fn run(&mut self) -> Result<LoopSummary> {
        log::info!(
            "Game loop starting at {} Hz",
            self.session.config.tick.tick_rate_hz
        );

        let mut summary = LoopSummary {
            ticks: 0,
            jumps: 0,
            deaths: 0,
            respawns: 0,
            best_score: 0,
            stop_reason: StopReason::Quit,
        };

        loop {
            if self.quit.should_quit()? {
                summary.stop_reason = StopReason::Quit;
                break;
            }
            if self.max_ticks.is_some_and(|max| summary.ticks >= max) {
                summary.stop_reason = StopReason::TickLimit;
                break;
            }

            let result = match self.step() {
                Ok(result) => result,
                Err(Error::SourceExhausted) => {
                    summary.stop_reason = StopReason::SourceExhausted;
                    break;
                }
                Err(e) => {
                    log::error!("Game loop aborted after {} ticks: {}", summary.ticks, e);
                    return Err(e);
                }
            };

            summary.ticks += 1;
            for event in &result.events {
                match event {
                    TickEvent::JumpTriggered { .. } => summary.jumps += 1,
                    TickEvent::BirdDied { .. } => summary.deaths += 1,
                    TickEvent::Respawned { .. } => summary.respawns += 1,
                    TickEvent::WallPassed { score } => {
                        summary.best_score = summary.best_score.max(*score)
                    }
                }
            }
        }

        log::info!(
            "Game loop stopped ({:?}) after {} ticks, best score {}",
            summary.stop_reason,
            summary.ticks,
            summary.best_score
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    struct Faces(usize);

    impl LandmarkDetector for Faces {
        type Frame = ();

        fn detect_faces(&mut self, _frame: &()) -> Result<Vec<FaceRegion>> {
            Ok(vec![Rect::new(0, 0, 10, 10); self.0])
        }

        fn locate_landmarks(&mut self, _frame: &(), _face: &FaceRegion) -> Result<LandmarkSet> {
            LandmarkSet::new((0..68).map(|i| Point::new(i, 0)).collect())
        }
    }

    #[test]
    fn test_observe_single_face_extracts_mouth() {
        let obs = observe(&mut Faces(1), &()).unwrap();
        assert_eq!(obs.face_count, 1);
        let mouth = obs.mouth.unwrap();
        assert_eq!(mouth[0], Point::new(48, 0));
    }

    #[test]
    fn test_observe_skips_landmarks_for_many_faces() {
        let obs = observe(&mut Faces(3), &()).unwrap();
        assert_eq!(obs, FaceObservation::crowd(3));
        let obs = observe(&mut Faces(0), &()).unwrap();
        assert_eq!(obs, FaceObservation::none());
    }
}
