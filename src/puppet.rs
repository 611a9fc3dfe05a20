//! A synthetic face for playing without a camera.
//!
//! The puppet keeps its mouth closed until told to open it, then holds it
//! open for a short pulse. Commands arrive over a channel so an input
//! handler can drive the puppet while the game loop owns it as its frame
//! source.

use crate::core::constants::{
    LANDMARK_COUNT, MOUTH_LM_INDEX_END, MOUTH_LM_INDEX_START, PUPPET_OPEN_TICKS,
};
use crate::core::game_loop::{FaceRegion, FrameSource, LandmarkDetector};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::gesture::{synthesize_mouth, LandmarkSet};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Mouth width of the puppet face in pixels.
const MOUTH_WIDTH: i32 = 60;
/// Lip gap when closed (MAR 0.2) and open (MAR ~1.67).
const CLOSED_GAP: i32 = 6;
const OPEN_GAP: i32 = 50;

/// Instructions for the puppet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuppetCommand {
    OpenMouth,
    SetFaces(usize),
}

/// What the puppet "camera" sees this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuppetFrame {
    pub face_count: usize,
    pub mouth_open: bool,
}

/// Frame source driven by [`PuppetCommand`]s.
pub struct PuppetSource {
    commands: Receiver<PuppetCommand>,
    face_count: usize,
    open_ticks_left: u32,
    open_ticks: u32,
}

impl PuppetSource {
    /// New puppet showing one face with a closed mouth, plus the sender
    /// used to control it.
    pub fn new() -> (Self, Sender<PuppetCommand>) {
        let (tx, rx) = channel();
        let source = Self {
            commands: rx,
            face_count: 1,
            open_ticks_left: 0,
            open_ticks: PUPPET_OPEN_TICKS,
        };
        (source, tx)
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                PuppetCommand::OpenMouth => self.open_ticks_left = self.open_ticks,
                PuppetCommand::SetFaces(n) => self.face_count = n,
            }
        }
    }
}

impl FrameSource for PuppetSource {
    type Frame = PuppetFrame;

    fn next_frame(&mut self) -> Result<PuppetFrame> {
        self.apply_commands();
        let mouth_open = self.open_ticks_left > 0;
        self.open_ticks_left = self.open_ticks_left.saturating_sub(1);
        Ok(PuppetFrame {
            face_count: self.face_count,
            mouth_open,
        })
    }
}

/// Detector that lays faces out side by side and draws a 68-point face
/// whose mouth matches the frame.
#[derive(Debug, Default)]
pub struct PuppetDetector;

impl LandmarkDetector for PuppetDetector {
    type Frame = PuppetFrame;

    fn detect_faces(&mut self, frame: &PuppetFrame) -> Result<Vec<FaceRegion>> {
        Ok((0..frame.face_count as i32)
            .map(|i| Rect::new(40 + i * 160, 60, 140, 160))
            .collect())
    }

    fn locate_landmarks(&mut self, frame: &PuppetFrame, face: &FaceRegion) -> Result<LandmarkSet> {
        LandmarkSet::new(puppet_landmarks(face, frame.mouth_open))
    }
}

/// All 68 points collapse to the face center except the mouth.
fn puppet_landmarks(face: &Rect, mouth_open: bool) -> Vec<Point> {
    let center = Point::new(face.x + face.width / 2, face.y + face.height / 2);
    let mouth_center = Point::new(center.x, face.y + face.height * 3 / 4);
    let gap = if mouth_open { OPEN_GAP } else { CLOSED_GAP };
    let mouth = synthesize_mouth(mouth_center, MOUTH_WIDTH, gap);

    let mut points = vec![center; LANDMARK_COUNT];
    points[MOUTH_LM_INDEX_START..MOUTH_LM_INDEX_END].copy_from_slice(mouth.points());
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_loop::observe;
    use crate::gesture::compute_mar;

    #[test]
    fn test_puppet_mouth_pulse() {
        let (mut source, tx) = PuppetSource::new();
        assert!(!source.next_frame().unwrap().mouth_open);
        tx.send(PuppetCommand::OpenMouth).unwrap();
        for _ in 0..PUPPET_OPEN_TICKS {
            assert!(source.next_frame().unwrap().mouth_open);
        }
        assert!(!source.next_frame().unwrap().mouth_open);
    }

    #[test]
    fn test_puppet_face_count() {
        let (mut source, tx) = PuppetSource::new();
        tx.send(PuppetCommand::SetFaces(2)).unwrap();
        let frame = source.next_frame().unwrap();
        assert_eq!(frame.face_count, 2);
        let obs = observe(&mut PuppetDetector, &frame).unwrap();
        assert_eq!(obs.face_count, 2);
        assert!(obs.mouth.is_none());
    }

    #[test]
    fn test_puppet_mar_straddles_threshold() {
        let closed = PuppetFrame {
            face_count: 1,
            mouth_open: false,
        };
        let open = PuppetFrame {
            mouth_open: true,
            ..closed
        };
        let mut detector = PuppetDetector;

        let mouth = observe(&mut detector, &closed).unwrap().mouth.unwrap();
        assert!(compute_mar(&mouth).unwrap() < 1.5);
        let mouth = observe(&mut detector, &open).unwrap().mouth.unwrap();
        assert!(compute_mar(&mouth).unwrap() >= 1.5);
    }
}
