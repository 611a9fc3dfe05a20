//! Landmark and classifier data structures.

use crate::core::constants::{
    LANDMARK_COUNT, MOUTH_LM_COUNT, MOUTH_LM_INDEX_END, MOUTH_LM_INDEX_START,
};
use crate::error::{Error, Result};
use crate::geometry::Point;
use serde::{Deserialize, Deserializer, Serialize};

/// The 68 ordered points a landmark detector returns for one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

// Deserialization goes through `LandmarkSet::new` so the point count holds.
impl<'de> Deserialize<'de> for LandmarkSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            points: Vec<Point>,
        }

        let raw = Raw::deserialize(deserializer)?;
        LandmarkSet::new(raw.points).map_err(serde::de::Error::custom)
    }
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::InvalidLandmarks {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The mouth subrange (indices 48..68).
    pub fn mouth(&self) -> MouthLandmarks {
        let mut points = [Point::default(); MOUTH_LM_COUNT];
        points.copy_from_slice(&self.points[MOUTH_LM_INDEX_START..MOUTH_LM_INDEX_END]);
        MouthLandmarks { points }
    }
}

/// The 20 mouth points in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouthLandmarks {
    points: [Point; MOUTH_LM_COUNT],
}

impl MouthLandmarks {
    pub fn new(points: [Point; MOUTH_LM_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_slice(points: &[Point]) -> Result<Self> {
        let points: [Point; MOUTH_LM_COUNT] =
            points.try_into().map_err(|_| Error::InvalidLandmarks {
                expected: MOUTH_LM_COUNT,
                actual: points.len(),
            })?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point; MOUTH_LM_COUNT] {
        &self.points
    }
}

impl std::ops::Index<usize> for MouthLandmarks {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

/// Debounce state carried between frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureState {
    /// Below-threshold readings since the last above-threshold one.
    pub consecutive_below_threshold: u32,
    /// Faces seen in the most recent frame.
    pub last_face_count: usize,
    /// Jumps fired since start.
    pub total_triggers: u64,
}

/// Outcome of classifying one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameResult {
    NoFace,
    MultipleFaces(usize),
    /// One face, but the mouth geometry could not produce a ratio.
    NoReading,
    MouthClosed(f64),
    MouthOpen(f64),
    JumpTriggered(f64),
}

impl FrameResult {
    pub fn mar(&self) -> Option<f64> {
        match self {
            Self::MouthClosed(mar) | Self::MouthOpen(mar) | Self::JumpTriggered(mar) => {
                Some(*mar)
            }
            Self::NoFace | Self::MultipleFaces(_) | Self::NoReading => None,
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, Self::JumpTriggered(_))
    }

    /// Above-threshold reading, whether or not it fired a jump.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::MouthOpen(_) | Self::JumpTriggered(_))
    }

    /// Preview text for this frame, one entry per line.
    pub fn status_lines(&self) -> Vec<String> {
        match self {
            Self::NoFace => vec!["No face detected".to_string()],
            Self::MultipleFaces(count) => {
                vec![format!("Only support 1 face. Detected {} faces", count)]
            }
            Self::NoReading => vec!["Mouth Aspect Ratio: --".to_string()],
            Self::MouthClosed(mar) => vec![format!("Mouth Aspect Ratio: {:.2}", mar)],
            Self::MouthOpen(mar) | Self::JumpTriggered(mar) => vec![
                format!("Mouth Aspect Ratio: {:.2}", mar),
                "Mouth OPEN".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_points(n: usize) -> Vec<Point> {
        (0..n as i32).map(|i| Point::new(i, i * 2)).collect()
    }

    #[test]
    fn test_landmark_set_requires_68_points() {
        let err = LandmarkSet::new(numbered_points(67)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLandmarks {
                expected: 68,
                actual: 67
            }
        ));
        assert!(LandmarkSet::new(numbered_points(68)).is_ok());
    }

    #[test]
    fn test_deserialize_rejects_short_point_list() {
        let err = serde_json::from_str::<LandmarkSet>(r#"{"points":[{"x":1,"y":2}]}"#).unwrap_err();
        assert!(err.to_string().contains("expected 68 points, got 1"));
    }

    #[test]
    fn test_deserialize_accepts_full_set() {
        let set = LandmarkSet::new(numbered_points(68)).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mouth(), set.mouth());
    }

    #[test]
    fn test_mouth_is_indices_48_to_67() {
        let set = LandmarkSet::new(numbered_points(68)).unwrap();
        let mouth = set.mouth();
        assert_eq!(mouth[0], Point::new(48, 96));
        assert_eq!(mouth[19], Point::new(67, 134));
    }

    #[test]
    fn test_mouth_from_slice_wrong_length() {
        assert!(MouthLandmarks::from_slice(&numbered_points(19)).is_err());
        assert!(MouthLandmarks::from_slice(&numbered_points(20)).is_ok());
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(FrameResult::NoFace.status_lines(), vec!["No face detected"]);
        assert_eq!(
            FrameResult::MultipleFaces(3).status_lines(),
            vec!["Only support 1 face. Detected 3 faces"]
        );
        assert_eq!(
            FrameResult::MouthClosed(0.456).status_lines(),
            vec!["Mouth Aspect Ratio: 0.46"]
        );
        assert_eq!(
            FrameResult::JumpTriggered(2.0).status_lines(),
            vec!["Mouth Aspect Ratio: 2.00", "Mouth OPEN"]
        );
    }

    #[test]
    fn test_mar_accessor() {
        assert_eq!(FrameResult::MouthOpen(1.75).mar(), Some(1.75));
        assert_eq!(FrameResult::NoFace.mar(), None);
        assert!(FrameResult::JumpTriggered(2.0).is_open());
        assert!(!FrameResult::MouthClosed(0.2).is_open());
    }
}
