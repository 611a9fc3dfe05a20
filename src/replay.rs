//! Recorded landmark streams.
//!
//! A replay file is JSON lines, one detector result per frame:
//!
//! ```text
//! {"faces": 0}
//! {"faces": 1, "landmarks": [[x, y], ... 68 points ...]}
//! {"faces": 2}
//! ```
//!
//! [`ReplaySource`] yields the records as frames and [`ReplayDetector`]
//! answers detector queries from them, so a recording can stand in for the
//! camera and the landmark model. Blank lines and `#` comments are skipped.

use crate::core::game_loop::{FaceRegion, FrameSource, LandmarkDetector};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::gesture::LandmarkSet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub faces: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<(i32, i32)>>,
}

impl ReplayRecord {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        Self {
            faces: 1,
            landmarks: Some(landmarks.points().iter().map(|p| (p.x, p.y)).collect()),
        }
    }

    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reads [`ReplayRecord`]s from a line-oriented reader.
pub struct ReplaySource<B> {
    lines: Lines<B>,
    line_no: usize,
    looping: bool,
    buffered: Vec<ReplayRecord>,
    cursor: usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<B: BufRead> ReplaySource<B> {
    pub fn new(reader: B) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            looping: false,
            buffered: Vec::new(),
            cursor: 0,
        }
    }

    /// Restart from the first record at end of input instead of ending.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    fn read_record(&mut self) -> Result<Option<ReplayRecord>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let record: ReplayRecord =
                serde_json::from_str(trimmed).map_err(|e| Error::Replay {
                    line: self.line_no,
                    message: e.to_string(),
                })?;
            if record.faces == 1 && record.landmarks.is_none() {
                return Err(Error::Replay {
                    line: self.line_no,
                    message: "single face without landmarks".to_string(),
                });
            }
            return Ok(Some(record));
        }
        Ok(None)
    }
}

impl<B: BufRead> FrameSource for ReplaySource<B> {
    type Frame = ReplayRecord;

    fn next_frame(&mut self) -> Result<ReplayRecord> {
        if let Some(record) = self.read_record()? {
            if self.looping {
                self.buffered.push(record.clone());
            }
            return Ok(record);
        }
        if self.looping && !self.buffered.is_empty() {
            let record = self.buffered[self.cursor % self.buffered.len()].clone();
            self.cursor += 1;
            return Ok(record);
        }
        Err(Error::SourceExhausted)
    }
}

/// Answers detector queries straight from a [`ReplayRecord`].
#[derive(Debug, Default)]
pub struct ReplayDetector;

impl LandmarkDetector for ReplayDetector {
    type Frame = ReplayRecord;

    fn detect_faces(&mut self, frame: &ReplayRecord) -> Result<Vec<FaceRegion>> {
        Ok(vec![Rect::default(); frame.faces])
    }

    fn locate_landmarks(&mut self, frame: &ReplayRecord, _face: &FaceRegion) -> Result<LandmarkSet> {
        let points = frame
            .landmarks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|&p| Point::from(p))
            .collect();
        LandmarkSet::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn landmark_line() -> String {
        let points: Vec<(i32, i32)> = (0..68).map(|i| (i, i)).collect();
        serde_json::to_string(&ReplayRecord {
            faces: 1,
            landmarks: Some(points),
        })
        .unwrap()
    }

    #[test]
    fn test_reads_records_and_skips_comments() {
        let text = format!("# header\n{{\"faces\": 0}}\n\n{}\n{{\"faces\": 2}}\n", landmark_line());
        let mut source = ReplaySource::new(Cursor::new(text));
        assert_eq!(source.next_frame().unwrap().faces, 0);
        assert_eq!(source.next_frame().unwrap().faces, 1);
        assert_eq!(source.next_frame().unwrap().faces, 2);
        assert!(matches!(source.next_frame(), Err(Error::SourceExhausted)));
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let mut source = ReplaySource::new(Cursor::new("{\"faces\": 0}\nnot json\n"));
        source.next_frame().unwrap();
        match source.next_frame() {
            Err(Error::Replay { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_single_face_requires_landmarks() {
        let mut source = ReplaySource::new(Cursor::new("{\"faces\": 1}\n"));
        assert!(matches!(source.next_frame(), Err(Error::Replay { line: 1, .. })));
    }

    #[test]
    fn test_looping_replays_from_start() {
        let mut source =
            ReplaySource::new(Cursor::new("{\"faces\": 0}\n{\"faces\": 3}\n")).looping(true);
        let faces: Vec<usize> = (0..5).map(|_| source.next_frame().unwrap().faces).collect();
        assert_eq!(faces, vec![0, 3, 0, 3, 0]);
    }

    #[test]
    fn test_detector_returns_recorded_landmarks() {
        let record: ReplayRecord = serde_json::from_str(&landmark_line()).unwrap();
        let mut detector = ReplayDetector;
        let faces = detector.detect_faces(&record).unwrap();
        assert_eq!(faces.len(), 1);
        let landmarks = detector.locate_landmarks(&record, &faces[0]).unwrap();
        assert_eq!(landmarks.mouth()[0], Point::new(48, 48));
    }

    #[test]
    fn test_wrong_landmark_count_is_error() {
        let record = ReplayRecord {
            faces: 1,
            landmarks: Some(vec![(0, 0); 20]),
        };
        let mut detector = ReplayDetector;
        let err = detector
            .locate_landmarks(&record, &Rect::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLandmarks { actual: 20, .. }));
    }
}
