//! Mouth aspect ratio and frame classification.

use super::types::{FrameResult, GestureState, MouthLandmarks};
use crate::core::config::GestureConfig;
use crate::core::constants::{
    MAR_HORIZONTAL_PAIR, MAR_VERTICAL_PAIR_1, MAR_VERTICAL_PAIR_2, MOUTH_LM_COUNT,
};
use crate::error::{Error, Result};
use crate::geometry::{distance, ratio, Point};

/// Mouth aspect ratio: the two vertical lip gaps over the corner-to-corner
/// width. Fails with [`Error::DegenerateGeometry`] when the width is zero.
pub fn compute_mar(mouth: &MouthLandmarks) -> Result<f64> {
    let gap = |(a, b): (usize, usize)| distance(mouth[a], mouth[b]);

    let vertical1 = gap(MAR_VERTICAL_PAIR_1);
    let vertical2 = gap(MAR_VERTICAL_PAIR_2);
    let horizontal = gap(MAR_HORIZONTAL_PAIR);

    ratio(vertical1 + vertical2, horizontal).ok_or(Error::DegenerateGeometry)
}

/// Classify one frame and update the debounce state.
///
/// Only a single visible face contributes a reading. Frames with no face,
/// several faces or unusable geometry leave the closed-frame counter as it
/// was, so a dropped detection does not erase progress toward a jump.
pub fn classify_frame(
    config: &GestureConfig,
    state: &mut GestureState,
    face_count: usize,
    mouth: Option<&MouthLandmarks>,
    bird_dead: bool,
) -> FrameResult {
    state.last_face_count = face_count;

    if face_count == 0 {
        return FrameResult::NoFace;
    }
    if face_count > 1 {
        return FrameResult::MultipleFaces(face_count);
    }

    let Some(mouth) = mouth else {
        return FrameResult::NoReading;
    };
    let mar = match compute_mar(mouth) {
        Ok(mar) => mar,
        Err(e) => {
            log::warn!("Skipping frame: {}", e);
            return FrameResult::NoReading;
        }
    };

    if mar < config.mar_threshold {
        state.consecutive_below_threshold = state.consecutive_below_threshold.saturating_add(1);
        return FrameResult::MouthClosed(mar);
    }

    let fire = state.consecutive_below_threshold >= config.consecutive_frames && !bird_dead;
    state.consecutive_below_threshold = 0;

    if fire {
        state.total_triggers += 1;
        log::debug!("Jump triggered (MAR {:.2}, total {})", mar, state.total_triggers);
        FrameResult::JumpTriggered(mar)
    } else {
        FrameResult::MouthOpen(mar)
    }
}

/// Build a mouth whose corners are `width` apart and whose two measured lip
/// pairs are each `gap` apart, giving a MAR of `2 * gap / width`.
pub fn synthesize_mouth(center: Point, width: i32, gap: i32) -> MouthLandmarks {
    let half_w = width / 2;
    let third_w = width / 6;
    let top = center.y - gap / 2;
    let bottom = top + gap;
    let inner_top = center.y - gap / 4;
    let inner_bottom = inner_top + gap / 2;

    let mut points = [center; MOUTH_LM_COUNT];
    // Outer lip: corners, upper arc left to right, lower arc right to left
    points[0] = Point::new(center.x - half_w, center.y);
    points[1] = Point::new(center.x - 2 * third_w, top + gap / 8);
    points[2] = Point::new(center.x - third_w, top);
    points[3] = Point::new(center.x, top);
    points[4] = Point::new(center.x + third_w, top);
    points[5] = Point::new(center.x + 2 * third_w, top + gap / 8);
    points[6] = Point::new(center.x + half_w, center.y);
    points[7] = Point::new(center.x + 2 * third_w, bottom - gap / 8);
    points[8] = Point::new(center.x + third_w, bottom);
    points[9] = Point::new(center.x, bottom);
    points[10] = Point::new(center.x - third_w, bottom);
    points[11] = Point::new(center.x - 2 * third_w, bottom - gap / 8);
    // Inner lip
    points[12] = Point::new(center.x - half_w + 4, center.y);
    points[13] = Point::new(center.x - third_w, inner_top);
    points[14] = Point::new(center.x, inner_top);
    points[15] = Point::new(center.x + third_w, inner_top);
    points[16] = Point::new(center.x + half_w - 4, center.y);
    points[17] = Point::new(center.x + third_w, inner_bottom);
    points[18] = Point::new(center.x, inner_bottom);
    points[19] = Point::new(center.x - third_w, inner_bottom);

    MouthLandmarks::new(points)
}
