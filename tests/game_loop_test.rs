//! End-to-end tests: recorded landmark streams driven through the session
//! and the full game loop with fake collaborators.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use mouthflap::gesture::{classify_frame, synthesize_mouth};
use mouthflap::replay::{ReplayDetector, ReplayRecord, ReplaySource};
use mouthflap::{
    BirdSprite, Error, FaceObservation, FrameResult, GameConfig, GameLoop, GameSession,
    LandmarkSet, Point, QuitSignal, RenderSnapshot, Renderer, StopReason, TickEvent,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Cursor;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

/// A full 68-point face whose mouth has the given MAR.
fn face_with_mar(mar: f64) -> LandmarkSet {
    let mouth = synthesize_mouth(Point::new(300, 400), 100, (mar * 50.0).round() as i32);
    let mut points: Vec<Point> = (0..68).map(|i| Point::new(200 + i, 250)).collect();
    points[48..68].copy_from_slice(mouth.points());
    LandmarkSet::new(points).unwrap()
}

fn line_for(mar: f64) -> String {
    ReplayRecord::from_landmarks(&face_with_mar(mar))
        .to_json_line()
        .unwrap()
}

fn replay_text(lines: &[String]) -> Cursor<String> {
    Cursor::new(lines.join("\n"))
}

/// Closed, closed, closed, open, then two frames without a face.
fn jump_recording() -> Vec<String> {
    vec![
        "# three closed frames then a wide open mouth".to_string(),
        line_for(0.4),
        line_for(0.4),
        line_for(0.4),
        line_for(2.0),
        r#"{"faces": 0}"#.to_string(),
        r#"{"faces": 0}"#.to_string(),
    ]
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<RenderSnapshot>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> mouthflap::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}

/// Quits once `after` ticks have been allowed.
struct QuitAfter {
    after: u32,
    polls: u32,
}

impl QuitSignal for QuitAfter {
    fn should_quit(&mut self) -> mouthflap::Result<bool> {
        self.polls += 1;
        Ok(self.polls > self.after)
    }
}

fn never() -> QuitAfter {
    QuitAfter {
        after: u32::MAX,
        polls: 0,
    }
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_jump_sequence() {
    let mut rng = test_rng();
    let mut session = GameSession::new(GameConfig::default(), &mut rng);

    let closed = FaceObservation::single(face_with_mar(0.4).mouth());
    let open = FaceObservation::single(face_with_mar(2.0).mouth());

    for _ in 0..3 {
        let result = session.tick(&closed, &mut rng);
        assert_eq!(result.classification, FrameResult::MouthClosed(0.4));
    }
    let result = session.tick(&open, &mut rng);
    assert_eq!(result.classification, FrameResult::JumpTriggered(2.0));
    assert!(result.events.contains(&TickEvent::JumpTriggered { mar: 2.0 }));
    assert_eq!(
        session.physics.bird.remaining_jump_ticks,
        session.config.physics.jump_height - 1
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.bird_sprite, BirdSprite::Flapping);
    assert_eq!(snapshot.total_triggers, 1);
    assert_eq!(
        snapshot.status_lines,
        vec!["Mouth Aspect Ratio: 2.00", "Mouth OPEN"]
    );
}

#[test]
fn test_trigger_arms_full_jump_before_advance() {
    let mut rng = test_rng();
    let mut session = GameSession::new(GameConfig::default(), &mut rng);
    let closed = face_with_mar(0.4).mouth();
    let open = face_with_mar(2.0).mouth();

    for _ in 0..3 {
        classify_frame(&session.config.gesture, &mut session.gesture, 1, Some(&closed), false);
    }
    let result = classify_frame(&session.config.gesture, &mut session.gesture, 1, Some(&open), false);
    assert!(result.is_trigger());
    session.physics.apply_jump_impulse();
    assert_eq!(session.physics.bird.remaining_jump_ticks, 17);
    assert_eq!(session.gesture.consecutive_below_threshold, 0);
}

#[test]
fn test_session_runs_without_a_face() {
    let mut rng = test_rng();
    let mut session = GameSession::new(GameConfig::default(), &mut rng);
    let mut respawned = false;
    for _ in 0..100 {
        let result = session.tick(&FaceObservation::none(), &mut rng);
        assert_eq!(result.classification, FrameResult::NoFace);
        respawned |= result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::Respawned { .. }));
    }
    // Free fall from the default height leaves the band within 100 ticks
    assert!(respawned);
    assert_eq!(session.tick_count, 100);
}

// =============================================================================
// Game loop
// =============================================================================

#[test]
fn test_loop_plays_recording_to_the_end() {
    let source = ReplaySource::new(replay_text(&jump_recording()));
    let mut game = GameLoop::new(
        GameConfig::default(),
        source,
        ReplayDetector,
        RecordingRenderer::default(),
        never(),
        test_rng(),
    );

    let summary = game.run().unwrap();
    assert_eq!(summary.stop_reason, StopReason::SourceExhausted);
    assert_eq!(summary.ticks, 6);
    assert_eq!(summary.jumps, 1);
    assert_eq!(summary.deaths, 0);

    let frames = &game.renderer().frames;
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[2].closed_frames, 3);
    assert!(frames[3].classification.is_trigger());
    assert_eq!(frames[4].classification, FrameResult::NoFace);
    assert!(frames[4].mouth_points.is_none());
    assert_eq!(frames.last().map(|f| f.tick), Some(6));
}

#[test]
fn test_loop_stops_at_tick_limit() {
    let source = ReplaySource::new(replay_text(&jump_recording())).looping(true);
    let mut game = GameLoop::new(
        GameConfig::default(),
        source,
        ReplayDetector,
        RecordingRenderer::default(),
        never(),
        test_rng(),
    )
    .with_max_ticks(30);

    let summary = game.run().unwrap();
    assert_eq!(summary.stop_reason, StopReason::TickLimit);
    assert_eq!(summary.ticks, 30);
    // The recording repeats every 6 frames, one jump each pass
    assert_eq!(summary.jumps, 5);
}

#[test]
fn test_loop_quits_on_signal() {
    let source = ReplaySource::new(replay_text(&jump_recording()));
    let mut game = GameLoop::new(
        GameConfig::default(),
        source,
        ReplayDetector,
        RecordingRenderer::default(),
        QuitAfter { after: 2, polls: 0 },
        test_rng(),
    );

    let summary = game.run().unwrap();
    assert_eq!(summary.stop_reason, StopReason::Quit);
    assert_eq!(summary.ticks, 2);
    assert_eq!(game.renderer().frames.len(), 2);
}

#[test]
fn test_loop_aborts_on_bad_recording() {
    let lines = vec![line_for(0.4), "{\"faces\": \"many\"}".to_string()];
    let mut game = GameLoop::new(
        GameConfig::default(),
        ReplaySource::new(replay_text(&lines)),
        ReplayDetector,
        RecordingRenderer::default(),
        never(),
        test_rng(),
    );

    match game.run() {
        Err(Error::Replay { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected replay error, got {:?}", other),
    }
    assert_eq!(game.renderer().frames.len(), 1);
}

#[test]
fn test_loop_with_crowd_never_jumps() {
    let lines = vec![r#"{"faces": 2}"#.to_string(); 4];
    let mut game = GameLoop::new(
        GameConfig::default(),
        ReplaySource::new(replay_text(&lines)),
        ReplayDetector,
        RecordingRenderer::default(),
        never(),
        test_rng(),
    );
    let summary = game.run().unwrap();
    assert_eq!(summary.jumps, 0);
    assert_eq!(
        game.renderer().frames[0].status_lines,
        vec!["Only support 1 face. Detected 2 faces"]
    );
}

#[test]
fn test_loop_uses_configured_gesture() {
    let config = GameConfig::from_json(r#"{"gesture": {"consecutive_frames": 1}}"#).unwrap();
    let lines = vec![line_for(0.4), line_for(2.0), line_for(0.4), line_for(2.0)];
    let mut game = GameLoop::new(
        config,
        ReplaySource::new(replay_text(&lines)),
        ReplayDetector,
        RecordingRenderer::default(),
        never(),
        test_rng(),
    );
    let summary = game.run().unwrap();
    assert_eq!(summary.jumps, 2);
}
