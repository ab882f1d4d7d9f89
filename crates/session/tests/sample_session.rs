use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use facepoint_common::config::{AppConfig, DispatchConfig};
use facepoint_common::error::FacepointError;
use facepoint_face_model::{
    parse_actions, ActionLogHeader, FaceMeshIndices, FrameRecord, Landmark, LandmarkSet,
    MouseButton,
};
use facepoint_gesture_core::{FaceProcessor, FrameReport, ScreenSize, Status};
use facepoint_pointer::{ActionDispatcher, ActionWriter, PointerCall, StubBackend, StubRecorder};
use facepoint_session::{EndReason, GestureSession, JsonlFrameSource, VecFrameSource};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("frames.jsonl")
}

fn dispatcher(failsafe: bool) -> (ActionDispatcher, StubRecorder) {
    let backend = StubBackend::new();
    let recorder = backend.recorder();
    let dispatcher =
        ActionDispatcher::new(Box::new(backend), WIDTH, HEIGHT, &DispatchConfig { failsafe });
    (dispatcher, recorder)
}

fn processor() -> FaceProcessor {
    FaceProcessor::new(&AppConfig::default(), ScreenSize::new(WIDTH, HEIGHT))
}

#[test]
fn fixture_session_clicks_scrolls_and_shuts_down() {
    let source = JsonlFrameSource::open(&fixture_path()).expect("fixture feed should open");
    let (dispatcher, recorder) = dispatcher(true);

    let statuses = Arc::new(Mutex::new(Vec::new()));
    let sink_statuses = statuses.clone();
    let sink = move |report: &FrameReport| {
        sink_statuses.lock().unwrap().push(report.status);
    };

    let mut session = GestureSession::new(Box::new(source), processor(), dispatcher)
        .with_status_sink(Box::new(sink));
    let summary = session.run().unwrap();

    assert_eq!(summary.end_reason, EndReason::Shutdown);
    // The frame after the shutdown frame is never read.
    assert_eq!(summary.frames, 19);
    assert_eq!(summary.face_frames, 17);
    assert_eq!(summary.clicks, 2);
    assert_eq!(summary.scrolls, 2);
    assert!(session.state().is_terminated());

    assert_eq!(recorder.clicks(), vec![MouseButton::Left, MouseButton::Right]);
    let scrolls: Vec<_> = recorder
        .calls()
        .into_iter()
        .filter(|c| matches!(c, PointerCall::Scroll(_)))
        .collect();
    assert_eq!(scrolls, vec![PointerCall::Scroll(-40), PointerCall::Scroll(-40)]);
    assert_eq!(recorder.last_position(), Some((960, 540)));

    let statuses = statuses.lock().unwrap();
    assert_eq!(statuses[0], Status::Scanning);
    assert_eq!(statuses[2], Status::CursorActive);
    assert_eq!(statuses[5], Status::LeftClick);
    assert_eq!(statuses[7], Status::RightClick);
    assert_eq!(statuses[8], Status::Scrolling);
    assert!(matches!(
        statuses[10],
        Status::ShuttingDown { remaining_secs } if remaining_secs == 4.0
    ));
    assert_eq!(statuses.last(), Some(&Status::Shutdown));
}

#[test]
fn fixture_session_writes_action_log() {
    let dir = std::env::temp_dir().join("facepoint_test_session_action_log");
    let _ = std::fs::remove_dir_all(&dir);
    let log_path = dir.join("actions.jsonl");

    let header = ActionLogHeader {
        schema_version: "1.0".to_string(),
        epoch_wall: "2026-01-01T00:00:00Z".to_string(),
        screen_width: WIDTH,
        screen_height: HEIGHT,
        backend: "stub".to_string(),
    };
    let writer = ActionWriter::new(log_path.clone(), &header).unwrap();
    let (dispatcher, _recorder) = dispatcher(true);
    let dispatcher = dispatcher.with_writer(writer);

    let source = JsonlFrameSource::open(&fixture_path()).unwrap();
    let mut session = GestureSession::new(Box::new(source), processor(), dispatcher);
    session.run().unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    let actions = parse_actions(&content).unwrap();
    let moves = actions
        .iter()
        .filter(|a| matches!(a.action, facepoint_face_model::Action::MoveCursor { .. }))
        .count();
    assert_eq!(moves, 17);
    assert_eq!(actions.iter().filter(|a| a.action.is_click()).count(), 2);
    let last = actions.last().unwrap();
    assert!(last.action.is_shutdown());
    assert_eq!(last.t, 6.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_feed_line_ends_session_with_error() {
    let feed = "{\"t\":0.0,\"faces\":[]}\n{\"t\":0.1,\"faces\":\n";
    let source = JsonlFrameSource::new(Cursor::new(feed), "broken");
    let (dispatcher, _recorder) = dispatcher(true);

    let mut session = GestureSession::new(Box::new(source), processor(), dispatcher);
    let err = session.run().unwrap_err();
    assert!(matches!(err, FacepointError::FrameSource { .. }));
}

fn face_with_nose(x: f64, y: f64) -> LandmarkSet {
    let indices = FaceMeshIndices::MEDIAPIPE;
    let mut points = vec![Landmark::new(0.5, 0.5); 468];
    points[indices.nose_tip] = Landmark::new(x, y);
    LandmarkSet::new(points)
}

/// Ten frames centred, then the nose leaves the band towards `nose`.
fn drift_to(nose: f64) -> Vec<FrameRecord> {
    (0..60)
        .map(|i| {
            let nose = if i < 10 { 0.5 } else { nose };
            FrameRecord::with_face(Some(i as f64 / 30.0), face_with_nose(nose, nose))
        })
        .collect()
}

#[test]
fn cursor_driven_into_top_left_trips_failsafe() {
    let frames = drift_to(0.1);
    let (dispatcher, recorder) = dispatcher(true);

    let mut session =
        GestureSession::new(Box::new(VecFrameSource::new(frames)), processor(), dispatcher);
    let summary = session.run().unwrap();

    assert_eq!(summary.end_reason, EndReason::FailSafe);
    assert!(summary.frames > 10 && summary.frames < 60);
    // The corner move itself is never sent.
    let (x, y) = recorder.last_position().unwrap();
    assert!(x > 0 || y > 0);
}

#[test]
fn failsafe_disabled_lets_cursor_reach_top_left() {
    let frames = drift_to(0.1);
    let (dispatcher, recorder) = dispatcher(false);

    let mut session =
        GestureSession::new(Box::new(VecFrameSource::new(frames)), processor(), dispatcher);
    let summary = session.run().unwrap();

    assert_eq!(summary.end_reason, EndReason::SourceExhausted);
    assert_eq!(summary.frames, 60);
    assert_eq!(recorder.last_position(), Some((0, 0)));
}

#[test]
fn bottom_right_corner_does_not_trip_failsafe() {
    let frames = drift_to(0.9);
    let (dispatcher, recorder) = dispatcher(true);

    let mut session =
        GestureSession::new(Box::new(VecFrameSource::new(frames)), processor(), dispatcher);
    let summary = session.run().unwrap();

    assert_eq!(summary.end_reason, EndReason::SourceExhausted);
    assert_eq!(summary.frames, 60);
    assert_eq!(
        recorder.last_position(),
        Some((WIDTH as i32 - 1, HEIGHT as i32 - 1))
    );
}
