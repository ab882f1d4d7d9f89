use facepoint_common::config::AppConfig;
use facepoint_face_model::{
    Action, FaceMeshIndices, Landmark, LandmarkSet, MouseButton, RatioIndices,
};
use facepoint_gesture_core::{FaceProcessor, ScreenSize, SessionState, Status};

const FPS: f64 = 30.0;

fn place(points: &mut [Landmark], r: RatioIndices, cx: f64, cy: f64, ratio: f64) {
    let half_w = 0.04;
    let half_h = ratio * half_w;
    points[r.horizontal.0] = Landmark::new(cx - half_w, cy);
    points[r.horizontal.1] = Landmark::new(cx + half_w, cy);
    points[r.vertical.0] = Landmark::new(cx, cy - half_h);
    points[r.vertical.1] = Landmark::new(cx, cy + half_h);
}

fn face(left: f64, right: f64, mouth: f64) -> LandmarkSet {
    let indices = FaceMeshIndices::MEDIAPIPE;
    let mut points = vec![Landmark::new(0.5, 0.5); 478];
    points[indices.nose_tip] = Landmark::new(0.55, 0.45);
    place(&mut points, indices.left_eye, 0.42, 0.40, left);
    place(&mut points, indices.right_eye, 0.58, 0.40, right);
    place(&mut points, indices.mouth, 0.50, 0.70, mouth);
    LandmarkSet::new(points)
}

fn processor() -> FaceProcessor {
    FaceProcessor::new(&AppConfig::default(), ScreenSize::new(1920, 1080))
}

fn clicks(actions: &[Action]) -> Vec<MouseButton> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Click { button } => Some(*button),
            _ => None,
        })
        .collect()
}

#[test]
fn left_blink_then_bilateral_hold_shuts_down() {
    let processor = processor();
    let mut state = SessionState::default();

    let report = processor.process(&mut state, Some(&face(0.1, 0.3, 0.2)), 10.0);
    assert_eq!(clicks(&report.actions), vec![MouseButton::Left]);

    let closed = face(0.1, 0.1, 0.2);
    let start = 10.0 + 1.0 / FPS;
    let mut shutdown_at = None;
    let mut emitted_clicks = 0;
    for frame in 0..200 {
        let t = start + frame as f64 / FPS;
        let report = processor.process(&mut state, Some(&closed), t);
        emitted_clicks += clicks(&report.actions).len();
        if report.is_shutdown() {
            shutdown_at = Some(t);
            break;
        }
        assert!(t - start < 4.0, "hold passed 4s at t={t} without shutdown");
        assert!(matches!(report.status, Status::ShuttingDown { .. }));
    }

    let shutdown_at = shutdown_at.expect("shutdown should fire");
    assert!(shutdown_at - start >= 4.0);
    assert!(shutdown_at - start < 4.0 + 2.0 / FPS);
    assert_eq!(emitted_clicks, 0);
    assert!(state.is_terminated());
}

#[test]
fn absent_face_freezes_shutdown_hold() {
    let processor = processor();
    let mut state = SessionState::default();
    let closed = face(0.1, 0.1, 0.2);

    processor.process(&mut state, Some(&closed), 0.0);
    processor.process(&mut state, Some(&closed), 2.0);

    // Face lost for a while: the hold neither resets nor fires.
    for i in 0..60 {
        let report = processor.process(&mut state, None, 2.0 + i as f64 * 0.05);
        assert_eq!(report.status, Status::Scanning);
    }
    assert_eq!(state.timers.eyes_closed_since, Some(0.0));

    // Elapsed is measured from when the hold began.
    let report = processor.process(&mut state, Some(&closed), 5.0);
    assert!(report.is_shutdown());
}

#[test]
fn held_open_mouth_scrolls_every_frame_while_blinking() {
    let processor = processor();
    let mut state = SessionState::default();
    let mut scrolls = 0;
    let mut left_clicks = 0;

    for frame in 0..30 {
        let t = frame as f64 / FPS;
        let report = processor.process(&mut state, Some(&face(0.1, 0.35, 0.9)), t);
        scrolls += report.actions.iter().filter(|a| a.is_scroll()).count();
        left_clicks += clicks(&report.actions).len();
    }

    assert_eq!(scrolls, 30);
    // 30 frames span 0.967s: clicks at 0.0, 0.433, 0.867.
    assert_eq!(left_clicks, 3);
}

#[test]
fn cursor_keeps_last_position_across_missing_frames() {
    let processor = processor();
    let mut state = SessionState::default();
    let open = face(0.3, 0.3, 0.2);

    processor.process(&mut state, Some(&open), 0.0);
    let after_first = state.cursor;
    processor.process(&mut state, None, 0.033);
    assert_eq!(state.cursor, after_first);

    let report = processor.process(&mut state, Some(&open), 0.066);
    let Action::MoveCursor { x, y } = report.actions[0] else {
        panic!("first action should move the cursor");
    };
    // Second smoothing step from the preserved position: 3/4 of the target.
    assert!((x - 0.75 * 1200.0).abs() < 1e-6);
    assert!((y - 0.75 * 405.0).abs() < 1e-6);
}
