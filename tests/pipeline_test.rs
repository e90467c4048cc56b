//! End-to-end tests: recorded JSONL sessions driven through the replay
//! source, the full pipeline, and a recording sink.

use kinetic_pointer::perception::landmark;
use kinetic_pointer::{
    ActionEvent, Config, FrameSource, HandFrame, Landmark, MouseButton, PointerPipeline,
    PointerSink, RecordingSink, ReplaySource,
};
use std::io::Write;
use std::path::PathBuf;

/// Deterministic test configuration: passthrough smoothing, short
/// debounce, 1000x1000 output space.
fn test_config() -> Config {
    let mut config = Config::default();
    config.smoothing_factor = 1.0;
    config.debounce_frames = 2;
    config.failsafe_frames = 3;
    config
}

/// Open hand with the index fingertip at the given normalized point.
fn open_hand(seq: u64, x: f64, y: f64) -> HandFrame {
    let mut landmarks = vec![Landmark::new(x, y + 0.4, 0.0); landmark::COUNT];
    landmarks[landmark::WRIST] = Landmark::new(x, y + 0.4, 0.0);
    landmarks[landmark::THUMB_TIP] = Landmark::new(x - 0.2, y + 0.2, 0.0);
    landmarks[landmark::INDEX_TIP] = Landmark::new(x, y, 0.0);
    landmarks[landmark::MIDDLE_TIP] = Landmark::new(x + 0.08, y, 0.0);
    landmarks[landmark::RING_TIP] = Landmark::new(x + 0.14, y + 0.02, 0.0);
    landmarks[landmark::PINKY_TIP] = Landmark::new(x + 0.2, y + 0.05, 0.0);
    HandFrame::new(seq, 0.9, landmarks)
}

/// Same hand, thumb pinched onto the index fingertip.
fn pinching_hand(seq: u64, x: f64, y: f64) -> HandFrame {
    let mut frame = open_hand(seq, x, y);
    frame.landmarks[landmark::THUMB_TIP] = Landmark::new(x + 0.01, y, 0.0);
    frame
}

/// All four fingertips folded to the wrist, thumb clear of them.
fn fist_hand(seq: u64, x: f64, y: f64) -> HandFrame {
    let mut landmarks = vec![Landmark::new(x, y + 0.1, 0.0); landmark::COUNT];
    landmarks[landmark::WRIST] = Landmark::new(x, y + 0.1, 0.0);
    landmarks[landmark::THUMB_TIP] = Landmark::new(x - 0.15, y + 0.1, 0.0);
    landmarks[landmark::INDEX_TIP] = Landmark::new(x, y, 0.0);
    landmarks[landmark::MIDDLE_TIP] = Landmark::new(x + 0.05, y + 0.02, 0.0);
    landmarks[landmark::RING_TIP] = Landmark::new(x + 0.08, y + 0.05, 0.0);
    landmarks[landmark::PINKY_TIP] = Landmark::new(x + 0.1, y + 0.08, 0.0);
    HandFrame::new(seq, 0.9, landmarks)
}

fn frame_line(frame: &HandFrame) -> String {
    serde_json::to_string(frame).expect("serialize frame")
}

fn write_recording(lines: &[String]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "kinetic-pipeline-test-{}.jsonl",
        uuid::Uuid::new_v4()
    ));
    let mut file = std::fs::File::create(&path).expect("create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
    path
}

/// Drive a recording through the pipeline; stops on Exit like the real
/// control loop does.
fn run_recording(config: &Config, lines: &[String]) -> Vec<ActionEvent> {
    let path = write_recording(lines);
    let mut source = ReplaySource::open(&path, 0).expect("open recording");
    let mut pipeline = PointerPipeline::from_config(config, 1000, 1000);
    let mut sink = RecordingSink::default();

    'drive: loop {
        let tick = match source.next_frame() {
            Ok(tick) => tick,
            Err(_) => break,
        };
        for event in pipeline.process(tick.as_ref()) {
            let exit = event == ActionEvent::Exit;
            sink.apply(&event).expect("sink");
            if exit {
                break 'drive;
            }
        }
    }

    let _ = std::fs::remove_file(&path);
    sink.events
}

#[test]
fn test_replayed_click_session() {
    let lines: Vec<String> = (0..3)
        .map(|i| frame_line(&open_hand(i, 0.5, 0.5)))
        .chain((3..6).map(|i| frame_line(&pinching_hand(i, 0.5, 0.5))))
        .chain((6..9).map(|i| frame_line(&open_hand(i, 0.5, 0.5))))
        .collect();

    let events = run_recording(&test_config(), &lines);

    let downs = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::ClickDown(MouseButton::Left)))
        .count();
    let ups = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::ClickUp(MouseButton::Left)))
        .count();
    let moves = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::Move { .. }))
        .count();

    assert_eq!(downs, 1, "one pinch-and-release = one click down");
    assert_eq!(ups, 1, "one pinch-and-release = one click up");
    assert_eq!(moves, 9, "a Move for every frame with a hand");
}

#[test]
fn test_cursor_tracks_index_fingertip() {
    // Region 0.2..0.8 maps onto the 1000 px output space
    let lines = vec![
        frame_line(&open_hand(0, 0.5, 0.5)),
        frame_line(&open_hand(1, 0.8, 0.2)),
    ];
    let events = run_recording(&test_config(), &lines);

    let moves: Vec<(f64, f64)> = events
        .iter()
        .filter_map(|e| match e {
            ActionEvent::Move { x, y } => Some((*x, *y)),
            _ => None,
        })
        .collect();

    assert_eq!(moves.len(), 2);
    assert!((moves[0].0 - 500.0).abs() < 1e-6);
    assert!((moves[0].1 - 500.0).abs() < 1e-6);
    assert!((moves[1].0 - 999.0).abs() < 1e-6, "x_end clamps to width-1");
    assert!((moves[1].1 - 0.0).abs() < 1e-6);
}

#[test]
fn test_hand_loss_releases_held_button() {
    let lines = vec![
        frame_line(&open_hand(0, 0.5, 0.5)),
        frame_line(&pinching_hand(1, 0.5, 0.5)),
        frame_line(&pinching_hand(2, 0.5, 0.5)),
        "null".to_string(),
        "null".to_string(),
    ];
    let events = run_recording(&test_config(), &lines);

    let downs = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::ClickDown(_)))
        .count();
    assert_eq!(downs, 1);
    assert_eq!(
        events.last(),
        Some(&ActionEvent::ClickUp(MouseButton::Left)),
        "hand loss must close the held button, and nothing may follow"
    );
}

#[test]
fn test_fist_drag_scrolls() {
    let lines = vec![
        frame_line(&open_hand(0, 0.5, 0.5)),
        frame_line(&open_hand(1, 0.5, 0.5)),
        // Two fist frames pay the debounce; anchor lands at y = 500
        frame_line(&fist_hand(2, 0.5, 0.5)),
        frame_line(&fist_hand(3, 0.5, 0.5)),
        // 100 px down => +10 units at sensitivity 10, then 50 px up => -5
        frame_line(&fist_hand(4, 0.5, 0.56)),
        frame_line(&fist_hand(5, 0.5, 0.53)),
        frame_line(&open_hand(6, 0.5, 0.53)),
    ];
    let events = run_recording(&test_config(), &lines);

    let deltas: Vec<i32> = events
        .iter()
        .filter_map(|e| match e {
            ActionEvent::ScrollDelta(d) => Some(*d),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec![10, -5]);

    let clicks = events
        .iter()
        .any(|e| matches!(e, ActionEvent::ClickDown(_) | ActionEvent::ClickUp(_)));
    assert!(!clicks, "a scroll session must not emit clicks");
}

#[test]
fn test_corner_hold_triggers_exit() {
    // (0.1, 0.1) is outside the active region and clamps to screen (0, 0)
    let lines: Vec<String> = (0..5)
        .map(|i| frame_line(&open_hand(i, 0.1, 0.1)))
        .collect();
    let events = run_recording(&test_config(), &lines);

    assert_eq!(events.last(), Some(&ActionEvent::Exit));
    // failsafe_frames = 3: two corner frames alone must not exit
    let short: Vec<String> = (0..2)
        .map(|i| frame_line(&open_hand(i, 0.1, 0.1)))
        .collect();
    let events = run_recording(&test_config(), &short);
    assert!(!events.contains(&ActionEvent::Exit));
}

#[test]
fn test_exit_releases_button_first() {
    let mut config = test_config();
    config.failsafe_frames = 2;
    // Pinch held while drifting into the corner
    let lines: Vec<String> = (0..2)
        .map(|i| frame_line(&pinching_hand(i, 0.5, 0.5)))
        .chain((2..4).map(|i| frame_line(&pinching_hand(i, 0.1, 0.1))))
        .collect();
    let events = run_recording(&config, &lines);

    let up_idx = events
        .iter()
        .position(|e| matches!(e, ActionEvent::ClickUp(_)))
        .expect("button released");
    let exit_idx = events
        .iter()
        .position(|e| *e == ActionEvent::Exit)
        .expect("exit emitted");
    assert!(up_idx < exit_idx, "release must precede the exit");
}

#[test]
fn test_noisy_recording_still_plays() {
    let lines = vec![
        "{ not valid json".to_string(),
        frame_line(&open_hand(0, 0.5, 0.5)),
        String::new(),
        frame_line(&open_hand(1, 0.6, 0.5)),
    ];
    let events = run_recording(&test_config(), &lines);

    let moves = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::Move { .. }))
        .count();
    assert_eq!(moves, 2, "malformed and blank lines are dropped");
}

#[test]
fn test_low_confidence_frames_count_as_gaps() {
    let mut faint = open_hand(0, 0.5, 0.5);
    faint.confidence = 0.2;
    let lines = vec![
        frame_line(&faint),
        frame_line(&open_hand(1, 0.5, 0.5)),
    ];
    let events = run_recording(&test_config(), &lines);

    let moves = events
        .iter()
        .filter(|e| matches!(e, ActionEvent::Move { .. }))
        .count();
    assert_eq!(moves, 1, "sub-floor confidence must not move the cursor");
}
