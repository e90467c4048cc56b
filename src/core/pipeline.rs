//! The per-tick processing pipeline and its session state.
//!
//! One frame (or its absence) flows synchronously through the position
//! path (normalize, region-map, smooth) and the gesture path (classify,
//! arbitrate), with the fail-safe monitor tapping the smoothed output.
//! The pipeline owns every piece of session-spanning state, so a fresh
//! instance per test exercises the whole core deterministically.

use crate::config::Config;
use crate::core::classifier::GestureClassifier;
use crate::core::failsafe::SafetyMonitor;
use crate::core::normalize::LandmarkNormalizer;
use crate::core::region::RegionMapper;
use crate::core::smoother::CursorSmoother;
use crate::core::state_machine::{ActionEvent, ActionStateMachine, ControlState};
use crate::perception::types::HandFrame;

/// The full signal-conditioning and gesture-classification core.
pub struct PointerPipeline {
    normalizer: LandmarkNormalizer,
    mapper: RegionMapper,
    smoother: CursorSmoother,
    classifier: GestureClassifier,
    machine: ActionStateMachine,
    failsafe: SafetyMonitor,
}

impl PointerPipeline {
    /// Build a pipeline from validated configuration and the output
    /// screen dimensions.
    pub fn from_config(config: &Config, screen_width: u32, screen_height: u32) -> Self {
        Self {
            normalizer: LandmarkNormalizer::new(config.confidence_floor),
            mapper: RegionMapper::new(
                config.active_region,
                screen_width,
                screen_height,
                config.mirror_x,
            ),
            smoother: CursorSmoother::new(config.smoothing_factor),
            classifier: GestureClassifier::new(config.click_threshold, config.curl_threshold),
            machine: ActionStateMachine::new(config.debounce_frames, config.scroll_sensitivity),
            failsafe: SafetyMonitor::new(config.failsafe_size_px, config.failsafe_frames),
        }
    }

    /// Process one capture tick. `None` means no hand frame arrived.
    ///
    /// Emits the serialized action stream for this tick; after an
    /// [`ActionEvent::Exit`] the caller is expected to tear down.
    pub fn process(&mut self, frame: Option<&HandFrame>) -> Vec<ActionEvent> {
        let frame = match frame {
            Some(frame) => frame,
            None => return self.hand_lost(),
        };

        let raw = match self.normalizer.normalize(frame) {
            Some(pos) => self.mapper.map(pos),
            // Sub-threshold confidence is a dropped frame, same as no hand
            None => return self.hand_lost(),
        };

        let smoothed = self.smoother.update(raw);
        let symbol = self.classifier.classify(frame);
        let mut events = self.machine.advance(Some((symbol, smoothed)));

        if self.failsafe.observe(Some(smoothed)) {
            // Flush a held button before terminating
            if let Some(up) = self.machine.force_release() {
                events.push(up);
            }
            events.push(ActionEvent::Exit);
        }

        events
    }

    /// Close any held button, e.g. before an externally requested quit.
    pub fn shutdown(&mut self) -> Option<ActionEvent> {
        self.machine.force_release()
    }

    /// Current arbitration state (for status display).
    pub fn state(&self) -> &ControlState {
        self.machine.state()
    }

    fn hand_lost(&mut self) -> Vec<ActionEvent> {
        // Re-initialize on reacquisition rather than resuming from the
        // stale position.
        self.smoother.reset();
        self.failsafe.observe(None);
        self.machine.advance(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state_machine::MouseButton;
    use crate::perception::types::{landmark, Landmark};

    fn test_config() -> Config {
        let mut config = Config::default();
        config.debounce_frames = 2;
        config.failsafe_frames = 3;
        config.smoothing_factor = 1.0; // passthrough position for assertions
        config
    }

    /// Open hand with the index fingertip at the given normalized point.
    fn hand_at(x: f64, y: f64) -> HandFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.95, 0.0); landmark::COUNT];
        landmarks[landmark::WRIST] = Landmark::new(0.5, 0.95, 0.0);
        landmarks[landmark::THUMB_TIP] = Landmark::new(x - 0.2, y + 0.2, 0.0);
        landmarks[landmark::INDEX_TIP] = Landmark::new(x, y, 0.0);
        landmarks[landmark::MIDDLE_TIP] = Landmark::new(x + 0.08, y, 0.0);
        landmarks[landmark::RING_TIP] = Landmark::new(x + 0.14, y + 0.02, 0.0);
        landmarks[landmark::PINKY_TIP] = Landmark::new(x + 0.2, y + 0.05, 0.0);
        HandFrame::new(0, 0.9, landmarks)
    }

    /// Same hand, thumb pinched onto the index fingertip.
    fn pinching_hand_at(x: f64, y: f64) -> HandFrame {
        let mut frame = hand_at(x, y);
        frame.landmarks[landmark::THUMB_TIP] = Landmark::new(x + 0.01, y, 0.0);
        frame
    }

    #[test]
    fn test_moving_hand_emits_moves() {
        let mut pipeline = PointerPipeline::from_config(&test_config(), 1920, 1080);
        let events = pipeline.process(Some(&hand_at(0.5, 0.5)));
        assert_eq!(events.len(), 1);
        match events[0] {
            ActionEvent::Move { x, y } => {
                assert!((x - 960.0).abs() < 1e-6);
                assert!((y - 540.0).abs() < 1e-6);
            }
            ref other => panic!("expected Move, got {other:?}"),
        }
    }

    #[test]
    fn test_low_confidence_frame_acts_as_hand_loss() {
        let mut pipeline = PointerPipeline::from_config(&test_config(), 1920, 1080);
        let mut frame = hand_at(0.5, 0.5);
        frame.confidence = 0.1;
        assert!(pipeline.process(Some(&frame)).is_empty());
        assert_eq!(*pipeline.state(), ControlState::Idle);
    }

    #[test]
    fn test_pinch_click_roundtrip_through_pipeline() {
        let mut pipeline = PointerPipeline::from_config(&test_config(), 1920, 1080);
        let mut downs = 0;
        let mut ups = 0;
        for _ in 0..4 {
            for e in pipeline.process(Some(&pinching_hand_at(0.5, 0.5))) {
                if matches!(e, ActionEvent::ClickDown(MouseButton::Left)) {
                    downs += 1;
                }
            }
        }
        for _ in 0..4 {
            for e in pipeline.process(Some(&hand_at(0.5, 0.5))) {
                if matches!(e, ActionEvent::ClickUp(MouseButton::Left)) {
                    ups += 1;
                }
            }
        }
        assert_eq!((downs, ups), (1, 1));
    }

    #[test]
    fn test_hand_loss_resets_smoother() {
        let mut config = test_config();
        config.smoothing_factor = 6.0;
        let mut pipeline = PointerPipeline::from_config(&config, 1920, 1080);

        pipeline.process(Some(&hand_at(0.3, 0.5)));
        pipeline.process(None);

        // After reacquisition the cursor adopts the new position directly
        // instead of sweeping over from the old one.
        let events = pipeline.process(Some(&hand_at(0.7, 0.5)));
        match events[0] {
            ActionEvent::Move { x, .. } => assert!((x - (0.5 / 0.6) * 1920.0).abs() < 1e-6),
            ref other => panic!("expected Move, got {other:?}"),
        }
    }

    #[test]
    fn test_failsafe_corner_emits_exit() {
        let mut pipeline = PointerPipeline::from_config(&test_config(), 1920, 1080);
        // Index finger held at the region's top-left corner -> screen (0, 0)
        let mut saw_exit = false;
        for _ in 0..3 {
            for e in pipeline.process(Some(&hand_at(0.0, 0.0))) {
                if e == ActionEvent::Exit {
                    saw_exit = true;
                }
            }
        }
        assert!(saw_exit);
    }

    #[test]
    fn test_failsafe_exit_flushes_held_click() {
        let mut config = test_config();
        config.failsafe_frames = 2;
        let mut pipeline = PointerPipeline::from_config(&config, 1920, 1080);

        // Engage a click away from the corner
        for _ in 0..3 {
            pipeline.process(Some(&pinching_hand_at(0.5, 0.5)));
        }
        // Then pinch into the corner until the fail-safe trips
        let mut collected = Vec::new();
        for _ in 0..2 {
            collected.extend(pipeline.process(Some(&pinching_hand_at(0.0, 0.0))));
        }
        let exit_idx = collected.iter().position(|e| *e == ActionEvent::Exit);
        let up_idx = collected
            .iter()
            .position(|e| matches!(e, ActionEvent::ClickUp(_)));
        let (up_idx, exit_idx) = (up_idx.expect("ClickUp"), exit_idx.expect("Exit"));
        assert!(up_idx < exit_idx, "button must release before Exit");
    }

    #[test]
    fn test_shutdown_releases_held_button() {
        let mut pipeline = PointerPipeline::from_config(&test_config(), 1920, 1080);
        for _ in 0..3 {
            pipeline.process(Some(&pinching_hand_at(0.5, 0.5)));
        }
        assert_eq!(
            pipeline.shutdown(),
            Some(ActionEvent::ClickUp(MouseButton::Left))
        );
        assert_eq!(pipeline.shutdown(), None);
    }
}
