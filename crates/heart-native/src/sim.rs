//! Mouse-driven stand-in for the webcam hand tracker.
//!
//! The window forwards [`SimInput`] events over a channel; the detection
//! thread folds them into one synthetic hand and runs it through the same
//! [`GestureExtractor`] the browser uses.

use glam::Vec2;
use heart_core::{
    Detections, GestureExtractor, HandDetector, HandPose, SharedGestureState,
    DETECTION_INTERVAL_MS,
};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const SIZE_MIN: f32 = 0.05;
const SIZE_MAX: f32 = 0.3;
const SIZE_PER_NOTCH: f32 = 0.01;
const FIST_REACH: f32 = 1.0;
const PINCH_GAP: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Cursor in window coordinates normalized to [0, 1], as seen in the
    /// mirrored preview.
    Cursor(Vec2),
    /// Wheel notches; positive brings the hand closer.
    Scroll(f32),
    Fist(bool),
    Pinch(bool),
    ToggleVisible,
}

/// The synthetic hand's current pose and buttons.
#[derive(Clone, Copy, Debug)]
pub struct SimHand {
    pub pose: HandPose,
    pub fist: bool,
    pub pinch: bool,
    pub visible: bool,
}

impl Default for SimHand {
    fn default() -> Self {
        Self {
            pose: HandPose::default(),
            fist: false,
            pinch: false,
            visible: true,
        }
    }
}

impl SimHand {
    pub fn apply(&mut self, input: SimInput) {
        match input {
            // The preview is mirrored, so screen x maps to 1 - image x
            SimInput::Cursor(p) => {
                let p = p.clamp(Vec2::ZERO, Vec2::ONE);
                self.pose.center = Vec2::new(1.0 - p.x, p.y);
            }
            SimInput::Scroll(notches) => {
                self.pose.base_size =
                    (self.pose.base_size + notches * SIZE_PER_NOTCH).clamp(SIZE_MIN, SIZE_MAX);
            }
            SimInput::Fist(down) => self.fist = down,
            SimInput::Pinch(down) => self.pinch = down,
            SimInput::ToggleVisible => self.visible = !self.visible,
        }
    }

    pub fn detections(&self) -> Detections {
        let mut hands = Detections::new();
        if !self.visible {
            return hands;
        }
        let defaults = HandPose::default();
        let pose = HandPose {
            reach: if self.fist { FIST_REACH } else { defaults.reach },
            pinch_gap: if self.pinch { PINCH_GAP } else { defaults.pinch_gap },
            ..self.pose
        };
        hands.push(pose.landmarks());
        hands
    }
}

/// [`HandDetector`] that replays the window's mouse state.
pub struct SimDetector {
    rx: Receiver<SimInput>,
    hand: SimHand,
    connected: bool,
}

impl SimDetector {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        Self {
            rx,
            hand: SimHand::default(),
            connected: true,
        }
    }

    /// False once the window side has dropped its sender.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.hand.apply(input),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.connected = false;
                    break;
                }
            }
        }
    }
}

impl HandDetector for SimDetector {
    fn detect(&mut self, _timestamp_ms: f64) -> anyhow::Result<Detections> {
        self.drain();
        if !self.connected {
            anyhow::bail!("input channel closed");
        }
        Ok(self.hand.detections())
    }

    fn close(&mut self) {
        log::info!("[sim] hand source closed");
    }
}

/// Detection loop on its own thread. Dropping the handle closes the input
/// channel and joins the thread, which clears the shared state on the way out.
pub struct DetectionThread {
    tx: Option<Sender<SimInput>>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionThread {
    pub fn spawn(state: SharedGestureState) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("hand-detection".into())
            .spawn(move || run(SimDetector::new(rx), state))?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    pub fn send(&self, input: SimInput) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(input);
        }
    }
}

impl Drop for DetectionThread {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("[sim] detection thread panicked");
            }
        }
    }
}

fn run(detector: SimDetector, state: SharedGestureState) {
    let mut extractor = GestureExtractor::new(detector, state);
    let start = Instant::now();
    let interval = Duration::from_millis(DETECTION_INTERVAL_MS);
    log::info!("[sim] detection thread started");
    loop {
        extractor.process_frame(start.elapsed().as_secs_f64() * 1000.0);
        if !extractor.detector_mut().is_connected() {
            break;
        }
        thread::sleep(interval);
    }
    extractor.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_core::{extract_reading, Gesture, HandSide};

    fn reading(hand: &SimHand) -> (HandSide, heart_core::HandReading) {
        let hands = hand.detections();
        assert_eq!(hands.len(), 1);
        extract_reading(&hands[0]).unwrap()
    }

    #[test]
    fn cursor_is_mirrored_into_image_space() {
        let mut hand = SimHand::default();
        hand.apply(SimInput::Cursor(Vec2::new(0.8, 0.3)));
        let (side, r) = reading(&hand);
        assert_eq!(side, HandSide::Right);
        assert!((r.center - Vec2::new(0.2, 0.3)).length() < 1e-5);

        hand.apply(SimInput::Cursor(Vec2::new(0.2, 0.3)));
        assert_eq!(reading(&hand).0, HandSide::Left);
    }

    #[test]
    fn buttons_map_to_gestures() {
        let mut hand = SimHand::default();
        assert_eq!(reading(&hand).1.gesture, Gesture::Open);

        hand.apply(SimInput::Pinch(true));
        assert_eq!(reading(&hand).1.gesture, Gesture::Pinch);

        hand.apply(SimInput::Fist(true));
        assert_eq!(reading(&hand).1.gesture, Gesture::Fist);

        hand.apply(SimInput::Fist(false));
        hand.apply(SimInput::Pinch(false));
        assert_eq!(reading(&hand).1.gesture, Gesture::Open);
    }

    #[test]
    fn scroll_changes_size_within_bounds() {
        let mut hand = SimHand::default();
        hand.apply(SimInput::Scroll(5.0));
        assert!((reading(&hand).1.size - 0.2).abs() < 1e-4);

        for _ in 0..100 {
            hand.apply(SimInput::Scroll(1.0));
        }
        assert!((hand.pose.base_size - SIZE_MAX).abs() < 1e-6);
        for _ in 0..100 {
            hand.apply(SimInput::Scroll(-1.0));
        }
        assert!((hand.pose.base_size - SIZE_MIN).abs() < 1e-6);
    }

    #[test]
    fn hidden_hand_yields_no_detections() {
        let mut hand = SimHand::default();
        hand.apply(SimInput::ToggleVisible);
        assert!(hand.detections().is_empty());
        hand.apply(SimInput::ToggleVisible);
        assert_eq!(hand.detections().len(), 1);
    }

    #[test]
    fn detector_reports_disconnect() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimDetector::new(rx);
        tx.send(SimInput::ToggleVisible).unwrap();
        assert!(det.detect(0.0).unwrap().is_empty());
        assert!(det.is_connected());

        drop(tx);
        assert!(det.detect(33.0).is_err());
        assert!(!det.is_connected());
    }

    #[test]
    fn dropping_the_thread_clears_state() {
        let state = SharedGestureState::new();
        let thread = DetectionThread::spawn(state.clone()).unwrap();
        thread.send(SimInput::Cursor(Vec2::new(0.9, 0.5)));
        for _ in 0..200 {
            if state.read().right.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(state.read().right.is_some());

        drop(thread);
        assert!(state.read().is_empty());
    }
}
