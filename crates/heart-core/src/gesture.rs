//! Landmark -> gesture reading extraction.
//!
//! A detection frame yields zero or more hands of 21 landmarks each. Every
//! hand is reduced to a [`HandReading`] (fist/pinch flags, knuckle center,
//! knuckle-to-wrist size) and filed under a side by the mirrored-preview
//! convention: a middle knuckle in the left half of the *camera image* is the
//! hand that appears on the right of the flipped preview, so it is `Right`.

use crate::constants::{FIST_RATIO, LANDMARK_COUNT, PINCH_DISTANCE, SIDE_SPLIT_X};
use crate::landmarks::{index, Landmark};
use crate::state::SharedGestureState;
use glam::Vec2;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Open,
    Fist,
    Pinch,
}

impl Gesture {
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Open => "OPEN",
            Gesture::Fist => "FIST",
            Gesture::Pinch => "PINCH",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

/// Latest snapshot of one detected hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    /// Middle knuckle position, normalized image space.
    pub center: Vec2,
    /// Middle knuckle to wrist distance; larger means closer to the camera.
    pub size: f32,
    pub is_fist: bool,
    pub is_pinching: bool,
    pub gesture: Gesture,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {0}")]
    TooFewLandmarks(usize),
}

/// Mirrored side assignment from the middle knuckle x (strict `<`).
#[inline]
pub fn side_for_knuckle_x(x: f32) -> HandSide {
    if x < SIDE_SPLIT_X {
        HandSide::Right
    } else {
        HandSide::Left
    }
}

/// Reduce one hand's landmarks to a side and reading.
pub fn extract_reading(landmarks: &[Landmark]) -> Result<(HandSide, HandReading), LandmarkError> {
    if landmarks.len() < LANDMARK_COUNT {
        return Err(LandmarkError::TooFewLandmarks(landmarks.len()));
    }
    let wrist = &landmarks[index::WRIST];
    let knuckle = &landmarks[index::MIDDLE_MCP];

    let hand_base_size = knuckle.distance(wrist);
    let avg_fingertip_dist = index::FINGERTIPS
        .iter()
        .map(|&i| landmarks[i].distance(wrist))
        .sum::<f32>()
        / index::FINGERTIPS.len() as f32;
    let is_fist = avg_fingertip_dist < hand_base_size * FIST_RATIO;

    let pinch_dist = landmarks[index::INDEX_TIP].distance(&landmarks[index::THUMB_TIP]);
    let is_pinching = pinch_dist < PINCH_DISTANCE;

    let gesture = if is_fist {
        Gesture::Fist
    } else if is_pinching {
        Gesture::Pinch
    } else {
        Gesture::Open
    };

    Ok((
        side_for_knuckle_x(knuckle.x),
        HandReading {
            center: knuckle.xy(),
            size: hand_base_size,
            is_fist,
            is_pinching,
            gesture,
        },
    ))
}

/// Both hand slots; `None` means not detected in the latest frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandPair {
    pub left: Option<HandReading>,
    pub right: Option<HandReading>,
}

impl HandPair {
    pub fn get(&self, side: HandSide) -> Option<&HandReading> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }

    pub fn set(&mut self, side: HandSide, reading: Option<HandReading>) {
        match side {
            HandSide::Left => self.left = reading,
            HandSide::Right => self.right = reading,
        }
    }

    /// The hand that drives the animation; right wins when both are present.
    pub fn active(&self) -> Option<&HandReading> {
        self.right.as_ref().or(self.left.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Hands reported by a detector for one frame (almost always 0..=2).
pub type Detections = SmallVec<[Vec<Landmark>; 2]>;

/// Build a fresh pair from one frame's detections. Both slots start empty;
/// malformed hands are skipped; a later hand on the same side replaces an
/// earlier one.
pub fn readings_from_detections<H: AsRef<[Landmark]>>(hands: &[H]) -> HandPair {
    let mut pair = HandPair::default();
    for hand in hands {
        match extract_reading(hand.as_ref()) {
            Ok((side, reading)) => pair.set(side, Some(reading)),
            Err(e) => log::debug!("[gesture] skipping hand: {e}"),
        }
    }
    pair
}

/// Source of raw landmarks (camera + model, or a simulation).
pub trait HandDetector {
    /// Run detection for the frame at `timestamp_ms`. Timestamps passed in
    /// are strictly increasing.
    fn detect(&mut self, timestamp_ms: f64) -> anyhow::Result<Detections>;

    /// Release model resources. Called once on teardown.
    fn close(&mut self) {}
}

/// Detection-side half of the pipeline: polls a detector and publishes each
/// frame's readings into the shared cell.
pub struct GestureExtractor<D: HandDetector> {
    detector: D,
    state: SharedGestureState,
    last_timestamp_ms: f64,
    closed: bool,
}

impl<D: HandDetector> GestureExtractor<D> {
    pub fn new(detector: D, state: SharedGestureState) -> Self {
        Self {
            detector,
            state,
            last_timestamp_ms: f64::NEG_INFINITY,
            closed: false,
        }
    }

    /// Process one frame. Detector errors count as "no hands this frame".
    pub fn process_frame(&mut self, timestamp_ms: f64) -> HandPair {
        if self.closed {
            return HandPair::default();
        }
        // The model rejects non-increasing timestamps
        let ts = if timestamp_ms > self.last_timestamp_ms {
            timestamp_ms
        } else {
            self.last_timestamp_ms + 1.0
        };
        self.last_timestamp_ms = ts;

        let pair = match self.detector.detect(ts) {
            Ok(hands) => readings_from_detections(&hands[..]),
            Err(e) => {
                log::debug!("[gesture] detection failed: {e:#}");
                HandPair::default()
            }
        };
        self.state.publish(pair);
        pair
    }

    pub fn state(&self) -> &SharedGestureState {
        &self.state
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Close the detector and clear both slots so the scene relaxes to rest.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.detector.close();
            self.state.publish(HandPair::default());
        }
    }
}

impl<D: HandDetector> Drop for GestureExtractor<D> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Status line shown in the HUD for one hand slot.
pub fn hand_status(reading: Option<&HandReading>) -> String {
    match reading {
        None => "SEARCHING...".to_string(),
        Some(r) if r.is_fist => "DETECTED [FIST]".to_string(),
        Some(_) => "DETECTED [OPEN]".to_string(),
    }
}

/// One-line status for both hands, e.g. `Left Hand: SEARCHING... | Right Hand: DETECTED [FIST]`.
pub fn hud_text(hands: &HandPair) -> String {
    format!(
        "Left Hand: {} | Right Hand: {}",
        hand_status(hands.left.as_ref()),
        hand_status(hands.right.as_ref())
    )
}
