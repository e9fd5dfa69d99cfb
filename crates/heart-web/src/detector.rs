//! Bridge to the page's hand landmark model.
//!
//! The page is expected to expose `window.createHandLandmarker()`, returning a
//! promise for a MediaPipe `HandLandmarker` configured for VIDEO mode with two
//! hands. Results are read structurally (`result.landmarks[i][j].{x,y,z}`).

use crate::dom::js_err;
use heart_core::{Detections, HandDetector, Landmark};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = createHandLandmarker)]
    fn create_hand_landmarker() -> Result<js_sys::Promise, JsValue>;

    pub type HandLandmarker;

    #[wasm_bindgen(method, catch, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn close(this: &HandLandmarker);
}

pub struct WebDetector {
    landmarker: HandLandmarker,
    video: web::HtmlVideoElement,
    // Raw landmarks from the latest frame, kept for the HUD skeleton
    last_hands: Detections,
}

impl WebDetector {
    pub async fn load(video: web::HtmlVideoElement) -> anyhow::Result<Self> {
        let promise = create_hand_landmarker().map_err(js_err)?;
        let value = JsFuture::from(promise).await.map_err(js_err)?;
        if value.is_undefined() || value.is_null() {
            anyhow::bail!("createHandLandmarker resolved to nothing");
        }
        log::info!("[detector] hand landmarker ready");
        Ok(Self {
            landmarker: value.unchecked_into(),
            video,
            last_hands: Detections::new(),
        })
    }

    pub fn video(&self) -> &web::HtmlVideoElement {
        &self.video
    }

    pub fn last_hands(&self) -> &Detections {
        &self.last_hands
    }
}

impl HandDetector for WebDetector {
    fn detect(&mut self, timestamp_ms: f64) -> anyhow::Result<Detections> {
        self.last_hands.clear();
        let result = self
            .landmarker
            .detect_for_video(&self.video, timestamp_ms)
            .map_err(js_err)?;
        let hands = parse_result(&result);
        self.last_hands = hands.clone();
        Ok(hands)
    }

    fn close(&mut self) {
        self.landmarker.close();
        self.last_hands.clear();
        log::info!("[detector] closed");
    }
}

fn parse_result(result: &JsValue) -> Detections {
    let mut hands = Detections::new();
    let Some(list) = js_sys::Reflect::get(result, &"landmarks".into())
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Array>().ok())
    else {
        return hands;
    };
    for hand in list.iter() {
        match parse_hand(&hand) {
            Some(points) => hands.push(points),
            None => log::debug!("[detector] dropping malformed hand"),
        }
    }
    hands
}

fn parse_hand(hand: &JsValue) -> Option<Vec<Landmark>> {
    let points = hand.dyn_ref::<js_sys::Array>()?;
    points
        .iter()
        .map(|p| {
            Some(Landmark {
                x: number(&p, "x")?,
                y: number(&p, "y")?,
                z: number(&p, "z").unwrap_or(0.0),
            })
        })
        .collect()
}

fn number(obj: &JsValue, key: &str) -> Option<f32> {
    js_sys::Reflect::get(obj, &key.into())
        .ok()?
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v as f32)
}
