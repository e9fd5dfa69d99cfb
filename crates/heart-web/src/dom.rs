use heart_core::SceneConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

// Query keys understood by `SceneConfig::apply_override`
const OVERRIDE_KEYS: [&str; 4] = ["particles", "seed", "color_a", "color_b"];

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up `#id` and cast it to the expected element type.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} has wrong type: {:?}", e)))
}

/// Match the canvas backing store to its CSS size times the (capped) device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_pixel_ratio: f32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(max_pixel_ratio as f64);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing size in sync with window resizes for the page lifetime.
pub fn track_canvas_size(canvas: &web::HtmlCanvasElement, max_pixel_ratio: f32) {
    sync_canvas_backing_size(canvas, max_pixel_ratio);
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas, max_pixel_ratio);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Scene settings with overrides from the page query string, e.g. `?particles=20000&seed=7`.
pub fn config_from_location() -> SceneConfig {
    let search = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let Ok(params) = web::UrlSearchParams::new_with_str(&search) else {
        return SceneConfig::default();
    };
    let found: Vec<(&str, String)> = OVERRIDE_KEYS
        .iter()
        .filter_map(|&k| params.get(k).map(|v| (k, v)))
        .collect();
    if !found.is_empty() {
        log::info!("[config] query overrides: {:?}", found);
    }
    SceneConfig::default().with_overrides(found.iter().map(|(k, v)| (*k, v.as_str())))
}

#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
