#![cfg(target_arch = "wasm32")]
//! Browser front-end.
//!
//! Page contract: a `#app-canvas` canvas for WebGPU, a `#webcam` video
//! element, and optionally `#hand-overlay` (2D canvas) and `#hud-status`.
//! The page also provides `window.createHandLandmarker()`.

mod detector;
mod dom;
mod frame;
mod hud;
mod orbit;
mod render;
mod webcam;

use detector::WebDetector;
use frame::RafLoop;
use heart_core::{GestureExtractor, HandDetector, Lifecycle, SharedGestureState};
use hud::Hud;
use orbit::PointerOrbit;
use render::SceneRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type Extractor = Rc<RefCell<GestureExtractor<WebDetector>>>;

/// Everything `stop()` has to tear down.
struct App {
    hud: Rc<RefCell<Hud>>,
    render_loop: RafLoop,
    pointer: PointerOrbit,
    detect_loop: Option<RafLoop>,
    extractor: Option<Extractor>,
    camera: Option<(web::MediaStream, web::HtmlVideoElement)>,
}

impl App {
    fn shutdown(self) {
        if let Some(l) = &self.detect_loop {
            l.stop();
        }
        self.render_loop.stop();
        self.pointer.detach();
        if let Some(ex) = &self.extractor {
            ex.borrow_mut().close();
        }
        if let Some((stream, video)) = &self.camera {
            webcam::close(stream, video);
        }
        self.hud.borrow_mut().clear();
        log::info!("heart-web stopped");
    }
}

thread_local! {
    static APP: RefCell<Lifecycle<App>> = const { RefCell::new(Lifecycle::new()) };
}

fn is_stopped() -> bool {
    APP.with(|app| app.borrow().is_stopped())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("heart-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Release the camera, close the landmark model and stop both loops.
#[wasm_bindgen]
pub fn stop() {
    match APP.with(|app| app.borrow_mut().stop()) {
        Some(app) => app.shutdown(),
        None => log::info!("heart-web stop requested before startup finished"),
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, "app-canvas")?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, "webcam")?;

    let config = dom::config_from_location();
    dom::track_canvas_size(&canvas, config.max_pixel_ratio);

    let state = SharedGestureState::new();
    let hud = Rc::new(RefCell::new(Hud::new(&document)));

    // Render loop first: the scene runs at rest even if tracking never starts
    let mut scene = SceneRenderer::new(canvas.clone(), config).await?;
    if is_stopped() {
        return Ok(());
    }
    let pointer = PointerOrbit::attach(&canvas, scene.orbit());
    let render_loop = {
        let state = state.clone();
        let hud = hud.clone();
        RafLoop::start("render", move || {
            let hands = state.read();
            hud.borrow_mut().update_status(&hands);
            scene.frame(&hands);
        })
    };
    let app = App {
        hud: hud.clone(),
        render_loop,
        pointer,
        detect_loop: None,
        extractor: None,
        camera: None,
    };
    if let Err(app) = APP.with(|slot| slot.borrow_mut().install(app)) {
        app.shutdown();
        return Ok(());
    }

    let mut detector = match WebDetector::load(video.clone()).await {
        Ok(d) => d,
        Err(e) => {
            log::error!("[detector] hand tracking unavailable: {e:#}");
            return Ok(());
        }
    };
    if is_stopped() {
        detector.close();
        return Ok(());
    }

    let stream = match webcam::open(&video).await {
        Ok(s) => s,
        Err(e) => {
            log::error!("[camera] unavailable: {e:#}");
            detector.close();
            return Ok(());
        }
    };
    if is_stopped() {
        detector.close();
        webcam::close(&stream, &video);
        return Ok(());
    }

    let extractor: Extractor = Rc::new(RefCell::new(GestureExtractor::new(detector, state)));
    let detect_loop = {
        let extractor = extractor.clone();
        RafLoop::start("detect", move || {
            let mut ex = extractor.borrow_mut();
            if !webcam::has_frame(ex.detector_mut().video()) {
                return;
            }
            ex.process_frame(dom::now_ms());
            let det = ex.detector_mut();
            let video = det.video();
            hud.borrow()
                .draw_hands(det.last_hands(), video.video_width(), video.video_height());
        })
    };

    APP.with(|app| {
        if let Some(app) = app.borrow_mut().app_mut() {
            app.detect_loop = Some(detect_loop);
            app.extractor = Some(extractor);
            app.camera = Some((stream, video));
        }
    });
    log::info!("[gesture] tracking started");
    Ok(())
}
