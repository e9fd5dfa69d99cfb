use crate::dom::js_err;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const VIDEO_WIDTH: u32 = 1280;
const VIDEO_HEIGHT: u32 = 720;

/// Ask for the user-facing camera and attach it to `video`.
pub async fn open(video: &web::HtmlVideoElement) -> anyhow::Result<web::MediaStream> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window.navigator().media_devices().map_err(js_err)?;

    let video_constraints = js_sys::Object::new();
    js_sys::Reflect::set(&video_constraints, &"width".into(), &JsValue::from(VIDEO_WIDTH))
        .map_err(js_err)?;
    js_sys::Reflect::set(&video_constraints, &"height".into(), &JsValue::from(VIDEO_HEIGHT))
        .map_err(js_err)?;
    js_sys::Reflect::set(&video_constraints, &"facingMode".into(), &"user".into())
        .map_err(js_err)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(js_err)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;

    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "");
    video.set_src_object(Some(&stream));
    let play = video.play().map_err(js_err)?;
    JsFuture::from(play).await.map_err(js_err)?;
    log::info!(
        "[camera] streaming {}x{}",
        video.video_width(),
        video.video_height()
    );
    Ok(stream)
}

/// Stop every track so the browser releases the camera.
pub fn close(stream: &web::MediaStream, video: &web::HtmlVideoElement) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
    video.set_src_object(None);
    log::info!("[camera] released");
}

/// Whether the element has decoded enough to run detection on.
#[inline]
pub fn has_frame(video: &web::HtmlVideoElement) -> bool {
    // HAVE_CURRENT_DATA
    video.ready_state() >= 2
}
