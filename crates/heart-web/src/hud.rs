use heart_core::{hud_text, HandPair, Landmark, HAND_CONNECTIONS};
use wasm_bindgen::JsCast;
use web_sys as web;

const BONE_COLOR: &str = "#00FFFF";
const JOINT_COLOR: &str = "#FFFFFF";
const JOINT_RADIUS: f64 = 2.0;

/// Status line plus the hand-skeleton overlay drawn above the webcam preview.
///
/// Both elements are optional; a page without them just gets no HUD.
pub struct Hud {
    status: Option<web::Element>,
    overlay: Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)>,
    last_text: String,
}

impl Hud {
    pub fn new(document: &web::Document) -> Self {
        let status = document.get_element_by_id("hud-status");
        let overlay = document
            .get_element_by_id("hand-overlay")
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                let ctx = canvas
                    .get_context("2d")
                    .ok()
                    .flatten()?
                    .dyn_into::<web::CanvasRenderingContext2d>()
                    .ok()?;
                Some((canvas, ctx))
            });
        if status.is_none() {
            log::warn!("[hud] #hud-status not found; status text disabled");
        }
        Self {
            status,
            overlay,
            last_text: String::new(),
        }
    }

    /// Refresh the status text; the DOM is only touched when it changes.
    pub fn update_status(&mut self, hands: &HandPair) {
        let text = hud_text(hands);
        if text == self.last_text {
            return;
        }
        if let Some(el) = &self.status {
            el.set_text_content(Some(&text));
        }
        self.last_text = text;
    }

    /// Redraw every detected hand at the video's resolution.
    pub fn draw_hands(&self, hands: &[Vec<Landmark>], video_width: u32, video_height: u32) {
        let Some((canvas, ctx)) = &self.overlay else {
            return;
        };
        if video_width > 0 && canvas.width() != video_width {
            canvas.set_width(video_width);
            canvas.set_height(video_height);
        }
        let w = canvas.width() as f64;
        let h = canvas.height() as f64;
        ctx.clear_rect(0.0, 0.0, w, h);

        for hand in hands {
            ctx.set_stroke_style_str(BONE_COLOR);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            for &(a, b) in HAND_CONNECTIONS.iter() {
                let (Some(p1), Some(p2)) = (hand.get(a), hand.get(b)) else {
                    continue;
                };
                ctx.move_to(p1.x as f64 * w, p1.y as f64 * h);
                ctx.line_to(p2.x as f64 * w, p2.y as f64 * h);
            }
            ctx.stroke();

            ctx.set_fill_style_str(JOINT_COLOR);
            for p in hand {
                ctx.begin_path();
                let _ = ctx.arc(
                    p.x as f64 * w,
                    p.y as f64 * h,
                    JOINT_RADIUS,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
        }
    }

    pub fn clear(&mut self) {
        if let Some((canvas, ctx)) = &self.overlay {
            ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
        self.update_status(&HandPair::default());
    }
}
