use glam::Vec2;
use heart_core::OrbitControls;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Handler = Closure<dyn FnMut(web::PointerEvent)>;

/// Pointer drags on the canvas feed the shared orbit controls.
///
/// Listeners stay registered until `detach`.
pub struct PointerOrbit {
    canvas: web::HtmlCanvasElement,
    handlers: Vec<(&'static str, Handler)>,
}

impl PointerOrbit {
    pub fn attach(canvas: &web::HtmlCanvasElement, controls: Rc<RefCell<OrbitControls>>) -> Self {
        // Last pointer position in CSS pixels while a drag is active
        let last: Rc<Cell<Option<Vec2>>> = Rc::new(Cell::new(None));

        let down = {
            let last = last.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                last.set(Some(client_pos(&ev)));
                let _ = canvas.set_pointer_capture(ev.pointer_id());
            }) as Box<dyn FnMut(web::PointerEvent)>)
        };
        let moved = {
            let last = last.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                let Some(prev) = last.get() else {
                    return;
                };
                let pos = client_pos(&ev);
                last.set(Some(pos));
                controls
                    .borrow_mut()
                    .drag(pos - prev, canvas.client_height() as f32);
            }) as Box<dyn FnMut(web::PointerEvent)>)
        };
        let release = |last: Rc<Cell<Option<Vec2>>>, canvas: web::HtmlCanvasElement| {
            Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                last.set(None);
                let _ = canvas.release_pointer_capture(ev.pointer_id());
            }) as Box<dyn FnMut(web::PointerEvent)>)
        };
        let up = release(last.clone(), canvas.clone());
        let cancel = release(last, canvas.clone());

        let handlers: Vec<(&'static str, Handler)> = vec![
            ("pointerdown", down),
            ("pointermove", moved),
            ("pointerup", up),
            ("pointercancel", cancel),
        ];
        for (name, handler) in &handlers {
            if canvas
                .add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("[orbit] could not listen for {name}");
            }
        }
        Self {
            canvas: canvas.clone(),
            handlers,
        }
    }

    pub fn detach(self) {
        for (name, handler) in &self.handlers {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref());
        }
    }
}

fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
