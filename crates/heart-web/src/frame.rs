use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` chain that can be stopped.
///
/// After `stop` no further callback runs: the running flag is cleared, the
/// pending frame is cancelled and the closure is dropped.
pub struct RafLoop {
    name: &'static str,
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl RafLoop {
    pub fn start(name: &'static str, mut body: impl FnMut() + 'static) -> Self {
        let running = Rc::new(Cell::new(true));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let running_tick = running.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !running_tick.get() {
                return;
            }
            body();
            if running_tick.get() {
                pending_tick.set(request_frame(&tick_clone));
            }
        }) as Box<dyn FnMut()>));

        pending.set(request_frame(&tick));
        log::info!("[frame] {name} loop started");
        Self {
            name,
            running,
            pending,
            tick,
        }
    }

    /// Must be called from outside the loop body (e.g. a JS export).
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure <-> tick cycle
        self.tick.borrow_mut().take();
        log::info!("[frame] {} loop stopped", self.name);
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
