use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

use super::render::DomSurface;
use crate::config::GridConfig;
use crate::controller::{Controller, FrameId, FrameScheduler};
use crate::error::{GridError, Result};

// Holds the animation-frame closure. It is created after the scheduler that
// requests it, so the scheduler only sees it through this shared slot.
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Shared handle to the running grid.
pub type GridHandle = Rc<RefCell<Controller<DomSurface, RafScheduler>>>;

/// `requestAnimationFrame`-backed scheduler.
pub struct RafScheduler {
    window: Window,
    callback: FrameSlot,
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> Result<FrameId> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| GridError::Schedule("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| GridError::Schedule(format!("{e:?}")))
    }

    fn cancel(&mut self, id: FrameId) {
        self.window.cancel_animation_frame(id).ok();
    }
}

fn now() -> f64 {
    js_sys::Date::now()
}

/// Mounts the grid into the page and starts animating if the page is visible.
///
/// The frame callback and the `visibilitychange` listener live for the rest of
/// the page's life.
pub fn mount() -> std::result::Result<GridHandle, JsValue> {
    let window = web_sys::window().ok_or(GridError::NoWindow)?;
    let document = window.document().ok_or(GridError::NoDocument)?;

    let surface = DomSurface::mount(&document)?;
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window: window.clone(),
        callback: slot.clone(),
    };
    let controller = Controller::new(
        GridConfig::default(),
        surface,
        scheduler,
        fastrand::Rng::new(),
        now(),
    )?;
    let handle: GridHandle = Rc::new(RefCell::new(controller));

    *slot.borrow_mut() = Some({
        let handle = handle.clone();
        Closure::wrap(Box::new(move || {
            handle.borrow_mut().on_frame(now());
        }) as Box<dyn FnMut()>)
    });

    let on_visibility = {
        let handle = handle.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            handle.borrow_mut().set_visible(!document.hidden(), now());
        }) as Box<dyn FnMut()>)
    };
    document.add_event_listener_with_callback(
        "visibilitychange",
        on_visibility.as_ref().unchecked_ref(),
    )?;
    on_visibility.forget();

    {
        let grid = handle.borrow();
        info!(
            "background grid mounted at {}x{} with {} cells",
            grid.grid().columns(),
            grid.grid().rows(),
            grid.grid().cells().len()
        );
    }
    handle.borrow_mut().set_visible(!document.hidden(), now());

    Ok(handle)
}
