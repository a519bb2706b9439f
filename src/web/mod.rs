//! Browser host: mounts the dot field on a canvas element and drives it from
//! `requestAnimationFrame`.

mod canvas;
mod dom;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlCanvasElement;

pub use canvas::{CanvasProvider, CanvasSurface};
pub use dom::{PerformanceClock, RafScheduler, WebInput};

use crate::config::RenderConfig;
use crate::runtime::{DotField, MountedDotField};

struct Host {
    mounted: Option<MountedDotField<CanvasSurface>>,
    input: WebInput,
    scheduler: RafScheduler,
    clock: PerformanceClock,
}

impl Host {
    fn tick(&mut self) {
        let Self {
            mounted,
            input,
            scheduler,
            clock,
        } = self;
        if let Some(m) = mounted {
            m.tick(input, clock, scheduler);
        }
    }

    fn teardown(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.unmount(&mut self.input, &mut self.scheduler);
        }
    }
}

/// Handle of a running browser dot field. Dropping it (or calling `stop`) tears it down.
#[wasm_bindgen]
pub struct WebDotField {
    host: Rc<RefCell<Host>>,
    frame: dom::FrameCallback,
}

#[wasm_bindgen]
impl WebDotField {
    /// Whether a surface was acquired and frames are being drawn.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.host.borrow().mounted.is_some()
    }

    /// Cancel the pending frame and detach every listener.
    pub fn stop(self) {}
}

impl Drop for WebDotField {
    fn drop(&mut self) {
        self.host.borrow_mut().teardown();
        // Breaks the callback -> host reference.
        self.frame.borrow_mut().take();
        tracing::debug!("browser dot field stopped");
    }
}

/// Mount a dot field on `canvas`, styled as a fixed full-viewport layer behind the page.
///
/// A canvas without a 2D context yields a handle that draws nothing.
pub fn start(canvas: HtmlCanvasElement, config: RenderConfig) -> Result<WebDotField, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clock = PerformanceClock::new(&window)
        .ok_or_else(|| JsValue::from_str("performance API unavailable"))?;

    let style = canvas.style();
    for (name, value) in [
        ("position", "fixed"),
        ("left", "0"),
        ("top", "0"),
        ("z-index", "-10"),
    ] {
        style.set_property(name, value)?;
    }

    let frame: dom::FrameCallback = Rc::default();
    let host = Rc::new(RefCell::new(Host {
        mounted: None,
        input: WebInput::new(window.clone()),
        scheduler: RafScheduler::new(window, Rc::clone(&frame)),
        clock,
    }));

    let weak: Weak<RefCell<Host>> = Rc::downgrade(&host);
    *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_: f64| {
        if let Some(host) = weak.upgrade() {
            host.borrow_mut().tick();
        }
    }));

    {
        let mut h = host.borrow_mut();
        let Host {
            mounted,
            input,
            scheduler,
            ..
        } = &mut *h;
        *mounted =
            DotField::new(config).mount(input, &mut CanvasProvider::new(canvas), scheduler);
    }

    Ok(WebDotField { host, frame })
}

/// JS entry point: `startDotField(canvas, configJson?)`.
#[wasm_bindgen(js_name = startDotField)]
pub fn start_dot_field(
    canvas: HtmlCanvasElement,
    config_json: Option<String>,
) -> Result<WebDotField, JsValue> {
    let config = match config_json {
        Some(json) => RenderConfig::from_json_str(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => RenderConfig::default(),
    };
    start(canvas, config)
}
