use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, MediaQueryList, MediaQueryListEvent, Performance, Window};

use crate::clock::{Clock, FrameHandle, FrameScheduler};
use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};
use crate::input::{InputEvent, InputSource, Signal, Subscription};
use crate::state::{AmbientSnapshot, ColorMode};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

enum Listener {
    Dom {
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    },
    Media {
        query: MediaQueryList,
        callback: Closure<dyn FnMut(MediaQueryListEvent)>,
    },
}

impl Listener {
    fn detach(&self) {
        let _ = match self {
            Self::Dom {
                target,
                event,
                callback,
            } => target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref()),
            Self::Media { query, callback } => query
                .remove_event_listener_with_callback("change", callback.as_ref().unchecked_ref()),
        };
    }
}

/// [`InputSource`] backed by DOM listeners. Handlers only queue events; ticks drain them.
pub struct WebInput {
    window: Window,
    queue: EventQueue,
    listeners: HashMap<u64, Listener>,
    next_id: u64,
}

impl std::fmt::Debug for WebInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebInput")
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebInput {
    /// Source reading from `window` and its document.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            queue: Rc::default(),
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    fn attach(&self, signal: Signal) -> Option<Listener> {
        let queue = Rc::clone(&self.queue);
        match signal {
            Signal::Resize => {
                let window = self.window.clone();
                let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    queue
                        .borrow_mut()
                        .push_back(InputEvent::Resize(read_viewport(&window)));
                });
                let target: EventTarget = self.window.clone().into();
                target
                    .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
                    .ok()?;
                Some(Listener::Dom {
                    target,
                    event: "resize",
                    callback,
                })
            }
            Signal::Scroll => {
                let window = self.window.clone();
                let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    queue
                        .borrow_mut()
                        .push_back(InputEvent::Scroll(read_scroll(&window)));
                });
                let target: EventTarget = self.window.document()?.into();
                target
                    .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    .ok()?;
                Some(Listener::Dom {
                    target,
                    event: "scroll",
                    callback,
                })
            }
            Signal::ColorScheme => {
                let query = self.window.match_media(DARK_QUERY).ok().flatten()?;
                let callback =
                    Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |e: MediaQueryListEvent| {
                        queue
                            .borrow_mut()
                            .push_back(InputEvent::ColorScheme(ColorMode::from_dark(e.matches())));
                    });
                query
                    .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
                    .ok()?;
                Some(Listener::Media { query, callback })
            }
        }
    }
}

impl InputSource for WebInput {
    fn snapshot(&self) -> AmbientSnapshot {
        let color_mode = self
            .window
            .match_media(DARK_QUERY)
            .ok()
            .flatten()
            .map_or(ColorMode::Light, |q| ColorMode::from_dark(q.matches()));
        AmbientSnapshot {
            viewport: read_viewport(&self.window),
            scroll: read_scroll(&self.window),
            extent: self.document_extent(),
            color_mode,
        }
    }

    fn document_extent(&self) -> DocumentExtent {
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map_or_else(DocumentExtent::default, |el| {
                DocumentExtent::new(f64::from(el.scroll_width()), f64::from(el.scroll_height()))
            })
    }

    fn subscribe(&mut self, signal: Signal) -> Subscription {
        let sub = Subscription {
            id: self.next_id,
            signal,
        };
        self.next_id += 1;
        match self.attach(signal) {
            Some(listener) => {
                self.listeners.insert(sub.id, listener);
            }
            None => tracing::warn!(?signal, "could not attach dom listener"),
        }
        sub
    }

    fn unsubscribe(&mut self, sub: Subscription) {
        if let Some(listener) = self.listeners.remove(&sub.id) {
            listener.detach();
        }
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.borrow_mut().pop_front()
    }
}

impl Drop for WebInput {
    fn drop(&mut self) {
        for (_, listener) in self.listeners.drain() {
            listener.detach();
        }
    }
}

fn read_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn read_scroll(window: &Window) -> ScrollOffset {
    ScrollOffset::new(
        window.scroll_x().unwrap_or(0.0),
        window.scroll_y().unwrap_or(0.0),
    )
}

/// `performance.now()`.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    /// Clock of `window`, if it exposes the performance API.
    pub fn new(window: &Window) -> Option<Self> {
        Some(Self {
            performance: window.performance()?,
        })
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// Shared slot holding the per-frame callback.
pub(crate) type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// [`FrameScheduler`] over `requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl std::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("armed", &self.callback.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl RafScheduler {
    pub(crate) fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let slot = self.callback.borrow();
        let Some(cb) = slot.as_ref() else {
            tracing::warn!("frame requested before the callback was installed");
            return FrameHandle(0);
        };
        let func: &js_sys::Function = cb.as_ref().unchecked_ref();
        match self.window.request_animation_frame(func) {
            Ok(id) => FrameHandle(u64::from(id.unsigned_abs())),
            Err(_) => {
                tracing::warn!("requestAnimationFrame failed");
                FrameHandle(0)
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Ok(id) = i32::try_from(handle.0) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
