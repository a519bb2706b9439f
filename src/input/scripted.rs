use std::collections::VecDeque;

use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};
use crate::input::{InputEvent, InputSource, Signal, Subscription};
use crate::state::{AmbientSnapshot, ColorMode};

/// Deterministic in-memory [`InputSource`] for tests and offline rendering.
///
/// [`ScriptedInput::emit`] always updates the ambient values (a real window changes size
/// whether anyone listens or not) but only queues the event while its signal has a
/// subscriber.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ambient: AmbientSnapshot,
    subs: Vec<Subscription>,
    next_id: u64,
    queue: VecDeque<InputEvent>,
    /// Keep the document extent equal to the viewport across resizes.
    fit_extent: bool,
}

impl ScriptedInput {
    /// Source starting from `ambient`.
    pub fn new(ambient: AmbientSnapshot) -> Self {
        Self {
            ambient,
            ..Self::default()
        }
    }

    /// Source for a page that always fits the viewport exactly.
    pub fn fitted(viewport: Viewport) -> Self {
        Self {
            fit_extent: true,
            ..Self::new(AmbientSnapshot::fitted(viewport))
        }
    }

    /// Report a change. Queued only if the signal is subscribed.
    pub fn emit(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize(vp) => {
                self.ambient.viewport = vp;
                if self.fit_extent {
                    self.ambient.extent = DocumentExtent::from_viewport(vp);
                }
            }
            InputEvent::Scroll(s) => self.ambient.scroll = s,
            InputEvent::ColorScheme(mode) => self.ambient.color_mode = mode,
        }
        if self.is_subscribed(event.signal()) {
            self.queue.push_back(event);
        } else {
            tracing::trace!(signal = ?event.signal(), "dropping event without subscriber");
        }
    }

    /// Shorthand for a resize event.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.emit(InputEvent::Resize(Viewport::new(width, height)));
    }

    /// Shorthand for a scroll event.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.emit(InputEvent::Scroll(ScrollOffset::new(x, y)));
    }

    /// Shorthand for a color-scheme change.
    pub fn set_dark(&mut self, dark: bool) {
        self.emit(InputEvent::ColorScheme(ColorMode::from_dark(dark)));
    }

    /// Change the document size. Read by frames directly, no event.
    pub fn set_document_extent(&mut self, extent: DocumentExtent) {
        self.fit_extent = false;
        self.ambient.extent = extent;
    }

    /// Whether at least one subscription for `signal` is active.
    pub fn is_subscribed(&self, signal: Signal) -> bool {
        self.subs.iter().any(|s| s.signal == signal)
    }

    /// Number of active subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }

    /// Number of events waiting to be polled.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&self) -> AmbientSnapshot {
        self.ambient
    }

    fn document_extent(&self) -> DocumentExtent {
        self.ambient.extent
    }

    fn subscribe(&mut self, signal: Signal) -> Subscription {
        let sub = Subscription {
            id: self.next_id,
            signal,
        };
        self.next_id += 1;
        self.subs.push(sub);
        sub
    }

    fn unsubscribe(&mut self, sub: Subscription) {
        self.subs.retain(|s| *s != sub);
        if !self.is_subscribed(sub.signal) {
            self.queue.retain(|e| e.signal() != sub.signal);
        }
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/scripted.rs"]
mod tests;
