//! Ambient inputs of the renderer: viewport, scroll and color-scheme signals.
//!
//! Hosts implement [`InputSource`]; the component subscribes on mount, drains queued events at
//! the start of every tick and unsubscribes on teardown. Nothing here triggers a redraw.

pub(crate) mod script;
pub(crate) mod scripted;

use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};
use crate::state::{AmbientSnapshot, ColorMode, RenderState};

/// An external signal the component can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Window resize.
    Resize,
    /// Document scroll.
    Scroll,
    /// `prefers-color-scheme` change.
    ColorScheme,
}

/// A change reported by a subscribed signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// New logical viewport size.
    Resize(Viewport),
    /// New document scroll offset.
    Scroll(ScrollOffset),
    /// New color-scheme preference.
    ColorScheme(ColorMode),
}

impl InputEvent {
    /// The signal this event belongs to.
    pub fn signal(&self) -> Signal {
        match self {
            Self::Resize(_) => Signal::Resize,
            Self::Scroll(_) => Signal::Scroll,
            Self::ColorScheme(_) => Signal::ColorScheme,
        }
    }

    /// Fold this event into the render state.
    pub fn apply(self, state: &mut RenderState) {
        match self {
            Self::Resize(vp) => state.viewport = vp,
            Self::Scroll(s) => state.scroll = s,
            Self::ColorScheme(mode) => state.color_mode = mode,
        }
    }
}

/// Handle returned by [`InputSource::subscribe`], given back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Source-assigned identifier.
    pub id: u64,
    /// The subscribed signal.
    pub signal: Signal,
}

/// Injected source of ambient state and change events.
pub trait InputSource {
    /// Read the current ambient state synchronously.
    fn snapshot(&self) -> AmbientSnapshot;

    /// Current full scrollable document size. Read every frame.
    fn document_extent(&self) -> DocumentExtent;

    /// Start receiving events for `signal`.
    fn subscribe(&mut self, signal: Signal) -> Subscription;

    /// Stop receiving events for a subscription. Unknown handles are ignored.
    fn unsubscribe(&mut self, sub: Subscription);

    /// Next queued event for a subscribed signal, oldest first.
    fn poll(&mut self) -> Option<InputEvent>;
}
