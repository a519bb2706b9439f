use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};

/// OS / browser color-scheme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// `prefers-color-scheme: light` (or no preference).
    #[default]
    Light,
    /// `prefers-color-scheme: dark`.
    Dark,
}

impl ColorMode {
    /// Map a `prefers-color-scheme: dark` match result.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is the dark scheme.
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// HSL lightness (percent) used for dots and lines.
    pub fn lightness(self) -> f64 {
        match self {
            Self::Light => 30.0,
            Self::Dark => 60.0,
        }
    }
}

/// Reference point of the fade-in sweep.
///
/// Starts as `NotStarted` and moves to `Started` exactly once, on the first rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AnimationClock {
    /// No frame has been rendered yet.
    #[default]
    NotStarted,
    /// First frame timestamp in milliseconds on the frame clock.
    Started(f64),
}

impl AnimationClock {
    /// Capture `now_ms` if not started yet and return the start time.
    ///
    /// Later calls keep the first value.
    pub fn start_at(&mut self, now_ms: f64) -> f64 {
        match *self {
            Self::Started(t) => t,
            Self::NotStarted => {
                *self = Self::Started(now_ms);
                now_ms
            }
        }
    }

    /// Start time, if captured.
    pub fn start_ms(self) -> Option<f64> {
        match self {
            Self::Started(t) => Some(t),
            Self::NotStarted => None,
        }
    }

    /// Milliseconds since the start, or `0` before the first frame.
    pub fn elapsed_ms(self, now_ms: f64) -> f64 {
        self.start_ms().map_or(0.0, |t| now_ms - t)
    }
}

/// Everything a frame reads that can change between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderState {
    /// Logical viewport size.
    pub viewport: Viewport,
    /// Document scroll offset.
    pub scroll: ScrollOffset,
    /// Full scrollable document size.
    pub extent: DocumentExtent,
    /// Color-scheme preference.
    pub color_mode: ColorMode,
    /// Fade-in reference time.
    pub clock: AnimationClock,
}

impl RenderState {
    /// State for a freshly mounted component from an ambient snapshot.
    pub fn from_snapshot(snapshot: AmbientSnapshot) -> Self {
        Self {
            viewport: snapshot.viewport,
            scroll: snapshot.scroll,
            extent: snapshot.extent,
            color_mode: snapshot.color_mode,
            clock: AnimationClock::NotStarted,
        }
    }
}

/// Synchronous read of the ambient inputs, taken at mount so the first frame is not drawn with
/// zero values.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AmbientSnapshot {
    /// Logical viewport size.
    pub viewport: Viewport,
    /// Document scroll offset.
    pub scroll: ScrollOffset,
    /// Full scrollable document size.
    pub extent: DocumentExtent,
    /// Color-scheme preference.
    pub color_mode: ColorMode,
}

impl AmbientSnapshot {
    /// A page that fits the viewport exactly, unscrolled, in light mode.
    pub fn fitted(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll: ScrollOffset::default(),
            extent: DocumentExtent::from_viewport(viewport),
            color_mode: ColorMode::Light,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/state.rs"]
mod tests;
