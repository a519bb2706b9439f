use std::path::Path;

use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};
use crate::foundation::error::{DotFieldError, DotFieldResult};
use crate::input::InputEvent;
use crate::input::scripted::ScriptedInput;
use crate::state::ColorMode;

/// One simulated ambient change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    /// Window resized to a logical size.
    Resize {
        /// Logical width.
        width: f64,
        /// Logical height.
        height: f64,
    },
    /// Document scrolled.
    Scroll {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Color scheme flipped.
    ColorScheme {
        /// `prefers-color-scheme: dark` matches.
        dark: bool,
    },
    /// Document content grew or shrank.
    Extent {
        /// Scrollable width.
        width: f64,
        /// Scrollable height.
        height: f64,
    },
}

impl ScriptAction {
    fn apply(self, input: &mut ScriptedInput) {
        match self {
            Self::Resize { width, height } => {
                input.emit(InputEvent::Resize(Viewport::new(width, height)))
            }
            Self::Scroll { x, y } => input.emit(InputEvent::Scroll(ScrollOffset::new(x, y))),
            Self::ColorScheme { dark } => {
                input.emit(InputEvent::ColorScheme(ColorMode::from_dark(dark)))
            }
            Self::Extent { width, height } => {
                input.set_document_extent(DocumentExtent::new(width, height))
            }
        }
    }
}

/// An action scheduled at a time relative to the first frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEntry {
    /// Milliseconds after the driver started.
    pub at_ms: f64,
    /// What happens.
    pub action: ScriptAction,
}

/// Timed sequence of ambient changes replayed by the offline driver.
///
/// JSON form:
///
/// ```json
/// { "entries": [ { "at_ms": 500, "action": { "scroll": { "x": 0, "y": 300 } } } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputScript {
    /// Entries; sorted by `at_ms` on load.
    pub entries: Vec<ScriptEntry>,
    #[serde(skip)]
    cursor: usize,
}

impl InputScript {
    /// Build a script from entries, ordering them by time (stable for equal times).
    pub fn new(mut entries: Vec<ScriptEntry>) -> DotFieldResult<Self> {
        if let Some(e) = entries.iter().find(|e| !e.at_ms.is_finite()) {
            return Err(DotFieldError::validation(format!(
                "script entry time must be finite, got {}",
                e.at_ms
            )));
        }
        entries.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(Self { entries, cursor: 0 })
    }

    /// Parse a script from JSON text.
    pub fn from_json_str(s: &str) -> DotFieldResult<Self> {
        let raw: Self = serde_json::from_str(s)
            .map_err(|e| DotFieldError::serde(format!("parse input script: {e}")))?;
        Self::new(raw.entries)
    }

    /// Read and parse a JSON script file.
    pub fn from_path(path: impl AsRef<Path>) -> DotFieldResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Apply every not-yet-applied entry with `at_ms <= elapsed_ms`. Returns how many ran.
    pub fn apply_due(&mut self, elapsed_ms: f64, input: &mut ScriptedInput) -> usize {
        let start = self.cursor;
        while let Some(entry) = self.entries.get(self.cursor) {
            if entry.at_ms > elapsed_ms {
                break;
            }
            entry.action.apply(input);
            self.cursor += 1;
        }
        self.cursor - start
    }

    /// Whether all entries have been applied.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/script.rs"]
mod tests;
