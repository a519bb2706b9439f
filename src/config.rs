use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::error::{DotFieldError, DotFieldResult};

/// Fixed per-mount drawing parameters, in logical pixels and milliseconds.
///
/// Missing JSON fields fall back to [`RenderConfig::default`], so a config file only needs the
/// values it changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Grid spacing between dots.
    pub dot_distance: f64,
    /// Dot radius.
    pub dot_size: f64,
    /// Dot alpha in `[0, 1]`.
    pub dot_opacity: f64,
    /// Grid line width; `0` disables lines.
    pub line_width: f64,
    /// Steady-state grid line alpha; `0` disables lines.
    pub line_opacity: f64,
    /// Length of the fade-in sweep; `0` shows everything immediately.
    pub appearance_duration_ms: f64,
    /// Curve applied to each line's reveal progress.
    pub reveal_ease: Ease,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_distance: 50.0,
            dot_size: 1.0,
            dot_opacity: 0.2,
            line_width: 1.0,
            line_opacity: 0.1,
            appearance_duration_ms: 4000.0,
            reveal_ease: Ease::InQuad,
        }
    }
}

impl RenderConfig {
    /// Whether grid lines are drawn at all.
    pub fn draws_lines(&self) -> bool {
        self.line_width > 0.0 && self.line_opacity > 0.0
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(s: &str) -> DotFieldResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| DotFieldError::serde(format!("parse render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> DotFieldResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Check the caller contract the renderer relies on.
    ///
    /// The render path itself never calls this; loaders and the CLI do.
    pub fn validate(&self) -> DotFieldResult<()> {
        let fields = [
            ("dot_distance", self.dot_distance),
            ("dot_size", self.dot_size),
            ("dot_opacity", self.dot_opacity),
            ("line_width", self.line_width),
            ("line_opacity", self.line_opacity),
            ("appearance_duration_ms", self.appearance_duration_ms),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(DotFieldError::validation(format!("{name} must be finite")));
            }
            if v < 0.0 {
                return Err(DotFieldError::validation(format!("{name} must be >= 0")));
            }
        }
        if self.dot_distance <= 0.0 {
            return Err(DotFieldError::validation("dot_distance must be > 0"));
        }
        for (name, v) in [
            ("dot_opacity", self.dot_opacity),
            ("line_opacity", self.line_opacity),
        ] {
            if v > 1.0 {
                return Err(DotFieldError::validation(format!("{name} must be <= 1")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
