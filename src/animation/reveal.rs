use crate::animation::ease::Ease;
use crate::foundation::core::Vec2;
use crate::foundation::math::{interpolate, mix};

/// Extra line alpha at the moment a line starts revealing; decays to zero once fully shown.
pub const LINE_ALPHA_BOOST: f64 = 0.5;

/// Position-dependent timing of the one-time fade-in sweep.
///
/// Rows reveal top to bottom: a row's delay grows linearly with its depth in the document, up
/// to a fifth of the appearance duration. Columns reveal from the horizontal center outwards
/// (a V-shaped delay). Each line then takes a third of the appearance duration to sweep in.
///
/// All inputs are in device pixels and milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTimeline {
    duration_ms: f64,
    max_x: f64,
    max_y: f64,
    ease: Ease,
}

impl RevealTimeline {
    /// Timeline for a grid bounded by `max` (device px) over `duration_ms`.
    pub fn new(duration_ms: f64, max: Vec2) -> Self {
        Self {
            duration_ms,
            max_x: max.x,
            max_y: max.y,
            ease: Ease::InQuad,
        }
    }

    /// Replace the reveal curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Longest stagger delay a line can get.
    pub fn max_delay_ms(&self) -> f64 {
        self.duration_ms / 5.0
    }

    /// Time one line takes to sweep from hidden to fully shown.
    pub fn sweep_ms(&self) -> f64 {
        self.duration_ms / 3.0
    }

    /// Delay before the row at device `y` starts revealing.
    pub fn row_delay(&self, y: f64) -> f64 {
        interpolate(&[0.0, self.max_y], &[0.0, self.max_delay_ms()], y)
    }

    /// Delay before the column at device `x` starts revealing.
    pub fn col_delay(&self, x: f64) -> f64 {
        let edge = self.max_delay_ms();
        interpolate(
            &[0.0, self.max_x / 2.0, self.max_x],
            &[edge, 0.0, edge],
            x,
        )
    }

    /// Fraction of a line shown `elapsed_ms` after the animation started, given its delay.
    ///
    /// Always in `[0, 1]`. A non-positive duration reveals everything immediately.
    pub fn percent_shown(&self, elapsed_ms: f64, delay_ms: f64) -> f64 {
        let sweep = self.sweep_ms();
        if sweep.is_nan() || sweep <= 0.0 {
            return 1.0;
        }
        self.ease.apply((elapsed_ms - delay_ms) / sweep)
    }

    /// Reveal fraction of the row at device `y`.
    pub fn row_percent(&self, elapsed_ms: f64, y: f64) -> f64 {
        self.percent_shown(elapsed_ms, self.row_delay(y))
    }

    /// Reveal fraction of the column at device `x`.
    pub fn col_percent(&self, elapsed_ms: f64, x: f64) -> f64 {
        self.percent_shown(elapsed_ms, self.col_delay(x))
    }
}

/// Alpha added on top of the configured line opacity for a line at reveal fraction `p`.
pub fn alpha_boost(p: f64) -> f64 {
    mix(LINE_ALPHA_BOOST, 0.0, p)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
