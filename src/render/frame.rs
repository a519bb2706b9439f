use crate::animation::reveal::{RevealTimeline, alpha_boost};
use crate::config::RenderConfig;
use crate::foundation::core::{Hsla, Point, SIZE_MULT};
use crate::state::RenderState;
use crate::surface::Surface;

/// Counters describing what one frame drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Grid rows visited.
    pub rows: usize,
    /// Grid columns per row.
    pub columns: usize,
    /// Line strokes issued (rows plus first-row columns).
    pub lines: usize,
    /// Dots filled.
    pub dots: usize,
}

/// Grid coordinates along one axis: `step/2, step/2 + step, ...` strictly below `max`.
///
/// Positions come from the integer index so long axes do not accumulate float error. A
/// non-positive or non-finite step yields nothing.
pub fn grid_positions(step: f64, max: f64) -> impl Iterator<Item = f64> + Clone {
    let count = grid_count(step, max);
    (0..count).map(move |k| step / 2.0 + k as f64 * step)
}

/// Number of grid coordinates [`grid_positions`] yields.
pub fn grid_count(step: f64, max: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || !max.is_finite() {
        return 0;
    }
    let first = step / 2.0;
    if first >= max {
        return 0;
    }
    let n = ((max - first) / step).ceil() as usize;
    // The division can round up across an integer; the bound is strict.
    if first + (n as f64 - 1.0) * step >= max {
        n.saturating_sub(1)
    } else {
        n
    }
}

/// Draw one frame of the dot field.
///
/// `now_ms` is the frame clock reading; the animation start must already be captured in
/// `state.clock` (before that, elapsed time reads as zero). Reads nothing else from the
/// environment.
#[tracing::instrument(level = "trace", skip(surface, state, config))]
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    state: &RenderState,
    config: &RenderConfig,
    now_ms: f64,
) -> FrameStats {
    surface.clear();

    let lightness = state.color_mode.lightness();
    let fill = Hsla::gray(lightness, config.dot_opacity);
    let stroke = Hsla::gray(lightness, config.line_opacity);
    surface.set_fill(fill);
    surface.set_stroke(stroke);
    surface.set_line_width(config.line_width * SIZE_MULT);

    let offset = state.scroll.parallax();
    let max = state.extent.device_max();
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let dd = config.dot_distance * SIZE_MULT;
    let radius = config.dot_size * SIZE_MULT;

    let reveal = RevealTimeline::new(config.appearance_duration_ms, max)
        .with_ease(config.reveal_ease);
    let elapsed = state.clock.elapsed_ms(now_ms);
    let lines = config.draws_lines();

    let rows = grid_positions(dd, max.y);
    let cols = grid_positions(dd, max.x);
    let mut stats = FrameStats {
        columns: grid_count(dd, max.x),
        ..FrameStats::default()
    };

    for (row, y) in rows.enumerate() {
        stats.rows += 1;
        let dy = y - offset.y;

        if lines {
            let p = reveal.row_percent(elapsed, y);
            surface.set_stroke(stroke.with_alpha(config.line_opacity + alpha_boost(p)));
            surface.stroke_line(Point::new(0.0, dy), Point::new((w + offset.x) * p, dy));
            stats.lines += 1;
        }

        for x in cols.clone() {
            let dx = x - offset.x;

            // Columns are keyed by x but sweep downwards, so only the first row draws them.
            if row == 0 && lines {
                let p = reveal.col_percent(elapsed, x);
                surface.set_stroke(stroke.with_alpha(config.line_opacity + alpha_boost(p)));
                surface.stroke_line(Point::new(dx, 0.0), Point::new(dx, (h + offset.y) * p));
                stats.lines += 1;
            }

            surface.fill_circle(Point::new(dx, dy), radius);
            stats.dots += 1;
        }
    }

    tracing::trace!(
        rows = stats.rows,
        columns = stats.columns,
        lines = stats.lines,
        dots = stats.dots,
        "frame drawn"
    );
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
