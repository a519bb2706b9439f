use super::*;
use crate::foundation::core::{DocumentExtent, ScrollOffset, Viewport};
use crate::state::{AmbientSnapshot, AnimationClock, ColorMode};
use crate::surface::recording::{DrawCmd, RecordingSurface};

const START: f64 = 1_000.0;

fn state_800x600() -> RenderState {
    let mut state = RenderState::from_snapshot(AmbientSnapshot::fitted(Viewport::new(800.0, 600.0)));
    state.clock = AnimationClock::Started(START);
    state
}

fn draw(state: &RenderState, config: &RenderConfig, elapsed_ms: f64) -> (RecordingSurface, FrameStats) {
    let (w, h) = state.viewport.device_size();
    let mut surface = RecordingSurface::new(w, h);
    let stats = render_frame(&mut surface, state, config, START + elapsed_ms);
    (surface, stats)
}

#[test]
fn grid_count_matches_closed_form() {
    for (step, max) in [(100.0_f64, 1200.0_f64), (100.0, 1600.0), (48.0, 1000.0), (7.0, 333.0)] {
        let expected = ((max - step / 2.0) / step).floor() as usize + 1;
        assert_eq!(grid_count(step, max), expected, "step={step} max={max}");
        assert_eq!(grid_positions(step, max).count(), expected);
    }
}

#[test]
fn grid_bound_is_strict() {
    let ys: Vec<f64> = grid_positions(100.0, 1250.0).collect();
    assert_eq!(ys.len(), 12);
    assert_eq!(ys.first(), Some(&50.0));
    assert_eq!(ys.last(), Some(&1150.0));
    assert_eq!(grid_count(100.0, 50.0), 0);
    assert_eq!(grid_count(100.0, 50.5), 1);
}

#[test]
fn degenerate_spacing_yields_empty_grid() {
    assert_eq!(grid_count(0.0, 1000.0), 0);
    assert_eq!(grid_count(-10.0, 1000.0), 0);
    assert_eq!(grid_count(f64::NAN, 1000.0), 0);
    assert_eq!(grid_count(10.0, f64::INFINITY), 0);
}

#[test]
fn frame_draws_full_grid_of_dots_and_lines() {
    let (surface, stats) = draw(&state_800x600(), &RenderConfig::default(), 10_000.0);
    assert_eq!(stats.rows, 12);
    assert_eq!(stats.columns, 16);
    assert_eq!(stats.dots, 12 * 16);
    assert_eq!(stats.lines, 12 + 16);
    assert_eq!(surface.circles().len(), 12 * 16);
    assert_eq!(surface.lines().len(), 12 + 16);
    assert_eq!(surface.commands().first(), Some(&DrawCmd::Clear));

    let first = surface.circles()[0];
    assert_eq!(first.center, Point::new(50.0, 50.0));
    assert_eq!(first.radius, 2.0);
    assert_eq!(first.color, Hsla::gray(30.0, 0.2));
}

#[test]
fn settled_lines_use_base_opacity_and_full_length() {
    let (surface, _) = draw(&state_800x600(), &RenderConfig::default(), 10_000.0);
    let lines = surface.lines();

    let row = lines[0];
    assert_eq!(row.from, Point::new(0.0, 50.0));
    assert_eq!(row.to, Point::new(1600.0, 50.0));
    assert_eq!(row.color, Hsla::gray(30.0, 0.1));
    assert_eq!(row.width, 2.0);

    let col = lines[1];
    assert_eq!(col.from, Point::new(50.0, 0.0));
    assert_eq!(col.to, Point::new(50.0, 1200.0));
}

#[test]
fn lines_disabled_by_zero_opacity_or_width() {
    for config in [
        RenderConfig {
            line_opacity: 0.0,
            ..RenderConfig::default()
        },
        RenderConfig {
            line_width: 0.0,
            ..RenderConfig::default()
        },
    ] {
        for elapsed in [0.0, 500.0, 10_000.0] {
            let (surface, stats) = draw(&state_800x600(), &config, elapsed);
            assert_eq!(stats.lines, 0);
            assert!(
                !surface
                    .commands()
                    .iter()
                    .any(|c| matches!(c, DrawCmd::Line { .. }))
            );
            assert_eq!(surface.circles().len(), 12 * 16);
        }
    }
}

#[test]
fn color_scheme_changes_lightness_not_geometry() {
    let light = state_800x600();
    let dark = RenderState {
        color_mode: ColorMode::Dark,
        ..light
    };
    let config = RenderConfig::default();
    let (a, _) = draw(&light, &config, 700.0);
    let (b, _) = draw(&dark, &config, 700.0);

    let (ca, cb) = (a.circles(), b.circles());
    assert_eq!(ca.len(), cb.len());
    for (x, y) in ca.iter().zip(cb.iter()) {
        assert_eq!(x.center, y.center);
        assert_eq!(x.color.l, 30.0);
        assert_eq!(y.color.l, 60.0);
        assert_eq!(x.color.a, y.color.a);
    }

    let (la, lb) = (a.lines(), b.lines());
    assert_eq!(la.len(), lb.len());
    for (x, y) in la.iter().zip(lb.iter()) {
        assert_eq!((x.from, x.to), (y.from, y.to));
        assert_eq!(x.color.l, 30.0);
        assert_eq!(y.color.l, 60.0);
    }
}

#[test]
fn scroll_shifts_grid_at_half_speed() {
    let config = RenderConfig::default();
    let base = state_800x600();
    let scrolled = RenderState {
        scroll: ScrollOffset::new(0.0, 120.0),
        ..base
    };
    let (a, _) = draw(&base, &config, 10_000.0);
    let (b, _) = draw(&scrolled, &config, 10_000.0);

    // 120 logical px of scroll -> 60 logical px of parallax -> 120 device px.
    let shift = 120.0 / 2.0 * SIZE_MULT;
    for (p, q) in a.circles().iter().zip(b.circles().iter()) {
        assert_eq!(p.center.x, q.center.x);
        assert_eq!(p.center.y - q.center.y, shift);
    }

    // Vertical lines grow by the offset so they still reach the bottom edge.
    let col = b.lines()[1];
    assert_eq!(col.to.y, 1200.0 + shift);
}

#[test]
fn nothing_revealed_at_start_except_the_boost() {
    let (surface, _) = draw(&state_800x600(), &RenderConfig::default(), 0.0);
    let lines = surface.lines();

    let top_row = lines[0];
    assert_eq!(top_row.from, Point::new(0.0, 50.0));
    assert_eq!(top_row.to, Point::new(0.0, 50.0));
    assert!((top_row.color.a - 0.6).abs() < 1e-12);

    // Column at the horizontal center has no delay but no time has passed either.
    for col in &lines[1..17] {
        assert_eq!(col.to.y, 0.0);
    }

    // Dots do not fade.
    assert!(surface.circles().iter().all(|c| c.color.a == 0.2));
}

#[test]
fn reveal_progresses_over_time() {
    let config = RenderConfig::default();
    let state = state_800x600();
    let mut prev = 0.0;
    for elapsed in [100.0, 400.0, 900.0, 1_300.0, 2_000.0] {
        let (surface, _) = draw(&state, &config, elapsed);
        let reach = surface.lines()[0].to.x;
        assert!(reach >= prev);
        prev = reach;
    }
    assert_eq!(prev, 1600.0);

    let (mid, _) = draw(&state, &config, 600.0);
    let center_col = mid
        .lines()
        .into_iter()
        .filter(|l| l.from.y == 0.0 && l.from.x == l.to.x)
        .map(|l| l.to.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let edge_col = mid.lines()[1].to.y;
    assert!(center_col > edge_col);
}

#[test]
fn zero_duration_reveals_instantly() {
    let config = RenderConfig {
        appearance_duration_ms: 0.0,
        ..RenderConfig::default()
    };
    let (surface, _) = draw(&state_800x600(), &config, 0.0);
    for line in surface.lines() {
        assert!(line.to.x.is_finite() && line.to.y.is_finite());
        assert_eq!(line.color.a, 0.1);
    }
    assert_eq!(surface.lines()[0].to.x, 1600.0);
    assert_eq!(surface.lines()[1].to.y, 1200.0);
}

#[test]
fn unstarted_clock_reads_as_elapsed_zero() {
    let mut state = state_800x600();
    state.clock = AnimationClock::NotStarted;
    let (surface, _) = draw(&state, &RenderConfig::default(), 5_000.0);
    assert_eq!(surface.lines()[0].to.x, 0.0);
}

#[test]
fn grid_covers_document_not_viewport() {
    let mut state = state_800x600();
    state.extent = DocumentExtent::new(800.0, 3000.0);
    let (_, stats) = draw(&state, &RenderConfig::default(), 0.0);
    assert_eq!(stats.rows, 60);
    assert_eq!(stats.columns, 16);
}

#[test]
fn reveal_ease_shapes_line_growth() {
    // Top row: delay 800 * 50/1200 ms, sweep 4000/3 ms, so 700 ms is halfway through.
    let state = state_800x600();
    let quad = RenderConfig::default();
    let linear = RenderConfig {
        reveal_ease: crate::animation::ease::Ease::Linear,
        ..RenderConfig::default()
    };
    let (a, _) = draw(&state, &quad, 700.0);
    let (b, _) = draw(&state, &linear, 700.0);

    assert!((a.lines()[0].to.x - 400.0).abs() < 1e-9);
    assert!((b.lines()[0].to.x - 800.0).abs() < 1e-9);
}
