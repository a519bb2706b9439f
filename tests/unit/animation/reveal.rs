use super::*;

fn timeline() -> RevealTimeline {
    // 800x600 viewport whose document is exactly one screen, at device scale.
    RevealTimeline::new(4000.0, Vec2::new(1600.0, 1200.0))
}

#[test]
fn row_delay_is_monotonic_and_bounded() {
    let t = timeline();
    assert_eq!(t.row_delay(0.0), 0.0);
    assert_eq!(t.row_delay(1200.0), 800.0);
    assert_eq!(t.row_delay(600.0), 400.0);

    let mut prev = f64::NEG_INFINITY;
    for i in 0..=130 {
        let d = t.row_delay(f64::from(i) * 10.0);
        assert!(d >= prev);
        prev = d;
    }
}

#[test]
fn col_delay_is_v_shaped() {
    let t = timeline();
    assert_eq!(t.col_delay(800.0), 0.0);
    assert_eq!(t.col_delay(0.0), 800.0);
    assert_eq!(t.col_delay(1600.0), 800.0);

    for dx in [10.0, 150.0, 400.0, 799.0] {
        assert!((t.col_delay(800.0 - dx) - t.col_delay(800.0 + dx)).abs() < 1e-9);
        assert!(t.col_delay(800.0 - dx) > 0.0);
    }
}

#[test]
fn row_fade_is_monotonic_and_completes_after_a_third() {
    let t = timeline();
    let y = 700.0;
    let delay = t.row_delay(y);

    let mut prev = 0.0;
    for ms in (0..4000).step_by(25) {
        let p = t.row_percent(f64::from(ms), y);
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= prev);
        prev = p;
    }
    assert_eq!(t.row_percent(t.sweep_ms(), 0.0), 1.0);
    assert_eq!(t.row_percent(delay + t.sweep_ms() + 1.0, y), 1.0);
    assert_eq!(t.row_percent(delay + 5000.0, y), 1.0);
    assert!(t.row_percent(delay + 1000.0, y) < 1.0);
}

#[test]
fn top_row_starts_immediately_lower_rows_wait() {
    let t = timeline();
    assert_eq!(t.row_percent(0.0, 0.0), 0.0);
    assert!(t.row_percent(1.0, 0.0) > 0.0);

    assert_eq!(t.row_percent(0.0, 50.0), 0.0);
    assert_eq!(t.row_percent(t.row_delay(50.0), 50.0), 0.0);
}

#[test]
fn zero_duration_reveals_everything() {
    let t = RevealTimeline::new(0.0, Vec2::new(1600.0, 1200.0));
    for (elapsed, y) in [(0.0, 0.0), (0.0, 50.0), (-10.0, 1150.0)] {
        let p = t.row_percent(elapsed, y);
        assert!(!p.is_nan());
        assert_eq!(p, 1.0);
    }
    assert_eq!(t.col_percent(0.0, 50.0), 1.0);
    assert_eq!(alpha_boost(t.col_percent(0.0, 50.0)), 0.0);
}

#[test]
fn boost_decays_with_reveal() {
    assert_eq!(alpha_boost(0.0), LINE_ALPHA_BOOST);
    assert_eq!(alpha_boost(0.5), 0.25);
    assert_eq!(alpha_boost(1.0), 0.0);
}

#[test]
fn linear_curve_is_selectable() {
    let t = timeline().with_ease(Ease::Linear);
    let half = t.sweep_ms() / 2.0;
    assert!((t.row_percent(half, 0.0) - 0.5).abs() < 1e-12);
}
