use super::*;

#[test]
fn device_size_doubles_and_rounds_up() {
    assert_eq!(Viewport::new(800.0, 600.0).device_size(), (1600, 1200));
    assert_eq!(Viewport::new(100.25, 0.4).device_size(), (201, 1));
    assert_eq!(Viewport::new(-5.0, f64::NAN).device_size(), (0, 0));
}

#[test]
fn parallax_is_half_scroll_at_device_scale() {
    let off = ScrollOffset::new(30.0, 250.0).parallax();
    assert_eq!(off, Vec2::new(30.0, 250.0));

    let a = ScrollOffset::new(0.0, 100.0).parallax();
    let b = ScrollOffset::new(0.0, 140.0).parallax();
    assert_eq!(b.y - a.y, 40.0 / 2.0 * SIZE_MULT);
}

#[test]
fn grays_match_css_lightness() {
    assert_eq!(Hsla::gray(30.0, 1.0).to_rgba8(), [77, 77, 77, 255]);
    assert_eq!(Hsla::gray(60.0, 0.2).to_rgba8(), [153, 153, 153, 51]);
    assert_eq!(Hsla::gray(30.0, 1.7).to_rgba8()[3], 255);
}

#[test]
fn saturated_hues_convert() {
    let red = Hsla {
        h: 0.0,
        s: 100.0,
        l: 50.0,
        a: 1.0,
    };
    assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
    let blue = Hsla { h: 240.0, ..red };
    assert_eq!(blue.to_rgba8(), [0, 0, 255, 255]);
}

#[test]
fn css_string_uses_space_syntax() {
    assert_eq!(Hsla::gray(60.0, 0.1).to_css(), "hsl(0 0% 60% / 0.1)");
}
