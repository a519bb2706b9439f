use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn in_quad_squares_and_clamps() {
    assert_eq!(Ease::InQuad.apply(0.5), 0.25);
    assert_eq!(Ease::InQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(7.0), 1.0);
}

#[test]
fn nan_reads_as_complete() {
    assert_eq!(Ease::InQuad.apply(f64::NAN), 1.0);
    assert_eq!(Ease::InQuad.apply(f64::INFINITY), 1.0);
    assert_eq!(Ease::InQuad.apply(f64::NEG_INFINITY), 0.0);
}

#[test]
fn default_is_in_quad() {
    assert_eq!(Ease::default(), Ease::InQuad);
}
