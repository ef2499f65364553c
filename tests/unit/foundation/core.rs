use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(100).times(3), Millis(300));
    assert_eq!(Millis(u64::MAX).saturating_add(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(40) + Millis(2), Millis(42));
}

#[test]
fn viewport_rejects_bad_sizes() {
    assert!(Viewport::new(-1.0, 800.0).is_err());
    assert!(Viewport::new(1280.0, f64::NAN).is_err());
    assert!(Viewport::new(1280.0, 800.0).is_ok());
}

#[test]
fn visible_rect_follows_scroll() {
    let vp = Viewport::new(1280.0, 800.0).unwrap().with_scroll(1200.0);
    let r = vp.visible_rect();
    assert_eq!(r.y0, 1200.0);
    assert_eq!(r.y1, 2000.0);
    assert_eq!(r.width(), 1280.0);
}
