use super::*;

#[test]
fn shorthand_expands_like_css() {
    let m = RootMargin::parse("-10% 0px -10% 0px").unwrap();
    assert_eq!(m.top, Length::Percent(-10.0));
    assert_eq!(m.right, Length::Px(0.0));
    assert_eq!(m.bottom, Length::Percent(-10.0));
    assert_eq!(m.left, Length::Px(0.0));

    let m = RootMargin::parse("5px").unwrap();
    assert_eq!(m.left, Length::Px(5.0));
    assert_eq!(m.bottom, Length::Px(5.0));

    let m = RootMargin::parse("1px 2px").unwrap();
    assert_eq!((m.top, m.right), (Length::Px(1.0), Length::Px(2.0)));
    assert_eq!((m.bottom, m.left), (Length::Px(1.0), Length::Px(2.0)));

    let m = RootMargin::parse("1px 2px 3px").unwrap();
    assert_eq!(m.bottom, Length::Px(3.0));
    assert_eq!(m.left, Length::Px(2.0));

    assert_eq!(RootMargin::parse("0").unwrap(), RootMargin::ZERO);
}

#[test]
fn rejects_bad_margins() {
    assert!(RootMargin::parse("").is_err());
    assert!(RootMargin::parse("1px 2px 3px 4px 5px").is_err());
    assert!(RootMargin::parse("10").is_err());
    assert!(RootMargin::parse("10em").is_err());
    assert!(RootMargin::parse("NaNpx").is_err());
}

#[test]
fn apply_shrinks_by_percent_of_height() {
    let root = Rect::new(0.0, 1000.0, 1280.0, 1800.0);
    let m = RootMargin::parse("-10% 0px -10% 0px").unwrap();
    let r = m.apply(root);
    assert_eq!(r.y0, 1080.0);
    assert_eq!(r.y1, 1720.0);
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.x1, 1280.0);

    let m = RootMargin::parse("0px 0px -50px 0px").unwrap();
    let r = m.apply(root);
    assert_eq!(r.y0, 1000.0);
    assert_eq!(r.y1, 1750.0);
}

#[test]
fn over_shrunk_box_collapses() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    let r = RootMargin::parse("-60%").unwrap().apply(root);
    assert_eq!(r.height(), 0.0);
    assert_eq!(r.width(), 0.0);
}

#[test]
fn serde_uses_shorthand_string() {
    let m: RootMargin = serde_json::from_str("\"-10% 0px -10% 0px\"").unwrap();
    assert_eq!(m.top, Length::Percent(-10.0));
    let s = serde_json::to_string(&m).unwrap();
    assert_eq!(s, "\"-10% 0px -10% 0px\"");
    assert!(serde_json::from_str::<RootMargin>("\"bogus\"").is_err());
}
