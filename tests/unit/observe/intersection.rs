use super::*;
use crate::dom::document::Document;
use crate::dom::host::{DomQuery, ElementSpec};

fn section_doc() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new(ElementSpec::new("html"));
    let a = doc
        .append(
            doc.root(),
            ElementSpec::new("section").with_bounds(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
        )
        .unwrap();
    let b = doc
        .append(
            doc.root(),
            ElementSpec::new("section").with_bounds(Rect::new(0.0, 1000.0, 1000.0, 2000.0)),
        )
        .unwrap();
    (doc, a, b)
}

fn cfg(threshold: f64, margin: &str) -> ObserverConfig {
    ObserverConfig {
        threshold,
        root_margin: RootMargin::parse(margin).unwrap(),
    }
}

#[test]
fn ratio_edge_cases() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(intersection(Rect::new(0.0, 50.0, 100.0, 150.0), root), (true, 0.5));
    assert_eq!(intersection(Rect::new(0.0, 100.0, 100.0, 200.0), root), (true, 0.0));
    assert_eq!(intersection(Rect::new(0.0, 101.0, 100.0, 200.0), root), (false, 0.0));
    assert_eq!(intersection(Rect::new(10.0, 10.0, 10.0, 10.0), root), (true, 1.0));
    assert_eq!(intersection(Rect::new(0.0, 0.0, 100.0, 100.0), root), (true, 1.0));
}

#[test]
fn first_poll_reports_every_target() {
    let (doc, a, b) = section_doc();
    let mut obs = IntersectionObserver::new(cfg(0.3, "0px")).unwrap();
    obs.observe(a);
    obs.observe(b);
    obs.observe(a);
    assert_eq!(obs.targets(), &[a, b]);

    let vp = Viewport::new(1000.0, 800.0).unwrap();
    let entries = obs.poll(&doc, vp);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].target, a);
    assert!(entries[0].is_intersecting);
    assert!((entries[0].ratio - 0.8).abs() < 1e-9);
    assert_eq!(entries[1].target, b);
    assert!(!entries[1].is_intersecting);

    assert!(obs.poll(&doc, vp).is_empty());
}

#[test]
fn reports_only_changes() {
    let (doc, a, b) = section_doc();
    let mut obs = IntersectionObserver::new(cfg(0.3, "0px")).unwrap();
    obs.observe(a);
    obs.observe(b);
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    obs.poll(&doc, vp);

    // a: 200/1000 visible, b: 600/1000 visible.
    let entries = obs.poll(&doc, vp.with_scroll(800.0));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].target, a);
    assert!(!entries[0].is_intersecting);
    assert_eq!(entries[1].target, b);
    assert!(entries[1].is_intersecting);
}

#[test]
fn margin_shrinks_trigger_zone() {
    let mut doc = Document::new(ElementSpec::new("html"));
    let el = doc
        .append(
            doc.root(),
            ElementSpec::new("div").with_bounds(Rect::new(0.0, 770.0, 100.0, 870.0)),
        )
        .unwrap();
    let vp = Viewport::new(1000.0, 800.0).unwrap();

    let mut plain = IntersectionObserver::new(cfg(0.1, "0px")).unwrap();
    plain.observe(el);
    assert!(plain.poll(&doc, vp)[0].is_intersecting);

    let mut shrunk = IntersectionObserver::new(cfg(0.1, "0px 0px -50px 0px")).unwrap();
    shrunk.observe(el);
    assert!(!shrunk.poll(&doc, vp)[0].is_intersecting);
}

#[test]
fn zero_threshold_means_any_contact() {
    let (doc, _a, b) = section_doc();
    let mut obs = IntersectionObserver::new(cfg(0.0, "0px")).unwrap();
    obs.observe(b);
    let vp = Viewport::new(1000.0, 1000.0).unwrap();
    let e = obs.poll(&doc, vp);
    assert!(e[0].is_intersecting);
    assert_eq!(e[0].ratio, 0.0);
}

#[test]
fn unobserve_forgets_state() {
    let (doc, a, _b) = section_doc();
    let mut obs = IntersectionObserver::new(cfg(0.3, "0px")).unwrap();
    obs.observe(a);
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    assert_eq!(obs.poll(&doc, vp).len(), 1);
    obs.unobserve(a);
    assert!(obs.targets().is_empty());
    assert!(obs.poll(&doc, vp).is_empty());
    obs.observe(a);
    assert_eq!(obs.poll(&doc, vp).len(), 1);
}

#[test]
fn rejects_out_of_range_threshold() {
    assert!(IntersectionObserver::new(cfg(1.5, "0px")).is_err());
    assert!(IntersectionObserver::new(cfg(-0.1, "0px")).is_err());
    assert!(IntersectionObserver::new(cfg(f64::NAN, "0px")).is_err());
}
