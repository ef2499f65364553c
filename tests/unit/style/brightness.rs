use super::*;
use crate::dom::document::Document;
use crate::dom::host::{DomQuery, ElementSpec};

#[test]
fn yiq_matches_formula() {
    assert_eq!(yiq_brightness(Rgb8::new(0, 0, 0)), 0.0);
    assert_eq!(yiq_brightness(Rgb8::new(255, 255, 255)), 255.0);
    assert_eq!(yiq_brightness(Rgb8::new(20, 20, 20)), 20.0);
    assert!((yiq_brightness(Rgb8::new(255, 0, 0)) - 76.245).abs() < 1e-9);
    assert!((yiq_brightness(Rgb8::new(0, 255, 0)) - 149.685).abs() < 1e-9);
}

#[test]
fn classification_boundary() {
    assert_eq!(Tone::classify(127.999), Tone::Dark);
    assert_eq!(Tone::classify(128.0), Tone::Light);
    assert_eq!(Tone::classify_with(150.0, 160.0), Tone::Dark);
}

#[test]
fn transparent_defers_to_parent() {
    let mut doc = Document::new(ElementSpec::new("html").with_background("rgb(10, 10, 10)"));
    let body = doc
        .append(doc.root(), ElementSpec::new("body").with_background("transparent"))
        .unwrap();
    let section = doc
        .append(body, ElementSpec::new("section").with_background("rgba(0, 0, 0, 0)"))
        .unwrap();
    let inner = doc.append(section, ElementSpec::new("div")).unwrap();

    assert_eq!(sample_brightness(&doc, inner), 10.0);
    assert_eq!(sample_brightness(&doc, section), 10.0);
    assert_eq!(sample_brightness(&doc, body), sample_brightness(&doc, doc.root()));
}

#[test]
fn transparent_root_is_light() {
    let mut doc = Document::new(ElementSpec::new("html").with_background("transparent"));
    let body = doc.append(doc.root(), ElementSpec::new("body")).unwrap();
    assert_eq!(sample_brightness(&doc, body), FALLBACK_BRIGHTNESS);
    assert_eq!(sample_brightness(&doc, doc.root()), FALLBACK_BRIGHTNESS);
}

#[test]
fn unreadable_color_is_light() {
    let mut doc = Document::new(ElementSpec::new("html").with_background("rgb(0, 0, 0)"));
    let body = doc
        .append(
            doc.root(),
            ElementSpec::new("body").with_background("var(--color-surface)"),
        )
        .unwrap();
    assert_eq!(sample_brightness(&doc, body), FALLBACK_BRIGHTNESS);
}

#[test]
fn translucent_color_uses_its_channels() {
    let doc = Document::new(ElementSpec::new("html").with_background("rgba(252, 252, 249, 0.95)"));
    let b = sample_brightness(&doc, doc.root());
    assert!((b - 251.658).abs() < 1e-9);
}
