use super::*;
use crate::dom::document::Document;
use crate::dom::host::ElementSpec;
use crate::foundation::core::Rect;

struct Ids {
    header: NodeId,
    hero: NodeId,
    servicos: NodeId,
    cards: Vec<NodeId>,
    toggle: NodeId,
    panel_link: NodeId,
    nav_link: NodeId,
}

fn rect(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 1000.0, top + height)
}

fn page() -> (Document, Ids) {
    let mut doc = Document::new(
        ElementSpec::new("html")
            .with_background("rgb(250, 250, 250)")
            .with_bounds(rect(0.0, 3000.0)),
    );
    let body = doc.append(doc.root(), ElementSpec::new("body")).unwrap();
    let header = doc
        .append(
            body,
            ElementSpec::new("header")
                .with_flag("glass-header")
                .with_bounds(rect(0.0, 80.0)),
        )
        .unwrap();
    let nav_link = doc
        .append(
            header,
            ElementSpec::new("a").with_flag("nav-link").with_attr("href", "#servicos"),
        )
        .unwrap();
    let toggle = doc
        .append(header, ElementSpec::new("button").with_flag("hamburger-menu"))
        .unwrap();
    let panel = doc
        .append(body, ElementSpec::new("nav").with_flag("mobile-nav"))
        .unwrap();
    let panel_link = doc
        .append(
            panel,
            ElementSpec::new("a").with_flag("nav-link").with_attr("href", "#servicos"),
        )
        .unwrap();
    let main = doc.append(body, ElementSpec::new("main")).unwrap();
    let hero = doc
        .append(
            main,
            ElementSpec::new("section")
                .with_id("inicio")
                .with_flag("hero")
                .with_flag("section-transition")
                .with_background("rgb(10, 20, 40)")
                .with_bounds(rect(0.0, 1000.0)),
        )
        .unwrap();
    let servicos = doc
        .append(
            main,
            ElementSpec::new("section")
                .with_id("servicos")
                .with_flag("section-transition")
                .with_bounds(rect(1000.0, 2000.0)),
        )
        .unwrap();
    let cards = (0..3u32)
        .map(|i| {
            doc.append(
                servicos,
                ElementSpec::new("div")
                    .with_flag("fade-in-up")
                    .with_bounds(rect(1100.0 + 300.0 * f64::from(i), 200.0)),
            )
            .unwrap()
        })
        .collect();
    (
        doc,
        Ids {
            header,
            hero,
            servicos,
            cards,
            toggle,
            panel_link,
            nav_link,
        },
    )
}

fn session() -> (PageSession<Document>, Ids) {
    let (doc, ids) = page();
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    (
        PageSession::new(doc, vp, &PageConfig::landing()).unwrap(),
        ids,
    )
}

#[test]
fn start_applies_initial_state_once() {
    let (mut s, ids) = session();
    s.start();
    let dom = s.dom();
    assert!(dom.has_flag(ids.hero, "active"));
    assert!(dom.has_flag(ids.hero, "highlighted"));
    assert!(dom.has_flag(ids.header, "header-on-dark"));
    assert!(!dom.has_flag(ids.servicos, "active"));
    let snap = s.snapshot();
    assert_eq!(snap.header_theme, Some(HeaderTheme::OnDark));
    assert_eq!(snap.current_section.as_deref(), Some("section#inicio"));
    assert_eq!(snap.nav_section.as_deref(), Some("inicio"));
    assert!(snap.active_links.is_empty());
    s.start();
    assert_eq!(s.snapshot(), snap);
}

#[test]
fn scroll_clamps_to_document() {
    let (mut s, _ids) = session();
    assert_eq!(s.scroll_to(-50.0), 0.0);
    assert_eq!(s.scroll_to(10_000.0), 2200.0);
    assert_eq!(s.scroll_by(-200.0), 2000.0);
    assert_eq!(s.viewport().scroll_y, 2000.0);
}

#[test]
fn zero_delay_reveal_runs_within_the_event() {
    let (mut s, ids) = session();
    s.start();
    s.scroll_to(1000.0);
    let dom = s.dom();
    assert!(dom.has_flag(ids.servicos, "highlighted"));
    assert!(!dom.has_flag(ids.hero, "highlighted"));
    assert!(dom.has_flag(ids.hero, "active"));
    assert!(dom.has_flag(ids.cards[0], "animate"));
    assert_eq!(s.now(), Millis::ZERO);
}

#[test]
fn advance_fires_timers_in_order() {
    let (doc, ids) = page();
    // A short viewport keeps the fade observer away from the later cards.
    let vp = Viewport::new(1000.0, 300.0).unwrap();
    let mut cfg = PageConfig::landing();
    cfg.sections.threshold = 0.1;
    let mut s = PageSession::new(doc, vp, &cfg).unwrap();
    s.scroll_to(1000.0);
    assert!(s.dom().has_flag(ids.cards[0], "animate"));
    assert!(!s.dom().has_flag(ids.cards[1], "animate"));
    s.advance(Millis(150));
    assert!(s.dom().has_flag(ids.cards[1], "animate"));
    assert!(!s.dom().has_flag(ids.cards[2], "animate"));
    s.advance(Millis(50));
    assert!(s.dom().has_flag(ids.cards[2], "animate"));
    assert_eq!(s.now(), Millis(200));
    assert_eq!(s.snapshot().pending_timers, 0);
}

#[test]
fn nav_click_scrolls_below_header() {
    let (mut s, ids) = session();
    let report = s.click(ids.nav_link);
    assert_eq!(report.menu, MenuClick::Ignored);
    assert_eq!(report.scrolled_to, Some(920.0));
    assert!(s.dom().has_flag(ids.nav_link, "active"));
}

#[test]
fn panel_link_closes_menu_and_scrolls() {
    let (mut s, ids) = session();
    assert_eq!(s.click(ids.toggle).menu, MenuClick::Toggled);
    assert!(s.snapshot().menu_open);
    let report = s.click(ids.panel_link);
    assert_eq!(report.menu, MenuClick::ClosedByLink);
    assert_eq!(report.scrolled_to, Some(920.0));
    assert!(!s.snapshot().menu_open);
}

#[test]
fn resize_closes_menu_on_desktop() {
    let (mut s, ids) = session();
    s.click(ids.toggle);
    s.resize(1200.0, 800.0).unwrap();
    assert!(!s.snapshot().menu_open);
    assert!(s.resize(f64::NAN, 800.0).is_err());
}

#[test]
fn click_selector_reports_missing_elements() {
    let (mut s, _ids) = session();
    let err = s.click_selector(".nope").unwrap_err();
    assert!(err.to_string().starts_with("script error:"));
    assert!(s.click_selector(".hamburger-menu").is_ok());
}

#[test]
fn submit_without_form_is_an_error() {
    let (mut s, _ids) = session();
    let err = s.submit(&ContactFields::default()).unwrap_err();
    assert!(matches!(err, GlassError::Form(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let (doc, _ids) = page();
    let mut cfg = PageConfig::default();
    cfg.sections.threshold = 3.0;
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    assert!(PageSession::new(doc, vp, &cfg).is_err());
}
