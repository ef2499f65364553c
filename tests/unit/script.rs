use super::*;
use crate::config::PageConfig;
use crate::dom::document::Document;
use crate::dom::host::{DomQuery, ElementSpec};
use crate::foundation::core::Rect;

#[test]
fn parses_tagged_steps() {
    let script = Script::from_json(
        r#"{ "steps": [
            { "op": "scroll", "y": 400 },
            { "op": "scroll_by", "dy": -100 },
            { "op": "resize", "width": 375, "height": 667 },
            { "op": "advance", "ms": 250 },
            { "op": "click", "selector": ".hamburger-menu" },
            { "op": "submit", "fields": { "nome": "Ana" } }
        ] }"#,
    )
    .unwrap();
    assert_eq!(script.steps.len(), 6);
    assert_eq!(script.steps[1], Step::ScrollBy { dy: -100.0 });
    match &script.steps[5] {
        Step::Submit { fields } => assert_eq!(fields.name, "Ana"),
        other => panic!("unexpected step {other:?}"),
    }
    assert_eq!(script.steps[4].to_string(), "click .hamburger-menu");
}

#[test]
fn rejects_invalid_steps() {
    let err = Script::from_json(r#"{ "steps": [ { "op": "click", "selector": "a[" } ] }"#)
        .unwrap_err();
    assert!(err.to_string().starts_with("script error: step 0"));

    let err = Script::from_json(
        r#"{ "steps": [ { "op": "resize", "width": -1, "height": 100 } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("width"));

    assert!(matches!(
        Script::from_json(r#"{ "steps": [ { "op": "jump" } ] }"#),
        Err(GlassError::Serde(_))
    ));
}

fn form_page() -> Document {
    let mut doc = Document::new(
        ElementSpec::new("html").with_bounds(Rect::new(0.0, 0.0, 1000.0, 2000.0)),
    );
    let form = doc
        .append(doc.root(), ElementSpec::new("form").with_id("contactForm"))
        .unwrap();
    doc.append(form, ElementSpec::new("button").with_attr("type", "submit"))
        .unwrap();
    doc
}

#[test]
fn replay_reports_every_step() {
    let script = Script::from_json(
        r#"{ "steps": [
            { "op": "scroll", "y": 5000 },
            { "op": "submit", "fields": {} },
            { "op": "submit", "fields": {
                "nome": "Ana", "email": "ana@acme.com", "empresa": "Acme",
                "mensagem": "Quero saber mais." } },
            { "op": "submit", "fields": {} },
            { "op": "advance", "ms": 1500 }
        ] }"#,
    )
    .unwrap();
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    let mut session = PageSession::new(form_page(), vp, &PageConfig::default()).unwrap();
    let reports = script.replay(&mut session).unwrap();

    assert_eq!(reports.len(), 5);
    assert_eq!(reports[0].note.as_deref(), Some("at 1200"));
    assert!(reports[1].note.as_deref().unwrap().starts_with("rejected: Nome"));
    assert_eq!(reports[2].note.as_deref(), Some("sending"));
    assert!(reports[3].note.as_deref().unwrap().starts_with("refused:"));
    let last = &reports[4].snapshot;
    assert_eq!(last.time_ms, 1500);
    assert_eq!(last.forms_sent, 1);
    assert_eq!(last.pending_timers, 1);
}

#[test]
fn click_on_missing_element_aborts() {
    let script =
        Script::from_json(r##"{ "steps": [ { "op": "click", "selector": "#ghost" } ] }"##).unwrap();
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    let mut session = PageSession::new(form_page(), vp, &PageConfig::default()).unwrap();
    let err = script.replay(&mut session).unwrap_err();
    assert!(err.to_string().contains("step 0"));
}
