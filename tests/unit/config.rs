use super::*;

#[test]
fn empty_object_is_default() {
    let cfg = PageConfig::from_json("{}").unwrap();
    assert_eq!(cfg, PageConfig::default());
    assert_eq!(cfg.sections.threshold, 0.3);
    assert_eq!(cfg.sections.root_margin.to_string(), "-10% 0px -10% 0px");
    assert_eq!(cfg.reveal.root_margin.to_string(), "0px 0px -50px 0px");
    assert_eq!(cfg.form.send_delay_ms, 1500);
}

#[test]
fn landing_has_cta_links() {
    let cfg = PageConfig::landing();
    cfg.validate().unwrap();
    let targets: Vec<_> = cfg.scroll_links.iter().map(|l| l.target.as_str()).collect();
    assert_eq!(targets, vec!["#contato", "#servicos", "#contato"]);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = PageConfig::from_json(
        r#"{ "sections": { "threshold": 0.5, "root_margin": "0px" }, "nav": { "lookahead": 10 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.sections.threshold, 0.5);
    assert_eq!(cfg.sections.root_margin, RootMargin::ZERO);
    assert_eq!(cfg.sections.selector, ".section-transition");
    assert_eq!(cfg.nav.lookahead, 10.0);
    assert_eq!(cfg.nav.links, ".nav-link");
}

#[test]
fn rejects_unknown_fields() {
    let err = PageConfig::from_json(r#"{ "headr": {} }"#).unwrap_err();
    assert!(matches!(err, GlassError::Serde(_)));
}

#[test]
fn rejects_bad_values() {
    let err = PageConfig::from_json(r#"{ "reveal": { "threshold": 2.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("threshold"));

    let err = PageConfig::from_json(r#"{ "nav": { "links": "a[" } }"#).unwrap_err();
    assert!(err.to_string().starts_with("validation error: nav.links"));

    let err = PageConfig::from_json(r#"{ "menu": { "breakpoint": -1 } }"#).unwrap_err();
    assert!(err.to_string().contains("menu.breakpoint"));

    assert!(PageConfig::from_json(r#"{ "sections": { "root_margin": "1 2 3 4 5" } }"#).is_err());
}

#[test]
fn serializes_root_margin_as_shorthand() {
    let json = serde_json::to_value(PageConfig::default()).unwrap();
    assert_eq!(json["sections"]["root_margin"], "-10% 0px -10% 0px");
}
