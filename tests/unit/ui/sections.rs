use super::*;
use crate::dom::document::Document;
use crate::dom::host::ElementSpec;
use crate::foundation::core::Rect;

fn entry(target: NodeId, is_intersecting: bool) -> IntersectionEntry {
    IntersectionEntry {
        target,
        is_intersecting,
        ratio: if is_intersecting { 1.0 } else { 0.0 },
    }
}

struct Page {
    doc: Document,
    s1: NodeId,
    s2: NodeId,
    reveals: Vec<NodeId>,
}

fn page() -> Page {
    let mut doc = Document::new(ElementSpec::new("html"));
    let root = doc.root();
    let s1 = doc
        .append(
            root,
            ElementSpec::new("section")
                .with_flag("section-transition")
                .with_bounds(Rect::new(0.0, 0.0, 1000.0, 800.0)),
        )
        .unwrap();
    let s2 = doc
        .append(
            root,
            ElementSpec::new("section")
                .with_flag("section-transition")
                .with_bounds(Rect::new(0.0, 800.0, 1000.0, 1600.0)),
        )
        .unwrap();
    let wrap = doc.append(s2, ElementSpec::new("div")).unwrap();
    let mut reveals = Vec::new();
    for class in ["fade-in-up", "fade-in-left", "fade-in-right"] {
        reveals.push(doc.append(wrap, ElementSpec::new("p").with_flag(class)).unwrap());
    }
    doc.append(s2, ElementSpec::new("p").with_flag("plain")).unwrap();
    Page {
        doc,
        s1,
        s2,
        reveals,
    }
}

fn tracker(p: &Page) -> SectionActivationTracker {
    let reveal = SelectorList::parse(".fade-in-up, .fade-in-left, .fade-in-right").unwrap();
    SectionActivationTracker::new(vec![p.s1, p.s2], reveal, &SectionConfig::default()).unwrap()
}

#[test]
fn start_activates_first_section_once() {
    let mut p = page();
    let mut t = tracker(&p);
    t.start(&mut p.doc);
    assert!(p.doc.has_flag(p.s1, "active"));
    assert!(!p.doc.has_flag(p.s1, "highlighted"));
    assert!(!p.doc.has_flag(p.s2, "active"));
    p.doc.remove_flag(p.s1, "active");
    t.start(&mut p.doc);
    assert!(!p.doc.has_flag(p.s1, "active"));
}

#[test]
fn entering_moves_highlight_and_keeps_active() {
    let mut p = page();
    let mut t = tracker(&p);
    let mut timers = TimerQueue::new();
    t.apply(&mut p.doc, &[entry(p.s1, true)], &mut timers);
    assert_eq!(t.current(), Some(p.s1));
    t.apply(&mut p.doc, &[entry(p.s2, true)], &mut timers);

    assert!(p.doc.has_flag(p.s1, "active"));
    assert!(!p.doc.has_flag(p.s1, "highlighted"));
    assert!(p.doc.has_flag(p.s2, "active"));
    assert!(p.doc.has_flag(p.s2, "highlighted"));
    assert_eq!(t.current(), Some(p.s2));
}

#[test]
fn exit_clears_current_only_for_current_section() {
    let mut p = page();
    let mut t = tracker(&p);
    let mut timers = TimerQueue::new();
    t.apply(&mut p.doc, &[entry(p.s1, true), entry(p.s2, true)], &mut timers);
    t.apply(&mut p.doc, &[entry(p.s1, false)], &mut timers);
    assert_eq!(t.current(), Some(p.s2));
    t.apply(&mut p.doc, &[entry(p.s2, false)], &mut timers);
    assert_eq!(t.current(), None);
    assert!(!p.doc.has_flag(p.s2, "highlighted"));
    assert!(p.doc.has_flag(p.s2, "active"));
}

#[test]
fn schedules_staggered_reveals_in_document_order() {
    let mut p = page();
    let mut t = tracker(&p);
    let mut timers = TimerQueue::new();
    t.apply(&mut p.doc, &[entry(p.s2, true)], &mut timers);
    assert_eq!(timers.len(), 3);
    let mut fired = Vec::new();
    while let Some((due, d)) = timers.pop_until(Millis(u64::MAX)) {
        fired.push((due, d));
    }
    let expected: Vec<_> = p
        .reveals
        .iter()
        .enumerate()
        .map(|(i, &n)| (Millis(100 * i as u64), Deferred::Reveal(n)))
        .collect();
    assert_eq!(fired, expected);
}

#[test]
fn polls_viewport() {
    let mut p = page();
    let mut t = tracker(&p);
    let mut timers = TimerQueue::new();
    t.start(&mut p.doc);
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    t.on_viewport(&mut p.doc, vp, &mut timers);
    assert_eq!(t.current(), Some(p.s1));
    assert!(timers.is_empty());

    t.on_viewport(&mut p.doc, vp.with_scroll(800.0), &mut timers);
    assert_eq!(t.current(), Some(p.s2));
    assert_eq!(timers.len(), 3);
}

#[test]
fn empty_section_list_is_fine() {
    let mut p = page();
    let mut t = SectionActivationTracker::new(
        Vec::new(),
        SelectorList::parse(".x").unwrap(),
        &SectionConfig::default(),
    )
    .unwrap();
    let mut timers = TimerQueue::new();
    t.start(&mut p.doc);
    t.on_viewport(&mut p.doc, Viewport::new(100.0, 100.0).unwrap(), &mut timers);
    assert_eq!(t.current(), None);
}
