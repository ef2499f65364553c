//! Section activation with a staggered reveal cascade.

use crate::config::SectionConfig;
use crate::dom::host::{DomQuery, StateFlags};
use crate::dom::selector::SelectorList;
use crate::foundation::core::{Millis, Viewport};
use crate::foundation::error::GlassResult;
use crate::foundation::ids::NodeId;
use crate::motion::timers::TimerQueue;
use crate::observe::intersection::{IntersectionEntry, IntersectionObserver};
use crate::ui::{Deferred, flags};

/// Tracks which section is in focus.
///
/// At most one section carries `highlighted`; `active` is added on first entry and never removed.
#[derive(Clone, Debug)]
pub struct SectionActivationTracker {
    sections: Vec<NodeId>,
    reveal: SelectorList,
    observer: IntersectionObserver,
    stagger: Millis,
    current: Option<NodeId>,
    started: bool,
}

impl SectionActivationTracker {
    /// Tracker over `sections` in document order; `reveal` selects the stagger targets.
    pub fn new(
        sections: Vec<NodeId>,
        reveal: SelectorList,
        config: &SectionConfig,
    ) -> GlassResult<Self> {
        Ok(Self {
            sections,
            reveal,
            observer: IntersectionObserver::new(config.observer())?,
            stagger: Millis(config.stagger_ms),
            current: None,
            started: false,
        })
    }

    /// Section currently holding `highlighted`.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Tracked sections in document order.
    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// Mark the first section active and begin observing. Later calls do nothing.
    pub fn start<D: StateFlags + ?Sized>(&mut self, dom: &mut D) {
        if self.started {
            return;
        }
        self.started = true;
        for &s in &self.sections {
            self.observer.observe(s);
        }
        if let Some(&first) = self.sections.first() {
            dom.add_flag(first, flags::ACTIVE);
        }
    }

    /// Poll the observer and apply every resulting entry.
    pub fn on_viewport<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        viewport: Viewport,
        timers: &mut TimerQueue<Deferred>,
    ) {
        let entries = self.observer.poll(&*dom, viewport);
        self.apply(dom, &entries, timers);
    }

    /// Apply intersection entries in order.
    pub fn apply<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        entries: &[IntersectionEntry],
        timers: &mut TimerQueue<Deferred>,
    ) {
        for entry in entries {
            if entry.is_intersecting {
                self.enter(dom, entry.target, timers);
            } else {
                self.exit(dom, entry.target);
            }
        }
    }

    fn enter<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        section: NodeId,
        timers: &mut TimerQueue<Deferred>,
    ) {
        if let Some(prev) = self.current {
            dom.remove_flag(prev, flags::HIGHLIGHTED);
        }
        dom.add_flag(section, flags::ACTIVE);
        dom.add_flag(section, flags::HIGHLIGHTED);
        self.current = Some(section);

        let children = dom.query_within(section, &self.reveal);
        tracing::debug!(
            section = %dom.label(section),
            reveal = children.len(),
            "section entered"
        );
        for (i, child) in children.into_iter().enumerate() {
            timers.schedule_in(self.stagger.times(i as u64), Deferred::Reveal(child));
        }
    }

    fn exit<D: DomQuery + StateFlags + ?Sized>(&mut self, dom: &mut D, section: NodeId) {
        dom.remove_flag(section, flags::HIGHLIGHTED);
        if self.current == Some(section) {
            self.current = None;
        }
        tracing::debug!(section = %dom.label(section), "section left");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/sections.rs"]
mod tests;
