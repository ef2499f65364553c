//! One-shot fade-in of tagged elements.

use crate::config::RevealConfig;
use crate::dom::host::{DomQuery, StateFlags};
use crate::foundation::core::Viewport;
use crate::foundation::error::GlassResult;
use crate::foundation::ids::NodeId;
use crate::observe::intersection::IntersectionObserver;
use crate::ui::flags;

/// Adds `animate` to each element the first time it becomes visible, then forgets it.
#[derive(Clone, Debug)]
pub struct FadeInRevealer {
    observer: IntersectionObserver,
}

impl FadeInRevealer {
    /// Revealer observing `elements`.
    pub fn new(elements: &[NodeId], config: &RevealConfig) -> GlassResult<Self> {
        let mut observer = IntersectionObserver::new(config.observer())?;
        for &el in elements {
            observer.observe(el);
        }
        Ok(Self { observer })
    }

    /// Elements not yet revealed.
    pub fn pending(&self) -> &[NodeId] {
        self.observer.targets()
    }

    /// Reveal every pending element that now intersects; returns the newly revealed ones.
    pub fn on_viewport<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        viewport: Viewport,
    ) -> Vec<NodeId> {
        let revealed: Vec<NodeId> = self
            .observer
            .poll(&*dom, viewport)
            .into_iter()
            .filter(|e| e.is_intersecting)
            .map(|e| e.target)
            .collect();
        for &el in &revealed {
            dom.add_flag(el, flags::ANIMATE);
            self.observer.unobserve(el);
        }
        if !revealed.is_empty() {
            tracing::debug!(count = revealed.len(), "elements revealed");
        }
        revealed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/reveal.rs"]
mod tests;
