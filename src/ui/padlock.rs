//! Decorative padlock rain.

use crate::config::PadlockConfig;
use crate::dom::host::{DomQuery, TreeEdit};
use crate::foundation::core::Viewport;
use crate::foundation::error::GlassResult;
use crate::foundation::ids::NodeId;
use crate::motion::particles::{self, ParticleRanges, Rng64};
use crate::observe::intersection::IntersectionObserver;
use crate::ui::flags;

/// Regenerates the particle container each time the animated section becomes half visible.
#[derive(Clone, Debug)]
pub struct PadlockRain {
    container: Option<NodeId>,
    observer: IntersectionObserver,
    count: usize,
    ranges: ParticleRanges,
    rng: Rng64,
    bursts: u32,
}

impl PadlockRain {
    /// Effect on `section`; without a container, entries are observed but nothing is generated.
    pub fn new(
        section: NodeId,
        container: Option<NodeId>,
        config: &PadlockConfig,
    ) -> GlassResult<Self> {
        let mut observer = IntersectionObserver::new(config.observer())?;
        observer.observe(section);
        Ok(Self {
            container,
            observer,
            count: config.count,
            ranges: ParticleRanges::default(),
            rng: Rng64::new(config.seed),
            bursts: 0,
        })
    }

    /// Number of bursts generated so far.
    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    /// Poll the section; on entry replace the container's children. Returns the new particles.
    pub fn on_viewport<D: DomQuery + TreeEdit + ?Sized>(
        &mut self,
        dom: &mut D,
        viewport: Viewport,
    ) -> Vec<NodeId> {
        let entered = self
            .observer
            .poll(&*dom, viewport)
            .iter()
            .any(|e| e.is_intersecting);
        match self.container {
            Some(container) if entered => self.burst(dom, container),
            _ => Vec::new(),
        }
    }

    fn burst<D: TreeEdit + ?Sized>(&mut self, dom: &mut D, container: NodeId) -> Vec<NodeId> {
        let specs = particles::spawn(&mut self.rng, self.count, &self.ranges)
            .iter()
            .map(|p| p.to_element(flags::PADLOCK))
            .collect();
        self.bursts += 1;
        tracing::debug!(count = self.count, burst = self.bursts, "padlock rain");
        dom.replace_children(container, specs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/padlock.rs"]
mod tests;
