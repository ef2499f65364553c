//! Polling reimplementation of viewport-intersection observation.

use std::collections::HashMap;

use crate::dom::host::DomQuery;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;
use crate::observe::margin::RootMargin;

/// Threshold and root margin of an [`IntersectionObserver`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObserverConfig {
    /// Fraction of the target that must be visible, in `[0, 1]`. Zero means any contact.
    pub threshold: f64,
    /// Adjustment of the viewport box before intersecting.
    pub root_margin: RootMargin,
}

impl ObserverConfig {
    /// Threshold must be finite and within `[0, 1]`.
    pub fn validate(&self) -> GlassResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(GlassError::validation(format!(
                "observer threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// One state change reported by [`IntersectionObserver::poll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Observed element.
    pub target: NodeId,
    /// Whether the visible fraction reaches the threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the target in `[0, 1]`.
    pub ratio: f64,
}

/// Watches a set of elements against the viewport.
///
/// Every target is reported on its first poll, then again whenever its intersecting state flips.
#[derive(Clone, Debug)]
pub struct IntersectionObserver {
    config: ObserverConfig,
    targets: Vec<NodeId>,
    last: HashMap<NodeId, bool>,
}

impl IntersectionObserver {
    /// Create an observer with no targets.
    pub fn new(config: ObserverConfig) -> GlassResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            targets: Vec::new(),
            last: HashMap::new(),
        })
    }

    /// Observer configuration.
    pub fn config(&self) -> ObserverConfig {
        self.config
    }

    /// Start watching `node`; observing twice is a no-op.
    pub fn observe(&mut self, node: NodeId) {
        if !self.targets.contains(&node) {
            self.targets.push(node);
        }
    }

    /// Stop watching `node` and forget its last state.
    pub fn unobserve(&mut self, node: NodeId) {
        self.targets.retain(|&t| t != node);
        self.last.remove(&node);
    }

    /// Watched elements in observation order.
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Recompute every target against `viewport` and report changes in observation order.
    pub fn poll<D: DomQuery + ?Sized>(
        &mut self,
        dom: &D,
        viewport: Viewport,
    ) -> Vec<IntersectionEntry> {
        let root = self.config.root_margin.apply(viewport.visible_rect());
        let mut out = Vec::new();
        for &target in &self.targets {
            let (touching, ratio) = intersection(dom.bounds(target), root);
            let is_intersecting = if self.config.threshold <= 0.0 {
                touching
            } else {
                touching && ratio >= self.config.threshold
            };
            let prev = self.last.insert(target, is_intersecting);
            if prev != Some(is_intersecting) {
                tracing::trace!(node = target.0, is_intersecting, ratio, "intersection change");
                out.push(IntersectionEntry {
                    target,
                    is_intersecting,
                    ratio,
                });
            }
        }
        out
    }
}

/// Edge-inclusive contact test and visible fraction of `target` within `root`.
///
/// Zero-area targets count as fully visible while they touch the root.
pub fn intersection(target: Rect, root: Rect) -> (bool, f64) {
    let x0 = target.x0.max(root.x0);
    let y0 = target.y0.max(root.y0);
    let x1 = target.x1.min(root.x1);
    let y1 = target.y1.min(root.y1);
    if x0 > x1 || y0 > y1 {
        return (false, 0.0);
    }
    let area = target.area();
    if area <= 0.0 {
        return (true, 1.0);
    }
    (true, ((x1 - x0) * (y1 - y0) / area).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/observe/intersection.rs"]
mod tests;
