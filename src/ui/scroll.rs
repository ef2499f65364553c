//! Click-to-scroll navigation.

use crate::config::ScrollLinkDef;
use crate::dom::host::DomQuery;
use crate::dom::selector::SelectorList;
use crate::foundation::core::Viewport;
use crate::foundation::error::GlassResult;
use crate::foundation::ids::NodeId;

/// Attribute holding a destination selector on arbitrary elements.
pub const SCROLL_TO_ATTR: &str = "data-scroll-to";

/// A resolved scroll request.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTarget {
    /// Element whose click triggered the scroll.
    pub trigger: NodeId,
    /// Destination element.
    pub target: NodeId,
    /// Unclamped scroll offset placing the destination just below the header.
    pub scroll_y: f64,
}

#[derive(Clone, Debug)]
struct ScrollLink {
    trigger: SelectorList,
    target: SelectorList,
}

/// Maps clicks on nav links, call-to-action buttons and `data-scroll-to` elements to offsets.
#[derive(Clone, Debug)]
pub struct ScrollNavigator {
    nav_links: SelectorList,
    links: Vec<ScrollLink>,
    scroll_to: SelectorList,
    fallback_header_height: f64,
}

impl ScrollNavigator {
    /// Navigator for `nav_links` plus the configured bindings.
    pub fn new(
        nav_links: SelectorList,
        links: &[ScrollLinkDef],
        fallback_header_height: f64,
    ) -> GlassResult<Self> {
        let links = links
            .iter()
            .map(|l| -> GlassResult<ScrollLink> {
                Ok(ScrollLink {
                    trigger: SelectorList::parse(&l.selector)?,
                    target: SelectorList::parse(&l.target)?,
                })
            })
            .collect::<GlassResult<Vec<_>>>()?;
        Ok(Self {
            nav_links,
            links,
            scroll_to: SelectorList::parse(&format!("[{SCROLL_TO_ATTR}]"))?,
            fallback_header_height,
        })
    }

    /// Destination selector for a click on `clicked`, with the element that claimed the click.
    ///
    /// Nav links win over configured bindings, which win over `data-scroll-to`.
    pub fn destination_for<D: DomQuery + ?Sized>(
        &self,
        dom: &D,
        clicked: NodeId,
    ) -> Option<(NodeId, SelectorList)> {
        if let Some(link) = dom.closest(clicked, &self.nav_links) {
            let href = dom.attribute(link, "href")?;
            return parse_target(href).map(|t| (link, t));
        }
        for binding in &self.links {
            if let Some(trigger) = dom.closest(clicked, &binding.trigger) {
                return Some((trigger, binding.target.clone()));
            }
        }
        let el = dom.closest(clicked, &self.scroll_to)?;
        let raw = dom.attribute(el, SCROLL_TO_ATTR)?;
        parse_target(raw).map(|t| (el, t))
    }

    /// Resolve a click into a scroll request; `None` when the click is not a scroll link or the
    /// destination does not exist.
    pub fn resolve<D: DomQuery + ?Sized>(
        &self,
        dom: &D,
        clicked: NodeId,
        header_height: Option<f64>,
    ) -> Option<ScrollTarget> {
        let (trigger, selector) = self.destination_for(dom, clicked)?;
        let Some(target) = dom.query_first(&selector) else {
            tracing::debug!(selector = %selector, "scroll target not found");
            return None;
        };
        let scroll_y =
            dom.bounds(target).y0 - header_height.unwrap_or(self.fallback_header_height);
        Some(ScrollTarget {
            trigger,
            target,
            scroll_y,
        })
    }
}

fn parse_target(raw: &str) -> Option<SelectorList> {
    match SelectorList::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::debug!(destination = raw, error = %e, "ignoring unusable scroll target");
            None
        }
    }
}

/// Clamp `y` to `[0, document_height - viewport height]`; an unknown (non-positive) document
/// height only clamps at zero.
pub fn clamp_scroll(y: f64, document_height: f64, viewport: Viewport) -> f64 {
    let y = if y.is_finite() { y } else { 0.0 };
    let upper = if document_height > 0.0 {
        (document_height - viewport.height).max(0.0)
    } else {
        f64::INFINITY
    };
    y.clamp(0.0, upper)
}

#[cfg(test)]
#[path = "../../tests/unit/ui/scroll.rs"]
mod tests;
