//! Navigation link highlighting.

use crate::config::NavConfig;
use crate::dom::host::{DomQuery, StateFlags};
use crate::foundation::ids::NodeId;
use crate::ui::flags;

/// A navigation link and the section id its `href` points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLinkBinding {
    /// Link element.
    pub link: NodeId,
    /// Target section id; `None` unless the `href` is a `#fragment`.
    pub target: Option<String>,
}

impl NavLinkBinding {
    /// Binding derived from the link's `href` attribute.
    pub fn from_link<D: DomQuery + ?Sized>(dom: &D, link: NodeId) -> Self {
        let target = dom
            .attribute(link, "href")
            .and_then(|href| href.strip_prefix('#'))
            .filter(|id| !id.is_empty())
            .map(str::to_owned);
        Self { link, target }
    }
}

/// Marks the nav link whose section contains the probe position just below the header.
#[derive(Clone, Debug)]
pub struct NavigationHighlighter {
    sections: Vec<NodeId>,
    links: Vec<NavLinkBinding>,
    lookahead: f64,
    fallback_header_height: f64,
    active: Option<String>,
}

impl NavigationHighlighter {
    /// Highlighter over id-carrying sections and their links, both in document order.
    pub fn new<D: DomQuery + ?Sized>(
        dom: &D,
        sections: Vec<NodeId>,
        links: &[NodeId],
        config: &NavConfig,
    ) -> Self {
        Self {
            sections,
            links: links
                .iter()
                .map(|&l| NavLinkBinding::from_link(dom, l))
                .collect(),
            lookahead: config.lookahead,
            fallback_header_height: config.fallback_header_height,
            active: None,
        }
    }

    /// Link bindings in document order.
    pub fn links(&self) -> &[NavLinkBinding] {
        &self.links
    }

    /// Id of the section last matched.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Probe position for `scroll_y`.
    pub fn probe(&self, scroll_y: f64, header_height: Option<f64>) -> f64 {
        scroll_y + header_height.unwrap_or(self.fallback_header_height) + self.lookahead
    }

    /// Id of the last section whose span contains `position`.
    pub fn section_at<D: DomQuery + ?Sized>(&self, dom: &D, position: f64) -> Option<String> {
        self.sections
            .iter()
            .filter(|&&s| {
                let b = dom.bounds(s);
                b.y0 <= position && position < b.y0 + b.height()
            })
            .filter_map(|&s| dom.element_id(s))
            .last()
            .map(str::to_owned)
    }

    /// Recompute link flags: a link is active iff it targets the matched section.
    pub fn update<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        scroll_y: f64,
        header_height: Option<f64>,
    ) -> Option<&str> {
        let position = self.probe(scroll_y, header_height);
        let active = self.section_at(&*dom, position);
        for binding in &self.links {
            let on = binding.target.is_some() && binding.target == active;
            dom.set_flag(binding.link, flags::ACTIVE, on);
        }
        if self.active != active {
            tracing::debug!(position, section = ?active, "nav highlight changed");
        }
        self.active = active;
        self.active.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/nav.rs"]
mod tests;
