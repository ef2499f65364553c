//! Mobile navigation drawer.

use crate::config::MenuConfig;
use crate::dom::host::{DomQuery, StateFlags};
use crate::dom::selector::SelectorList;
use crate::foundation::error::GlassResult;
use crate::foundation::ids::NodeId;
use crate::ui::flags;

/// How a click was handled by the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuClick {
    /// The hamburger flipped the menu state.
    Toggled,
    /// Click on the dimming overlay closed the menu.
    ClosedByOverlay,
    /// Click on a link inside the panel closed the menu.
    ClosedByLink,
    /// Click outside the panel closed the menu.
    ClosedOutside,
    /// The click did not concern the menu.
    Ignored,
}

/// Hamburger-driven drawer with overlay and body scroll lock.
#[derive(Clone, Debug)]
pub struct MobileMenu {
    toggle: NodeId,
    panel: NodeId,
    overlay: Option<NodeId>,
    body: Option<NodeId>,
    links: SelectorList,
    breakpoint: f64,
    open: bool,
}

impl MobileMenu {
    /// Menu over resolved nodes; `None` when the toggle or the panel is missing.
    pub fn new(
        toggle: Option<NodeId>,
        panel: Option<NodeId>,
        overlay: Option<NodeId>,
        body: Option<NodeId>,
        config: &MenuConfig,
    ) -> GlassResult<Option<Self>> {
        let (Some(toggle), Some(panel)) = (toggle, panel) else {
            return Ok(None);
        };
        Ok(Some(Self {
            toggle,
            panel,
            overlay,
            body,
            links: SelectorList::parse("a")?,
            breakpoint: config.breakpoint,
            open: false,
        }))
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the drawer, updating every part.
    pub fn set_open<D: StateFlags + ?Sized>(&mut self, dom: &mut D, open: bool) {
        for node in [Some(self.toggle), Some(self.panel), self.overlay]
            .into_iter()
            .flatten()
        {
            dom.set_flag(node, flags::OPEN, open);
        }
        if let Some(body) = self.body {
            dom.set_flag(body, flags::SCROLL_LOCKED, open);
        }
        if self.open != open {
            tracing::debug!(open, "mobile menu");
        }
        self.open = open;
    }

    /// Close the drawer if it is open.
    pub fn close<D: StateFlags + ?Sized>(&mut self, dom: &mut D) -> bool {
        if !self.open {
            return false;
        }
        self.set_open(dom, false);
        true
    }

    /// Route a click on `clicked`.
    pub fn on_click<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        clicked: NodeId,
    ) -> MenuClick {
        if dom.contains(self.toggle, clicked) {
            let open = !self.open;
            self.set_open(dom, open);
            return MenuClick::Toggled;
        }
        if let Some(overlay) = self.overlay
            && dom.contains(overlay, clicked)
        {
            return if self.close(dom) {
                MenuClick::ClosedByOverlay
            } else {
                MenuClick::Ignored
            };
        }
        if dom.contains(self.panel, clicked) {
            let on_link = dom
                .closest(clicked, &self.links)
                .is_some_and(|link| dom.contains(self.panel, link));
            return if on_link && self.close(dom) {
                MenuClick::ClosedByLink
            } else {
                MenuClick::Ignored
            };
        }
        if self.close(dom) {
            MenuClick::ClosedOutside
        } else {
            MenuClick::Ignored
        }
    }

    /// Close the drawer when the viewport grows past the mobile breakpoint.
    pub fn on_resize<D: StateFlags + ?Sized>(&mut self, dom: &mut D, width: f64) -> bool {
        width > self.breakpoint && self.close(dom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/menu.rs"]
mod tests;
