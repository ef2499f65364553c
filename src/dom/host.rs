//! Host capabilities consumed by the controllers.
//!
//! A host is anything that can answer structural and geometric questions about a page and toggle
//! named state flags on its elements. The bundled [`Document`](crate::Document) is one host; a
//! browser binding or a test fake is another.

use std::collections::BTreeMap;

use crate::dom::selector::SelectorList;
use crate::foundation::core::Rect;
use crate::foundation::ids::NodeId;

/// Read access to the element tree, computed style and layout.
pub trait DomQuery {
    /// The document element.
    fn root(&self) -> NodeId;

    /// Parent element, `None` for the root and for unknown nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child elements in document order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Lowercase tag name.
    fn tag(&self, node: NodeId) -> &str;

    /// Attribute value by name.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Computed `background-color`, `None` when the host has no value (treated as transparent).
    fn background_color(&self, node: NodeId) -> Option<&str>;

    /// Layout box in document coordinates (`offsetTop`/`offsetHeight` live on the y axis).
    fn bounds(&self, node: NodeId) -> Rect;

    /// Whether a named state flag (class) is set.
    fn has_flag(&self, node: NodeId, flag: &str) -> bool;

    /// The `id` attribute.
    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// All elements under the root (root included) matching `selector`, in document order.
    fn query_all(&self, selector: &SelectorList) -> Vec<NodeId> {
        let root = self.root();
        let mut out = Vec::new();
        if selector.matches(self, root) {
            out.push(root);
        }
        out.extend(self.query_within(root, selector));
        out
    }

    /// First match of [`DomQuery::query_all`].
    fn query_first(&self, selector: &SelectorList) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Descendants of `scope` (scope excluded) matching `selector`, in document order.
    fn query_within(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if selector.matches(self, node) {
                out.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Inclusive containment, like `Node.contains`.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` matching `selector`, like `Element.closest`.
    fn closest(&self, node: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if selector.matches(self, n) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }

    /// Short human-readable label (`section#about`, `div@12`) for logs and reports.
    fn label(&self, node: NodeId) -> String {
        let tag = self.tag(node);
        match self.element_id(node) {
            Some(id) => format!("{tag}#{id}"),
            None => format!("{tag}@{}", node.0),
        }
    }
}

/// Named boolean state per element (the `classList` of a browser host).
pub trait StateFlags {
    /// Set or clear `flag` on `node`.
    fn set_flag(&mut self, node: NodeId, flag: &str, on: bool);

    /// Set `flag` on `node`.
    fn add_flag(&mut self, node: NodeId, flag: &str) {
        self.set_flag(node, flag, true);
    }

    /// Clear `flag` on `node`.
    fn remove_flag(&mut self, node: NodeId, flag: &str) {
        self.set_flag(node, flag, false);
    }
}

/// A new element to be created by a [`TreeEdit`] host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementSpec {
    /// Lowercase tag name.
    pub tag: String,
    /// Initial state flags (classes).
    pub flags: Vec<String>,
    /// Attributes, `id` included.
    pub attributes: BTreeMap<String, String>,
    /// Computed background color, if any.
    pub background: Option<String>,
    /// Layout box in document coordinates.
    pub bounds: Rect,
}

impl ElementSpec {
    /// An element with no flags, attributes, background or size.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Add a state flag (class).
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the computed background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Set the layout box.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Structural mutation used by decorative effects.
pub trait TreeEdit {
    /// Detach every child of `parent` and append freshly created elements in order.
    fn replace_children(&mut self, parent: NodeId, children: Vec<ElementSpec>) -> Vec<NodeId>;
}

/// Everything a [`PageSession`](crate::PageSession) needs from its host.
pub trait Host: DomQuery + StateFlags + TreeEdit {}

impl<T: DomQuery + StateFlags + TreeEdit> Host for T {}
