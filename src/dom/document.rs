//! Arena-backed in-memory document.

use std::collections::{BTreeMap, BTreeSet};

use crate::dom::host::{DomQuery, ElementSpec, StateFlags, TreeEdit};
use crate::foundation::core::Rect;
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;

#[derive(Clone, Debug)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    flags: BTreeSet<String>,
    background: Option<String>,
    bounds: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn from_spec(spec: ElementSpec, parent: Option<NodeId>) -> Self {
        Self {
            tag: spec.tag.to_ascii_lowercase(),
            attributes: spec.attributes,
            flags: spec.flags.into_iter().collect(),
            background: spec.background,
            bounds: spec.bounds,
            parent,
            children: Vec::new(),
        }
    }
}

/// In-memory element tree implementing every host capability.
///
/// Nodes live in a flat arena addressed by [`NodeId`]. Subtrees dropped by
/// [`TreeEdit::replace_children`] are freed and their slots reused by later appends, so a stale
/// id may come back naming a different element.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Option<NodeData>>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Document {
    /// Create a document whose root element is built from `root`.
    pub fn new(root: ElementSpec) -> Self {
        Self {
            nodes: vec![Some(NodeData::from_spec(root, None))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> GlassResult<NodeId> {
        if self.node(parent).is_none() {
            return Err(GlassError::page(format!("unknown parent node {}", parent.0)));
        }
        let data = NodeData::from_spec(spec, Some(parent));
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Some(data);
                id
            }
            None => {
                let id = NodeId(
                    u32::try_from(self.nodes.len())
                        .map_err(|_| GlassError::page("document exceeds u32::MAX nodes"))?,
                );
                self.nodes.push(Some(data));
                id
            }
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Number of arena slots, free ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of live elements.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Attached element with the given `id` attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root;
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|&n| self.element_id(n) == Some(id))
    }

    /// Descendants of `node` in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// State flags of `node`, sorted.
    pub fn flags(&self, node: NodeId) -> impl Iterator<Item = &str> {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.flags.iter().map(String::as_str))
    }

    /// Attached elements carrying `flag`, in document order.
    pub fn flagged(&self, flag: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&n| self.has_flag(n, flag))
            .collect()
    }

    /// Replace the layout box of `node`.
    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
        if let Some(n) = self.node_mut(node) {
            n.bounds = bounds;
        }
    }

    /// Replace the computed background color of `node`.
    pub fn set_background(&mut self, node: NodeId, color: Option<String>) {
        if let Some(n) = self.node_mut(node) {
            n.background = color;
        }
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index())?.as_mut()
    }

    /// Free `node` and everything below it.
    fn release(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(data) = self.nodes.get_mut(n.index()).and_then(Option::take) {
                stack.extend(data.children);
                self.free.push(n);
            }
        }
    }
}

impl DomQuery for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    fn tag(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attributes.get(name).map(String::as_str)
    }

    fn background_color(&self, node: NodeId) -> Option<&str> {
        self.node(node)?.background.as_deref()
    }

    fn bounds(&self, node: NodeId) -> Rect {
        self.node(node).map_or(Rect::ZERO, |n| n.bounds)
    }

    fn has_flag(&self, node: NodeId, flag: &str) -> bool {
        self.node(node).is_some_and(|n| n.flags.contains(flag))
    }
}

impl StateFlags for Document {
    fn set_flag(&mut self, node: NodeId, flag: &str, on: bool) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        if on {
            n.flags.insert(flag.to_owned());
        } else {
            n.flags.remove(flag);
        }
    }
}

impl TreeEdit for Document {
    fn replace_children(&mut self, parent: NodeId, children: Vec<ElementSpec>) -> Vec<NodeId> {
        let Some(p) = self.node_mut(parent) else {
            return Vec::new();
        };
        let old = std::mem::take(&mut p.children);
        for child in old {
            self.release(child);
        }
        children
            .into_iter()
            .filter_map(|spec| self.append(parent, spec).ok())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
