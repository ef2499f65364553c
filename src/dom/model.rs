use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::dom::host::{DomQuery, ElementSpec};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;

/// JSON description of a laid-out page: element tree, computed backgrounds, boxes and the
/// initial viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageModel {
    /// Initial viewport.
    pub viewport: ViewportDef,
    /// Document element.
    pub root: NodeDef,
}

/// Viewport size and initial scroll offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportDef {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Initial scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
}

/// One element of a [`PageModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    /// Tag name.
    pub tag: String,
    /// `id` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Classes, as an array or a space-separated string.
    #[serde(default)]
    pub class: ClassesDef,
    /// Other attributes (`href`, `type`, `data-*`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    /// Computed `background-color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Layout box in document coordinates.
    #[serde(default)]
    pub bounds: BoundsDef,
    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

/// Class list accepting `"a b"` or `["a", "b"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassesDef(pub Vec<String>);

impl<'de> Deserialize<'de> for ClassesDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Arr(Vec<String>),
        }

        let v = match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.split_whitespace().map(str::to_owned).collect(),
            Repr::Arr(v) => v,
        };
        Ok(Self(v))
    }
}

/// Layout box accepting `[x, y, width, height]` or `{ "x", "y", "width", "height" }` (`top` is an
/// alias for `y`); omitted fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoundsDef {
    /// Left edge.
    pub x: f64,
    /// Top edge (`offsetTop`).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height (`offsetHeight`).
    pub height: f64,
}

impl BoundsDef {
    /// Convert to a document-space rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl<'de> Deserialize<'de> for BoundsDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Obj {
            #[serde(default)]
            x: f64,
            #[serde(default, alias = "top")]
            y: f64,
            #[serde(default)]
            width: f64,
            #[serde(default)]
            height: f64,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 4]),
            Obj(Obj),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, width, height]) => Ok(Self {
                x,
                y,
                width,
                height,
            }),
            Repr::Obj(o) => Ok(Self {
                x: o.x,
                y: o.y,
                width: o.width,
                height: o.height,
            }),
        }
    }
}

impl PageModel {
    /// Read a page model from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GlassResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            GlassError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json(&s)
    }

    /// Parse a page model from a JSON string.
    pub fn from_json(s: &str) -> GlassResult<Self> {
        serde_json::from_str(s).map_err(|e| GlassError::serde(e.to_string()))
    }

    /// Check tags, geometry, viewport and `id` uniqueness (ids come only from the `id` field).
    pub fn validate(&self) -> GlassResult<()> {
        let vp = Viewport {
            scroll_y: self.viewport.scroll_y,
            width: self.viewport.width,
            height: self.viewport.height,
        };
        vp.validate()?;

        let mut ids = BTreeSet::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.tag.trim().is_empty() {
                return Err(GlassError::page("element tag must be non-empty"));
            }
            let b = node.bounds;
            if ![b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite()) {
                return Err(GlassError::page(format!(
                    "<{}> bounds must be finite",
                    node.tag
                )));
            }
            if b.width < 0.0 || b.height < 0.0 {
                return Err(GlassError::page(format!(
                    "<{}> bounds must have non-negative size",
                    node.tag
                )));
            }
            if node.attrs.keys().any(|k| k.eq_ignore_ascii_case("id")) {
                return Err(GlassError::page(format!(
                    "<{}> sets \"id\" through attrs; use the id field",
                    node.tag
                )));
            }
            if let Some(id) = &node.id {
                if id.is_empty() {
                    return Err(GlassError::page("element id must be non-empty"));
                }
                if !ids.insert(id.as_str()) {
                    return Err(GlassError::page(format!("duplicate element id \"{id}\"")));
                }
            }
            stack.extend(node.children.iter().rev());
        }
        Ok(())
    }

    /// The initial viewport.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.viewport.scroll_y,
            width: self.viewport.width,
            height: self.viewport.height,
        }
    }

    /// Validate and build an arena [`Document`].
    pub fn build(&self) -> GlassResult<Document> {
        self.validate()?;
        let mut doc = Document::new(self.root.to_spec());
        let root = doc.root();
        let mut stack: Vec<(NodeId, &NodeDef)> =
            self.root.children.iter().rev().map(|c| (root, c)).collect();
        while let Some((parent, def)) = stack.pop() {
            let id = doc.append(parent, def.to_spec())?;
            stack.extend(def.children.iter().rev().map(|c| (id, c)));
        }
        Ok(doc)
    }
}

impl NodeDef {
    fn to_spec(&self) -> ElementSpec {
        let mut spec = ElementSpec::new(self.tag.trim());
        if let Some(id) = &self.id {
            spec = spec.with_id(id.clone());
        }
        for (k, v) in &self.attrs {
            spec = spec.with_attr(k.to_ascii_lowercase(), v.clone());
        }
        spec.flags = self.class.0.clone();
        spec.background = self.background.clone();
        spec.bounds = self.bounds.to_rect();
        spec
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/model.rs"]
mod tests;
