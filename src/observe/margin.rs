use std::fmt;

use crate::foundation::core::Rect;
use crate::foundation::error::{GlassError, GlassResult};

/// A margin length: absolute pixels or a percentage of the root box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// CSS pixels.
    Px(f64),
    /// Percent of the root height (top/bottom) or width (left/right).
    Percent(f64),
}

impl Length {
    /// Resolve against the root dimension on the same axis.
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => basis * p / 100.0,
        }
    }

    fn parse(s: &str) -> GlassResult<Self> {
        let bad = || GlassError::validation(format!("invalid margin length \"{s}\""));
        let (num, percent) = if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else {
            (s, false)
        };
        let v: f64 = num.parse().map_err(|_| bad())?;
        if !v.is_finite() {
            return Err(bad());
        }
        // Unitless lengths are only valid for zero.
        if num.len() == s.len() && v != 0.0 {
            return Err(bad());
        }
        Ok(if percent { Self::Percent(v) } else { Self::Px(v) })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// `rootMargin` of an intersection observer, in CSS shorthand order.
///
/// Positive values grow the root box, negative values shrink it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    /// Top edge.
    pub top: Length,
    /// Right edge.
    pub right: Length,
    /// Bottom edge.
    pub bottom: Length,
    /// Left edge.
    pub left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl RootMargin {
    /// No margin.
    pub const ZERO: Self = Self {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Parse CSS margin shorthand with one to four lengths (`"-10% 0px -10% 0px"`).
    pub fn parse(s: &str) -> GlassResult<Self> {
        let parts = s
            .split_whitespace()
            .map(Length::parse)
            .collect::<GlassResult<Vec<_>>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(GlassError::validation(format!(
                    "root margin \"{s}\" must have 1 to 4 lengths"
                )));
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Apply the margin to `root`; an over-shrunk box collapses to zero size.
    pub fn apply(&self, root: Rect) -> Rect {
        let w = root.width();
        let h = root.height();
        let x0 = root.x0 - self.left.resolve(w);
        let y0 = root.y0 - self.top.resolve(h);
        let x1 = (root.x1 + self.right.resolve(w)).max(x0);
        let y1 = (root.y1 + self.bottom.resolve(h)).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = GlassError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RootMargin> for String {
    fn from(m: RootMargin) -> Self {
        m.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/margin.rs"]
mod tests;
