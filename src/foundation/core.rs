use crate::foundation::error::{GlassError, GlassResult};

pub use kurbo::{Point, Rect, Size};

/// Milliseconds on a session's virtual clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// The origin of the virtual clock.
    pub const ZERO: Self = Self(0);

    /// Add two durations using saturating arithmetic.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a step count using saturating arithmetic.
    pub fn times(self, n: u64) -> Self {
        Self(self.0.saturating_mul(n))
    }
}

impl std::ops::Add for Millis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

/// Visible area of the page in CSS pixels.
///
/// `scroll_y` is the document-space offset of the top edge (`window.scrollY`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset.
    pub scroll_y: f64,
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport scrolled to the top.
    pub fn new(width: f64, height: f64) -> GlassResult<Self> {
        let vp = Self {
            scroll_y: 0.0,
            width,
            height,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// Width and height must be finite and non-negative; the offset must be finite.
    pub fn validate(&self) -> GlassResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(GlassError::validation(
                "viewport width must be finite and >= 0",
            ));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(GlassError::validation(
                "viewport height must be finite and >= 0",
            ));
        }
        if !self.scroll_y.is_finite() {
            return Err(GlassError::validation("viewport scroll_y must be finite"));
        }
        Ok(())
    }

    /// Same viewport scrolled to `scroll_y`.
    pub fn with_scroll(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }

    /// The visible area in document coordinates.
    pub fn visible_rect(self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
