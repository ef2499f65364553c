use crate::dom::host::DomQuery;
use crate::foundation::ids::NodeId;
use crate::style::color::{CssColor, Rgb8};

/// Brightness below this value classifies as dark.
pub const DARK_THRESHOLD: f64 = 128.0;

/// Brightness assumed when no color can be resolved.
pub const FALLBACK_BRIGHTNESS: f64 = 255.0;

// Bounds the ancestor walk for hosts with a malformed parent chain.
const MAX_ANCESTOR_DEPTH: usize = 4096;

/// Binary contrast classification of a background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Brightness below the threshold.
    Dark,
    /// Brightness at or above the threshold.
    Light,
}

impl Tone {
    /// Classify `brightness` against [`DARK_THRESHOLD`].
    pub fn classify(brightness: f64) -> Self {
        Self::classify_with(brightness, DARK_THRESHOLD)
    }

    /// Classify `brightness` against a custom threshold.
    pub fn classify_with(brightness: f64, threshold: f64) -> Self {
        if brightness < threshold {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// YIQ perceived brightness on the 0–255 scale: `(299 R + 587 G + 114 B) / 1000`.
pub fn yiq_brightness(rgb: Rgb8) -> f64 {
    let sum = 299 * u32::from(rgb.r) + 587 * u32::from(rgb.g) + 114 * u32::from(rgb.b);
    f64::from(sum) / 1000.0
}

/// Perceived brightness of the effective background of `node`.
///
/// Transparent (or absent) backgrounds defer to the parent. Reaching past the root, or meeting a
/// color that does not parse, yields [`FALLBACK_BRIGHTNESS`].
pub fn sample_brightness<D: DomQuery + ?Sized>(dom: &D, node: NodeId) -> f64 {
    let mut cur = Some(node);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let Some(n) = cur else {
            break;
        };
        let Some(raw) = dom.background_color(n) else {
            cur = dom.parent(n);
            continue;
        };
        match CssColor::parse(raw) {
            Ok(color) => match color.rgb() {
                Some(rgb) => return yiq_brightness(rgb),
                None => cur = dom.parent(n),
            },
            Err(e) => {
                tracing::debug!(node = n.0, color = raw, error = %e, "unreadable background");
                return FALLBACK_BRIGHTNESS;
            }
        }
    }
    FALLBACK_BRIGHTNESS
}

#[cfg(test)]
#[path = "../../tests/unit/style/brightness.rs"]
mod tests;
