use std::str::FromStr;

use crate::foundation::error::GlassError;

/// Opaque sRGB triple on the 0–255 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A computed `background-color` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssColor {
    /// `transparent`, or any color with zero alpha.
    Transparent,
    /// A color with non-zero alpha in `(0, 1]`.
    Rgba {
        /// Color channels.
        rgb: Rgb8,
        /// Alpha in `(0, 1]`.
        alpha: f64,
    },
}

impl CssColor {
    /// Parse a computed color string.
    ///
    /// Accepts `transparent`, `black`, `white`, `rgb()`/`rgba()` in comma or space syntax, and
    /// 3/4/6/8 digit hex.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "" => return Err("empty color".to_owned()),
            "transparent" => return Ok(Self::Transparent),
            "black" => return Ok(Self::opaque(Rgb8::new(0, 0, 0))),
            "white" => return Ok(Self::opaque(Rgb8::new(255, 255, 255))),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }

        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("unsupported color \"{s}\""))?;
        parse_rgb_function(body)
    }

    fn opaque(rgb: Rgb8) -> Self {
        Self::Rgba { rgb, alpha: 1.0 }
    }

    fn with_alpha(rgb: Rgb8, alpha: f64) -> Self {
        if alpha <= 0.0 {
            Self::Transparent
        } else {
            Self::Rgba {
                rgb,
                alpha: alpha.min(1.0),
            }
        }
    }

    /// `true` for `transparent` and fully transparent colors.
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Color channels, if the color is visible at all.
    pub fn rgb(self) -> Option<Rgb8> {
        match self {
            Self::Transparent => None,
            Self::Rgba { rgb, .. } => Some(rgb),
        }
    }
}

impl FromStr for CssColor {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(GlassError::validation)
    }
}

fn parse_rgb_function(body: &str) -> Result<CssColor, String> {
    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let (r, g, b, alpha) = match parts.as_slice() {
        [r, g, b] => (*r, *g, *b, None),
        [r, g, b, a] => (*r, *g, *b, Some(*a)),
        _ => {
            return Err(format!(
                "rgb() expects 3 or 4 components, got {}",
                parts.len()
            ));
        }
    };

    let rgb = Rgb8::new(channel(r)?, channel(g)?, channel(b)?);
    let alpha = match alpha {
        Some(a) => alpha_value(a)?,
        None => 1.0,
    };
    Ok(CssColor::with_alpha(rgb, alpha))
}

fn channel(s: &str) -> Result<u8, String> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        number(pct)? * 255.0 / 100.0
    } else {
        number(s)?
    };
    Ok(v.round().clamp(0.0, 255.0) as u8)
}

fn alpha_value(s: &str) -> Result<f64, String> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        number(pct)? / 100.0
    } else {
        number(s)?
    };
    Ok(v.clamp(0.0, 1.0))
}

fn number(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("invalid color component \"{s}\""))?;
    if !v.is_finite() {
        return Err(format!("invalid color component \"{s}\""));
    }
    Ok(v)
}

fn parse_hex(s: &str) -> Result<CssColor, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    // from_str_radix accepts a leading sign.
    if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit \"{bad}\""));
    }

    let (r, g, b, a) = match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            (r, g, b, a)
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(CssColor::with_alpha(
        Rgb8::new(r, g, b),
        f64::from(a) / 255.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
