//! Header contrast switching.

use crate::config::HeaderConfig;
use crate::dom::host::{DomQuery, StateFlags};
use crate::foundation::ids::NodeId;
use crate::style::brightness::{Tone, sample_brightness};
use crate::ui::flags;

/// Header appearance over the section beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderTheme {
    /// Light text over a dark background.
    OnDark,
    /// Dark text over a light background.
    OnLight,
}

impl HeaderTheme {
    /// Theme for a background tone.
    pub fn for_tone(tone: Tone) -> Self {
        match tone {
            Tone::Dark => Self::OnDark,
            Tone::Light => Self::OnLight,
        }
    }

    /// State flag carried by the header.
    pub fn flag(self) -> &'static str {
        match self {
            Self::OnDark => flags::HEADER_ON_DARK,
            Self::OnLight => flags::HEADER_ON_LIGHT,
        }
    }

    fn other(self) -> Self {
        match self {
            Self::OnDark => Self::OnLight,
            Self::OnLight => Self::OnDark,
        }
    }
}

/// Picks the header theme from the brightness of the section under the header.
#[derive(Clone, Debug)]
pub struct HeaderThemeController {
    header: Option<NodeId>,
    sections: Vec<NodeId>,
    hero: Option<NodeId>,
    dark_threshold: f64,
    scrolled_offset: f64,
    theme: Option<HeaderTheme>,
}

impl HeaderThemeController {
    /// Controller over pre-resolved nodes; `header == None` disables it.
    pub fn new(
        header: Option<NodeId>,
        sections: Vec<NodeId>,
        hero: Option<NodeId>,
        config: &HeaderConfig,
    ) -> Self {
        Self {
            header,
            sections,
            hero,
            dark_threshold: config.dark_threshold,
            scrolled_offset: config.scrolled_offset,
            theme: None,
        }
    }

    /// Last applied theme.
    pub fn theme(&self) -> Option<HeaderTheme> {
        self.theme
    }

    /// Header element, if the page has one.
    pub fn header(&self) -> Option<NodeId> {
        self.header
    }

    /// Rendered header height, `None` without a header.
    pub fn header_height<D: DomQuery + ?Sized>(&self, dom: &D) -> Option<f64> {
        self.header.map(|h| dom.bounds(h).height())
    }

    /// Last section in document order whose header-adjusted span contains `scroll_y`.
    pub fn section_under_header<D: DomQuery + ?Sized>(
        &self,
        dom: &D,
        scroll_y: f64,
    ) -> Option<NodeId> {
        let header_height = self.header_height(dom)?;
        self.sections
            .iter()
            .copied()
            .filter(|&s| {
                let b = dom.bounds(s);
                let top = b.y0 - header_height;
                top <= scroll_y && scroll_y < top + b.height()
            })
            .last()
    }

    /// Recompute the theme and the scrolled flag for `scroll_y`.
    pub fn update<D: DomQuery + StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        scroll_y: f64,
    ) -> Option<HeaderTheme> {
        let header = self.header?;
        dom.set_flag(header, flags::SCROLLED, scroll_y > self.scrolled_offset);

        let Some(sample) = self.section_under_header(&*dom, scroll_y).or(self.hero) else {
            tracing::debug!(scroll_y, "no section under header and no hero; theme kept");
            return self.theme;
        };
        let brightness = sample_brightness(&*dom, sample);
        let theme = HeaderTheme::for_tone(Tone::classify_with(brightness, self.dark_threshold));
        dom.remove_flag(header, theme.other().flag());
        dom.add_flag(header, theme.flag());
        if self.theme != Some(theme) {
            tracing::debug!(
                section = %dom.label(sample),
                brightness,
                ?theme,
                "header theme changed"
            );
        }
        self.theme = Some(theme);
        self.theme
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/header.rs"]
mod tests;
