//! Page behavior configuration.
//!
//! Every field has a default matching the stock landing page, so an empty JSON object is a valid
//! configuration. Selectors are kept as strings here and parsed by [`PageConfig::validate`] and
//! at session construction.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::dom::selector::SelectorList;
use crate::foundation::error::{GlassError, GlassResult};
use crate::observe::intersection::ObserverConfig;
use crate::observe::margin::{Length, RootMargin};

/// Root configuration object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Header theme and scrolled flag.
    pub header: HeaderConfig,
    /// Section activation tracking.
    pub sections: SectionConfig,
    /// Fade-in revealing; the selector also tags stagger targets inside sections.
    pub reveal: RevealConfig,
    /// Navigation highlighting.
    pub nav: NavConfig,
    /// Mobile menu.
    pub menu: MenuConfig,
    /// Contact form.
    pub form: FormConfig,
    /// Padlock particles.
    pub padlocks: PadlockConfig,
    /// Extra click-to-scroll bindings.
    pub scroll_links: Vec<ScrollLinkDef>,
}

/// Header theme controller settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// The fixed header element.
    pub selector: String,
    /// Sections considered for the header theme.
    pub sections: String,
    /// Fallback section when no section lies under the header.
    pub hero: String,
    /// Brightness below which a background is dark.
    pub dark_threshold: f64,
    /// Scroll offset beyond which the header carries the `scrolled` flag.
    pub scrolled_offset: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".glass-header".to_string(),
            sections: "main > section".to_string(),
            hero: ".hero".to_string(),
            dark_threshold: 128.0,
            scrolled_offset: 50.0,
        }
    }
}

/// Section activation tracker settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionConfig {
    /// Tracked sections.
    pub selector: String,
    /// Visible fraction needed to enter.
    pub threshold: f64,
    /// Viewport adjustment.
    pub root_margin: RootMargin,
    /// Delay between consecutive reveal children.
    pub stagger_ms: u64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            selector: ".section-transition".to_string(),
            threshold: 0.3,
            root_margin: RootMargin {
                top: Length::Percent(-10.0),
                bottom: Length::Percent(-10.0),
                ..RootMargin::ZERO
            },
            stagger_ms: 100,
        }
    }
}

impl SectionConfig {
    /// Observer settings derived from this config.
    pub fn observer(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.threshold,
            root_margin: self.root_margin,
        }
    }
}

/// Fade-in revealer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Reveal-tagged elements.
    pub selector: String,
    /// Visible fraction needed to reveal.
    pub threshold: f64,
    /// Viewport adjustment.
    pub root_margin: RootMargin,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".fade-in-up, .fade-in-left, .fade-in-right".to_string(),
            threshold: 0.1,
            root_margin: RootMargin {
                bottom: Length::Px(-50.0),
                ..RootMargin::ZERO
            },
        }
    }
}

impl RevealConfig {
    /// Observer settings derived from this config.
    pub fn observer(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.threshold,
            root_margin: self.root_margin,
        }
    }
}

/// Navigation highlighter settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Sections that can be highlighted.
    pub sections: String,
    /// Navigation links.
    pub links: String,
    /// Distance below the header bottom used as the probe position.
    pub lookahead: f64,
    /// Header height assumed when the page has no header.
    pub fallback_header_height: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sections: "section[id]".to_string(),
            links: ".nav-link".to_string(),
            lookahead: 50.0,
            fallback_header_height: 80.0,
        }
    }
}

/// Mobile menu settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Hamburger button.
    pub toggle: String,
    /// Slide-in panel.
    pub panel: String,
    /// Dimming overlay.
    pub overlay: String,
    /// Element whose scrolling is locked while the menu is open.
    pub body: String,
    /// Viewport width above which the menu closes itself.
    pub breakpoint: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle: ".hamburger-menu".to_string(),
            panel: ".mobile-nav".to_string(),
            overlay: ".mobile-nav-overlay".to_string(),
            body: "body".to_string(),
            breakpoint: 768.0,
        }
    }
}

/// Contact form settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// The form element.
    pub selector: String,
    /// Submit button, searched inside the form.
    pub submit: String,
    /// Simulated network latency.
    pub send_delay_ms: u64,
    /// Lifetime of the success message.
    pub success_ttl_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: "#contactForm".to_string(),
            submit: "button[type=\"submit\"]".to_string(),
            send_delay_ms: 1500,
            success_ttl_ms: 5000,
        }
    }
}

/// Padlock rain settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PadlockConfig {
    /// Section whose visibility triggers the effect.
    pub section: String,
    /// Particle container, searched inside the section.
    pub container: String,
    /// Particles per burst.
    pub count: usize,
    /// Visible fraction needed to trigger.
    pub threshold: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for PadlockConfig {
    fn default() -> Self {
        Self {
            section: ".animated-section".to_string(),
            container: ".padlock-animation".to_string(),
            count: 15,
            threshold: 0.5,
            seed: 0x9E37_79B9,
        }
    }
}

impl PadlockConfig {
    /// Observer settings derived from this config.
    pub fn observer(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.threshold,
            root_margin: RootMargin::ZERO,
        }
    }
}

/// Clicking an element matching `selector` scrolls to the element matching `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollLinkDef {
    /// Clickable elements.
    pub selector: String,
    /// Scroll destination.
    pub target: String,
}

impl ScrollLinkDef {
    fn new(selector: &str, target: &str) -> Self {
        Self {
            selector: selector.to_string(),
            target: target.to_string(),
        }
    }
}

impl PageConfig {
    /// Stock configuration including the landing page's call-to-action buttons.
    pub fn landing() -> Self {
        Self {
            scroll_links: vec![
                ScrollLinkDef::new(".contact-btn", "#contato"),
                ScrollLinkDef::new(".hero-cta", "#servicos"),
                ScrollLinkDef::new(".services-btn", "#contato"),
            ],
            ..Self::default()
        }
    }

    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> GlassResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&s)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(s: &str) -> GlassResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| GlassError::serde(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check selectors, thresholds and lengths.
    pub fn validate(&self) -> GlassResult<()> {
        for (field, sel) in self.selectors() {
            SelectorList::parse(sel)
                .map_err(|e| GlassError::validation(format!("{field}: {e}")))?;
        }
        self.sections.observer().validate()?;
        self.reveal.observer().validate()?;
        self.padlocks.observer().validate()?;
        let lengths = [
            ("header.dark_threshold", self.header.dark_threshold),
            ("header.scrolled_offset", self.header.scrolled_offset),
            ("nav.lookahead", self.nav.lookahead),
            ("nav.fallback_header_height", self.nav.fallback_header_height),
            ("menu.breakpoint", self.menu.breakpoint),
        ];
        for (field, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(GlassError::validation(format!(
                    "{field} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    fn selectors(&self) -> Vec<(String, &str)> {
        let mut out = vec![
            ("header.selector".to_string(), self.header.selector.as_str()),
            ("header.sections".to_string(), self.header.sections.as_str()),
            ("header.hero".to_string(), self.header.hero.as_str()),
            ("sections.selector".to_string(), self.sections.selector.as_str()),
            ("reveal.selector".to_string(), self.reveal.selector.as_str()),
            ("nav.sections".to_string(), self.nav.sections.as_str()),
            ("nav.links".to_string(), self.nav.links.as_str()),
            ("menu.toggle".to_string(), self.menu.toggle.as_str()),
            ("menu.panel".to_string(), self.menu.panel.as_str()),
            ("menu.overlay".to_string(), self.menu.overlay.as_str()),
            ("menu.body".to_string(), self.menu.body.as_str()),
            ("form.selector".to_string(), self.form.selector.as_str()),
            ("form.submit".to_string(), self.form.submit.as_str()),
            ("padlocks.section".to_string(), self.padlocks.section.as_str()),
            ("padlocks.container".to_string(), self.padlocks.container.as_str()),
        ];
        for (i, link) in self.scroll_links.iter().enumerate() {
            out.push((format!("scroll_links[{i}].selector"), link.selector.as_str()));
            out.push((format!("scroll_links[{i}].target"), link.target.as_str()));
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
