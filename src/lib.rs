//! glasspane is a headless coordinator for the scroll-driven behavior of a landing page.
//!
//! A host supplies an element tree with geometry and computed backgrounds, plus a way to toggle
//! named state flags (classes) on elements. A [`PageSession`] reacts to scroll, resize, click,
//! submit and clock events and keeps those flags consistent:
//!
//! - the header switches between `header-on-dark` and `header-on-light` depending on the
//!   brightness of the section beneath it
//! - sections become `active` (for good) and `highlighted` (one at a time) as they scroll into
//!   view, revealing their children in a staggered cascade
//! - tagged elements fade in once, the nav link of the current section is marked, and the mobile
//!   menu, contact form and padlock decoration behave as on the live page
//!
//! The bundled arena [`Document`] implements every host capability and loads from a JSON
//! [`PageModel`]; interaction [`Script`]s replay against it deterministically on a virtual clock.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod config;
pub(crate) mod dom;
pub(crate) mod motion;
pub(crate) mod observe;
pub(crate) mod script;
pub(crate) mod session;
pub(crate) mod style;
pub(crate) mod ui;

pub use crate::foundation::core::{Millis, Point, Rect, Size, Viewport};
pub use crate::foundation::error::{GlassError, GlassResult};
pub use crate::foundation::ids::NodeId;

pub use crate::config::{
    FormConfig, HeaderConfig, MenuConfig, NavConfig, PadlockConfig, PageConfig, RevealConfig,
    ScrollLinkDef, SectionConfig,
};
pub use crate::dom::document::Document;
pub use crate::dom::host::{DomQuery, ElementSpec, Host, StateFlags, TreeEdit};
pub use crate::dom::model::{BoundsDef, ClassesDef, NodeDef, PageModel, ViewportDef};
pub use crate::dom::selector::SelectorList;
pub use crate::motion::particles::{Particle, ParticleRanges};
pub use crate::motion::timers::{TimerId, TimerQueue};
pub use crate::observe::intersection::{
    IntersectionEntry, IntersectionObserver, ObserverConfig, intersection,
};
pub use crate::observe::margin::{Length, RootMargin};
pub use crate::script::{Script, Step, StepReport};
pub use crate::session::{ClickReport, PageSession, SessionSnapshot};
pub use crate::style::brightness::{
    DARK_THRESHOLD, FALLBACK_BRIGHTNESS, Tone, sample_brightness, yiq_brightness,
};
pub use crate::style::color::{CssColor, Rgb8};
pub use crate::ui::form::{
    ContactFields, ContactForm, FieldError, FormMessage, FormPhase, MessageKind, SUCCESS_TEXT,
    SubmitOutcome,
};
pub use crate::ui::header::{HeaderTheme, HeaderThemeController};
pub use crate::ui::menu::{MenuClick, MobileMenu};
pub use crate::ui::nav::{NavLinkBinding, NavigationHighlighter};
pub use crate::ui::padlock::PadlockRain;
pub use crate::ui::reveal::FadeInRevealer;
pub use crate::ui::scroll::{SCROLL_TO_ATTR, ScrollNavigator, ScrollTarget, clamp_scroll};
pub use crate::ui::sections::SectionActivationTracker;
pub use crate::ui::{Deferred, flags};
