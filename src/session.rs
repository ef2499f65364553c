//! Event dispatch over a host page.

use serde::Serialize;

use crate::config::PageConfig;
use crate::dom::host::{DomQuery, Host, StateFlags};
use crate::dom::selector::SelectorList;
use crate::foundation::core::{Millis, Viewport};
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;
use crate::motion::timers::TimerQueue;
use crate::ui::form::{ContactFields, ContactForm, FormMessage, FormPhase, SubmitOutcome};
use crate::ui::header::{HeaderTheme, HeaderThemeController};
use crate::ui::menu::{MenuClick, MobileMenu};
use crate::ui::nav::NavigationHighlighter;
use crate::ui::padlock::PadlockRain;
use crate::ui::reveal::FadeInRevealer;
use crate::ui::scroll::{ScrollNavigator, clamp_scroll};
use crate::ui::sections::SectionActivationTracker;
use crate::ui::{Deferred, flags};

/// What a click did.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClickReport {
    /// Menu handling; [`MenuClick::Ignored`] when the page has no menu.
    pub menu: MenuClick,
    /// New scroll offset when the click was a scroll link.
    pub scrolled_to: Option<f64>,
}

/// Serializable view of every controller's observable state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Virtual clock.
    pub time_ms: u64,
    /// Scroll offset.
    pub scroll_y: f64,
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Header theme, `None` before the first successful sample.
    pub header_theme: Option<HeaderTheme>,
    /// Whether the header carries `scrolled`.
    pub header_scrolled: bool,
    /// Tracked section holding `highlighted`.
    pub current_section: Option<String>,
    /// Tracked sections carrying `active`.
    pub active_sections: Vec<String>,
    /// Tracked sections carrying `highlighted`.
    pub highlighted_sections: Vec<String>,
    /// Reveal elements carrying `animate`.
    pub animated: Vec<String>,
    /// Section id targeted by the active nav link.
    pub nav_section: Option<String>,
    /// Nav links carrying `active`.
    pub active_links: Vec<String>,
    /// Mobile menu state.
    pub menu_open: bool,
    /// Contact form phase, `None` without a form.
    pub form_phase: Option<FormPhase>,
    /// Contact form banner.
    pub form_message: Option<FormMessage>,
    /// Completed submissions.
    pub forms_sent: usize,
    /// Padlock bursts generated.
    pub padlock_bursts: u32,
    /// Timers still pending.
    pub pending_timers: usize,
}

/// Owns a host page, the viewport, the virtual clock and every controller.
///
/// Events are handled one at a time; each ends by running timers that became due, zero-delay
/// ones included.
#[derive(Debug)]
pub struct PageSession<D: Host> {
    dom: D,
    viewport: Viewport,
    timers: TimerQueue<Deferred>,
    header: HeaderThemeController,
    sections: SectionActivationTracker,
    reveal: FadeInRevealer,
    reveal_elements: Vec<NodeId>,
    nav: NavigationHighlighter,
    nav_links: Vec<NodeId>,
    scroll: ScrollNavigator,
    menu: Option<MobileMenu>,
    form: Option<ContactForm>,
    padlocks: Option<PadlockRain>,
    started: bool,
}

impl<D: Host> PageSession<D> {
    /// Resolve every configured element once and build the controllers.
    pub fn new(dom: D, viewport: Viewport, config: &PageConfig) -> GlassResult<Self> {
        viewport.validate()?;
        config.validate()?;
        let sel = SelectorList::parse;

        let header = HeaderThemeController::new(
            dom.query_first(&sel(&config.header.selector)?),
            dom.query_all(&sel(&config.header.sections)?),
            dom.query_first(&sel(&config.header.hero)?),
            &config.header,
        );

        let reveal_sel = sel(&config.reveal.selector)?;
        let reveal_elements = dom.query_all(&reveal_sel);
        let sections = SectionActivationTracker::new(
            dom.query_all(&sel(&config.sections.selector)?),
            reveal_sel,
            &config.sections,
        )?;
        let reveal = FadeInRevealer::new(&reveal_elements, &config.reveal)?;

        let links_sel = sel(&config.nav.links)?;
        let nav_links = dom.query_all(&links_sel);
        let nav = NavigationHighlighter::new(
            &dom,
            dom.query_all(&sel(&config.nav.sections)?),
            &nav_links,
            &config.nav,
        );
        let scroll = ScrollNavigator::new(
            links_sel,
            &config.scroll_links,
            config.nav.fallback_header_height,
        )?;

        let menu = MobileMenu::new(
            dom.query_first(&sel(&config.menu.toggle)?),
            dom.query_first(&sel(&config.menu.panel)?),
            dom.query_first(&sel(&config.menu.overlay)?),
            dom.query_first(&sel(&config.menu.body)?),
            &config.menu,
        )?;

        let form = match dom.query_first(&sel(&config.form.selector)?) {
            Some(f) => {
                let button = dom
                    .query_within(f, &sel(&config.form.submit)?)
                    .into_iter()
                    .next();
                Some(ContactForm::new(f, button, &config.form))
            }
            None => None,
        };

        let padlocks = match dom.query_first(&sel(&config.padlocks.section)?) {
            Some(section) => {
                let container = dom
                    .query_within(section, &sel(&config.padlocks.container)?)
                    .into_iter()
                    .next();
                Some(PadlockRain::new(section, container, &config.padlocks)?)
            }
            None => None,
        };

        tracing::debug!(
            header = header.header().is_some(),
            sections = sections.sections().len(),
            reveal = reveal_elements.len(),
            links = nav_links.len(),
            menu = menu.is_some(),
            form = form.is_some(),
            padlocks = padlocks.is_some(),
            "session resolved"
        );

        Ok(Self {
            dom,
            viewport,
            timers: TimerQueue::new(),
            header,
            sections,
            reveal,
            reveal_elements,
            nav,
            nav_links,
            scroll,
            menu,
            form,
            padlocks,
            started: false,
        })
    }

    /// The host page.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable host page for layout or style edits; the next scroll or resize picks them up.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Give the host page back.
    pub fn into_dom(self) -> D {
        self.dom
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// Initial pass: first section active, then a full viewport update. Runs once.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.sections.start(&mut self.dom);
        self.dispatch_viewport();
        self.run_due();
    }

    /// Scroll to `y`, clamped to the scrollable range; returns the applied offset.
    #[tracing::instrument(skip(self))]
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        self.start();
        let y = clamp_scroll(y, self.document_height(), self.viewport);
        self.viewport = self.viewport.with_scroll(y);
        self.dispatch_viewport();
        self.run_due();
        y
    }

    /// Scroll relative to the current offset.
    pub fn scroll_by(&mut self, dy: f64) -> f64 {
        self.scroll_to(self.viewport.scroll_y + dy)
    }

    /// Change the viewport size, keeping the offset within range.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: f64, height: f64) -> GlassResult<()> {
        let next = Viewport {
            width,
            height,
            ..self.viewport
        };
        next.validate()?;
        self.start();
        self.viewport = next.with_scroll(clamp_scroll(
            next.scroll_y,
            self.document_height(),
            next,
        ));
        if let Some(menu) = &mut self.menu {
            menu.on_resize(&mut self.dom, width);
        }
        self.dispatch_viewport();
        self.run_due();
        Ok(())
    }

    /// Let `ms` of virtual time pass, firing due timers in order.
    #[tracing::instrument(skip(self))]
    pub fn advance(&mut self, ms: Millis) {
        self.start();
        let deadline = self.timers.now() + ms;
        while let Some((_, deferred)) = self.timers.pop_until(deadline) {
            self.fire(deferred);
        }
        self.timers.advance_to(deadline);
    }

    /// Click on `node`: menu handling first, then scroll links.
    #[tracing::instrument(skip(self))]
    pub fn click(&mut self, node: NodeId) -> ClickReport {
        self.start();
        let menu = match &mut self.menu {
            Some(m) => m.on_click(&mut self.dom, node),
            None => MenuClick::Ignored,
        };
        let header_height = self.header.header_height(&self.dom);
        let mut scrolled_to = None;
        if let Some(target) = self.scroll.resolve(&self.dom, node, header_height) {
            if let Some(m) = &mut self.menu {
                m.close(&mut self.dom);
            }
            scrolled_to = Some(self.scroll_to(target.scroll_y));
        }
        self.run_due();
        ClickReport { menu, scrolled_to }
    }

    /// Click on the first element matching `selector`.
    pub fn click_selector(&mut self, selector: &str) -> GlassResult<ClickReport> {
        let sel = SelectorList::parse(selector)?;
        let node = self
            .dom
            .query_first(&sel)
            .ok_or_else(|| GlassError::script(format!("no element matches \"{selector}\"")))?;
        Ok(self.click(node))
    }

    /// Submit the contact form with `fields`.
    #[tracing::instrument(skip(self, fields))]
    pub fn submit(&mut self, fields: &ContactFields) -> GlassResult<SubmitOutcome> {
        self.start();
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| GlassError::form("page has no contact form"))?;
        let outcome = form.submit(&mut self.dom, fields, &mut self.timers)?;
        self.run_due();
        Ok(outcome)
    }

    /// Observable state of every controller.
    pub fn snapshot(&self) -> SessionSnapshot {
        let dom = &self.dom;
        let labels = |nodes: &[NodeId], flag: &str| -> Vec<String> {
            nodes
                .iter()
                .filter(|&&n| dom.has_flag(n, flag))
                .map(|&n| dom.label(n))
                .collect()
        };
        let header_scrolled = self
            .header
            .header()
            .is_some_and(|h| dom.has_flag(h, flags::SCROLLED));
        SessionSnapshot {
            time_ms: self.timers.now().0,
            scroll_y: self.viewport.scroll_y,
            width: self.viewport.width,
            height: self.viewport.height,
            header_theme: self.header.theme(),
            header_scrolled,
            current_section: self.sections.current().map(|n| dom.label(n)),
            active_sections: labels(self.sections.sections(), flags::ACTIVE),
            highlighted_sections: labels(self.sections.sections(), flags::HIGHLIGHTED),
            animated: labels(&self.reveal_elements, flags::ANIMATE),
            nav_section: self.nav.active_section().map(str::to_owned),
            active_links: labels(&self.nav_links, flags::ACTIVE),
            menu_open: self.menu.as_ref().is_some_and(MobileMenu::is_open),
            form_phase: self.form.as_ref().map(ContactForm::phase),
            form_message: self.form.as_ref().and_then(|f| f.message().cloned()),
            forms_sent: self.form.as_ref().map_or(0, |f| f.sent().len()),
            padlock_bursts: self.padlocks.as_ref().map_or(0, PadlockRain::bursts),
            pending_timers: self.timers.len(),
        }
    }

    fn document_height(&self) -> f64 {
        self.dom.bounds(self.dom.root()).height()
    }

    fn dispatch_viewport(&mut self) {
        let y = self.viewport.scroll_y;
        self.header.update(&mut self.dom, y);
        let header_height = self.header.header_height(&self.dom);
        self.nav.update(&mut self.dom, y, header_height);
        self.sections
            .on_viewport(&mut self.dom, self.viewport, &mut self.timers);
        self.reveal.on_viewport(&mut self.dom, self.viewport);
        if let Some(p) = &mut self.padlocks {
            p.on_viewport(&mut self.dom, self.viewport);
        }
    }

    fn run_due(&mut self) {
        let now = self.timers.now();
        while let Some((_, deferred)) = self.timers.pop_until(now) {
            self.fire(deferred);
        }
    }

    fn fire(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::Reveal(node) => self.dom.add_flag(node, flags::ANIMATE),
            Deferred::SubmitComplete => {
                if let Some(form) = &mut self.form {
                    form.complete_send(&mut self.dom, &mut self.timers);
                }
            }
            Deferred::DismissSuccess => {
                if let Some(form) = &mut self.form {
                    form.dismiss_success(&mut self.dom);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
