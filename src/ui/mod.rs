//! Page behavior controllers.
//!
//! Each controller owns the node handles it was constructed with and mutates state flags through
//! the host; none of them fails at runtime.

pub(crate) mod form;
pub(crate) mod header;
pub(crate) mod menu;
pub(crate) mod nav;
pub(crate) mod padlock;
pub(crate) mod reveal;
pub(crate) mod scroll;
pub(crate) mod sections;

use crate::foundation::ids::NodeId;

/// State flag names toggled on host elements.
pub mod flags {
    /// Sticky: the section has been reached at least once.
    pub const ACTIVE: &str = "active";
    /// The section currently in focus.
    pub const HIGHLIGHTED: &str = "highlighted";
    /// Reveal animation has started.
    pub const ANIMATE: &str = "animate";
    /// Header sits over a dark background.
    pub const HEADER_ON_DARK: &str = "header-on-dark";
    /// Header sits over a light background.
    pub const HEADER_ON_LIGHT: &str = "header-on-light";
    /// Page is scrolled past the header offset.
    pub const SCROLLED: &str = "scrolled";
    /// Mobile menu parts while the menu is open.
    pub const OPEN: &str = "open";
    /// Body while the mobile menu is open.
    pub const SCROLL_LOCKED: &str = "scroll-locked";
    /// Form while a submission is in flight.
    pub const SENDING: &str = "sending";
    /// Submit button while a submission is in flight.
    pub const DISABLED: &str = "disabled";
    /// Form showing validation errors.
    pub const MESSAGE_ERROR: &str = "message-error";
    /// Form showing the success message.
    pub const MESSAGE_SUCCESS: &str = "message-success";
    /// Generated particle element.
    pub const PADLOCK: &str = "padlock";
}

/// Work deferred through the session's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Add `animate` to a reveal element.
    Reveal(NodeId),
    /// Finish the simulated form submission.
    SubmitComplete,
    /// Remove the success message if still shown.
    DismissSuccess,
}
