//! Scripted interactions replayed against a session.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::dom::host::Host;
use crate::dom::selector::SelectorList;
use crate::foundation::core::{Millis, Viewport};
use crate::foundation::error::{GlassError, GlassResult};
use crate::session::{PageSession, SessionSnapshot};
use crate::ui::form::{ContactFields, SubmitOutcome};

/// One user or clock event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Scroll to an absolute offset.
    Scroll {
        /// Target offset.
        y: f64,
    },
    /// Scroll relative to the current offset.
    ScrollBy {
        /// Offset delta.
        dy: f64,
    },
    /// Resize the viewport.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Let virtual time pass.
    Advance {
        /// Duration in milliseconds.
        ms: u64,
    },
    /// Click the first element matching a selector.
    Click {
        /// Clicked element.
        selector: String,
    },
    /// Submit the contact form.
    Submit {
        /// Entered values.
        #[serde(default)]
        fields: ContactFields,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scroll { y } => write!(f, "scroll {y}"),
            Self::ScrollBy { dy } => write!(f, "scroll_by {dy}"),
            Self::Resize { width, height } => write!(f, "resize {width}x{height}"),
            Self::Advance { ms } => write!(f, "advance {ms}ms"),
            Self::Click { selector } => write!(f, "click {selector}"),
            Self::Submit { .. } => write!(f, "submit"),
        }
    }
}

/// Ordered list of steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

/// State after one replayed step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepReport {
    /// Zero-based step index.
    pub index: usize,
    /// Human-readable step.
    pub step: String,
    /// What the step did, when noteworthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Session state after the step.
    pub snapshot: SessionSnapshot,
}

impl Script {
    /// Read and validate a JSON script file.
    pub fn from_path(path: impl AsRef<Path>) -> GlassResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json(&s)
    }

    /// Parse and validate a JSON script.
    pub fn from_json(s: &str) -> GlassResult<Self> {
        let script: Self =
            serde_json::from_str(s).map_err(|e| GlassError::serde(format!("script: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    /// Check selectors and numeric arguments.
    pub fn validate(&self) -> GlassResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            let bad = |msg: String| GlassError::script(format!("step {i} ({step}): {msg}"));
            match step {
                Step::Scroll { y: v } | Step::ScrollBy { dy: v } if !v.is_finite() => {
                    return Err(bad("offset must be finite".to_owned()));
                }
                Step::Resize { width, height } => {
                    let vp = Viewport {
                        scroll_y: 0.0,
                        width: *width,
                        height: *height,
                    };
                    vp.validate().map_err(|e| bad(e.to_string()))?;
                }
                Step::Click { selector } => {
                    SelectorList::parse(selector).map_err(|e| bad(e.to_string()))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Start `session`, run every step, and report the state after each.
    ///
    /// Rejected submissions are reported, not raised; a click on a missing element aborts.
    #[tracing::instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn replay<D: Host>(&self, session: &mut PageSession<D>) -> GlassResult<Vec<StepReport>> {
        session.start();
        let mut reports = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let note = match step {
                Step::Scroll { y } => Some(format!("at {}", session.scroll_to(*y))),
                Step::ScrollBy { dy } => Some(format!("at {}", session.scroll_by(*dy))),
                Step::Resize { width, height } => {
                    session.resize(*width, *height)?;
                    None
                }
                Step::Advance { ms } => {
                    session.advance(Millis(*ms));
                    None
                }
                Step::Click { selector } => {
                    let r = session
                        .click_selector(selector)
                        .map_err(|e| GlassError::script(format!("step {index}: {e}")))?;
                    r.scrolled_to.map(|y| format!("scrolled to {y}"))
                }
                Step::Submit { fields } => Some(match session.submit(fields) {
                    Ok(SubmitOutcome::Sending) => "sending".to_owned(),
                    Ok(SubmitOutcome::Rejected(errors)) => format!(
                        "rejected: {}",
                        errors
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ")
                    ),
                    Err(GlassError::Form(msg)) => format!("refused: {msg}"),
                    Err(e) => return Err(e),
                }),
            };
            tracing::debug!(index, %step, "step replayed");
            reports.push(StepReport {
                index,
                step: step.to_string(),
                note,
                snapshot: session.snapshot(),
            });
        }
        Ok(reports)
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
