//! Contact form validation and simulated submission.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::dom::host::StateFlags;
use crate::foundation::core::Millis;
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;
use crate::motion::timers::TimerQueue;
use crate::ui::{Deferred, flags};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Text shown after a successful submission.
pub const SUCCESS_TEXT: &str = "Mensagem enviada com sucesso! Entraremos em contato em breve.";

/// Values entered in the contact form.
///
/// Field names accept both the English names and the form's own `nome`/`empresa`/`mensagem`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactFields {
    /// Sender name.
    #[serde(alias = "nome")]
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender company.
    #[serde(alias = "empresa")]
    pub company: String,
    /// Message body.
    #[serde(alias = "mensagem")]
    pub message: String,
}

impl ContactFields {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            company: self.company.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }

    /// Every rule violation, in rule order. Fields are trimmed first.
    pub fn validate(&self) -> Vec<FieldError> {
        let f = self.trimmed();
        let mut errors = Vec::new();
        if f.name.chars().count() < 2 {
            errors.push(FieldError::NameTooShort);
        }
        if f.email.is_empty() {
            errors.push(FieldError::EmailMissing);
        } else if !EMAIL_RE.is_match(&f.email) {
            errors.push(FieldError::EmailInvalid);
        }
        if f.company.is_empty() {
            errors.push(FieldError::CompanyMissing);
        } else if f.company.chars().count() < 2 {
            errors.push(FieldError::CompanyTooShort);
        }
        if f.message.chars().count() < 10 {
            errors.push(FieldError::MessageTooShort);
        }
        errors
    }
}

/// A single validation failure; `Display` is the user-facing text.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Name shorter than two characters.
    #[error("Nome deve ter pelo menos 2 caracteres")]
    NameTooShort,
    /// Email left empty.
    #[error("E-mail é obrigatório")]
    EmailMissing,
    /// Email not shaped like `local@domain.tld`.
    #[error("E-mail inválido")]
    EmailInvalid,
    /// Company left empty.
    #[error("Empresa é obrigatório")]
    CompanyMissing,
    /// Company shorter than two characters.
    #[error("Nome da empresa deve ter pelo menos 2 caracteres")]
    CompanyTooShort,
    /// Message shorter than ten characters.
    #[error("Mensagem deve ter pelo menos 10 caracteres")]
    MessageTooShort,
}

/// Submission lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    /// Ready for input.
    #[default]
    Idle,
    /// Waiting for the simulated send to finish.
    Sending,
}

/// Kind of the feedback banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Validation failures.
    Error,
    /// Submission accepted.
    Success,
}

impl MessageKind {
    fn flag(self) -> &'static str {
        match self {
            Self::Error => flags::MESSAGE_ERROR,
            Self::Success => flags::MESSAGE_SUCCESS,
        }
    }
}

/// Feedback banner shown above the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    /// Banner kind.
    pub kind: MessageKind,
    /// One line per message.
    pub lines: Vec<String>,
}

/// Result of an accepted submit call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the error banner lists these.
    Rejected(Vec<FieldError>),
    /// The simulated send started.
    Sending,
}

/// Contact form state machine.
#[derive(Clone, Debug)]
pub struct ContactForm {
    form: NodeId,
    submit_button: Option<NodeId>,
    send_delay: Millis,
    success_ttl: Millis,
    phase: FormPhase,
    message: Option<FormMessage>,
    in_flight: Option<ContactFields>,
    sent: Vec<ContactFields>,
}

impl ContactForm {
    /// Form bound to `form` and its optional submit button.
    pub fn new(form: NodeId, submit_button: Option<NodeId>, config: &FormConfig) -> Self {
        Self {
            form,
            submit_button,
            send_delay: Millis(config.send_delay_ms),
            success_ttl: Millis(config.success_ttl_ms),
            phase: FormPhase::Idle,
            message: None,
            in_flight: None,
            sent: Vec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Banner currently shown.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Submissions that completed, trimmed, oldest first.
    pub fn sent(&self) -> &[ContactFields] {
        &self.sent
    }

    /// Validate `fields` and either show errors or start the simulated send.
    pub fn submit<D: StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        fields: &ContactFields,
        timers: &mut TimerQueue<Deferred>,
    ) -> GlassResult<SubmitOutcome> {
        if self.phase == FormPhase::Sending {
            return Err(GlassError::form("a submission is already in progress"));
        }
        self.set_message(dom, None);

        let errors = fields.validate();
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "form rejected");
            let lines = errors.iter().map(ToString::to_string).collect();
            self.set_message(
                dom,
                Some(FormMessage {
                    kind: MessageKind::Error,
                    lines,
                }),
            );
            return Ok(SubmitOutcome::Rejected(errors));
        }

        self.set_sending(dom, true);
        self.in_flight = Some(fields.trimmed());
        timers.schedule_in(self.send_delay, Deferred::SubmitComplete);
        tracing::debug!("form sending");
        Ok(SubmitOutcome::Sending)
    }

    /// Finish the simulated send: success banner, reset, and a timer to dismiss the banner.
    pub fn complete_send<D: StateFlags + ?Sized>(
        &mut self,
        dom: &mut D,
        timers: &mut TimerQueue<Deferred>,
    ) {
        if self.phase != FormPhase::Sending {
            return;
        }
        self.set_sending(dom, false);
        if let Some(fields) = self.in_flight.take() {
            self.sent.push(fields);
        }
        self.set_message(
            dom,
            Some(FormMessage {
                kind: MessageKind::Success,
                lines: vec![SUCCESS_TEXT.to_owned()],
            }),
        );
        timers.schedule_in(self.success_ttl, Deferred::DismissSuccess);
        tracing::debug!("form sent");
    }

    /// Remove the success banner if one is still shown.
    pub fn dismiss_success<D: StateFlags + ?Sized>(&mut self, dom: &mut D) {
        if self
            .message
            .as_ref()
            .is_some_and(|m| m.kind == MessageKind::Success)
        {
            self.set_message(dom, None);
        }
    }

    fn set_sending<D: StateFlags + ?Sized>(&mut self, dom: &mut D, sending: bool) {
        self.phase = if sending {
            FormPhase::Sending
        } else {
            FormPhase::Idle
        };
        dom.set_flag(self.form, flags::SENDING, sending);
        if let Some(button) = self.submit_button {
            dom.set_flag(button, flags::DISABLED, sending);
        }
    }

    fn set_message<D: StateFlags + ?Sized>(&mut self, dom: &mut D, message: Option<FormMessage>) {
        if let Some(old) = &self.message {
            dom.remove_flag(self.form, old.kind.flag());
        }
        if let Some(new) = &message {
            dom.add_flag(self.form, new.kind.flag());
        }
        self.message = message;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/form.rs"]
mod tests;
