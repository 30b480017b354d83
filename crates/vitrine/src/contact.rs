//! Contact form state and its simulated submission.
//!
//! Nothing is sent anywhere: a submission waits out a fixed delay, always
//! succeeds, clears the form and shows a confirmation toast.

use std::time::Duration;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info};

/// Input fields of the form, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub const fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Waiting out the send delay since `since`.
    Submitting { since: Duration },
    /// Sent; the toast is up.
    Success,
}

/// Confirmation shown after a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub shown_at: Duration,
    pub sent_at: DateTime<Local>,
}

/// Form contents and the field being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: Field,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn push(&mut self, c: char) {
        if c == '\n' && self.focus != Field::Message {
            return;
        }
        self.value_mut(self.focus).push(c);
    }

    pub fn backspace(&mut self) {
        self.value_mut(self.focus).pop();
    }

    /// Same checks a browser applies to `required` and `type="email"` inputs.
    pub fn check(&self) -> Result<(), SubmitError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| self.value(*f).trim().is_empty())
        {
            return Err(SubmitError::MissingField(field));
        }
        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(SubmitError::InvalidEmail),
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Drives the form through idle, submitting and success.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    form: ContactForm,
    status: SubmissionStatus,
    toast: Option<Toast>,
    submit_delay: Duration,
    toast_duration: Duration,
}

impl Default for ContactSubmission {
    fn default() -> Self {
        Self::new(Self::SUBMIT_DELAY, Self::TOAST_DURATION)
    }
}

impl ContactSubmission {
    pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);
    pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

    pub fn new(submit_delay: Duration, toast_duration: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            status: SubmissionStatus::Idle,
            toast: None,
            submit_delay,
            toast_duration,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Editable form. Edits are ignored by the send in progress, if any.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting { .. })
    }

    /// Start sending the form. Ignored while a send is in progress.
    pub fn submit(&mut self, now: Duration) -> Result<(), SubmitError> {
        if self.is_submitting() {
            debug!("submit ignored, already submitting");
            return Ok(());
        }
        self.form.check()?;
        self.status = SubmissionStatus::Submitting { since: now };
        info!(
            message_len = self.form.message.chars().count(),
            "contact form submitted"
        );
        Ok(())
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Duration) {
        if let SubmissionStatus::Submitting { since } = self.status
            && now.saturating_sub(since) >= self.submit_delay
        {
            self.form.clear();
            self.status = SubmissionStatus::Success;
            self.toast = Some(Toast {
                shown_at: now,
                sent_at: Local::now(),
            });
            info!("contact form sent");
        }

        if let Some(toast) = &self.toast
            && now.saturating_sub(toast.shown_at) >= self.toast_duration
        {
            self.dismiss_toast();
        }
    }

    /// Close the toast early. A send started while the toast was up keeps
    /// running.
    pub fn dismiss_toast(&mut self) {
        if self.toast.take().is_some() {
            if self.status == SubmissionStatus::Success {
                self.status = SubmissionStatus::Idle;
            }
            debug!("toast dismissed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactSubmission {
        let mut submission = ContactSubmission::default();
        let form = submission.form_mut();
        form.name = "A".to_string();
        form.email = "a@b.com".to_string();
        form.message = "hi".to_string();
        submission
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_idle_submitting_success() {
        let mut submission = filled();
        assert_eq!(submission.status(), SubmissionStatus::Idle);

        submission.submit(ms(1000)).unwrap();
        assert_eq!(
            submission.status(),
            SubmissionStatus::Submitting { since: ms(1000) }
        );

        submission.tick(ms(2499));
        assert!(submission.is_submitting());
        assert_eq!(submission.form().name, "A");

        submission.tick(ms(2500));
        assert_eq!(submission.status(), SubmissionStatus::Success);
        assert_eq!(submission.form(), &ContactForm::default());
        assert!(submission.toast().is_some());
    }

    #[test]
    fn test_toast_auto_dismisses() {
        let mut submission = filled();
        submission.submit(ms(0)).unwrap();
        submission.tick(ms(1500));
        submission.tick(ms(4499));
        assert!(submission.toast().is_some());
        submission.tick(ms(4500));
        assert!(submission.toast().is_none());
        assert_eq!(submission.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_dismiss_early() {
        let mut submission = filled();
        submission.submit(ms(0)).unwrap();
        submission.tick(ms(1500));
        submission.dismiss_toast();
        assert!(submission.toast().is_none());
        assert_eq!(submission.status(), SubmissionStatus::Idle);
        // No toast to dismiss: nothing changes.
        submission.dismiss_toast();
        assert_eq!(submission.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_resubmit_while_toast_is_showing() {
        let mut submission = filled();
        submission.submit(ms(0)).unwrap();
        submission.tick(ms(1500));
        assert!(submission.toast().is_some());

        *submission.form_mut() = filled().form().clone();
        submission.submit(ms(4000)).unwrap();
        // The old toast expires while the new send is waiting.
        submission.tick(ms(4500));
        assert!(submission.toast().is_none());
        assert!(submission.is_submitting());

        submission.tick(ms(5500));
        assert_eq!(submission.status(), SubmissionStatus::Success);
        assert_eq!(submission.form(), &ContactForm::default());
        assert_eq!(submission.toast().map(|t| t.shown_at), Some(ms(5500)));
    }

    #[test]
    fn test_dismiss_during_send_keeps_sending() {
        let mut submission = filled();
        submission.submit(ms(0)).unwrap();
        submission.tick(ms(1500));
        *submission.form_mut() = filled().form().clone();
        submission.submit(ms(2000)).unwrap();

        submission.dismiss_toast();
        assert_eq!(
            submission.status(),
            SubmissionStatus::Submitting { since: ms(2000) }
        );
        submission.tick(ms(3500));
        assert_eq!(submission.status(), SubmissionStatus::Success);
        assert!(submission.toast().is_some());
    }

    #[test]
    fn test_required_fields() {
        let mut submission = filled();
        submission.form_mut().email = "   ".to_string();
        assert_eq!(
            submission.submit(ms(0)),
            Err(SubmitError::MissingField(Field::Email))
        );
        assert_eq!(submission.status(), SubmissionStatus::Idle);

        submission.form_mut().email = "not-an-email".to_string();
        assert_eq!(submission.submit(ms(0)), Err(SubmitError::InvalidEmail));

        let mut empty = ContactSubmission::default();
        assert_eq!(
            empty.submit(ms(0)),
            Err(SubmitError::MissingField(Field::Name))
        );
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut submission = filled();
        submission.submit(ms(0)).unwrap();
        submission.submit(ms(1000)).unwrap();
        assert_eq!(
            submission.status(),
            SubmissionStatus::Submitting { since: ms(0) }
        );
    }

    #[test]
    fn test_configurable_delays() {
        let mut submission = ContactSubmission::new(ms(10), ms(20));
        *submission.form_mut() = filled().form().clone();
        submission.submit(ms(0)).unwrap();
        submission.tick(ms(10));
        assert_eq!(submission.status(), SubmissionStatus::Success);
        submission.tick(ms(30));
        assert!(submission.toast().is_none());
    }

    #[test]
    fn test_editing() {
        let mut form = ContactForm::default();
        form.push('h');
        form.push('\n');
        form.focus_next();
        form.focus_next();
        form.push('o');
        form.push('\n');
        form.push('k');
        form.backspace();
        assert_eq!(form.name, "h");
        assert_eq!(form.message, "o\n");
        form.focus_next();
        assert_eq!(form.focus, Field::Name);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SubmitError::MissingField(Field::Message).to_string(),
            "Message is required"
        );
    }
}
