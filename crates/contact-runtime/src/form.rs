#![forbid(unsafe_code)]

//! The contact form as a [`Model`].

use contact_core::{FieldEdit, FieldSet, InputLimits, ValidationResult};

use crate::config::FormConfig;
use crate::notice::{NoticeScheduler, NoticeToken};
use crate::program::{Cmd, Model};
use crate::submission::SubmissionController;
use crate::subscription::Subscription;

/// Input events the form reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMsg {
    /// The user changed one field.
    Edit(FieldEdit),
    /// The user submitted the form.
    Submit,
    /// A notice dismissal timer fired.
    NoticeExpired(NoticeToken),
    /// The user closed the notice by hand.
    DismissNotice,
}

/// Form state, submit controller, and notice.
#[derive(Debug)]
pub struct ContactForm {
    fields: FieldSet,
    limits: InputLimits,
    controller: SubmissionController,
    notice: NoticeScheduler,
    last_result: Option<ValidationResult>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl ContactForm {
    pub fn new(config: FormConfig) -> Self {
        Self {
            fields: FieldSet::default(),
            limits: config.limits,
            controller: SubmissionController::default(),
            notice: NoticeScheduler::new(config.notice_delay).with_notice(config.notice),
            last_result: None,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn notice(&self) -> &NoticeScheduler {
        &self.notice
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Result of the most recent submit.
    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    /// Apply a user edit: cap it, write it, clear that field's error.
    pub fn on_field_change(&mut self, edit: FieldEdit) -> &FieldSet {
        let edit = self.limits.clamp(edit);
        tracing::debug!(field = %edit.key(), "field edited");
        self.fields = self.fields.update(edit);
        &self.fields
    }

    /// Validate the current fields and settle the submit.
    pub fn submit(&mut self) -> ValidationResult {
        let submission = self.controller.submit(&self.fields);
        if submission.show_notice() {
            self.notice.show();
        }
        self.fields = submission.fields;
        self.last_result = Some(submission.result.clone());
        submission.result
    }
}

impl Model for ContactForm {
    type Message = FormMsg;

    fn update(&mut self, msg: FormMsg) -> Cmd<FormMsg> {
        match msg {
            FormMsg::Edit(edit) => {
                self.on_field_change(edit);
                Cmd::none()
            }
            FormMsg::Submit => {
                let log = match self.submit() {
                    ValidationResult::Accepted(_) => "submit accepted".to_string(),
                    ValidationResult::Rejected(errors) => {
                        format!("submit rejected: {} field(s)", errors.len())
                    }
                };
                Cmd::batch(vec![Cmd::PreventDefault, Cmd::log(log)])
            }
            FormMsg::NoticeExpired(token) => {
                self.notice.expire(token);
                Cmd::none()
            }
            FormMsg::DismissNotice => {
                self.notice.hide();
                Cmd::none()
            }
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<FormMsg>>> {
        self.notice
            .subscription(FormMsg::NoticeExpired)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::{FieldKey, QueryType};

    fn fill(form: &mut ContactForm) {
        for edit in [
            FieldEdit::FirstName("Ada".into()),
            FieldEdit::LastName("Lovelace".into()),
            FieldEdit::Email("ada@example.com".into()),
            FieldEdit::QueryType(Some(QueryType::Support)),
            FieldEdit::Message("Hello".into()),
            FieldEdit::Consent(true),
        ] {
            form.update(FormMsg::Edit(edit));
        }
    }

    #[test]
    fn submit_prevents_default() {
        let mut form = ContactForm::default();
        let cmd = form.update(FormMsg::Submit);
        match cmd {
            Cmd::Batch(cmds) => assert!(matches!(cmds[0], Cmd::PreventDefault)),
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn rejected_submit_keeps_values_and_no_notice() {
        let mut form = ContactForm::default();
        form.update(FormMsg::Edit(FieldEdit::FirstName("A".into())));
        form.update(FormMsg::Submit);
        assert_eq!(form.fields().first_name, "A");
        assert!(form.fields().errors.contains(FieldKey::FirstName));
        assert!(!form.notice().is_visible());
        assert!(form.subscriptions().is_empty());
    }

    #[test]
    fn accepted_submit_resets_and_shows_notice() {
        let mut form = ContactForm::default();
        fill(&mut form);
        form.update(FormMsg::Submit);
        assert!(form.fields().is_pristine());
        assert!(form.notice().is_visible());
        assert_eq!(form.subscriptions().len(), 1);
        assert!(form.last_result().is_some_and(ValidationResult::is_accepted));
    }

    #[test]
    fn edit_clears_error_without_revalidating() {
        let mut form = ContactForm::default();
        form.update(FormMsg::Submit);
        assert_eq!(form.fields().errors.len(), 6);
        form.update(FormMsg::Edit(FieldEdit::Email("x".into())));
        assert!(!form.fields().errors.contains(FieldKey::Email));
        assert_eq!(form.fields().errors.len(), 5);
    }

    #[test]
    fn edits_are_capped() {
        let mut form = ContactForm::default();
        form.on_field_change(FieldEdit::FirstName("n".repeat(100)));
        assert_eq!(form.fields().first_name.len(), 40);
    }

    #[test]
    fn stale_expiry_ignored_after_reshow() {
        let mut form = ContactForm::default();
        fill(&mut form);
        form.update(FormMsg::Submit);
        let first = form.notice().token().expect("visible");
        fill(&mut form);
        form.update(FormMsg::Submit);
        form.update(FormMsg::NoticeExpired(first));
        assert!(form.notice().is_visible());
    }

    #[test]
    fn dismiss_hides_and_drops_timer() {
        let mut form = ContactForm::default();
        fill(&mut form);
        form.update(FormMsg::Submit);
        form.update(FormMsg::DismissNotice);
        assert!(!form.notice().is_visible());
        assert!(form.subscriptions().is_empty());
    }
}
