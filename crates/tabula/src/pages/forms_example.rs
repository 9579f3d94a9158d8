//! Profile form demo page.

use tabula_core::Signal;

use crate::form::{FieldErrors, FormValues, ProfileForm, ProfileFormValidator, ProfileSubmission};
use crate::notice::{Notice, messages};

/// Profile form with live per-field checks and a submitted-data preview.
pub struct FormsExample {
    validator: ProfileFormValidator,
    form: ProfileForm,
    errors: FieldErrors,
    submitted: Option<ProfileSubmission>,
    notified: Signal<Notice>,
}

impl FormsExample {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            validator: ProfileFormValidator::new()?,
            form: ProfileForm::default(),
            errors: FieldErrors::new(),
            submitted: None,
            notified: Signal::new(),
        })
    }

    pub fn notified(&self) -> &Signal<Notice> {
        &self.notified
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The last accepted submission.
    pub fn submitted(&self) -> Option<&ProfileSubmission> {
        self.submitted.as_ref()
    }

    /// Edit a field and re-check it.
    pub fn set_field(&mut self, field: &'static str, value: impl Into<String>) {
        let Some(slot) = self.form.value_mut(field) else {
            return;
        };
        *slot = value.into();
        match self.validator.check_field(&self.form, field) {
            Ok(()) => self.errors.clear_field(field),
            Err(message) => self.errors.insert(field, message),
        }
    }

    /// Submit the form. On success the form is cleared.
    pub fn submit(&mut self) -> bool {
        match self.validator.submit(&self.form) {
            Ok(submission) => {
                tracing::debug!(target: "tabula::pages", name = %submission.name, "profile submitted");
                self.submitted = Some(submission);
                self.form = ProfileForm::default();
                self.errors = FieldErrors::new();
                self.notified.emit(Notice::success(messages::FORM_SUBMITTED));
                true
            }
            Err(errors) => {
                self.errors = errors;
                self.notified.emit(Notice::error(messages::CHECK_INPUT));
                false
            }
        }
    }
}
