//! User create and detail pages.
//!
//! Both pages validate locally before talking to the API and report the
//! outcome as a [`Notice`]. The returned [`Navigation`] tells the caller
//! whether to stay or go back to the user list.

use chrono::{NaiveDate, NaiveDateTime};
use tabula_core::Signal;
use tabula_net::{User, UserApi, UserId};

use crate::form::{FieldErrors, FormValues, UserForm, UserFormValidator};
use crate::notice::{Notice, messages};

/// Route of the user list.
pub const USERS_ROUTE: &str = "/users";

/// Where to go after a page operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// Back to [`USERS_ROUTE`].
    ToList,
}

/// Short Korean date: `2024. 1. 15.`
pub fn format_ko_date(date: NaiveDate) -> String {
    date.format("%Y. %-m. %-d.").to_string()
}

pub fn format_ko_datetime_date(ts: &NaiveDateTime) -> String {
    format_ko_date(ts.date())
}

fn set_form_field(form: &mut UserForm, errors: &mut FieldErrors, field: &str, value: String) {
    match form.value_mut(field) {
        Some(slot) => {
            *slot = value;
            errors.clear_field(field);
        }
        None => tracing::debug!(target: "tabula::pages", field, "ignoring unknown form field"),
    }
}

/// New user form.
pub struct UserCreatePage<A: UserApi> {
    api: A,
    validator: UserFormValidator,
    form: UserForm,
    errors: FieldErrors,
    is_submitting: bool,
    notified: Signal<Notice>,
}

impl<A: UserApi> UserCreatePage<A> {
    pub fn new(api: A) -> Result<Self, regex::Error> {
        Ok(Self {
            api,
            validator: UserFormValidator::new()?,
            form: UserForm::new(),
            errors: FieldErrors::new(),
            is_submitting: false,
            notified: Signal::new(),
        })
    }

    pub fn notified(&self) -> &Signal<Notice> {
        &self.notified
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Edit a field. Its previous error is cleared.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        set_form_field(&mut self.form, &mut self.errors, field, value.into());
    }

    /// Validate and create the user.
    pub async fn submit(&mut self) -> Navigation {
        if let Err(errors) = self.validator.validate(&self.form) {
            self.errors = errors;
            self.notified.emit(Notice::error(messages::CHECK_INPUT));
            return Navigation::Stay;
        }
        self.errors = FieldErrors::new();

        self.is_submitting = true;
        let result = self.api.create_user(&self.form.to_create_input()).await;
        self.is_submitting = false;

        match result {
            Ok(user) => {
                tracing::info!(target: "tabula::pages", id = user.id, "user created");
                self.notified.emit(Notice::success(messages::USER_CREATED));
                Navigation::ToList
            }
            Err(e) => {
                tracing::warn!(target: "tabula::pages", error = %e, "create failed");
                self.notified
                    .emit(Notice::from_error(&e, messages::USER_CREATE_FAILED));
                Navigation::Stay
            }
        }
    }
}

/// View and edit one user.
pub struct UserDetailPage<A: UserApi> {
    api: A,
    id: UserId,
    validator: UserFormValidator,
    user: Option<User>,
    form: UserForm,
    errors: FieldErrors,
    is_loading: bool,
    is_saving: bool,
    notified: Signal<Notice>,
}

impl<A: UserApi> UserDetailPage<A> {
    pub fn new(api: A, id: UserId) -> Result<Self, regex::Error> {
        Ok(Self {
            api,
            id,
            validator: UserFormValidator::new()?,
            user: None,
            form: UserForm::new(),
            errors: FieldErrors::new(),
            is_loading: false,
            is_saving: false,
            notified: Signal::new(),
        })
    }

    pub fn notified(&self) -> &Signal<Notice> {
        &self.notified
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// The user as last loaded or saved.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// `created_at` as a short Korean date.
    pub fn created_at_display(&self) -> Option<String> {
        self.user.as_ref().map(|u| format_ko_datetime_date(&u.created_at))
    }

    pub fn updated_at_display(&self) -> Option<String> {
        self.user.as_ref().map(|u| format_ko_datetime_date(&u.updated_at))
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        set_form_field(&mut self.form, &mut self.errors, field, value.into());
    }

    /// Fetch the user and prefill the form.
    ///
    /// Any failure, including a missing user, sends the caller back to
    /// the list.
    pub async fn load(&mut self) -> Navigation {
        self.is_loading = true;
        let result = self.api.get_user(self.id).await;
        self.is_loading = false;

        match result {
            Ok(user) => {
                self.form = UserForm::from_user(&user);
                self.errors = FieldErrors::new();
                self.user = Some(user);
                Navigation::Stay
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::info!(target: "tabula::pages", id = self.id, "user not found");
                } else {
                    tracing::warn!(target: "tabula::pages", id = self.id, error = %e, "load failed");
                }
                self.notified
                    .emit(Notice::from_error(&e, messages::USER_LOAD_FAILED));
                Navigation::ToList
            }
        }
    }

    /// Validate and save the form.
    pub async fn save(&mut self) -> Navigation {
        if let Err(errors) = self.validator.validate(&self.form) {
            self.errors = errors;
            self.notified.emit(Notice::error(messages::CHECK_INPUT));
            return Navigation::Stay;
        }
        self.errors = FieldErrors::new();

        self.is_saving = true;
        let result = self
            .api
            .update_user(self.id, &self.form.to_update_input())
            .await;
        self.is_saving = false;

        match result {
            Ok(user) => {
                tracing::info!(target: "tabula::pages", id = user.id, "user updated");
                self.user = Some(user);
                self.notified.emit(Notice::success(messages::USER_UPDATED));
                Navigation::ToList
            }
            Err(e) => {
                tracing::warn!(target: "tabula::pages", id = self.id, error = %e, "update failed");
                self.notified
                    .emit(Notice::from_error(&e, messages::USER_UPDATE_FAILED));
                Navigation::Stay
            }
        }
    }
}
