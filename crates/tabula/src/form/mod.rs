//! Form state and validation.

mod profile_form;
mod rules;
mod user_form;

pub use profile_form::{ProfileForm, ProfileFormValidator, ProfileSubmission};
pub use rules::{
    EMAIL_PATTERN, FieldErrors, FieldRule, FieldValidator, FormSchema, FormValues, PHONE_PATTERN,
    messages,
};
pub use user_form::{UserForm, UserFormValidator};
