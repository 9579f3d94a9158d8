//! Profile form with optional contact fields.

use serde::Serialize;

use super::rules::{
    EMAIL_PATTERN, FieldErrors, FieldRule, FieldValidator, FormSchema, FormValues, PHONE_PATTERN,
    messages,
};

/// Raw text of the profile form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub bio: String,
}

impl FormValues for ProfileForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "age" => &self.age,
            "bio" => &self.bio,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "age" => Some(&mut self.age),
            "bio" => Some(&mut self.bio),
            _ => None,
        }
    }
}

/// A validated profile. Blank optional fields are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfileSubmission {
    fn from_form(form: &ProfileForm) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: non_empty(&form.phone),
            age: form.age.trim().parse().ok(),
            bio: non_empty(&form.bio),
        }
    }
}

/// Rules for [`ProfileForm`].
#[derive(Clone, Debug)]
pub struct ProfileFormValidator {
    schema: FormSchema,
}

impl ProfileFormValidator {
    pub fn new() -> Result<Self, regex::Error> {
        let schema = FormSchema::new()
            .field(
                "name",
                FieldValidator::new()
                    .rule(FieldRule::MinChars(2, messages::NAME_TOO_SHORT))
                    .rule(FieldRule::MaxChars(50, messages::NAME_TOO_LONG)),
            )
            .field(
                "email",
                FieldValidator::new()
                    .rule(FieldRule::pattern(EMAIL_PATTERN, messages::EMAIL_INVALID)?),
            )
            .field(
                "phone",
                FieldValidator::new()
                    .optional()
                    .rule(FieldRule::pattern(PHONE_PATTERN, messages::PHONE_INVALID)?),
            )
            .field(
                "age",
                FieldValidator::new().optional().rule(FieldRule::Range {
                    min: 18,
                    max: 120,
                    message: messages::AGE_OUT_OF_RANGE,
                }),
            )
            .field(
                "bio",
                FieldValidator::new()
                    .optional()
                    .rule(FieldRule::MaxChars(500, messages::BIO_TOO_LONG)),
            );
        Ok(Self { schema })
    }

    /// Validate `form` and build the submission.
    pub fn submit(&self, form: &ProfileForm) -> Result<ProfileSubmission, FieldErrors> {
        self.schema.validate(form)?;
        Ok(ProfileSubmission::from_form(form))
    }

    pub fn check_field(&self, form: &ProfileForm, field: &str) -> Result<(), &'static str> {
        self.schema.check_field(form, field)
    }
}
