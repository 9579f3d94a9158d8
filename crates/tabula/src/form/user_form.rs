//! Create and edit form for a user.

use tabula_net::{User, UserCreateInput, UserUpdateInput};

use super::rules::{
    EMAIL_PATTERN, FieldErrors, FieldRule, FieldValidator, FormSchema, FormValues, messages,
};

/// Raw text of the user form, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    /// Empty when no age is given.
    pub age: String,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from a stored user.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
        }
    }

    /// The age as a number. Blank or unparsable text gives `None`.
    pub fn parsed_age(&self) -> Option<u32> {
        self.age.trim().parse().ok()
    }

    pub fn to_create_input(&self) -> UserCreateInput {
        UserCreateInput {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.parsed_age(),
        }
    }

    pub fn to_update_input(&self) -> UserUpdateInput {
        UserUpdateInput {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            age: self.parsed_age(),
        }
    }
}

impl FormValues for UserForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "age" => &self.age,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "age" => Some(&mut self.age),
            _ => None,
        }
    }
}

/// Rules for [`UserForm`]: name required with at least two characters,
/// email required and well-formed, age optional within 18 to 120.
#[derive(Clone, Debug)]
pub struct UserFormValidator {
    schema: FormSchema,
}

impl UserFormValidator {
    pub fn new() -> Result<Self, regex::Error> {
        let schema = FormSchema::new()
            .field(
                "name",
                FieldValidator::new()
                    .rule(FieldRule::Required(messages::NAME_REQUIRED))
                    .rule(FieldRule::MinChars(2, messages::NAME_TOO_SHORT)),
            )
            .field(
                "email",
                FieldValidator::new()
                    .rule(FieldRule::Required(messages::EMAIL_REQUIRED))
                    .rule(FieldRule::pattern(EMAIL_PATTERN, messages::EMAIL_INVALID)?),
            )
            .field(
                "age",
                FieldValidator::new().optional().rule(FieldRule::Range {
                    min: 18,
                    max: 120,
                    message: messages::AGE_OUT_OF_RANGE,
                }),
            );
        Ok(Self { schema })
    }

    pub fn validate(&self, form: &UserForm) -> Result<(), FieldErrors> {
        self.schema.validate(form)
    }

    pub fn check_field(&self, form: &UserForm, field: &str) -> Result<(), &'static str> {
        self.schema.check_field(form, field)
    }
}
