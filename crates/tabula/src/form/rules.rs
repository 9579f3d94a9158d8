//! Field rules and the schema that applies them.
//!
//! A [`FormSchema`] lists the rules of each field in order. Validation stops
//! at the first failing rule of a field, so every field reports at most one
//! message.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

/// Email shape accepted by the forms: `local@domain.tld` without whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Digits and dashes, at least ten characters.
pub const PHONE_PATTERN: &str = r"^[0-9\-]{10,}$";

/// Validation messages shown next to the fields.
pub mod messages {
    pub const NAME_REQUIRED: &str = "이름은 필수입니다.";
    pub const NAME_TOO_SHORT: &str = "이름은 최소 2자 이상이어야 합니다.";
    pub const NAME_TOO_LONG: &str = "이름은 50자 이하여야 합니다.";
    pub const EMAIL_REQUIRED: &str = "이메일은 필수입니다.";
    pub const EMAIL_INVALID: &str = "유효한 이메일 주소를 입력해주세요.";
    pub const PHONE_INVALID: &str = "유효한 전화번호 형식으로 입력해주세요.";
    pub const AGE_OUT_OF_RANGE: &str = "나이는 18~120 사이여야 합니다.";
    pub const BIO_TOO_LONG: &str = "자기소개는 500자 이하여야 합니다.";
}

/// Field name to message, for every field that failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.errors.insert(field, message);
    }

    /// The message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Forget the error of one field, as when the user edits it again.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A single check on a field's raw text.
#[derive(Clone, Debug)]
pub enum FieldRule {
    /// Fails on blank input.
    Required(&'static str),
    /// Fails when shorter than the given number of characters.
    MinChars(usize, &'static str),
    /// Fails when longer than the given number of characters.
    MaxChars(usize, &'static str),
    /// Fails when the pattern does not match.
    Pattern(Regex, &'static str),
    /// Fails unless the input is an integer within `min..=max`.
    Range {
        min: i64,
        max: i64,
        message: &'static str,
    },
}

impl FieldRule {
    /// Compile a pattern rule.
    pub fn pattern(pattern: &str, message: &'static str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?, message))
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Required(message)
            | Self::MinChars(_, message)
            | Self::MaxChars(_, message)
            | Self::Pattern(_, message)
            | Self::Range { message, .. } => *message,
        }
    }

    /// Check `input`, returning the rule's message on failure.
    pub fn check(&self, input: &str) -> Result<(), &'static str> {
        let ok = match self {
            Self::Required(_) => !input.trim().is_empty(),
            Self::MinChars(min, _) => input.chars().count() >= *min,
            Self::MaxChars(max, _) => input.chars().count() <= *max,
            Self::Pattern(regex, _) => regex.is_match(input),
            Self::Range { min, max, .. } => input
                .trim()
                .parse::<i64>()
                .is_ok_and(|n| (*min..=*max).contains(&n)),
        };
        if ok { Ok(()) } else { Err(self.message()) }
    }
}

/// The rules of one field.
#[derive(Clone, Debug, Default)]
pub struct FieldValidator {
    rules: Vec<FieldRule>,
    optional: bool,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip all rules when the input is empty.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The message of the first failing rule.
    pub fn check(&self, input: &str) -> Result<(), &'static str> {
        if self.optional && input.is_empty() {
            return Ok(());
        }
        self.rules.iter().try_for_each(|rule| rule.check(input))
    }
}

/// Access to a form's raw field text by field name.
pub trait FormValues {
    /// The current text of `field`; unknown fields read as empty.
    fn value(&self, field: &str) -> &str;

    /// Mutable text of `field`, or `None` for unknown fields.
    fn value_mut(&mut self, field: &str) -> Option<&mut String>;
}

/// Ordered field validators for one form.
#[derive(Clone, Debug, Default)]
pub struct FormSchema {
    fields: Vec<(&'static str, FieldValidator)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, validator: FieldValidator) -> Self {
        self.fields.push((name, validator));
        self
    }

    /// Validate a single field.
    pub fn check_field(&self, values: &impl FormValues, field: &str) -> Result<(), &'static str> {
        self.fields
            .iter()
            .filter(|(name, _)| *name == field)
            .try_for_each(|(name, validator)| validator.check(values.value(name)))
    }

    /// Validate every field.
    pub fn validate(&self, values: &impl FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (name, validator) in &self.fields {
            if let Err(message) = validator.check(values.value(name)) {
                errors.insert(*name, message);
            }
        }
        if !errors.is_empty() {
            tracing::debug!(target: "tabula::form", errors = %errors, "validation failed");
        }
        errors.into_result()
    }
}
