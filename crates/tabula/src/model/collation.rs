//! Locale-aware string ordering.

use std::cmp::Ordering;
use std::fmt;

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;

use crate::error::ModelError;

/// The locale every page sorts and formats with.
pub const DEFAULT_LOCALE: &str = "ko-KR";

/// A collator bound to one locale.
pub struct Collation {
    collator: CollatorBorrowed<'static>,
    locale: String,
}

impl Collation {
    /// Create a collation for a BCP-47 locale tag such as `ko-KR`.
    pub fn new(locale: &str) -> Result<Self, ModelError> {
        let parsed = locale.parse::<Locale>().map_err(|e| ModelError::Collation {
            locale: locale.to_string(),
            message: e.to_string(),
        })?;

        let collator = Collator::try_new(parsed.into(), CollatorOptions::default()).map_err(
            |e| ModelError::Collation {
                locale: locale.to_string(),
                message: e.to_string(),
            },
        )?;

        Ok(Self {
            collator,
            locale: locale.to_string(),
        })
    }

    /// Collation for [`DEFAULT_LOCALE`].
    pub fn korean() -> Result<Self, ModelError> {
        Self::new(DEFAULT_LOCALE)
    }

    /// The locale tag this collation was created with.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compare two strings in this locale's order.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
