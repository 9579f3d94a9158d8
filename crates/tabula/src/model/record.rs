//! The row abstraction the list pipeline operates on.

use std::borrow::Cow;
use std::fmt;

/// A single field value exposed by a [`Record`].
///
/// Enumerated values (statuses, roles) are exposed as `Text` of their raw
/// value, so field filters compare them exactly.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    /// Textual value, compared with locale-aware collation.
    Text(Cow<'a, str>),
    /// Numeric value, compared numerically.
    Number(f64),
    /// Missing value.
    Null,
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// The textual form used for search and exact-match filters.
    ///
    /// Integral numbers render without a fractional part. `Null` has none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_ref())),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                Some(Cow::Owned(format!("{}", *n as i64)))
            }
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Null => None,
        }
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Option<u32>> for FieldValue<'_> {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Null, |n| Self::Number(f64::from(n)))
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// An item that can be searched, filtered, sorted, and paginated.
///
/// Implementations are read-only views: the pipeline never mutates records.
pub trait Record {
    /// Stable identifier type.
    type Id: Clone + Eq + fmt::Debug;

    /// Fields matched by the free-text query.
    const SEARCH_FIELDS: &'static [&'static str];

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Look up a field by name. Unknown names yield [`FieldValue::Null`].
    fn field(&self, name: &str) -> FieldValue<'_>;
}

impl Record for tabula_net::User {
    type Id = tabula_net::UserId;

    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];

    fn id(&self) -> Self::Id {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Number(self.id as f64),
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "age" => self.age.into(),
            "created_at" => FieldValue::Text(Cow::Owned(sortable_timestamp(&self.created_at))),
            "updated_at" => FieldValue::Text(Cow::Owned(sortable_timestamp(&self.updated_at))),
            _ => FieldValue::Null,
        }
    }
}

// Zero-padded ISO form, so collation order matches chronological order.
fn sortable_timestamp(ts: &chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}
