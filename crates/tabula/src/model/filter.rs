//! Search and field filtering.

use std::collections::BTreeMap;

use super::record::Record;

/// Free-text query plus exact-match field filters.
///
/// A field filter whose required value is empty imposes no constraint, so a
/// "(all)" choice in a dropdown maps to an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against the record's search fields.
    pub query: String,
    /// Field name to required exact value.
    pub field_filters: BTreeMap<String, String>,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Require `field` to equal `value` exactly.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    /// Whether these criteria accept every record.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.field_filters.values().all(String::is_empty)
    }

    /// Whether `item` passes both the query and every field filter.
    pub fn matches<R: Record>(&self, item: &R) -> bool {
        self.matches_query(item, &self.query.to_lowercase()) && self.matches_fields(item)
    }

    fn matches_query<R: Record>(&self, item: &R, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        R::SEARCH_FIELDS.iter().any(|name| {
            item.field(name)
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }

    fn matches_fields<R: Record>(&self, item: &R) -> bool {
        self.field_filters
            .iter()
            .filter(|(_, required)| !required.is_empty())
            .all(|(name, required)| {
                item.field(name)
                    .as_text()
                    .is_some_and(|value| value == required.as_str())
            })
    }
}

/// Indices of the rows of `items` that match `criteria`, in source order.
pub fn filter_rows<R: Record>(items: &[R], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..items.len()).collect();
    }

    let needle = criteria.query.to_lowercase();
    (0..items.len())
        .filter(|&row| {
            let item = &items[row];
            criteria.matches_query(item, &needle) && criteria.matches_fields(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::FieldValue;

    struct Member {
        id: u32,
        name: &'static str,
        email: &'static str,
        role: &'static str,
    }

    impl Record for Member {
        type Id = u32;
        const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];

        fn id(&self) -> u32 {
            self.id
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "name" => FieldValue::text(self.name),
                "email" => FieldValue::text(self.email),
                "role" => FieldValue::text(self.role),
                _ => FieldValue::Null,
            }
        }
    }

    fn members() -> Vec<Member> {
        vec![
            Member { id: 1, name: "Alice", email: "alice@example.com", role: "admin" },
            Member { id: 2, name: "Bob", email: "bob@EXAMPLE.com", role: "user" },
            Member { id: 3, name: "Carol", email: "carol@test.org", role: "user" },
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let items = members();
        assert_eq!(filter_rows(&items, &FilterCriteria::new()), vec![0, 1, 2]);
        assert!(FilterCriteria::new().with_field("role", "").is_empty());
        assert_eq!(
            filter_rows(&items, &FilterCriteria::new().with_field("role", "")),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let items = members();
        let rows = filter_rows(&items, &FilterCriteria::new().with_query("Example"));
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_query_and_field_filter_combine() {
        let items = members();
        let criteria = FilterCriteria::new().with_query("example").with_field("role", "user");
        assert_eq!(filter_rows(&items, &criteria), vec![1]);
        assert!(criteria.matches(&items[1]));
        assert!(!criteria.matches(&items[2]));
    }

    #[test]
    fn test_unknown_field_filter_matches_nothing() {
        let items = members();
        let criteria = FilterCriteria::new().with_field("team", "core");
        assert!(filter_rows(&items, &criteria).is_empty());
    }
}
