//! Single-key stable sorting.

use std::cmp::Ordering;

use super::collation::Collation;
use super::record::{FieldValue, Record};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one key, one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// The sort order after a click on the header for `key`.
    ///
    /// Clicking the active key flips the direction; clicking another key
    /// sorts by it ascending.
    pub fn toggled(&self, key: &str) -> Self {
        if self.key == key {
            Self {
                key: self.key.clone(),
                direction: self.direction.reversed(),
            }
        } else {
            Self::ascending(key)
        }
    }
}

/// Ascending comparison of two field values.
///
/// Text pairs use the collation; number pairs compare numerically. Across
/// kinds, numbers come before text and `Null` comes last, so the order is
/// total and rows with equal values keep their prior order.
pub fn compare_fields(a: &FieldValue<'_>, b: &FieldValue<'_>, collation: &Collation) -> Ordering {
    match (a, b) {
        (FieldValue::Text(sa), FieldValue::Text(sb)) => collation.compare(sa, sb),
        (FieldValue::Number(na), FieldValue::Number(nb)) => na.total_cmp(nb),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Number(_) => 0,
        FieldValue::Text(_) => 1,
        FieldValue::Null => 2,
    }
}

/// Reorder `rows` (indices into `items`) by `spec`, returning a new vector.
///
/// The sort is stable in both directions: descending negates the comparator
/// rather than reversing the ascending output, so tied rows keep their
/// input order either way.
pub fn sort_rows<R: Record>(
    items: &[R],
    rows: &[usize],
    spec: &SortSpec,
    collation: &Collation,
) -> Vec<usize> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|&a, &b| {
        let va = items[a].field(&spec.key);
        let vb = items[b].field(&spec.key);
        spec.direction.apply(compare_fields(&va, &vb, collation))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        group: &'static str,
        score: Option<u32>,
    }

    impl Record for Row {
        type Id = &'static str;
        const SEARCH_FIELDS: &'static [&'static str] = &["group"];

        fn id(&self) -> Self::Id {
            self.group
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "group" => FieldValue::text(self.group),
                "score" => self.score.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { group: "b", score: Some(10) },
            Row { group: "a", score: Some(2) },
            Row { group: "b", score: None },
            Row { group: "a", score: Some(30) },
            Row { group: "c", score: Some(2) },
        ]
    }

    #[test]
    fn test_toggle_semantics() {
        let spec = SortSpec::descending("joinDate");
        let toggled = spec.toggled("joinDate");
        assert_eq!(toggled, SortSpec::ascending("joinDate"));
        assert_eq!(toggled.toggled("joinDate"), spec);
        assert_eq!(spec.toggled("name"), SortSpec::ascending("name"));
    }

    #[test]
    fn test_stable_in_both_directions() {
        let items = rows();
        let collation = Collation::korean().unwrap();
        let all: Vec<usize> = (0..items.len()).collect();

        let asc = sort_rows(&items, &all, &SortSpec::ascending("group"), &collation);
        assert_eq!(asc, vec![1, 3, 0, 2, 4]);

        let desc = sort_rows(&items, &asc, &SortSpec::descending("group"), &collation);
        // Ties keep the order they had in the ascending output.
        assert_eq!(desc, vec![4, 0, 2, 1, 3]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let items = rows();
        let collation = Collation::korean().unwrap();
        let all: Vec<usize> = vec![0, 1, 3, 4];

        let asc = sort_rows(&items, &all, &SortSpec::ascending("score"), &collation);
        assert_eq!(asc, vec![1, 4, 0, 3]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let items: Vec<Row> = (0..300u32)
            .map(|i| Row {
                group: if i % 2 == 0 { "even" } else { "odd" },
                score: (i % 3 != 0).then_some((i * 7919) % 101),
            })
            .collect();
        let collation = Collation::korean().unwrap();
        let all: Vec<usize> = (0..items.len()).collect();

        let asc = sort_rows(&items, &all, &SortSpec::ascending("score"), &collation);
        let scores: Vec<Option<u32>> = asc.iter().map(|&i| items[i].score).collect();
        let present = scores.iter().take_while(|s| s.is_some()).count();
        assert_eq!(present, 200);
        assert!(scores[present..].iter().all(Option::is_none));
        assert!(scores[..present].windows(2).all(|w| w[0] <= w[1]));

        // Missing values keep their input order among themselves.
        let missing: Vec<usize> = asc[present..].to_vec();
        assert!(missing.windows(2).all(|w| w[0] < w[1]));

        let desc = sort_rows(&items, &all, &SortSpec::descending("score"), &collation);
        assert!(desc[..100].iter().all(|&i| items[i].score.is_none()));
        let desc_scores: Vec<u32> = desc[100..].iter().filter_map(|&i| items[i].score).collect();
        assert!(desc_scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_numbers_before_text() {
        let collation = Collation::korean().unwrap();
        let number = FieldValue::Number(5.0);
        let text = FieldValue::text("a");
        assert_eq!(compare_fields(&number, &text, &collation), Ordering::Less);
        assert_eq!(compare_fields(&text, &FieldValue::Null, &collation), Ordering::Less);
        assert_eq!(compare_fields(&FieldValue::Null, &FieldValue::Null, &collation), Ordering::Equal);
    }

    #[test]
    fn test_input_is_not_modified() {
        let items = rows();
        let collation = Collation::korean().unwrap();
        let input = vec![4, 3, 2, 1, 0];
        let _ = sort_rows(&items, &input, &SortSpec::ascending("group"), &collation);
        assert_eq!(input, vec![4, 3, 2, 1, 0]);
    }
}
