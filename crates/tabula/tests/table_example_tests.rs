//! The members table driven end to end through the local list pipeline.

use std::sync::Arc;

use parking_lot::Mutex;
use tabula::model::{Collation, SortDirection};
use tabula::pages::table_example::fields;
use tabula::pages::{MemberStatus, TableExample};

fn table() -> TableExample {
    TableExample::new(Collation::korean().unwrap()).unwrap()
}

fn names(table: &TableExample) -> Vec<&str> {
    table.visible().iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_default_view_is_newest_first() {
    let table = table();
    assert_eq!(table.list().sort().key, fields::JOIN_DATE);
    assert_eq!(table.list().sort().direction, SortDirection::Descending);
    assert_eq!(table.list().page_count(), 2);
    assert_eq!(
        names(&table),
        vec!["우지현", "신동협", "정은정", "최민준", "박지성"]
    );
}

#[test]
fn test_search_matches_single_member() {
    let mut table = table();
    table.set_search("이");

    assert_eq!(table.list().total_matching(), 1);
    assert_eq!(table.list().page_count(), 1);
    assert_eq!(names(&table), vec!["이순신"]);
}

#[test]
fn test_search_by_email_ignores_case() {
    let mut table = table();
    table.set_search("PARK@");
    assert_eq!(names(&table), vec!["박지성"]);
}

#[test]
fn test_toggle_join_date_keeps_item_set() {
    let mut table = table();
    let before: Vec<u32> = {
        let mut ids: Vec<u32> = table.list().matching().map(|m| m.id).collect();
        ids.sort_unstable();
        ids
    };

    table.toggle_sort(fields::JOIN_DATE);
    assert_eq!(table.list().sort().direction, SortDirection::Ascending);
    assert_eq!(names(&table)[0], "홍길동");

    let mut after: Vec<u32> = table.list().matching().map(|m| m.id).collect();
    after.sort_unstable();
    assert_eq!(before, after);
}

#[test]
fn test_sort_by_name_uses_korean_order() {
    let mut table = table();
    table.toggle_sort(fields::NAME);
    assert_eq!(table.list().sort().direction, SortDirection::Ascending);
    assert_eq!(
        names(&table),
        vec!["김영희", "박지성", "신동협", "우지현", "이순신"]
    );

    table.toggle_sort(fields::NAME);
    assert_eq!(names(&table)[0], "홍길동");
}

#[test]
fn test_role_filter_resets_page() {
    let mut table = table();
    assert!(table.go_to_page(2));
    assert_eq!(table.list().current_page(), 2);
    assert_eq!(table.visible().len(), 3);

    table.set_role_filter(Some("사용자"));
    assert_eq!(table.list().current_page(), 1);
    assert_eq!(table.list().total_matching(), 5);
    assert!(table.visible().iter().all(|m| m.role == "사용자"));

    table.set_status_filter(Some(MemberStatus::Inactive));
    assert_eq!(names(&table), vec!["이순신"]);

    table.set_role_filter(None);
    table.set_status_filter(None);
    assert_eq!(table.list().total_matching(), 8);
}

#[test]
fn test_sort_keeps_page() {
    let mut table = table();
    assert!(table.go_to_page(2));
    table.toggle_sort(fields::EMAIL);
    assert_eq!(table.list().current_page(), 2);
}

#[test]
fn test_out_of_range_page_is_rejected() {
    let mut table = table();
    assert!(!table.go_to_page(0));
    assert!(!table.go_to_page(3));
    assert_eq!(table.list().current_page(), 1);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let mut table = table();
    table.set_search("없는사람");
    assert!(table.list().is_empty());
    assert_eq!(table.list().page_count(), 1);
    assert!(table.visible().is_empty());
}

#[test]
fn test_view_changed_reports_summary() {
    let mut table = table();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    table
        .list()
        .view_changed()
        .connect(move |summary| sink.lock().push(*summary));

    table.set_search("이");
    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].total_matching, 1);
    assert_eq!(seen[0].visible, 1);
}
