use std::sync::Once;

use pretty_assertions::assert_eq;
use source_import_core::{merge_import, merge_sources, parse_catalog, SourceGroup, SourceRecord};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(import_logging::initialize_for_tests);
}

fn record(id: &str, name: &str, priority: u32) -> SourceRecord {
    SourceRecord {
        id: id.to_string(),
        name: name.to_string(),
        base_url: format!("http://{id}.example.com"),
        search_path: String::new(),
        detail_path: String::new(),
        enabled: true,
        priority,
        group: SourceGroup::Standard,
    }
}

fn ids(records: &[SourceRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn matched_record_is_overwritten_in_place() {
    init_logging();
    let existing = vec![record("x", "Old", 5)];
    let incoming = vec![record("x", "New", 1)];

    let merged = merge_sources(&existing, &incoming);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].name, "New");
    assert_eq!(merged[0].priority, 1);
}

#[test]
fn overwrite_replaces_local_customizations() {
    init_logging();
    let mut customized = record("x", "X", 9);
    customized.enabled = false;
    customized.search_path = "/search".to_string();

    let merged = merge_sources(&[customized], &[record("x", "X", 1)]);

    assert!(merged[0].enabled);
    assert_eq!(merged[0].search_path, "");
    assert_eq!(merged[0].priority, 1);
}

#[test]
fn existing_positions_kept_and_new_records_appended() {
    init_logging();
    let existing = vec![record("a", "A", 1), record("b", "B", 2), record("c", "C", 3)];
    let incoming = vec![record("d", "D", 1), record("b", "B2", 1), record("e", "E", 1)];

    let merged = merge_sources(&existing, &incoming);

    assert_eq!(ids(&merged), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(merged[1].name, "B2");
    assert_eq!(merged[0], existing[0]);
    assert_eq!(merged[2], existing[2]);
}

#[test]
fn appended_priority_is_position_at_insertion() {
    init_logging();
    let existing = vec![record("a", "A", 1), record("b", "B", 1)];
    let incoming = vec![record("c", "C", 40), record("d", "D", 1)];

    let merged = merge_sources(&existing, &incoming);

    for (index, rec) in merged.iter().enumerate().skip(existing.len()) {
        assert_eq!(rec.priority as usize, index + 1, "{}", rec.id);
    }
}

#[test]
fn duplicate_in_batch_updates_appended_copy() {
    init_logging();
    let incoming = vec![record("n", "First", 1), record("n", "Second", 6)];

    let merged = merge_sources(&[], &incoming);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].name, "Second");
    assert_eq!(merged[0].priority, 6);
}

#[test]
fn update_only_batch_is_idempotent() {
    init_logging();
    let result = parse_catalog(
        r#"[{"id":"a","name":"A","baseUrl":"http://a.com"},
            {"id":"b","name":"B","baseUrl":"http://b.com","priority":2}]"#,
    )
    .unwrap();
    let existing = vec![record("a", "stale", 1), record("b", "stale", 2)];

    let once = merge_sources(&existing, &result.standard);
    let twice = merge_sources(&once, &result.standard);

    assert_eq!(once, twice);
}

#[test]
fn reapplying_an_import_reaches_a_fixpoint() {
    init_logging();
    let result = parse_catalog(
        r#"[{"id":"a","name":"A","baseUrl":"http://a.com"},
            {"id":"b","name":"B","baseUrl":"http://b.com"}]"#,
    )
    .unwrap();
    let existing = vec![record("z", "Z", 1)];

    let first = merge_sources(&existing, &result.standard);
    let second = merge_sources(&first, &result.standard);
    let third = merge_sources(&second, &result.standard);

    assert_eq!(ids(&first), ids(&second));
    assert_eq!(second, third);
}

#[test]
fn merge_import_keeps_groups_apart() {
    init_logging();
    let result = parse_catalog(
        r#"{"sources":[
            {"id":"s","name":"S","baseUrl":"http://s.com"},
            {"id":"r","name":"R","baseUrl":"http://r.com","group":"adult"}]}"#,
    )
    .unwrap();
    let standard = vec![record("a", "A", 1)];

    let (standard, restricted) = merge_import(&standard, &[], &result);

    assert_eq!(ids(&standard), vec!["a", "s"]);
    assert_eq!(standard[1].priority, 2);
    assert_eq!(ids(&restricted), vec!["r"]);
    assert_eq!(restricted[0].priority, 1);
    assert_eq!(restricted[0].group, SourceGroup::Restricted);
}
