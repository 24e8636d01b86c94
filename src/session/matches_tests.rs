use super::*;

fn set_of(texts: &[&str]) -> MatchSet {
    let mut start = 0;
    let spans = texts
        .iter()
        .map(|text| {
            let len = text.chars().count();
            let span = SentenceSpan::new(*text, start, start + len);
            start += len + 1;
            span
        })
        .collect();
    MatchSet::from_spans(spans)
}

#[test]
fn new_set_has_no_cursor() {
    let set = set_of(&["a.", "b."]);
    assert_eq!(set.cursor(), None);
    assert!(set.current().is_none());
}

#[test]
fn select_index_ignores_out_of_range() {
    let mut set = set_of(&["a.", "b."]);
    assert!(set.select_index(1));
    assert!(!set.select_index(2));
    assert_eq!(set.cursor(), Some(1));
    assert!(!set.select_index(1));
}

#[test]
fn select_index_on_empty_set_is_noop() {
    let mut set = MatchSet::new();
    assert!(!set.select_index(0));
    assert_eq!(set.cursor(), None);
}

#[test]
fn next_stops_at_last_entry() {
    let mut set = set_of(&["a.", "b.", "c."]);
    assert!(set.select_index(1));
    assert!(set.next());
    assert_eq!(set.cursor(), Some(2));
    assert!(!set.next());
    assert_eq!(set.cursor(), Some(2));
}

#[test]
fn previous_stops_at_first_entry() {
    let mut set = set_of(&["a.", "b."]);
    set.select_index(1);
    assert!(set.previous());
    assert!(!set.previous());
    assert_eq!(set.cursor(), Some(0));
}

#[test]
fn next_without_cursor_selects_first_entry() {
    let mut set = set_of(&["a.", "b."]);
    assert!(set.next());
    assert_eq!(set.cursor(), Some(0));
}

#[test]
fn previous_without_cursor_stays_unset() {
    let mut set = set_of(&["a.", "b."]);
    assert!(!set.previous());
    assert_eq!(set.cursor(), None);
}

#[test]
fn navigation_on_empty_set_is_noop() {
    let mut set = MatchSet::new();
    assert!(!set.next());
    assert!(!set.previous());
    assert_eq!(set.cursor(), None);
}

#[test]
fn reconcile_in_place_shifts_only_later_entries() {
    let mut set = set_of(&["Cat a.", "Cat bb.", "Cat ccc."]);
    set.select_index(1);
    set.reconcile_edit(1, "Cat bbbbb.", true, 3);

    let entries = set.entries();
    assert_eq!(entries[0], SentenceSpan::new("Cat a.", 0, 6));
    assert_eq!(entries[1], SentenceSpan::new("Cat bbbbb.", 7, 17));
    assert_eq!(entries[2], SentenceSpan::new("Cat ccc.", 18, 26));
    assert_eq!(set.cursor(), Some(1));
}

#[test]
fn reconcile_removal_shifts_the_entry_that_slides_into_place() {
    let mut set = set_of(&["Cat a.", "Cat bb.", "Cat ccc."]);
    set.select_index(1);
    set.reconcile_edit(1, "Dog.", false, -3);

    assert_eq!(set.len(), 2);
    assert_eq!(set.entries()[1], SentenceSpan::new("Cat ccc.", 12, 20));
    assert_eq!(set.cursor(), Some(1));
}

#[test]
fn reconcile_removal_of_last_index_clamps_cursor() {
    let mut set = set_of(&["Cat a.", "Cat bb."]);
    set.select_index(1);
    set.reconcile_edit(1, "Dog.", false, -3);
    assert_eq!(set.cursor(), Some(0));
}

#[test]
fn reconcile_removal_of_only_entry_clears_cursor() {
    let mut set = set_of(&["Cat a."]);
    set.select_index(0);
    set.reconcile_edit(0, "", false, -6);
    assert!(set.is_empty());
    assert_eq!(set.cursor(), None);
}

#[test]
fn reconcile_with_stale_index_does_nothing() {
    let mut set = set_of(&["Cat a."]);
    set.reconcile_edit(4, "x", true, 1);
    assert_eq!(set.entries()[0], SentenceSpan::new("Cat a.", 0, 6));
}

#[test]
fn clear_resets_cursor() {
    let mut set = set_of(&["a."]);
    set.select_index(0);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.cursor(), None);
}
