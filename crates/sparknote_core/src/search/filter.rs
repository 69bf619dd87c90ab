//! Free-text note filter.
//!
//! # Invariants
//! - A blank query returns every note.
//! - Matching is a case-insensitive substring test over title, content and
//!   space-joined tags.
//! - Output keeps input order.

use crate::model::note::Note;

/// Returns the notes matching `query`, preserving order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return notes.iter().collect();
    }
    notes.iter().filter(|note| matches(note, &needle)).collect()
}

/// Trims and lowercases raw search input.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Tests one note against an already-normalized query.
pub fn matches(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note.tags.join(" ").to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, matches};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use chrono::Utc;

    fn note(id: i64, title: &str, content: &str, tags: &str) -> Note {
        Note::with_id(
            NoteId(id),
            NoteDraft::new(title, content, tags).validate().unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn blank_query_is_identity() {
        let notes = vec![note(2, "b", "x", ""), note(1, "a", "y", "")];
        let all = filter_notes(&notes, "   ");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, NoteId(2));
        assert_eq!(all[1].id, NoteId(1));
    }

    #[test]
    fn matches_title_content_and_tags_case_insensitively() {
        let shopping = note(1, "Shopping", "buy milk", "errand");
        assert!(matches(&shopping, "errand"));
        assert_eq!(filter_notes(std::slice::from_ref(&shopping), "ERRAND").len(), 1);
        assert_eq!(filter_notes(std::slice::from_ref(&shopping), "shop").len(), 1);
        assert_eq!(filter_notes(std::slice::from_ref(&shopping), " MILK ").len(), 1);
        assert!(filter_notes(std::slice::from_ref(&shopping), "unrelated").is_empty());
    }

    #[test]
    fn tag_join_allows_matching_across_adjacent_tags() {
        let tagged = note(1, "t", "c", "food, errand");
        assert!(matches(&tagged, "food errand"));
        assert!(!matches(&tagged, "food,errand"));
    }

    #[test]
    fn result_preserves_newest_first_order() {
        let notes = vec![
            note(3, "milk run", "c", ""),
            note(2, "other", "c", ""),
            note(1, "more milk", "c", ""),
        ];
        let ids: Vec<_> = filter_notes(&notes, "milk").iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NoteId(3), NoteId(1)]);
    }
}
