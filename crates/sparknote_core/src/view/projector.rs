//! Note list to card projection.
//!
//! # Invariants
//! - Card order matches the (filtered) list order.
//! - Every card carries exactly one edit and one delete action for its note.
//! - The empty placeholder appears only when no notes are stored at all.

use crate::model::note::{Note, NoteId};
use crate::search::filter::filter_notes;

pub const EMPTY_STATE_MESSAGE: &str = "No notes yet \u{2014} add a new note to get started \u{2728}";

/// Per-card action routed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit(NoteId),
    Delete(NoteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
    /// Tags prefixed with `#`.
    pub tag_labels: Vec<String>,
    pub actions: [CardAction; 2],
}

impl NoteCard {
    pub fn from_note(note: &Note) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            tag_labels: note.tags.iter().map(|tag| format!("#{tag}")).collect(),
            actions: [CardAction::Edit(note.id), CardAction::Delete(note.id)],
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListView {
    /// Nothing stored yet.
    Empty,
    /// Matching cards; may be empty when the query matches nothing.
    Cards(Vec<NoteCard>),
}

impl NoteListView {
    pub fn cards(&self) -> &[NoteCard] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }
}

/// Projects `notes` filtered by `query` into cards.
pub fn project_cards(notes: &[Note], query: &str) -> NoteListView {
    if notes.is_empty() {
        return NoteListView::Empty;
    }
    NoteListView::Cards(
        filter_notes(notes, query)
            .into_iter()
            .map(NoteCard::from_note)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::{project_cards, CardAction, NoteListView};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use chrono::Utc;

    fn note(id: i64, title: &str, tags: &str) -> Note {
        Note::with_id(
            NoteId(id),
            NoteDraft::new(title, "body", tags).validate().unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn empty_store_projects_placeholder() {
        assert_eq!(project_cards(&[], ""), NoteListView::Empty);
        assert!(project_cards(&[], "x").cards().is_empty());
    }

    #[test]
    fn cards_follow_list_order_with_actions_and_tag_labels() {
        let notes = vec![note(2, "second", "a, b"), note(1, "first", "")];
        let view = project_cards(&notes, "");
        let cards = view.cards();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].note_id, NoteId(2));
        assert_eq!(cards[0].tag_labels, vec!["#a", "#b"]);
        assert_eq!(
            cards[1].actions,
            [CardAction::Edit(NoteId(1)), CardAction::Delete(NoteId(1))]
        );
    }

    #[test]
    fn unmatched_query_yields_no_cards_but_not_placeholder() {
        let notes = vec![note(1, "first", "")];
        assert_eq!(
            project_cards(&notes, "zzz"),
            NoteListView::Cards(Vec::new())
        );
    }
}
