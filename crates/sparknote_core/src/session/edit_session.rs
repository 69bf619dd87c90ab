//! Edit-session state machine.
//!
//! # Responsibility
//! - Track which note (if any) the edit dialog targets.
//! - Hold staged field values until they are saved or discarded.
//!
//! # Invariants
//! - At most one session is active; opening another replaces it.
//! - Sessions address notes by stable id, not list position.
//! - `cancel` and `take_commit` always leave the session inactive.

use crate::model::note::{Note, NoteDraft, NoteId};

/// Staged edit of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub note_id: NoteId,
    pub draft: NoteDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Inactive,
    Editing(EditCommit),
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `note`, staging its current fields.
    pub fn open(&mut self, note: &Note) {
        *self = Self::Editing(EditCommit {
            note_id: note.id,
            draft: NoteDraft::new(
                note.title.clone(),
                note.content.clone(),
                note.tags_input(),
            ),
        });
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        match self {
            Self::Editing(commit) => Some(commit.note_id),
            Self::Inactive => None,
        }
    }

    pub fn staged(&self) -> Option<&NoteDraft> {
        match self {
            Self::Editing(commit) => Some(&commit.draft),
            Self::Inactive => None,
        }
    }

    /// Mutable staged fields; `None` while inactive.
    pub fn staged_mut(&mut self) -> Option<&mut NoteDraft> {
        match self {
            Self::Editing(commit) => Some(&mut commit.draft),
            Self::Inactive => None,
        }
    }

    /// Discards staged values. Returns whether a session was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        *self = Self::Inactive;
        was_active
    }

    /// Ends the session and hands back the staged values to commit.
    pub fn take_commit(&mut self) -> Option<EditCommit> {
        match std::mem::take(self) {
            Self::Editing(commit) => Some(commit),
            Self::Inactive => None,
        }
    }
}
