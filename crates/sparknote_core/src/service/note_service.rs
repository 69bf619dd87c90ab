//! Note store use-cases.
//!
//! # Responsibility
//! - Own the in-memory, newest-first note list and note identity.
//! - Mirror every mutation to the persistence adapter before it becomes visible.
//!
//! # Invariants
//! - New notes are prepended.
//! - `create` requires non-empty trimmed title and content; `update` only
//!   re-trims and re-parses.
//! - A failed write leaves the in-memory list unchanged.

use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::kv_store::RepoError;
use crate::repo::note_repo::NoteRepository;
use chrono::{DateTime, SubsecRound, Utc};
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ID_TIE_BREAKER_RANGE: i64 = 9999;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title or content empty after trimming.
    Validation(NoteValidationError),
    /// Target note does not exist (stale id).
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordered note store over a persistence adapter.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NoteService<R> {
    /// Hydrates the store from the last saved list.
    pub fn load(repo: R) -> Result<Self, NoteServiceError> {
        let notes = repo.load_notes()?;
        info!(
            "event=note_store_load module=service status=ok count={}",
            notes.len()
        );
        Ok(Self { repo, notes })
    }

    /// Creates a note stamped with the current time.
    pub fn create(&mut self, draft: &NoteDraft) -> Result<NoteId, NoteServiceError> {
        self.create_at(draft, Utc::now(), &mut rand::thread_rng())
    }

    /// Creates a note with an explicit clock reading and tie-breaker source.
    pub fn create_at(
        &mut self,
        draft: &NoteDraft,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<NoteId, NoteServiceError> {
        let fields = match draft.validate() {
            Ok(fields) => fields,
            Err(err) => {
                warn!("event=note_create module=service status=rejected reason={err}");
                return Err(err.into());
            }
        };

        let created_at = now.trunc_subsecs(3);
        let id = self.next_id(created_at.timestamp_millis(), rng);
        let tag_count = fields.tags.len();

        let mut candidate = Vec::with_capacity(self.notes.len() + 1);
        candidate.push(Note::with_id(id, fields, created_at));
        candidate.extend(self.notes.iter().cloned());
        self.commit(candidate)?;

        info!("event=note_create module=service status=ok note_id={id} tag_count={tag_count}");
        Ok(id)
    }

    /// Re-trims and re-parses the fields of one note in place.
    ///
    /// Blank fields are accepted here; only creation validates.
    pub fn update(&mut self, id: NoteId, draft: &NoteDraft) -> Result<(), NoteServiceError> {
        let position = self.position_of(id)?;
        let mut candidate = self.notes.clone();
        candidate[position].apply(draft.normalize());
        self.commit(candidate)?;

        info!("event=note_update module=service status=ok note_id={id}");
        Ok(())
    }

    pub fn delete(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        let position = self.position_of(id)?;
        let mut candidate = self.notes.clone();
        candidate.remove(position);
        self.commit(candidate)?;

        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), NoteServiceError> {
        let removed = self.notes.len();
        self.commit(Vec::new())?;
        info!("event=note_clear_all module=service status=ok removed={removed}");
        Ok(())
    }

    /// Newest-first snapshot.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    fn position_of(&self, id: NoteId) -> Result<usize, NoteServiceError> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    fn next_id(&self, now_ms: i64, rng: &mut impl Rng) -> NoteId {
        let mut candidate = now_ms + rng.gen_range(0..ID_TIE_BREAKER_RANGE);
        while self.notes.iter().any(|note| note.id.0 == candidate) {
            candidate += 1;
        }
        NoteId(candidate)
    }

    fn commit(&mut self, candidate: Vec<Note>) -> Result<(), NoteServiceError> {
        if let Err(err) = self.repo.save_notes(&candidate) {
            warn!("event=notes_persist module=service status=error error={err}");
            return Err(err.into());
        }
        self.notes = candidate;
        Ok(())
    }
}
