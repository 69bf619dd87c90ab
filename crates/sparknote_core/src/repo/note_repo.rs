//! Note persistence adapter over a key-value store.
//!
//! # Responsibility
//! - Read and write the whole note list as one JSON blob under `notes`.
//! - Read and write the theme preference under `theme`.
//!
//! # Invariants
//! - The adapter holds only the serialized mirror, never live notes.
//! - Writes are wholesale; there is no partial update path.

use crate::model::note::Note;
use crate::model::theme::Theme;
use crate::repo::kv_store::{KvStore, RepoError, RepoResult};
use log::{debug, warn};

pub const NOTES_KEY: &str = "notes";
pub const THEME_KEY: &str = "theme";

/// Persistence contract used by the note store and controller.
pub trait NoteRepository {
    /// Loads the saved list; a missing blob is an empty list.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the saved list.
    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()>;
    /// Loads the theme; missing or unknown values fall back to the default.
    fn load_theme(&self) -> RepoResult<Theme>;
    fn save_theme(&mut self, theme: Theme) -> RepoResult<()>;
}

/// [`NoteRepository`] backed by any [`KvStore`].
pub struct KvNoteRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvNoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KvStore> NoteRepository for KvNoteRepository<S> {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let Some(blob) = self.store.get(NOTES_KEY)? else {
            return Ok(Vec::new());
        };
        let notes: Vec<Note> = serde_json::from_str(&blob)
            .map_err(|err| RepoError::InvalidData(format!("`{NOTES_KEY}` blob: {err}")))?;
        debug!(
            "event=notes_load module=repo status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let blob = serde_json::to_string(notes).map_err(RepoError::Encode)?;
        self.store.set(NOTES_KEY, &blob)?;
        debug!(
            "event=notes_save module=repo status=ok count={} bytes={}",
            notes.len(),
            blob.len()
        );
        Ok(())
    }

    fn load_theme(&self) -> RepoResult<Theme> {
        let Some(raw) = self.store.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        Ok(Theme::parse(&raw).unwrap_or_else(|| {
            warn!("event=theme_load module=repo status=fallback reason=unknown_value");
            Theme::default()
        }))
    }

    fn save_theme(&mut self, theme: Theme) -> RepoResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvNoteRepository, NoteRepository, NOTES_KEY, THEME_KEY};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use crate::model::theme::Theme;
    use crate::repo::kv_store::{KvStore, MemoryKvStore, RepoError};
    use chrono::{TimeZone, Utc};

    fn sample_note(id: i64, title: &str) -> Note {
        let fields = NoteDraft::new(title, "body", "a, b").validate().unwrap();
        Note::with_id(
            NoteId(id),
            fields,
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn missing_blob_loads_as_empty_list() {
        let repo = KvNoteRepository::new(MemoryKvStore::new());
        assert!(repo.load_notes().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let mut repo = KvNoteRepository::new(MemoryKvStore::new());
        let notes = vec![sample_note(2, "newer"), sample_note(1, "older")];
        repo.save_notes(&notes).unwrap();

        assert_eq!(repo.load_notes().unwrap(), notes);
        let raw = repo.store().get(NOTES_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn corrupt_blob_is_reported_as_invalid_data() {
        let mut store = MemoryKvStore::new();
        store.set(NOTES_KEY, "{not json").unwrap();
        let repo = KvNoteRepository::new(store);
        assert!(matches!(
            repo.load_notes().unwrap_err(),
            RepoError::InvalidData(_)
        ));
    }

    #[test]
    fn theme_defaults_to_dark_and_persists_as_plain_string() {
        let mut repo = KvNoteRepository::new(MemoryKvStore::new());
        assert_eq!(repo.load_theme().unwrap(), Theme::Dark);

        repo.save_theme(Theme::Light).unwrap();
        assert_eq!(repo.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(repo.load_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn unknown_theme_value_falls_back_to_default() {
        let mut store = MemoryKvStore::new();
        store.set(THEME_KEY, "neon").unwrap();
        let repo = KvNoteRepository::new(store);
        assert_eq!(repo.load_theme().unwrap(), Theme::Dark);
    }
}
