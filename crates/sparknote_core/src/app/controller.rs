//! Widget controller.
//!
//! # Responsibility
//! - Own the note store, edit session, compose form, search query, theme and
//!   confetti engine for one widget instance.
//! - Route host events (buttons, card actions, keys, frames) to them.
//!
//! # Invariants
//! - Every store mutation is followed by a re-render in the same call.
//! - Delete and clear-all need host confirmation; create and edit do not.
//! - Stale note ids (deleted elsewhere) are logged and ignored.

use crate::app::keys::{KeyInput, Shortcut};
use crate::effects::particles::{FrameOutcome, ParticleCanvas, ParticleEngine, Viewport};
use crate::export::{export_all, ExportError, ExportFile};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::theme::Theme;
use crate::repo::kv_store::RepoError;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::session::edit_session::EditSession;
use crate::view::projector::{project_cards, CardAction, NoteListView};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const VALIDATION_MESSAGE: &str = "Please enter both title and content.";
pub const CONFIRM_DELETE_MESSAGE: &str = "Delete this note?";
pub const CONFIRM_CLEAR_MESSAGE: &str = "Clear all notes?";

/// Host-side capabilities the controller calls back into.
pub trait WidgetHost {
    /// Blocking yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
    /// Blocking notification.
    fn alert(&mut self, message: &str);
    /// Replaces the visible note list.
    fn render(&mut self, view: &NoteListView);
    /// Feedback on the create control after a rejected submit (e.g. a shake).
    fn reject_compose(&mut self) {}
    /// Switches the widget's color scheme.
    fn apply_theme(&mut self, _theme: Theme) {}
}

#[derive(Debug)]
pub enum ControllerError {
    Notes(NoteServiceError),
    Repo(RepoError),
    Export(ExportError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notes(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Notes(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<NoteServiceError> for ControllerError {
    fn from(value: NoteServiceError) -> Self {
        Self::Notes(value)
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for ControllerError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// One widget instance; constructed at startup, consumed by [`NotesController::shutdown`].
pub struct NotesController<R: NoteRepository, H: WidgetHost> {
    notes: NoteService<R>,
    host: H,
    compose: NoteDraft,
    edit: EditSession,
    search_query: String,
    theme: Theme,
    confetti: ParticleEngine,
}

impl<R: NoteRepository, H: WidgetHost> NotesController<R, H> {
    /// Loads notes and theme, then renders the initial list.
    pub fn startup(repo: R, host: H, confetti: ParticleEngine) -> ControllerResult<Self> {
        let theme = repo.load_theme()?;
        let notes = NoteService::load(repo)?;
        let mut controller = Self {
            notes,
            host,
            compose: NoteDraft::default(),
            edit: EditSession::new(),
            search_query: String::new(),
            theme,
            confetti,
        };
        controller.host.apply_theme(theme);
        controller.refresh();
        info!(
            "event=controller_start module=app status=ok notes={} theme={}",
            controller.notes.len(),
            controller.theme
        );
        Ok(controller)
    }

    /// Tears down the widget and hands back the repository and host.
    pub fn shutdown(self) -> (R, H) {
        info!(
            "event=controller_stop module=app status=ok notes={}",
            self.notes.len()
        );
        let Self { notes, host, .. } = self;
        (notes.into_repository(), host)
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.list()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn compose(&self) -> &NoteDraft {
        &self.compose
    }

    /// Compose form inputs (title, tags, content).
    pub fn compose_mut(&mut self) -> &mut NoteDraft {
        &mut self.compose
    }

    /// Creates a note from the compose form.
    ///
    /// On validation failure the host is alerted, the form is kept and
    /// `Ok(None)` is returned. On success the form is cleared and a confetti
    /// burst starts.
    pub fn submit_compose(&mut self, now: Instant) -> ControllerResult<Option<NoteId>> {
        match self.notes.create(&self.compose) {
            Ok(id) => {
                self.compose.clear();
                self.refresh();
                self.celebrate(now);
                Ok(Some(id))
            }
            Err(NoteServiceError::Validation(_)) => {
                self.host.alert(VALIDATION_MESSAGE);
                self.host.reject_compose();
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes one note after confirmation. Returns whether it was removed.
    pub fn request_delete(&mut self, id: NoteId) -> ControllerResult<bool> {
        if !self.host.confirm(CONFIRM_DELETE_MESSAGE) {
            debug!("event=note_delete module=app status=declined note_id={id}");
            return Ok(false);
        }
        match self.notes.delete(id) {
            Ok(()) => {
                self.refresh();
                Ok(true)
            }
            Err(NoteServiceError::NoteNotFound(stale)) => {
                warn!("event=note_delete module=app status=stale note_id={stale}");
                self.refresh();
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Empties the store after confirmation; a no-op on an empty store.
    pub fn request_clear_all(&mut self) -> ControllerResult<bool> {
        if self.notes.is_empty() {
            return Ok(false);
        }
        if !self.host.confirm(CONFIRM_CLEAR_MESSAGE) {
            debug!("event=note_clear_all module=app status=declined");
            return Ok(false);
        }
        self.notes.clear_all()?;
        self.refresh();
        Ok(true)
    }

    /// Opens the edit dialog on `id`, replacing any active session.
    pub fn open_edit(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.get(id) else {
            warn!("event=edit_open module=app status=stale note_id={id}");
            return false;
        };
        self.edit.open(note);
        true
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    /// Edit dialog inputs; `None` while no session is active.
    pub fn staged_edit_mut(&mut self) -> Option<&mut NoteDraft> {
        self.edit.staged_mut()
    }

    /// Commits the staged edit and closes the dialog.
    ///
    /// Returns whether a note was updated. The dialog closes even when the
    /// target note no longer exists.
    pub fn save_edit(&mut self) -> ControllerResult<bool> {
        let Some(commit) = self.edit.take_commit() else {
            return Ok(false);
        };
        match self.notes.update(commit.note_id, &commit.draft) {
            Ok(()) => {
                self.refresh();
                Ok(true)
            }
            Err(NoteServiceError::NoteNotFound(stale)) => {
                warn!("event=edit_save module=app status=stale note_id={stale}");
                self.refresh();
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Discards the staged edit. Returns whether a session was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Updates the live search and re-renders.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh();
    }

    /// Current list projection for the active search query.
    pub fn view(&self) -> NoteListView {
        project_cards(self.notes.list(), &self.search_query)
    }

    pub fn handle_card_action(&mut self, action: CardAction) -> ControllerResult<bool> {
        match action {
            CardAction::Edit(id) => Ok(self.open_edit(id)),
            CardAction::Delete(id) => self.request_delete(id),
        }
    }

    /// Builds the export file for all notes and starts a confetti burst.
    pub fn export(&mut self, date: NaiveDate, now: Instant) -> ControllerResult<ExportFile> {
        let file = export_all(self.notes.list(), date)?;
        info!(
            "event=export module=app status=ok notes={} bytes={}",
            self.notes.len(),
            file.bytes.len()
        );
        self.celebrate(now);
        Ok(file)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips and persists the theme.
    pub fn toggle_theme(&mut self) -> ControllerResult<Theme> {
        let next = self.theme.toggle();
        self.notes.repository_mut().save_theme(next)?;
        self.theme = next;
        self.host.apply_theme(next);
        debug!("event=theme_toggle module=app status=ok theme={next}");
        Ok(next)
    }

    /// Applies a global keyboard shortcut, if `key` is bound to one.
    pub fn handle_key(
        &mut self,
        key: KeyInput,
        now: Instant,
    ) -> ControllerResult<Option<Shortcut>> {
        let Some(shortcut) = key.shortcut() else {
            return Ok(None);
        };
        match shortcut {
            Shortcut::CreateNote => {
                self.submit_compose(now)?;
            }
            Shortcut::CancelEdit => {
                self.cancel_edit();
            }
        }
        Ok(Some(shortcut))
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.confetti.resize(viewport);
    }

    pub fn confetti(&self) -> &ParticleEngine {
        &self.confetti
    }

    pub fn confetti_mut(&mut self) -> &mut ParticleEngine {
        &mut self.confetti
    }

    /// Advances the confetti by one frame.
    pub fn tick_animation(
        &mut self,
        now: Instant,
        canvas: &mut impl ParticleCanvas,
    ) -> FrameOutcome {
        self.confetti.step(now, canvas)
    }

    fn celebrate(&mut self, now: Instant) {
        let new_loop = self.confetti.burst(&mut rand::thread_rng(), now);
        debug!(
            "event=confetti_burst module=app status=ok particles={} new_loop={new_loop}",
            self.confetti.particles().len()
        );
    }

    fn refresh(&mut self) {
        let view = self.view();
        self.host.render(&view);
    }
}
