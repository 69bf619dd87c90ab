//! Core logic for the SparkNote widget.
//! Hosts (browser bindings, the terminal shell) drive everything through
//! [`NotesController`]; this crate owns every note invariant.

pub mod app;
pub mod config;
pub mod db;
pub mod effects;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod view;

pub use app::controller::{
    ControllerError, ControllerResult, NotesController, WidgetHost, CONFIRM_CLEAR_MESSAGE,
    CONFIRM_DELETE_MESSAGE, VALIDATION_MESSAGE,
};
pub use app::keys::{Key, KeyInput, Shortcut};
pub use config::AppConfig;
pub use effects::frame::{drive_to_completion, FixedStepDriver, FrameDriver};
pub use effects::particles::{
    BurstConfig, FrameOutcome, Particle, ParticleCanvas, ParticleEngine, RecordingCanvas,
    Viewport,
};
pub use export::{export_all, parse_export, write_export, ExportError, ExportFile};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{parse_tags, Note, NoteDraft, NoteId, NoteValidationError};
pub use model::theme::Theme;
pub use repo::kv_store::{KvStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::note_repo::{KvNoteRepository, NoteRepository};
pub use search::filter::filter_notes;
pub use service::note_service::{NoteService, NoteServiceError};
pub use session::edit_session::{EditCommit, EditSession};
pub use view::projector::{project_cards, CardAction, NoteCard, NoteListView};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
