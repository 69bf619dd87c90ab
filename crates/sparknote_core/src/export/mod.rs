//! JSON export of the full note list.
//!
//! # Responsibility
//! - Serialize notes into a dated, pretty-printed JSON file.
//! - Hand the file to the host (write to disk for terminal hosts).
//!
//! # Invariants
//! - Exported bytes parse back into a list equal to the exported one.
//! - Filename is `notes-export-YYYY-MM-DD.json`.

use crate::model::note::Note;
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const EXPORT_MEDIA_TYPE: &str = "application/json";
const EXPORT_FILE_PREFIX: &str = "notes-export-";

#[derive(Debug)]
pub enum ExportError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode export: {err}"),
            Self::Decode(err) => write!(f, "failed to parse export: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Downloadable export payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub media_type: &'static str,
    /// UTF-8 JSON.
    pub bytes: Vec<u8>,
}

/// Builds the export file for `notes` dated `date`.
pub fn export_all(notes: &[Note], date: NaiveDate) -> Result<ExportFile, ExportError> {
    let bytes = serde_json::to_vec_pretty(notes).map_err(ExportError::Encode)?;
    Ok(ExportFile {
        filename: export_filename(date),
        media_type: EXPORT_MEDIA_TYPE,
        bytes,
    })
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Parses exported bytes back into notes.
pub fn parse_export(bytes: &[u8]) -> Result<Vec<Note>, ExportError> {
    serde_json::from_slice(bytes).map_err(ExportError::Decode)
}

/// Writes `file` into `dir`, creating the directory when needed.
pub fn write_export(dir: &Path, file: &ExportFile) -> Result<PathBuf, ExportError> {
    let path = dir.join(&file.filename);
    let result = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, &file.bytes));
    match result {
        Ok(()) => {
            info!(
                "event=export_write module=export status=ok bytes={}",
                file.bytes.len()
            );
            Ok(path)
        }
        Err(source) => {
            error!("event=export_write module=export status=error error={source}");
            Err(ExportError::Io { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{export_all, export_filename, parse_export, write_export, EXPORT_MEDIA_TYPE};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn notes() -> Vec<Note> {
        vec![
            Note::with_id(
                NoteId(2),
                NoteDraft::new("Shopping", "buy milk", "errand").validate().unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
            ),
            Note::with_id(
                NoteId(1),
                NoteDraft::new("Ideas", "<b>bold</b>", "").validate().unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn filename_embeds_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(export_filename(date), "notes-export-2024-02-09.json");
    }

    #[test]
    fn export_is_pretty_json_that_round_trips() {
        let notes = notes();
        let file = export_all(&notes, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).unwrap();

        assert_eq!(file.media_type, EXPORT_MEDIA_TYPE);
        let text = String::from_utf8(file.bytes.clone()).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"createdAt\": \"2024-06-02T09:00:00.000Z\""));
        assert_eq!(parse_export(&file.bytes).unwrap(), notes);
    }

    #[test]
    fn empty_list_exports_as_empty_array() {
        let file = export_all(&[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        assert_eq!(file.bytes, b"[]");
    }

    #[test]
    fn write_export_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let file = export_all(&notes(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).unwrap();

        let path = write_export(&target, &file).unwrap();
        assert_eq!(path, target.join("notes-export-2024-06-03.json"));
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes);
    }
}
