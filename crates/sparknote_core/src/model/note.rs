//! Note record and field normalization.
//!
//! # Responsibility
//! - Define the persisted note shape (`id`, `title`, `content`, `tags`, `createdAt`).
//! - Normalize free-form form input into note fields.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - Tag order follows the comma-separated input; duplicates are kept.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Note identity: creation epoch milliseconds plus a random tie-breaker.
///
/// Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// UTC, millisecond precision.
    #[serde(with = "millis_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note from already-normalized fields.
    pub fn with_id(id: NoteId, fields: NoteFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            tags: fields.tags,
            created_at,
        }
    }

    /// Overwrites the mutable fields; identity and creation time stay.
    pub fn apply(&mut self, fields: NoteFields) {
        self.title = fields.title;
        self.content = fields.content;
        self.tags = fields.tags;
    }

    /// Tags in the `a, b, c` form used by edit inputs.
    pub fn tags_input(&self) -> String {
        self.tags.join(", ")
    }
}

/// Raw form input for one note, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub tags: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            tags: tags.into(),
            content: content.into(),
        }
    }

    /// Trims text fields and parses tags without checking emptiness.
    pub fn normalize(&self) -> NoteFields {
        NoteFields {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            tags: parse_tags(&self.tags),
        }
    }

    /// Normalizes and requires non-empty title and content.
    pub fn validate(&self) -> Result<NoteFields, NoteValidationError> {
        let fields = self.normalize();
        if fields.title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if fields.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(fields)
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.tags.clear();
        self.content.clear();
    }
}

/// Normalized note fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Rejected note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Splits comma-separated tag input into lowercase, trimmed, non-empty tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// `createdAt` always carries three fractional digits (`...T08:30:00.000Z`).
mod millis_timestamp {
    use super::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, Note, NoteDraft, NoteId, NoteValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_tags_trims_lowercases_and_drops_blanks() {
        assert_eq!(parse_tags("a, B , ,c"), vec!["a", "b", "c"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn parse_tags_keeps_duplicates_in_input_order() {
        assert_eq!(parse_tags("work, Home, WORK"), vec!["work", "home", "work"]);
    }

    #[test]
    fn validate_rejects_blank_title_or_content() {
        let blank_title = NoteDraft::new("   ", "body", "");
        assert_eq!(
            blank_title.validate().unwrap_err(),
            NoteValidationError::EmptyTitle
        );
        let blank_content = NoteDraft::new("title", "\n\t", "");
        assert_eq!(
            blank_content.validate().unwrap_err(),
            NoteValidationError::EmptyContent
        );
    }

    #[test]
    fn serializes_with_camel_case_created_at_and_numeric_id() {
        let fields = NoteDraft::new(" Shopping ", " buy milk ", "Errand")
            .validate()
            .unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let note = Note::with_id(NoteId(1_714_552_200_123), fields, created_at);

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], 1_714_552_200_123_i64);
        assert_eq!(json["title"], "Shopping");
        assert_eq!(json["tags"][0], "errand");
        assert_eq!(json["createdAt"], "2024-05-01T08:30:00.000Z");
    }

    #[test]
    fn created_at_keeps_milliseconds_and_reads_back() {
        let fields = NoteDraft::new("t", "c", "").validate().unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
            + chrono::Duration::milliseconds(42);
        let note = Note::with_id(NoteId(7), fields, created_at);

        let text = serde_json::to_string(&note).unwrap();
        assert!(text.contains(r#""createdAt":"2024-05-01T08:30:00.042Z""#));
        let parsed: Note = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, note);

        let without_fraction =
            r#"{"id":7,"title":"t","content":"c","tags":[],"createdAt":"2024-05-01T08:30:00Z"}"#;
        let legacy: Note = serde_json::from_str(without_fraction).unwrap();
        assert_eq!(
            legacy.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn tags_input_joins_with_comma_space() {
        let fields = NoteDraft::new("t", "c", "food, errand").validate().unwrap();
        let note = Note::with_id(NoteId(1), fields, Utc::now());
        assert_eq!(note.tags_input(), "food, errand");
    }
}
