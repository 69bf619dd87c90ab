//! HTML markup for note cards.

use crate::view::projector::{NoteCard, NoteListView, EMPTY_STATE_MESSAGE};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HTML_SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[&<>"']"#).expect("valid html escape regex"));

/// Escapes `& < > " '` for safe inclusion in element text or attributes.
pub fn escape_html(value: &str) -> String {
    HTML_SPECIAL_RE
        .replace_all(value, |caps: &Captures<'_>| match &caps[0] {
            "&" => "&amp;",
            "<" => "&lt;",
            ">" => "&gt;",
            "\"" => "&quot;",
            _ => "&#39;",
        })
        .into_owned()
}

pub fn render_card_html(card: &NoteCard) -> String {
    let tags = card
        .tag_labels
        .iter()
        .map(|label| format!("<span class=\"tag\">{}</span>", escape_html(label)))
        .collect::<String>();
    format!(
        "<article class=\"note-card\" data-note-id=\"{id}\">\
<div class=\"card-actions\">\
<button class=\"icon-btn\" title=\"Edit\" data-action=\"edit\">\u{270f}\u{fe0f}</button>\
<button class=\"icon-btn\" title=\"Delete\" data-action=\"delete\">\u{274c}</button>\
</div>\
<h3>{title}</h3><p>{content}</p><div class=\"tags\">{tags}</div></article>",
        id = card.note_id,
        title = escape_html(&card.title),
        content = escape_html(&card.content),
    )
}

/// Renders the whole list area.
pub fn render_list_html(view: &NoteListView) -> String {
    match view {
        NoteListView::Empty => format!(
            "<div class=\"note-card empty-state\">{}</div>",
            escape_html(EMPTY_STATE_MESSAGE)
        ),
        NoteListView::Cards(cards) => cards.iter().map(render_card_html).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_list_html};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use crate::view::projector::{project_cards, NoteListView};
    use chrono::Utc;

    #[test]
    fn escape_html_replaces_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn rendered_cards_are_escaped_and_ordered() {
        let notes = vec![
            Note::with_id(
                NoteId(2),
                NoteDraft::new("<script>", "a & b", "x").validate().unwrap(),
                Utc::now(),
            ),
            Note::with_id(
                NoteId(1),
                NoteDraft::new("older", "body", "").validate().unwrap(),
                Utc::now(),
            ),
        ];
        let html = render_list_html(&project_cards(&notes, ""));

        assert!(html.contains("<h3>&lt;script&gt;</h3>"));
        assert!(html.contains("<p>a &amp; b</p>"));
        assert!(html.contains("<span class=\"tag\">#x</span>"));
        let newer = html.find("data-note-id=\"2\"").unwrap();
        let older = html.find("data-note-id=\"1\"").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn empty_view_renders_placeholder() {
        let html = render_list_html(&NoteListView::Empty);
        assert!(html.contains("No notes yet"));
    }
}
