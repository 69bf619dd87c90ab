//! Terminal implementation of the widget host.

use sparknote_core::view::html::render_list_html;
use sparknote_core::view::projector::EMPTY_STATE_MESSAGE;
use sparknote_core::{NoteListView, WidgetHost};
use std::io::{self, BufRead, Write};

/// Confirms on stdin (or unconditionally with `--yes`) and keeps the last render.
pub struct TerminalHost {
    assume_yes: bool,
    last_view: Option<NoteListView>,
}

impl TerminalHost {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            last_view: None,
        }
    }

    pub fn last_view(&self) -> Option<&NoteListView> {
        self.last_view.as_ref()
    }
}

impl WidgetHost for TerminalHost {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn render(&mut self, view: &NoteListView) {
        self.last_view = Some(view.clone());
    }
}

/// Plain-text rendering of the list area.
pub fn print_view(view: &NoteListView, html: bool) {
    if html {
        println!("{}", render_list_html(view));
        return;
    }
    match view {
        NoteListView::Empty => println!("{EMPTY_STATE_MESSAGE}"),
        NoteListView::Cards(cards) if cards.is_empty() => println!("No matching notes."),
        NoteListView::Cards(cards) => {
            for card in cards {
                println!("[{}] {}", card.note_id, card.title);
                println!("    {}", card.content.replace('\n', "\n    "));
                if !card.tag_labels.is_empty() {
                    println!("    {}", card.tag_labels.join(" "));
                }
            }
        }
    }
}
