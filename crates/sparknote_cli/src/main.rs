//! Terminal shell for the SparkNote widget core.
//!
//! # Responsibility
//! - Map command-line arguments onto controller events.
//! - Play the host role: stdin confirmations, exports written to disk,
//!   confetti frames simulated headlessly.

mod host;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use host::{print_view, TerminalHost};
use log::info;
use sparknote_core::config::{DATA_DIR_ENV, LOG_LEVEL_ENV};
use sparknote_core::db::open_db;
use sparknote_core::effects::frame::DEFAULT_FRAME_INTERVAL;
use sparknote_core::{
    core_version, drive_to_completion, init_logging, write_export, AppConfig, FixedStepDriver,
    KvNoteRepository, NoteId, NoteRepository, NotesController, ParticleEngine, RecordingCanvas,
    SqliteKvStore, WidgetHost,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "sparknote")]
#[command(version)]
#[command(about = "Sticky notes with tags, search and JSON export")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory holding the database, logs and exports
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Create a note
    Add {
        #[arg(allow_hyphen_values = true)]
        title: String,
        #[arg(allow_hyphen_values = true)]
        content: String,
        /// Comma-separated tags
        #[arg(allow_hyphen_values = true, default_value = "")]
        tags: String,
    },

    /// Show notes, optionally filtered
    List {
        query: Vec<String>,

        /// Print the card markup instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Change fields of one note; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        title: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        content: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        tags: Option<String>,
    },

    /// Delete one note
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete every note
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Write notes-export-YYYY-MM-DD.json
    Export {
        /// Target directory (defaults to <data-dir>/exports)
        dir: Option<PathBuf>,
    },

    /// Show or flip the color theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Print the core version
    Version,
}

impl Command {
    fn assume_yes(&self) -> bool {
        matches!(self, Self::Delete { yes: true, .. } | Self::Clear { yes: true })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Clear { .. } => "clear",
            Self::Export { .. } => "export",
            Self::Theme { .. } => "theme",
            Self::Version => "version",
        }
    }
}

type Controller<'conn> = NotesController<KvNoteRepository<SqliteKvStore<'conn>>, TerminalHost>;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sparknote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.command == Command::Version {
        println!("sparknote_core version={}", core_version());
        return Ok(());
    }

    let config = cli.config();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir().to_string_lossy()) {
        eprintln!("sparknote: logging disabled: {err}");
    }
    std::fs::create_dir_all(&config.data_dir)?;

    let conn = open_db(config.db_path())?;
    let repo = KvNoteRepository::new(SqliteKvStore::try_new(&conn)?);
    let confetti = ParticleEngine::new(config.burst.clone(), config.viewport);
    let host = TerminalHost::new(cli.command.assume_yes());
    let mut controller = NotesController::startup(repo, host, confetti)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );

    match cli.command {
        Command::Add {
            title,
            content,
            tags,
        } => add(&mut controller, title, content, tags)?,
        Command::List { query, html } => {
            controller.set_search_query(query.join(" "));
            if let Some(view) = controller.host().last_view() {
                print_view(view, html);
            }
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
        } => edit(&mut controller, NoteId(id), title, content, tags)?,
        Command::Delete { id, .. } => {
            let id = NoteId(id);
            if controller.request_delete(id)? {
                println!("Deleted {id}.");
            }
        }
        Command::Clear { .. } => {
            if controller.request_clear_all()? {
                println!("All notes cleared.");
            }
        }
        Command::Export { dir } => {
            export(&mut controller, dir.unwrap_or_else(|| config.export_dir()))?
        }
        Command::Theme { toggle } => {
            if toggle {
                controller.toggle_theme()?;
            }
            println!("theme={}", controller.theme());
        }
        Command::Version => {}
    }

    controller.shutdown();
    Ok(())
}

impl Cli {
    /// Flag or environment values take precedence over built-in defaults.
    fn config(&self) -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            DATA_DIR_ENV => self.data_dir.clone(),
            LOG_LEVEL_ENV => self.log_level.clone(),
            _ => None,
        })
    }
}

fn add<R: NoteRepository, H: WidgetHost>(
    controller: &mut NotesController<R, H>,
    title: String,
    content: String,
    tags: String,
) -> Result<(), Box<dyn Error>> {
    let form = controller.compose_mut();
    form.title = title;
    form.content = content;
    form.tags = tags;

    let started = Instant::now();
    let Some(id) = controller.submit_compose(started)? else {
        return Err("note was not created".into());
    };
    println!("Created {id}.");
    play_confetti(controller, started);
    Ok(())
}

fn edit(
    controller: &mut Controller<'_>,
    id: NoteId,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if !controller.open_edit(id) {
        return Err(format!("note not found: {id}").into());
    }
    if let Some(staged) = controller.staged_edit_mut() {
        if let Some(title) = title {
            staged.title = title;
        }
        if let Some(content) = content {
            staged.content = content;
        }
        if let Some(tags) = tags {
            staged.tags = tags;
        }
    }

    if controller.save_edit()? {
        println!("Updated {id}.");
    }
    Ok(())
}

fn export(controller: &mut Controller<'_>, dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let started = Instant::now();
    let file = controller.export(export_date(Utc::now()), started)?;
    let path = write_export(&dir, &file)?;
    println!(
        "Exported {} note(s) to {}.",
        controller.notes().len(),
        path.display()
    );
    play_confetti(controller, started);
    Ok(())
}

/// Export files are named after the UTC calendar date.
fn export_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Runs the confetti to completion on a headless canvas.
fn play_confetti<R: NoteRepository, H: WidgetHost>(
    controller: &mut NotesController<R, H>,
    started: Instant,
) {
    let mut canvas = RecordingCanvas::default();
    let mut driver = FixedStepDriver::new(started, DEFAULT_FRAME_INTERVAL);
    let frames = drive_to_completion(controller.confetti_mut(), &mut canvas, &mut driver);
    info!(
        "event=confetti_done module=cli status=ok frames={frames} draws={}",
        canvas.ellipses.len()
    );
}
