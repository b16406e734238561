//! QuickNote command-line front end.
//!
//! # Usage
//!
//! ```bash
//! quicknote add "Buy milk"
//! quicknote list
//! quicknote edit 1 "Buy oat milk"
//! quicknote delete 1
//! quicknote --flat shell
//! ```

mod render;
mod shell;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::warn;
use quicknote_core::config::{DEFAULT_DATA_DIR, ENV_DATA_DIR};
use quicknote_core::{
    default_log_level, init_logging, EditorState, NoteId, NoteStore, StoreConfig, StoreLocation,
    SubmitOutcome,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quicknote", version)]
#[command(about = "Local notes kept in SQLite, or a flat JSON store when SQLite is unavailable")]
struct Cli {
    /// Directory holding the note database and key-value files
    #[arg(long, env = ENV_DATA_DIR, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Treat SQLite as unavailable and use the flat JSON store
    #[arg(long)]
    flat: bool,
    /// trace|debug|info|warn|error
    #[arg(long, env = "QUICKNOTE_LOG_LEVEL")]
    log_level: Option<String>,
    /// Log directory (defaults to <data-dir>/logs)
    #[arg(long, env = "QUICKNOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a note
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List notes, newest first
    List,
    /// Replace the text of a note
    Edit {
        id: NoteId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a note after confirmation
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the storage backend selected for this session
    Backend,
    /// Interactive editing session
    Shell,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = absolutize(&cli.data_dir)?;

    let level = resolve_log_level(cli.log_level.as_deref());
    let log_dir = match &cli.log_dir {
        Some(dir) => absolutize(dir)?,
        None => data_dir.join("logs"),
    };
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut config = StoreConfig::from_env();
    config.location = StoreLocation::Directory(data_dir);
    if cli.flat {
        config = config.without_structured();
    }
    let mut store = NoteStore::initialize(&config).context("failed to open note storage")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Add { text } => {
            let text = text.join(" ");
            match EditorState::default().submit(&mut store, &text)?.1 {
                SubmitOutcome::Added(note) => writeln!(out, "Added note {}", note.id)?,
                _ => writeln!(out, "Nothing to add")?,
            }
        }
        Command::List => {
            write!(out, "{}", render::render_notes(&store.list()?))?;
        }
        Command::Edit { id, text } => {
            let state = EditorState::default().begin_edit(&store, id)?;
            if state.editing_id() != Some(id) {
                bail!("note {id} not found");
            }
            match state.submit(&mut store, &text.join(" "))?.1 {
                SubmitOutcome::Updated(note) => writeln!(out, "Saved note {}", note.id)?,
                _ => writeln!(out, "Nothing to save")?,
            }
        }
        Command::Delete { id, yes } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let (_, removed) = EditorState::default().delete(&mut store, id, || {
                yes || shell::confirm_delete(&mut input, &mut io::stderr())
            })?;
            if removed {
                writeln!(out, "Deleted note {id}")?;
            } else {
                warn!("event=cli_delete module=cli status=noop note_id={id}");
                writeln!(out, "No note deleted")?;
            }
        }
        Command::Backend => writeln!(out, "{}", store.backend_kind())?,
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut store, &mut stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn resolve_log_level(requested: Option<&str>) -> &str {
    requested.unwrap_or(default_log_level())
}

fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::resolve_log_level;
    use quicknote_core::default_log_level;

    #[test]
    fn log_level_flag_overrides_build_default() {
        let requested = String::from("warn");
        assert_eq!(resolve_log_level(Some(requested.as_str())), "warn");
        assert_eq!(resolve_log_level(None), default_log_level());
    }
}
