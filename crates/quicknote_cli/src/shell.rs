//! Line-oriented editing session.
//!
//! A plain line submits the input. A line ending in `\` keeps the note
//! open and continues it on a new line. `:cancel` abandons an edit and any
//! continued lines, even mid-note. Other `:` commands are read only at the
//! start of a note; a note that itself starts with `:` is typed as `::`.

use crate::render::render_notes;
use quicknote_core::{key_action, EditorState, Key, KeyAction, NoteId, NoteStore, SubmitOutcome};
use std::io::{BufRead, Write};

const CONTINUATION_MARKER: char = '\\';
const CANCEL_COMMAND: &str = ":cancel";

/// Runs the session until `:quit` or end of input.
pub fn run(
    store: &mut NoteStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut state = EditorState::default();
    let mut buffer = String::new();

    write!(out, "{}", render_notes(&store.list()?))?;
    loop {
        write!(out, "[{}]> ", state.submit_label())?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };

        if line.trim() == CANCEL_COMMAND {
            match key_action(Key::Escape, false, state.is_editing()) {
                KeyAction::CancelEdit => {
                    state = state.cancel();
                    buffer.clear();
                    writeln!(out, "Edit cancelled")?;
                }
                _ => writeln!(out, "Nothing to cancel")?,
            }
            continue;
        }

        let mut line = line;
        if buffer.is_empty() {
            if let Some(escaped) = line.strip_prefix("::") {
                line = format!(":{escaped}");
            } else if let Some(command) = line.strip_prefix(':') {
                let mut parts = command.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some("quit" | "q"), _) => break,
                    (Some("list"), _) => write!(out, "{}", render_notes(&store.list()?))?,
                    (Some("edit"), Some(raw_id)) => match raw_id.parse::<NoteId>() {
                        Ok(id) => {
                            state = state.begin_edit(store, id)?;
                            if state.editing_id() == Some(id) {
                                writeln!(out, "Editing note {id}:\n{}", state.draft())?;
                            } else {
                                writeln!(out, "Note {id} not found")?;
                            }
                        }
                        Err(_) => writeln!(out, "Invalid note id `{raw_id}`")?,
                    },
                    (Some("delete"), Some(raw_id)) => match raw_id.parse::<NoteId>() {
                        Ok(id) => {
                            let (next, removed) = state.delete(store, id, || {
                                confirm_delete(&mut *input, &mut *out)
                            })?;
                            state = next;
                            if removed {
                                write!(out, "{}", render_notes(&store.list()?))?;
                            }
                        }
                        Err(_) => writeln!(out, "Invalid note id `{raw_id}`")?,
                    },
                    _ => writeln!(
                        out,
                        "Commands: :list :edit <id> :delete <id> :cancel :quit (start a note with :: to type a leading :)"
                    )?,
                }
                continue;
            }
        }

        let (text, shift) = match line.strip_suffix(CONTINUATION_MARKER) {
            Some(head) => (head, true),
            None => (line.as_str(), false),
        };
        buffer.push_str(text);
        match key_action(Key::Enter, shift, state.is_editing()) {
            KeyAction::InsertNewline => buffer.push('\n'),
            KeyAction::Submit => {
                let submitted = std::mem::take(&mut buffer);
                let (next, outcome) = state.submit(store, &submitted)?;
                state = next;
                if outcome != SubmitOutcome::Ignored {
                    write!(out, "{}", render_notes(&store.list()?))?;
                }
            }
            KeyAction::CancelEdit | KeyAction::Ignore => {}
        }
    }

    Ok(())
}

/// Asks `Delete this note? [y/N]`; anything but yes declines.
pub fn confirm_delete(input: &mut impl BufRead, out: &mut impl Write) -> bool {
    if write!(out, "Delete this note? [y/N] ")
        .and_then(|()| out.flush())
        .is_err()
    {
        return false;
    }
    match read_line(input) {
        Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
