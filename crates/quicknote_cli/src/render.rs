//! Plain-text rendering of the note list.

use chrono::{DateTime, Local};
use quicknote_core::Note;
use std::fmt::Write;

pub const EMPTY_LIST_MESSAGE: &str = "No notes";

/// Renders notes in the order given; callers pass `NoteStore::list` output.
pub fn render_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    let mut out = String::new();
    for note in notes {
        let mut lines = note.text.lines();
        let first = lines.next().unwrap_or_default();
        let _ = writeln!(out, "[{}] {}", note.id, first);
        for line in lines {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "    Created: {}", format_timestamp(note.created_at));
        let _ = writeln!(out, "    Updated: {}", format_timestamp(note.updated_at));
    }
    out
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| format!("{epoch_ms}ms"))
}

#[cfg(test)]
mod tests {
    use super::{render_notes, EMPTY_LIST_MESSAGE};
    use quicknote_core::Note;

    #[test]
    fn empty_list_shows_placeholder() {
        assert_eq!(render_notes(&[]), format!("{EMPTY_LIST_MESSAGE}\n"));
    }

    #[test]
    fn multiline_text_is_indented_under_the_id() {
        let rendered = render_notes(&[Note::new(3, "first\nsecond", 0)]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "[3] first");
        assert_eq!(lines[1], "    second");
        assert!(lines[2].starts_with("    Created: "));
        assert!(lines[3].starts_with("    Updated: "));
    }
}
