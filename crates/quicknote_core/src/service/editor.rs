//! Editing state for the note input.
//!
//! # Responsibility
//! - Track which note (if any) the input is currently editing.
//! - Route a submit to `NoteStore::add` or `NoteStore::update`.
//! - Map key presses to editor actions.
//!
//! # Invariants
//! - `EditorState` is a plain value; every transition consumes the old
//!   state and returns the next one. `NoteStore` never sees it.
//! - Starting another edit, or cancelling, drops the pending edit without
//!   writing anything.

use crate::model::note::{is_blank, Note, NoteId};
use crate::repo::note_backend::StoreResult;
use crate::service::note_store::NoteStore;
use log::debug;

pub const SUBMIT_LABEL_ADD: &str = "Add";
pub const SUBMIT_LABEL_SAVE: &str = "Save";

/// Current edit target plus the text it was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    editing: Option<NoteId>,
    draft: String,
}

/// Outcome of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(Note),
    Updated(Note),
    /// Blank input; nothing persisted and the state is unchanged.
    Ignored,
}

impl EditorState {
    pub fn editing_id(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Text to place in the input when the state was entered.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            SUBMIT_LABEL_SAVE
        } else {
            SUBMIT_LABEL_ADD
        }
    }

    /// Loads `id` into the input for editing.
    ///
    /// An unknown id leaves the state as it was.
    pub fn begin_edit(self, store: &NoteStore, id: NoteId) -> StoreResult<Self> {
        match store.get(id)? {
            Some(note) => {
                if let Some(previous) = self.editing.filter(|previous| *previous != id) {
                    debug!("event=edit_discarded module=editor note_id={previous}");
                }
                Ok(Self {
                    editing: Some(id),
                    draft: note.text,
                })
            }
            None => Ok(self),
        }
    }

    /// Persists `input` as a new note or as the edit of the current target.
    pub fn submit(self, store: &mut NoteStore, input: &str) -> StoreResult<(Self, SubmitOutcome)> {
        if is_blank(input) {
            return Ok((self, SubmitOutcome::Ignored));
        }

        let outcome = match self.editing {
            Some(id) => store
                .update(id, input)?
                .map_or(SubmitOutcome::Ignored, SubmitOutcome::Updated),
            None => store
                .add(input)?
                .map_or(SubmitOutcome::Ignored, SubmitOutcome::Added),
        };
        Ok((Self::default(), outcome))
    }

    /// Abandons the pending edit. A no-op when idle.
    pub fn cancel(self) -> Self {
        if self.is_editing() {
            Self::default()
        } else {
            self
        }
    }

    /// Deletes `id` after `confirm` agrees.
    ///
    /// Returns the next state and whether a note was removed. Deleting the
    /// note under edit also ends the edit.
    pub fn delete(
        self,
        store: &mut NoteStore,
        id: NoteId,
        confirm: impl FnOnce() -> bool,
    ) -> StoreResult<(Self, bool)> {
        if !confirm() {
            return Ok((self, false));
        }

        let removed = store.remove(id)?;
        let next = if self.editing == Some(id) {
            Self::default()
        } else {
            self
        };
        Ok((next, removed))
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    CancelEdit,
    Ignore,
}

/// Enter submits, Shift+Enter inserts a newline, Escape cancels an edit.
pub fn key_action(key: Key, shift: bool, editing: bool) -> KeyAction {
    match key {
        Key::Enter if shift => KeyAction::InsertNewline,
        Key::Enter => KeyAction::Submit,
        Key::Escape if editing => KeyAction::CancelEdit,
        Key::Escape | Key::Other => KeyAction::Ignore,
    }
}
