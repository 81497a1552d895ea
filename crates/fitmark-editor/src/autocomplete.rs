//! Mention autocomplete.
//!
//! ## Trigger detection
//! A pure function of `(buffer, cursor)`: look back from the cursor for the
//! nearest `@`. If the text between it and the cursor has no whitespace,
//! autocomplete is active with that text as the query. Text after the
//! cursor never matters.
//!
//! ## Reducer
//! [`Autocomplete::update`] threads an explicit [`EditorState`] through
//! editor events. Arrow keys move the selection (clamped), Enter splices the
//! selected candidate into the buffer as an encoded mention, Escape closes
//! the menu without touching the buffer.

use fitmark_core::{AutocompleteConfig, EntityReference, Error, Result};
use fitmark_parser::{encode_mention, is_encodable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::caret::{CaretLocator, CaretPoint};
use crate::catalog::Catalogs;

/// The character that opens a mention query
pub const TRIGGER: char = '@';

/// An open `@` query in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Byte offset of the `@`
    pub start: usize,
    /// Text between the `@` and the cursor
    pub query: String,
}

/// Detect an open mention query ending at `cursor`.
///
/// Returns `None` (inactive) when there is no `@` before the cursor, when
/// whitespace separates it from the cursor, or when `cursor` is not a valid
/// offset into `buffer`.
///
/// # Example
/// ```
/// use fitmark_editor::detect_trigger;
///
/// let trigger = detect_trigger("Try @bic", 8).unwrap();
/// assert_eq!(trigger.start, 4);
/// assert_eq!(trigger.query, "bic");
///
/// assert!(detect_trigger("Try @bic ", 9).is_none());
/// ```
pub fn detect_trigger(buffer: &str, cursor: usize) -> Option<Trigger> {
    let before = buffer.get(..cursor)?;
    let start = before.rfind(TRIGGER)?;
    let query = &before[start + TRIGGER.len_utf8()..];

    if query.chars().any(char::is_whitespace) {
        return None;
    }

    Some(Trigger {
        start,
        query: query.to_string(),
    })
}

/// Open autocomplete session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteState {
    /// Byte offset of the trigger `@`
    pub trigger_start: usize,
    pub query: String,
    pub candidates: Vec<EntityReference>,
    pub selected_index: usize,
}

impl AutocompleteState {
    /// The highlighted candidate, if any
    pub fn selected(&self) -> Option<&EntityReference> {
        self.candidates.get(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.candidates.len().saturating_sub(1));
    }
}

/// Buffer, cursor and the optional autocomplete session, as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub buffer: String,
    /// Byte offset into `buffer`
    pub cursor: usize,
    pub autocomplete: Option<AutocompleteState>,
}

impl EditorState {
    /// State with the cursor at the end of `buffer`
    pub fn new(buffer: impl Into<String>) -> Self {
        let buffer = buffer.into();
        Self {
            cursor: buffer.len(),
            buffer,
            autocomplete: None,
        }
    }

    /// Replace buffer and cursor after an edit by the host.
    ///
    /// Fails with [`Error::InvalidCursor`] when the cursor lies beyond the
    /// buffer or inside a multi-byte character; the state is left unchanged.
    pub fn apply_edit(&mut self, buffer: impl Into<String>, cursor: usize) -> Result<()> {
        let buffer = buffer.into();
        if !buffer.is_char_boundary(cursor) {
            return Err(Error::invalid_cursor(cursor, buffer.len()));
        }
        self.buffer = buffer;
        self.cursor = cursor;
        Ok(())
    }

    /// Whether an autocomplete session is open
    pub fn is_active(&self) -> bool {
        self.autocomplete.is_some()
    }

    /// Where to anchor the candidate menu: the caret position of the
    /// trigger `@`, when a session is open.
    pub fn menu_anchor(&self, locator: &impl CaretLocator) -> Option<CaretPoint> {
        let session = self.autocomplete.as_ref()?;
        Some(locator.locate(&self.buffer, session.trigger_start))
    }
}

/// Keys the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ArrowDown" | "Down" => Ok(Self::ArrowDown),
            "ArrowUp" | "Up" => Ok(Self::ArrowUp),
            "Enter" => Ok(Self::Enter),
            "Escape" | "Esc" => Ok(Self::Escape),
            other => Err(Error::validation_error(format!("Unknown key: {}", other))),
        }
    }
}

/// Something that happened in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer content changed
    Edit { buffer: String, cursor: usize },
    /// Cursor moved without an edit
    Cursor(usize),
    /// Key pressed
    Key(Key),
}

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub state: EditorState,
    /// The event was consumed; the host should suppress its default action
    pub handled: bool,
    /// Mention spliced into the buffer by this step
    pub committed: Option<EntityReference>,
}

impl Update {
    fn unhandled(state: EditorState) -> Self {
        Self {
            state,
            handled: false,
            committed: None,
        }
    }

    fn handled(state: EditorState) -> Self {
        Self {
            state,
            handled: true,
            committed: None,
        }
    }
}

/// Autocomplete reducer over a pair of catalogs.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    catalogs: Catalogs,
    config: AutocompleteConfig,
}

impl Autocomplete {
    /// Create with default settings
    pub fn new(catalogs: Catalogs) -> Self {
        Self::with_config(catalogs, AutocompleteConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(catalogs: Catalogs, config: AutocompleteConfig) -> Self {
        Self { catalogs, config }
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// Apply one event.
    ///
    /// # Example
    /// ```
    /// use fitmark_core::EntityReference;
    /// use fitmark_editor::{Autocomplete, Catalogs, EditorEvent, EditorState, Key};
    ///
    /// let autocomplete = Autocomplete::new(Catalogs::new(
    ///     Vec::new(),
    ///     vec![EntityReference::anatomy("Biceps Brachii", "biceps_brachii")],
    /// ));
    ///
    /// let typed = autocomplete.update(
    ///     EditorState::default(),
    ///     EditorEvent::Edit { buffer: "Try @bic".into(), cursor: 8 },
    /// );
    /// let done = autocomplete.update(typed.state, EditorEvent::Key(Key::Enter));
    ///
    /// assert_eq!(done.state.buffer, "Try @[Biceps Brachii](anatomy:biceps_brachii) ");
    /// assert_eq!(done.state.cursor, done.state.buffer.len());
    /// assert!(!done.state.is_active());
    /// ```
    pub fn update(&self, state: EditorState, event: EditorEvent) -> Update {
        match event {
            EditorEvent::Edit { buffer, cursor } => {
                let mut state = state;
                if let Err(e) = state.apply_edit(buffer.clone(), cursor) {
                    log::debug!("Ignoring cursor for edit: {}", e);
                    state.buffer = buffer;
                    state.cursor = cursor;
                }
                Update::unhandled(self.refresh(state))
            }
            EditorEvent::Cursor(cursor) => {
                let mut state = state;
                state.cursor = cursor;
                Update::unhandled(self.refresh(state))
            }
            EditorEvent::Key(key) => self.handle_key(state, key),
        }
    }

    /// Re-run trigger detection for the current buffer and cursor.
    ///
    /// The selection survives when the session's trigger and query are
    /// unchanged; otherwise it starts over at the first candidate.
    pub fn refresh(&self, mut state: EditorState) -> EditorState {
        let Some(trigger) = detect_trigger(&state.buffer, state.cursor) else {
            if state.autocomplete.take().is_some() {
                log::debug!("Autocomplete closed");
            }
            return state;
        };

        let selected_index = match &state.autocomplete {
            Some(previous)
                if previous.trigger_start == trigger.start && previous.query == trigger.query =>
            {
                previous.selected_index
            }
            _ => 0,
        };

        let candidates = self.catalogs.filter(&trigger.query, &self.config);
        log::debug!(
            "Autocomplete active at {} for {:?}: {} candidates",
            trigger.start,
            trigger.query,
            candidates.len()
        );

        let mut session = AutocompleteState {
            trigger_start: trigger.start,
            query: trigger.query,
            candidates,
            selected_index,
        };
        session.clamp_selection();
        state.autocomplete = Some(session);
        state
    }

    fn handle_key(&self, mut state: EditorState, key: Key) -> Update {
        let Some(session) = state.autocomplete.as_mut() else {
            return Update::unhandled(state);
        };

        match key {
            Key::ArrowDown => {
                session.selected_index += 1;
                session.clamp_selection();
                Update::handled(state)
            }
            Key::ArrowUp => {
                session.selected_index = session.selected_index.saturating_sub(1);
                Update::handled(state)
            }
            Key::Escape => {
                state.autocomplete = None;
                log::debug!("Autocomplete dismissed");
                Update::handled(state)
            }
            Key::Enter => {
                let selected = session.selected().cloned();
                match selected {
                    Some(candidate) => self.commit(state, candidate),
                    None => Update::unhandled(state),
                }
            }
        }
    }

    /// Replace `[trigger_start, cursor)` with the encoded candidate and a
    /// trailing space, leaving the cursor right after the space.
    fn commit(&self, mut state: EditorState, candidate: EntityReference) -> Update {
        let Some(session) = state.autocomplete.take() else {
            return Update::unhandled(state);
        };

        let start = session.trigger_start;
        let end = state.cursor;
        if start > end || state.buffer.get(start..end).is_none() {
            log::warn!(
                "Stale autocomplete span {}..{} in buffer of {} bytes",
                start,
                end,
                state.buffer.len()
            );
            return Update::unhandled(state);
        }

        if !is_encodable(&candidate) {
            log::warn!(
                "Candidate {}:{} will not decode back after insertion",
                candidate.entity_type,
                candidate.entity_id
            );
        }

        let mut inserted = encode_mention(&candidate);
        inserted.push(' ');

        state.buffer.replace_range(start..end, &inserted);
        state.cursor = start + inserted.len();
        log::debug!(
            "Committed mention {}:{}",
            candidate.entity_type,
            candidate.entity_id
        );

        Update {
            state,
            handled: true,
            committed: Some(candidate),
        }
    }
}
