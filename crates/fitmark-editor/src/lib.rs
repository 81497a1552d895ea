//! # Fitmark Editor
//!
//! Authoring-side mention autocomplete. Typing `@` in a free-text buffer
//! opens a candidate menu fed by two caller-supplied catalogs; committing a
//! candidate splices its encoded mention into the buffer.
//!
//! Everything here is a pure function of explicit state, so hosts (a web
//! text area, a TUI, a test) drive it the same way:
//!
//! ```
//! use fitmark_core::EntityReference;
//! use fitmark_editor::prelude::*;
//!
//! let autocomplete = Autocomplete::new(Catalogs::new(
//!     vec![EntityReference::exercise("Bicep Curl", "ex_123")],
//!     vec![EntityReference::anatomy("Biceps Brachii", "biceps_brachii")],
//! ));
//!
//! let update = autocomplete.update(
//!     EditorState::default(),
//!     EditorEvent::Edit { buffer: "Try @bic".into(), cursor: 8 },
//! );
//! let session = update.state.autocomplete.as_ref().unwrap();
//! assert_eq!(session.query, "bic");
//! assert_eq!(session.candidates.len(), 2);
//!
//! let anchor = update.state.menu_anchor(&MonospaceLocator::default()).unwrap();
//! assert_eq!(anchor.column, 4);
//! ```

pub mod autocomplete;
pub mod caret;
pub mod catalog;

pub use autocomplete::{
    Autocomplete, AutocompleteState, EditorEvent, EditorState, Key, TRIGGER, Trigger, Update,
    detect_trigger,
};
pub use caret::{CaretLocator, CaretPoint, FontMetrics, MonospaceLocator};
pub use catalog::{CatalogEntry, Catalogs};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::autocomplete::{
        Autocomplete, AutocompleteState, EditorEvent, EditorState, Key, Update, detect_trigger,
    };
    pub use crate::caret::{CaretLocator, CaretPoint, FontMetrics, MonospaceLocator};
    pub use crate::catalog::Catalogs;
}
