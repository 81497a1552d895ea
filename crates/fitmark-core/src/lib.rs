//! # Fitmark Core
//!
//! Core data model, error types, and configuration for the fitmark
//! rich-content engine. Every other fitmark crate depends on these types.
//!
//! ## Core Modules
//!
//! - [`models`] - Entity references, inline/block trees, documents
//! - [`detail`] - Resolved mention detail payloads
//! - [`error`] - Error type and Result alias
//! - [`config`] - Engine configuration with builder and YAML persistence
//!
//! ## Usage
//!
//! ```
//! use fitmark_core::prelude::*;
//!
//! let reference = EntityReference::exercise("Bicep Curl", "ex_123");
//! let doc = Document::new(vec![Block::Paragraph {
//!     inlines: vec![Inline::text("Try "), Inline::mention(reference)],
//! }]);
//! assert_eq!(doc.to_plain_text(), "Try Bicep Curl");
//! assert_eq!(doc.mentions().len(), 1);
//! ```

pub mod config;
pub mod detail;
pub mod error;
pub mod models;

pub use config::*;
pub use detail::{
    AnatomyDetail, ExerciseDetail, GuideDetail, MentionDetail, Resolution, SectionDetail,
};
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AutocompleteConfig, Backend, EngineConfig, RenderConfig};
    pub use crate::detail::{MentionDetail, Resolution};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Block, Document, EmphasisMarker, EntityReference, EntityType, Inline, LineIndex,
        VideoMode,
    };
}
