//! Error types for the classification engine.
//!
//! Only two things can go wrong for a caller: the language of a document
//! cannot be resolved, or an edited region handed back for saving does not
//! make sense. Classification itself never fails.

use thiserror::Error;

/// Errors surfaced by load and save operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LitdocError {
    /// No descriptor matches the in-source directive or the file extension.
    #[error("unable to determine a language for directive {directive:?} and extension {extension:?}")]
    Resolution {
        directive: Option<String>,
        extension: String,
    },

    /// An edited region cannot be turned back into source text.
    #[error("region {index} is malformed: {reason}")]
    MalformedRegion { index: usize, reason: String },
}

/// Result type for load/save operations.
pub type Result<T> = std::result::Result<T, LitdocError>;
