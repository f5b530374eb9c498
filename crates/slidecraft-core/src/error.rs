//! Error taxonomy for the element model boundary.
//!
//! These errors only ever surface during document (de)serialization. The
//! interaction layer is total: hit-test misses and empty guide sets are
//! `None`/empty results, not errors.

use thiserror::Error;

/// Errors raised while parsing a slide element from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// A required geometry field (`type`, `x`, `y`, `width`, `height`) is
    /// absent or not numeric. The offending element is skipped; the rest of
    /// the document still loads.
    #[error("element is missing required field `{field}` or it is not numeric")]
    MalformedElement { field: &'static str },

    /// A color literal could not be parsed as `#RRGGBB`. Callers substitute
    /// the field's default rather than aborting the document.
    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),

    /// The `type` tag names no known variant. The document loader replaces
    /// the element with a visible placeholder.
    #[error("unknown element type `{0}`")]
    UnknownElementType(String),
}
