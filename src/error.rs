//! Error types shared by the annotation core and the application shell.

use thiserror::Error;

/// Errors produced by polymask.
///
/// The drawing transitions themselves never fail; only the registry guard,
/// catalog lookups, routing and the I/O around the core report errors.
#[derive(Error, Debug)]
pub enum PolymaskError {
    /// An operation was called in a state its caller should have ruled out.
    #[error("precondition violated in {operation}: {reason}")]
    PreconditionViolation {
        /// Name of the rejected operation
        operation: &'static str,
        /// What was wrong with the input
        reason: String,
    },

    /// A polygon was committed with fewer than three distinct corners.
    #[error("a mask needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of base vertices that were supplied
        count: usize,
    },

    /// No catalog entry with this identifier.
    #[error("unknown image: {id}")]
    UnknownImage {
        /// The identifier that was looked up
        id: String,
    },

    /// A navigation path that matches no view.
    #[error("unknown route: {path:?}")]
    UnknownRoute {
        /// The unmatched path
        path: String,
    },

    /// A color string that is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: {value:?}")]
    InvalidColor {
        /// The offending string
        value: String,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PolymaskError>;
