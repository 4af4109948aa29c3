//! Error types for the post collection and content loading

use std::path::PathBuf;
use thiserror::Error;

use crate::content::PostId;

/// Errors raised by [`crate::content::PostCollection`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A post with this identifier is already registered
    #[error("duplicate post identifier: {0}")]
    DuplicateIdentifier(PostId),

    /// No post is registered under this identifier
    #[error("post not found: {0}")]
    NotFound(PostId),
}

/// Errors raised while parsing or loading post files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid post identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid front-matter in {path:?}: {message}")]
    InvalidFrontMatter { path: PathBuf, message: String },

    #[error("post {0:?} has no date in its filename or front-matter")]
    MissingDate(PathBuf),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
