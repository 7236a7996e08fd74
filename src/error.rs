//! Error types for librarium operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading books or reading them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read book catalog {}: {source}", .path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed book catalog {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no book matches title \"{0}\"")]
    BookNotFound(String),

    #[error("no book is open")]
    NoBookSelected,

    #[error("book \"{0}\" has no pages")]
    EmptyBook(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
