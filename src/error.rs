//! Domain errors shared by the content store, editor and server

use thiserror::Error;

use crate::vcs::VcsError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("No content")]
    MissingContent,

    #[error("No file uploaded")]
    MissingFile,

    #[error("Unknown post: {0}")]
    UnknownPost(String),

    #[error("Editing is disabled in production")]
    EditingDisabled,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    InvalidRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Vcs(#[from] VcsError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
