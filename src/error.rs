// Error module: the single error type returned by the library.
// Network failures, rejections from the service and missing local
// credentials are separate variants so callers can match on them
// instead of parsing message strings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the transport, the API client and the credential store.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a status outside 2xx. Displays the raw
    /// response body, which is usually a human-readable reason.
    #[error("{}", rejection_message(.status, .body))]
    Rejected { status: u16, body: String },

    /// A 2xx body that does not have the shape the caller asked for.
    #[error("unexpected response ({reason}): {body}")]
    Malformed { body: String, reason: String },

    /// No credentials have been saved yet.
    #[error("no credentials found at {}, run `bobolink configure` first", .0.display())]
    MissingCredentials(PathBuf),

    /// The credentials file exists but could not be read or written.
    #[error("credentials file: {0}")]
    CredentialStore(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the service itself refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. } | Error::Malformed { .. })
    }

    /// HTTP status of a rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

fn rejection_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("request rejected with status {}", status)
    } else {
        body.to_string()
    }
}
