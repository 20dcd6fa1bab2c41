//! Shared error type across pulse crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input.
    BadRequest,
    /// Name already taken.
    Conflict,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("var name is empty")]
    EmptyName,
    #[error("reuse of exported var name: {0}")]
    DuplicateVar(String),
    #[error("var {0} is published with a different kind")]
    KindMismatch(String),
    #[error("metric registration failed: {0}")]
    Registration(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl Error {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            Error::EmptyName | Error::Config(_) => ClientCode::BadRequest,
            Error::DuplicateVar(_) | Error::KindMismatch(_) => ClientCode::Conflict,
            Error::Registration(_) | Error::Internal(_) => ClientCode::Internal,
        }
    }
}
