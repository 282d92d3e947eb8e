//! Client-side error taxonomy.
//!
//! Mirrors the server's problem-details responses: validation failures carry
//! the flattened field messages, titled problems keep their title, and server
//! faults stay generic. Transport failures are terminal for the attempt - the
//! client never retries on its own.

use thiserror::Error;

/// Errors surfaced by the API agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// 400 with field-level errors, flattened into a message list.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// 400 with a problem title (persistence failures and the like).
    #[error("{title}")]
    Problem { title: String, status: u16 },

    /// 401.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// 5xx; the server never leaks details.
    #[error("server fault: {0}")]
    ServerFault(String),

    /// Transport-level failure from reqwest.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL is invalid.
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The `Pagination` response header was missing or malformed.
    #[error("missing or malformed pagination header")]
    Pagination,
}
