use thiserror::Error;

/// Errors raised while submitting the resume form or fetching its downloads.
///
/// The `Display` text of the transport variants is what the page shows after
/// "An error occurred: ", so they carry the underlying message verbatim.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {reason}")]
    Url { url: String, reason: String },

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid form field '{0}': expected NAME=VALUE")]
    InvalidField(String),

    #[error("A submission is already in progress")]
    Busy,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
