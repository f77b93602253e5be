/// Errors that can occur while talking to the orchestration backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload could not be form-encoded.
    #[error("could not encode form: {0}")]
    Encode(#[from] serde_html_form::ser::Error),

    /// The response body was not the expected JSON.
    #[error("unexpected response: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint {path}: {reason}")]
    InvalidUrl {
        /// The endpoint path that failed to join.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}
