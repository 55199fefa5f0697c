use reqwest::StatusCode;

/// Reasons an entry is refused before it ever reaches the server.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("You can't end before you've started")]
    EndsBeforeStart,

    #[error("You can't have negative breaks")]
    NegativeBreaks,

    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a JSON `error` field. The message is shown as-is.
    #[error("{0}")]
    Server(String),

    #[error("The server responded with status {0}")]
    Status(StatusCode),

    #[error("Unexpected response: {0}")]
    Malformed(String),

    #[error("Not logged in")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] EntryError),
}

impl ApiError {
    /// Build the error for a response that did not report success.
    pub(crate) fn unsuccessful(error: Option<String>) -> Self {
        match error {
            Some(message) => ApiError::Server(message),
            None => ApiError::Malformed("request was not successful".into()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
