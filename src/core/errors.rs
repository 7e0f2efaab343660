use reqwest::StatusCode;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors returned by the APIBAN client.
///
/// Only [Error::RateLimit] is handled inside the client (by moving on to the next API key); every
/// other variant is returned to the caller unchanged.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server is throttling the API key.
    #[error("rate limit exceeded")]
    RateLimit,

    /// The reply is well formed but does not match what the endpoint promises.
    #[error("bad request")]
    BadRequest,

    /// The server rejected the API key.
    #[error("unauthorized")]
    Unauthorized,

    /// The reply carried no identifier.
    #[error("empty ID received")]
    EmptyId,

    #[error("client error<{0}>")]
    ClientError(StatusCode),

    #[error("server error<{0}>")]
    ServerError(StatusCode),

    #[error("unexpected status code<{0}>")]
    UnexpectedStatus(StatusCode),

    /// The reply body is empty or is not a valid APIBAN JSON envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// DNS, connection, TLS, or timeout failure; the underlying cause is kept as the source.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The cancellation token fired before or during a request.
    #[error("request cancelled")]
    Cancelled,

    #[error("IP address is required")]
    MissingAddress,

    #[error("API keys are required")]
    MissingKeys,

    #[error("invalid configuration: {0}")]
    Config(String),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimit)
    }

    /// True for network-level failures, including cancellation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Cancelled)
    }

    /// The HTTP status code behind a status-anchored error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ClientError(status)
            | Error::ServerError(status)
            | Error::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
