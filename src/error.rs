use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },

    /// Non-success response that carried a `{ "message": ... }` body.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),
}

impl TripError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TripError::Http { status } | TripError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TripError> for String {
    fn from(err: TripError) -> Self {
        err.to_string()
    }
}
