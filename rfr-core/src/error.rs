//! Error types for the report-for-review plugin
//!
//! The display text of the plugin-facing variants is exactly the message the
//! host receives in `{ "error": ... }`.

use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for plugin operations
#[derive(Error, Debug)]
pub enum Error {
    /// Library item lookup returned nothing
    #[error("Library item not found")]
    LibraryItemNotFound(String),

    /// User lookup returned nothing
    #[error("User not found")]
    UserNotFound(String),

    /// `requestAddress` was not a string
    #[error("Invalid request address")]
    InvalidRequestAddress,

    /// `updateDescription` was not a boolean
    #[error("Invalid updateDescription value")]
    InvalidUpdateDescription,

    /// Webhook POST could not be delivered
    #[error("Error sending report")]
    Webhook(String),

    /// A host collaborator (database, plugin instance) failed
    #[error("Host error: {0}")]
    Host(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Transport,
    Host,
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LibraryItemNotFound(_) | Error::UserNotFound(_) => ErrorKind::NotFound,
            Error::InvalidRequestAddress | Error::InvalidUpdateDescription => {
                ErrorKind::Validation
            }
            Error::Webhook(_) => ErrorKind::Transport,
            Error::Host(_) => ErrorKind::Host,
            Error::Io(_) | Error::Json(_) | Error::Config(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_messages() {
        assert_eq!(
            Error::LibraryItemNotFound("li_1".into()).to_string(),
            "Library item not found"
        );
        assert_eq!(Error::UserNotFound("u".into()).to_string(), "User not found");
        assert_eq!(
            Error::InvalidRequestAddress.to_string(),
            "Invalid request address"
        );
        assert_eq!(
            Error::InvalidUpdateDescription.to_string(),
            "Invalid updateDescription value"
        );
        assert_eq!(
            Error::Webhook("connection refused".into()).to_string(),
            "Error sending report"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::UserNotFound("u".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::InvalidRequestAddress.kind(), ErrorKind::Validation);
        assert_eq!(Error::Webhook(String::new()).kind(), ErrorKind::Transport);
        assert_eq!(Error::Host("db".into()).kind(), ErrorKind::Host);
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Internal);
    }
}
