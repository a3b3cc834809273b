use std::error::Error as _;
use std::io;

use thiserror::Error;

use crate::constants::{
    INVALID_UPLOAD_FILE_MSG, MISSING_DISH_FIELDS_MSG, NETWORK_ERROR_MSG, NO_CUSTOM_INGREDIENTS_MSG,
    NO_UPLOAD_FILE_MSG, SERVER_ERROR_MSG, UNEXPECTED_ERROR_MSG,
};

/// Failure of a single backend call. The `Display` text is what the user gets to see.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    #[error("Could not connect to the server. Please make sure the backend is running at {0}.")]
    ConnectionRefused(String),
    #[error("{}", .message.as_deref().unwrap_or(SERVER_ERROR_MSG))]
    Server { status: u16, message: Option<String> },
    #[error("{}", NETWORK_ERROR_MSG)]
    Network(String),
    #[error("{}", UNEXPECTED_ERROR_MSG)]
    UnexpectedResponse(String),
}

impl BackendError {
    /// Message reported by the backend itself, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() && is_refused(&err) {
            let origin = err
                .url()
                .map(|url| url.origin().ascii_serialization())
                .unwrap_or_default();
            BackendError::ConnectionRefused(origin)
        } else if err.is_decode() {
            BackendError::UnexpectedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

// only a refusal means "nothing listens there"; DNS failures and timeouts are plain network errors
fn is_refused(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("{}", MISSING_DISH_FIELDS_MSG)]
    MissingDishFields,
    #[error("{}", NO_CUSTOM_INGREDIENTS_MSG)]
    NoValidIngredients,
    #[error("{}", NO_UPLOAD_FILE_MSG)]
    NoFileSelected,
    #[error("{}", INVALID_UPLOAD_FILE_MSG)]
    InvalidFileType,
    #[error("Could not read ingredient '{0}', expected NAME=QUANTITY")]
    InvalidIngredientArg(String),
    #[error("No ingredient at position {0}")]
    NoSuchIngredient(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = BackendError::Server {
            status: 400,
            message: Some("No file selected".to_string()),
        };
        assert_eq!(err.to_string(), "No file selected");
        assert_eq!(err.server_message(), Some("No file selected"));
    }

    #[test]
    fn server_without_message_falls_back() {
        let err = BackendError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error occurred. Please try again.");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn refused_connection_names_the_backend() {
        let err = BackendError::ConnectionRefused("http://localhost:5001".to_string());
        assert!(err.to_string().contains("http://localhost:5001"));
        assert_eq!(err.server_message(), None);
    }
}
