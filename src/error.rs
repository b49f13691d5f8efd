//! Error types for the carectl CLI

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias for carectl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] DecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Access to {requested} requires a different role")]
    AccessDenied { requested: String },

    #[error("Operation failed: {0}")]
    Other(String),
}

impl Error {
    /// Whether this error ends the session (absent, expired or rejected credential).
    ///
    /// These are the only errors that send the user back to the login route.
    pub fn is_session_ending(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::Unauthenticated)
                | Error::Api(ApiError::RequestFailed { status: 401, .. })
                | Error::Session(DecodeError::Expired)
                | Error::AccessDenied { .. }
        )
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Credential decoding errors.
///
/// Every variant means "not authenticated" to callers; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("No credential stored")]
    Missing,

    #[error("Credential is not a three-part token")]
    Malformed,

    #[error("Credential payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("Credential payload is not valid JSON: {0}")]
    Json(String),

    #[error("Credential payload is not a JSON object")]
    NotAnObject,

    #[error("Credential carries no role claim")]
    MissingRole,

    #[error("Unrecognized role: {0}")]
    UnrecognizedRole(String),

    #[error("Credential has already expired")]
    Expired,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `carectl init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API URL not configured. Run `carectl init` or set CARECTL_API_URL.")]
    MissingApiUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
