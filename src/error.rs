//! Crate-wide error type
//!
//! Every fallible call in the crate returns [`Result<T>`]. Remote failures
//! keep the HTTP status so callers can tell an expired token (401) from a
//! missing record (404).

use thiserror::Error;

/// Errors raised by the EC3 client
#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------
    // Client setup
    // ------------------------------------------------------------------
    #[error("Invalid client configuration: {message}")]
    Config { message: String },

    #[error("Client configuration is missing '{field}'")]
    MissingConfigField { field: String },

    #[error("Bad value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Config file is not valid YAML/JSON: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    // ------------------------------------------------------------------
    // Requests and responses
    // ------------------------------------------------------------------
    #[error("Transport failure: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a 4xx/5xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Endpoint placeholder(s) without a value: {variable}")]
    UndefinedVariable { variable: String },

    #[error("Response body is not valid JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unexpected response shape: {message}")]
    Decode { message: String },

    // ------------------------------------------------------------------
    // Filter helpers
    // ------------------------------------------------------------------
    #[error("Unknown category '{name}'")]
    UnknownCategory { name: String },

    #[error("Postal code '{postal_code}' not found for country '{country_code}'")]
    PostalCodeNotFound {
        postal_code: String,
        country_code: String,
    },

    #[error("Geocoding failed: {message}")]
    Geocode { message: String },

    /// Another error wrapped with a context message
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Placeholders left unfilled, comma-separated
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory { name: name.into() }
    }

    pub fn geocode(message: impl Into<String>) -> Self {
        Self::Geocode {
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the API answered and rejected the request
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::HttpStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Like [`context`](ResultExt::context), building the message only on error
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
