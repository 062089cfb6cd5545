use thiserror::Error;

use crate::clients::numeral::NumeralKind;

/// Failure below the decoding layer: the request never produced a usable body.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    // Raised by `HttpClient` implementations other than the reqwest one
    #[error("HTTP transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary failure reported by a custom HTTP capability.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TransportError::Other(err.into())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed JSON in response body: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Unexpected response shape at `{path}`: {reason}")]
    SchemaMismatch { path: String, reason: String },

    #[error("Failed to parse {value:?} at `{path}` as {kind}")]
    NumeralParse {
        path: String,
        value: String,
        kind: NumeralKind,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
