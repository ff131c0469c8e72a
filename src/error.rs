// Error types module

use thiserror::Error;

/// Centralized error type for URL generation and configuration loading
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// No cloud name reached `generate`, neither from configuration nor a setter
    #[error("Must supply cloud_name in tag or in configuration")]
    MissingCloudName,

    /// Configuration errors (invalid YAML, missing env vars, bad CLOUDINARY_URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A transformation option could not be parsed
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl UrlError {
    pub fn config(message: impl Into<String>) -> Self {
        UrlError::Config(message.into())
    }

    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        UrlError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}
