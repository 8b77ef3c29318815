//! Error types for blockdiff

use thiserror::Error;

/// Result type alias for blockdiff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for blockdiff
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors (file system operations)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Signature file magic mismatch
    #[error("bad signature format: {message}")]
    BadSignatureFormat { message: String },

    /// Delta file magic mismatch
    #[error("bad delta format: {message}")]
    BadDeltaFormat { message: String },

    /// File shorter than its framing declares, or a declared length of zero
    #[error("malformed length: {message}")]
    MalformedLength { message: String },

    /// Delta record carries an unrecognized command tag
    #[error("invalid command: {command}")]
    InvalidCommand { command: u32 },

    /// deflate/inflate returned a non-success status
    #[error("compression error: {message}")]
    Compression { message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a signature format error
    pub fn bad_signature(message: impl Into<String>) -> Self {
        Self::BadSignatureFormat {
            message: message.into(),
        }
    }

    /// Create a delta format error
    pub fn bad_delta(message: impl Into<String>) -> Self {
        Self::BadDeltaFormat {
            message: message.into(),
        }
    }

    /// Create a malformed length error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedLength {
            message: message.into(),
        }
    }

    /// Create a compression error
    pub fn compression(message: impl Into<String>) -> Self {
        Self::Compression {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}
