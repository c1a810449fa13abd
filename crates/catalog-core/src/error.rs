//! Error types for the catalog valuation system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A free-text numeric token could not be turned into a count.
    ///
    /// Raised only at the boundary where text becomes a number; callers must
    /// surface it as a validation error instead of coercing to zero.
    #[error("invalid numeric value {raw:?}: {reason}")]
    Parse { raw: String, reason: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn parse(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
