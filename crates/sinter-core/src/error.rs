use crate::span::Span;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The nested expression front end failed structurally instead of
    /// reporting a diagnostic. Fatal for the literal being processed.
    #[error("internal front-end failure at {span}: {message}")]
    Internal { span: Span, message: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn internal(span: Span, message: impl Into<String>) -> Self {
        Error::Internal {
            span,
            message: message.into(),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal { .. })
    }
}

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
