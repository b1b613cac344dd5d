use std::string::FromUtf8Error;

/// Errors returned by rendering a component.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The render's cancellation token fired before a write.
    #[error("render cancelled")]
    Cancelled,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Raised by template code or runtime helpers.
    #[error("{0}")]
    Render(String),
}

impl Error {
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Render(message.to_string())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
