use thiserror::Error;

/// Errors produced while reading PE images and reconstructing icon files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A buffer is too short, or its declared counts/offsets point outside of it.
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    #[error("Icon {id} declares {declared} bytes but the resource holds {actual}")]
    PayloadSizeMismatch { id: u16, declared: u32, actual: usize },

    /// PNG color type outside of the five the PNG standard defines.
    #[error("Unsupported PNG color type: {0}")]
    UnsupportedFormat(u8),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid PE image: {0}")]
    InvalidImage(String),

    #[error("No icon groups found")]
    NoIconGroups,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResource(message.into())
    }
    pub(crate) fn invalid_image(message: impl Into<String>) -> Self {
        Error::InvalidImage(message.into())
    }
}
