pub type CarpetResult<T> = Result<T, CarpetError>;

/// Error taxonomy for carpet generation, sequencing and encoding.
///
/// Cancellation is not an error; see [`crate::RunOutcome::Cancelled`].
#[derive(thiserror::Error, Debug)]
pub enum CarpetError {
    #[error("invalid carpet size {size}: must be a power of 3")]
    InvalidSize { size: u32 },

    #[error("invalid order {order} for carpet size {size}: 3^order must not exceed the size")]
    InvalidOrder { size: u32, order: u32 },

    #[error("invalid parameter `{field}`: {message}")]
    Parameter {
        field: &'static str,
        message: String,
    },

    #[error("resolution {width}x{height} is not an integer multiple of carpet size {size}")]
    ResolutionMismatch { width: u32, height: u32, size: u32 },

    #[error("progress callback failed: {0}")]
    Callback(#[source] anyhow::Error),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarpetError {
    pub fn invalid_size(size: u32) -> Self {
        Self::InvalidSize { size }
    }

    pub fn invalid_order(size: u32, order: u32) -> Self {
        Self::InvalidOrder { size, order }
    }

    pub fn parameter(field: &'static str, message: impl Into<String>) -> Self {
        Self::Parameter {
            field,
            message: message.into(),
        }
    }

    pub fn resolution_mismatch(width: u32, height: u32, size: u32) -> Self {
        Self::ResolutionMismatch {
            width,
            height,
            size,
        }
    }

    pub fn callback(err: anyhow::Error) -> Self {
        Self::Callback(err)
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Name of the offending parameter for [`CarpetError::Parameter`].
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Parameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
