/// Convenience result type used across dotfield.
pub type DotFieldResult<T> = Result<T, DotFieldError>;

/// Top-level error taxonomy for the fallible (non-render) APIs.
///
/// The per-frame render path never fails; these errors come from configuration loading, frame
/// encoding and host setup.
#[derive(thiserror::Error, Debug)]
pub enum DotFieldError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or reading back a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors while reading configs or writing frames.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotFieldError {
    /// Build a [`DotFieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotFieldError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotFieldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
