/// Convenience result type used across fablepress.
pub type FablepressResult<T> = Result<T, FablepressError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum FablepressError {
    /// Invalid configuration or user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors in the story document (missing, malformed, or empty).
    #[error("story error: {0}")]
    Story(String),

    /// Errors while compositing or writing a page bitmap.
    #[error("render error: {0}")]
    Render(String),

    /// A page asset could not be loaded (missing file vs. bad bytes).
    #[error(transparent)]
    Asset(#[from] crate::assets::AssetError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FablepressError {
    /// Build a [`FablepressError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FablepressError::Story`] value.
    pub fn story(msg: impl Into<String>) -> Self {
        Self::Story(msg.into())
    }

    /// Build a [`FablepressError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
