/// Convenience result type used across mazeview.
pub type MazeViewResult<T> = Result<T, MazeViewError>;

/// Top-level error taxonomy used by viewer APIs.
///
/// A container that has not been measured yet is not an error: renderers return
/// `Ok(None)` and wait for the next geometry signal instead.
#[derive(thiserror::Error, Debug)]
pub enum MazeViewError {
    /// Malformed grid or configuration data. The input is rejected as a whole.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation sequence (coordinates outside the grid).
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while executing a render plan on a backend.
    #[error("render error: {0}")]
    Render(String),

    /// Export failures. This is the only class meant to be shown to the user.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing grid or session data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MazeViewError {
    /// Build a [`MazeViewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MazeViewError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MazeViewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MazeViewError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MazeViewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error should be surfaced to the user as an explicit message.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::Export(_))
    }
}

impl From<serde_json::Error> for MazeViewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
