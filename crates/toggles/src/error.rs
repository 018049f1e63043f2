use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    #[error("Invalid toggle path '{0}': segments must be non-empty ASCII identifiers joined by '.'")]
    InvalidPath(String),

    #[error("Toggle overrides require debug mode")]
    DebugDisabled,
}
