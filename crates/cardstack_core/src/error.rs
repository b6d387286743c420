//! Card presentation error types

use thiserror::Error;

/// Errors surfaced by the presentation stack
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    /// A card is already presented in this context and the presentation
    /// policy does not allow another one
    #[error("a card is already presented in this context")]
    AlreadyPresenting,

    /// No card with this handle is managed by the context
    #[error("unknown card handle: {0}")]
    UnknownCard(u64),

    /// An auto-dismiss duration was negative or not finite
    #[error("invalid card duration: {0}")]
    InvalidDuration(f32),

    /// Presenter configuration could not be parsed
    #[error("invalid presenter configuration: {0}")]
    Config(String),
}

/// Result type for card operations
pub type Result<T> = std::result::Result<T, CardError>;
