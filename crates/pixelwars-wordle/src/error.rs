//! Error types for the Wordle engine.

use pixelwars_session::SessionError;

/// Errors that can occur during Wordle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordleError {
    /// Key or user id validation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Wrong length or a non-letter character. History is not touched.
    #[error("invalid guess: {0}")]
    InvalidGuess(String),

    /// The configured secret word (or word choice) is unusable.
    #[error("invalid secret word: {0}")]
    InvalidSecret(String),
}
