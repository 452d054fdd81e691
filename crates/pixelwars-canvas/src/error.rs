//! Error types for the canvas engine.

use std::time::Duration;

use pixelwars_session::SessionError;

/// Errors that can occur during canvas operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// Key or user id validation failed (mismatch, unknown, expired).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The requested cell lies outside `[0, nx) x [0, ny)`.
    #[error("coordinates ({x}, {y}) are outside the {nx}x{ny} canvas")]
    OutOfBounds { x: i64, y: i64, nx: usize, ny: usize },

    /// The user painted less than one cooldown ago.
    /// The request is rejected, not queued; the client retries later.
    #[error("cooldown active, retry in {} ms", .remaining.as_millis())]
    CooldownActive { remaining: Duration },

    /// A canvas must have at least one cell.
    #[error("invalid canvas dimensions {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },
}
