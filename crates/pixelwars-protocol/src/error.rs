//! Error types for the protocol layer.
//!
//! Each crate in Pixel Wars defines its own error enum. A `ProtocolError`
//! always means the request body or query could not be turned into a typed
//! command; it never says anything about game state.

/// Errors that can occur while decoding client input.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The body was not valid JSON, or did not match any accepted shape.
    ///
    /// Covers malformed JSON, missing fields, and colour components that
    /// do not fit in a `u8`.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body decoded but is still unusable (e.g. empty).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
