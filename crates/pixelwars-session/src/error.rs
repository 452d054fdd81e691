//! Error types for the session layer.

/// Errors raised while validating the identifiers a client presents.
///
/// These cover the two proofs a client carries around: the per-visit
/// key from `preinit` and the per-player user id from `init`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The identifier in the query string and the one in the cookie
    /// disagree. Reported regardless of whether either one is valid.
    #[error("query and cookie identifiers do not match")]
    KeyMismatch,

    /// The key was never issued by this instance (or has expired).
    #[error("key is not valid")]
    InvalidKey,

    /// The user id was never issued by this instance (or has expired).
    #[error("user id is not valid")]
    InvalidUser,
}
