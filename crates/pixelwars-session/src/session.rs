//! Session configuration and the per-entry record kept by the registry.

use std::time::Duration;

use tokio::time::Instant;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session lifetime.
///
/// `ttl` is measured from the last time an entry was *used*, not from when
/// it was issued: a player who keeps painting never expires.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a key or user id may sit idle before it is swept.
    ///
    /// Default: one hour (the same lifetime the cookies carry).
    /// `None` keeps every entry for the lifetime of the instance.
    pub ttl: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(3600)),
        }
    }
}

impl SessionConfig {
    /// A config whose entries never expire.
    pub fn without_expiry() -> Self {
        Self { ttl: None }
    }

    /// Returns `true` if an entry last seen at `last_seen` is past its TTL.
    pub(crate) fn is_expired(&self, last_seen: Instant, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(last_seen) >= ttl,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A registered user: their per-instance state plus when they were last seen.
///
/// `tokio::time::Instant` rather than `std::time::Instant` so tests can
/// pause and advance the clock.
#[derive(Debug, Clone)]
pub(crate) struct UserEntry<S> {
    pub(crate) state: S,
    pub(crate) last_seen: Instant,
}
