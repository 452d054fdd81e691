//! The session registry: issues and validates keys and user ids.
//!
//! # Concurrency note
//!
//! `SessionRegistry` is NOT thread-safe by itself; it uses plain
//! `HashMap`s. Each game instance owns one registry and the whole instance
//! sits behind a single mutex at the server level, so issuance is atomic
//! with respect to other issuance and to every read.

use std::collections::HashMap;

use pixelwars_protocol::{Key, UserId};
use rand::Rng;
use tokio::time::Instant;

use crate::session::UserEntry;
use crate::{SessionConfig, SessionError};

/// How many entries one call to [`SessionRegistry::expire_stale`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredCounts {
    pub keys: usize,
    pub users: usize,
}

/// Keys and users of one game instance.
///
/// `S` is the per-user state the owning engine needs: a canvas view for
/// Pixel Wars, a guess history for Wordle. The registry only stores it;
/// the engine decides what it means.
///
/// ## Lifecycle
///
/// ```text
/// issue_key() ──→ validate_key() ──→ issue_user(state) ──→ user_mut(id) ...
///                                                              │
///                                          (idle > ttl) expire_stale()
/// ```
pub struct SessionRegistry<S> {
    /// Issued keys and when each was last presented.
    keys: HashMap<Key, Instant>,

    /// Issued user ids with their per-user state.
    users: HashMap<UserId, UserEntry<S>>,

    config: SessionConfig,
}

impl<S> SessionRegistry<S> {
    /// Creates an empty registry.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            keys: HashMap::new(),
            users: HashMap::new(),
            config,
        }
    }

    /// Issues a fresh key and records it as valid. Never fails.
    pub fn issue_key(&mut self) -> Key {
        let key = loop {
            let candidate = Key(generate_token());
            // 128 random bits make a collision practically impossible,
            // but the map is right here, so never hand out a duplicate.
            if !self.keys.contains_key(&candidate) {
                break candidate;
            }
        };
        self.keys.insert(key.clone(), Instant::now());
        tracing::debug!(%key, "key issued");
        key
    }

    /// Returns `true` if `key` was issued here and has not expired.
    pub fn is_valid_key(&self, key: &Key) -> bool {
        self.keys
            .get(key)
            .is_some_and(|seen| !self.config.is_expired(*seen, Instant::now()))
    }

    /// Checks `key` and refreshes its idle timer.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidKey`] if the key is unknown or expired.
    pub fn validate_key(&mut self, key: &Key) -> Result<(), SessionError> {
        if !self.is_valid_key(key) {
            return Err(SessionError::InvalidKey);
        }
        if let Some(seen) = self.keys.get_mut(key) {
            *seen = Instant::now();
        }
        Ok(())
    }

    /// Issues a fresh user id owning `state`, and returns the id.
    pub fn issue_user(&mut self, state: S) -> UserId {
        let user_id = loop {
            let candidate = UserId(generate_token());
            if !self.users.contains_key(&candidate) {
                break candidate;
            }
        };
        self.users.insert(
            user_id.clone(),
            UserEntry {
                state,
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(%user_id, users = self.users.len(), "user issued");
        user_id
    }

    /// Returns `true` if `user_id` was issued here and has not expired.
    pub fn is_valid_user(&self, user_id: &UserId) -> bool {
        self.users.get(user_id).is_some_and(|entry| {
            !self.config.is_expired(entry.last_seen, Instant::now())
        })
    }

    /// Read-only access to a user's state. Does not refresh the idle timer.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidUser`] if the id is unknown or expired.
    pub fn user(&self, user_id: &UserId) -> Result<&S, SessionError> {
        if !self.is_valid_user(user_id) {
            return Err(SessionError::InvalidUser);
        }
        self.users
            .get(user_id)
            .map(|entry| &entry.state)
            .ok_or(SessionError::InvalidUser)
    }

    /// Mutable access to a user's state. Refreshes the idle timer.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidUser`] if the id is unknown or expired.
    pub fn user_mut(
        &mut self,
        user_id: &UserId,
    ) -> Result<&mut S, SessionError> {
        if !self.is_valid_user(user_id) {
            return Err(SessionError::InvalidUser);
        }
        let entry = self
            .users
            .get_mut(user_id)
            .ok_or(SessionError::InvalidUser)?;
        entry.last_seen = Instant::now();
        Ok(&mut entry.state)
    }

    /// Removes every key and user idle for longer than the TTL.
    ///
    /// Call this periodically; the server runs it from a background task.
    pub fn expire_stale(&mut self) -> ExpiredCounts {
        let now = Instant::now();
        let config = &self.config;

        let keys_before = self.keys.len();
        self.keys.retain(|_, seen| !config.is_expired(*seen, now));

        let users_before = self.users.len();
        self.users
            .retain(|_, entry| !config.is_expired(entry.last_seen, now));

        let counts = ExpiredCounts {
            keys: keys_before - self.keys.len(),
            users: users_before - self.users.len(),
        };
        if counts != ExpiredCounts::default() {
            tracing::info!(
                keys = counts.keys,
                users = counts.users,
                "expired idle sessions"
            );
        }
        counts
    }

    /// Number of registered keys (including expired, not yet swept).
    pub fn len_keys(&self) -> usize {
        self.keys.len()
    }

    /// Number of registered users (including expired, not yet swept).
    pub fn len_users(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if nothing has been issued (or everything was swept).
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.users.is_empty()
    }
}

impl<S> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Checks that the identifier from the query string equals the one from
/// the cookie.
///
/// # Errors
/// Returns [`SessionError::KeyMismatch`] if they differ.
pub fn ensure_same<T: PartialEq + ?Sized>(
    presented: &T,
    cookie: &T,
) -> Result<(), SessionError> {
    if presented == cookie {
        Ok(())
    } else {
        Err(SessionError::KeyMismatch)
    }
}

/// Generates a random 32-character hex string (128 bits of entropy).
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionRegistry`.
    //!
    //! Naming: `test_{function}_{scenario}_{expected}`.
    //!
    //! Expiry tests run on a paused Tokio clock and move it forward with
    //! `tokio::time::advance`, so they are instant and deterministic.

    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn registry_without_expiry() -> SessionRegistry<u32> {
        SessionRegistry::new(SessionConfig::without_expiry())
    }

    fn registry_with_ttl(secs: u64) -> SessionRegistry<u32> {
        SessionRegistry::new(SessionConfig {
            ttl: Some(Duration::from_secs(secs)),
        })
    }

    // =====================================================================
    // keys
    // =====================================================================

    #[test]
    fn test_issue_key_returns_32_hex_chars() {
        let mut reg = registry_without_expiry();

        let key = reg.issue_key();

        assert_eq!(key.as_str().len(), 32);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_issue_key_registers_key_as_valid() {
        let mut reg = registry_without_expiry();

        let key = reg.issue_key();

        assert!(reg.is_valid_key(&key));
        assert!(reg.validate_key(&key).is_ok());
    }

    #[test]
    fn test_is_valid_key_unknown_returns_false() {
        let reg = registry_without_expiry();

        assert!(!reg.is_valid_key(&Key::from("never-issued")));
    }

    #[test]
    fn test_validate_key_unknown_returns_invalid_key() {
        let mut reg = registry_without_expiry();

        let result = reg.validate_key(&Key::from("never-issued"));

        assert_eq!(result, Err(SessionError::InvalidKey));
    }

    #[test]
    fn test_issue_key_ten_thousand_times_no_collisions() {
        let mut reg = registry_without_expiry();

        let keys: HashSet<Key> = (0..10_000).map(|_| reg.issue_key()).collect();

        assert_eq!(keys.len(), 10_000);
        assert_eq!(reg.len_keys(), 10_000);
    }

    // =====================================================================
    // users
    // =====================================================================

    #[test]
    fn test_issue_user_stores_initial_state() {
        let mut reg = registry_without_expiry();

        let id = reg.issue_user(7);

        assert!(reg.is_valid_user(&id));
        assert_eq!(reg.user(&id), Ok(&7));
    }

    #[test]
    fn test_issue_user_ten_thousand_times_no_collisions() {
        let mut reg = registry_without_expiry();

        let ids: HashSet<UserId> =
            (0..10_000).map(|_| reg.issue_user(0)).collect();

        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_user_mut_modifies_only_that_user() {
        let mut reg = registry_without_expiry();
        let a = reg.issue_user(1);
        let b = reg.issue_user(1);

        *reg.user_mut(&a).unwrap() += 10;

        assert_eq!(reg.user(&a), Ok(&11));
        assert_eq!(reg.user(&b), Ok(&1));
    }

    #[test]
    fn test_user_unknown_returns_invalid_user() {
        let mut reg = registry_without_expiry();
        let unknown = UserId::from("nobody");

        assert_eq!(reg.user(&unknown), Err(SessionError::InvalidUser));
        assert_eq!(
            reg.user_mut(&unknown).map(|s| *s),
            Err(SessionError::InvalidUser)
        );
        assert!(!reg.is_valid_user(&unknown));
    }

    #[test]
    fn test_keys_and_users_are_separate_namespaces() {
        // A key is not a user id, even if someone presents it as one.
        let mut reg = registry_without_expiry();
        let key = reg.issue_key();

        assert!(!reg.is_valid_user(&UserId(key.0.clone())));
    }

    // =====================================================================
    // ensure_same()
    // =====================================================================

    #[test]
    fn test_ensure_same_equal_values_ok() {
        assert!(ensure_same("abc", "abc").is_ok());
    }

    #[test]
    fn test_ensure_same_different_values_returns_mismatch() {
        assert_eq!(ensure_same("abc", "abd"), Err(SessionError::KeyMismatch));
    }

    // =====================================================================
    // expire_stale()
    // =====================================================================

    #[tokio::test(start_paused = true)]
    async fn test_expire_stale_removes_idle_entries() {
        let mut reg = registry_with_ttl(60);
        let key = reg.issue_key();
        let id = reg.issue_user(0);

        tokio::time::advance(Duration::from_secs(61)).await;
        let counts = reg.expire_stale();

        assert_eq!(counts, ExpiredCounts { keys: 1, users: 1 });
        assert!(reg.is_empty());
        assert!(!reg.is_valid_key(&key));
        assert!(!reg.is_valid_user(&id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_stale_keeps_recently_used_user() {
        let mut reg = registry_with_ttl(60);
        let active = reg.issue_user(0);
        let idle = reg.issue_user(0);

        tokio::time::advance(Duration::from_secs(40)).await;
        // Touching the user resets its idle timer.
        reg.user_mut(&active).unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;

        let counts = reg.expire_stale();

        assert_eq!(counts.users, 1);
        assert!(reg.is_valid_user(&active));
        assert!(!reg.is_valid_user(&idle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_validate_key_refreshes_idle_timer() {
        let mut reg = registry_with_ttl(60);
        let key = reg.issue_key();

        tokio::time::advance(Duration::from_secs(50)).await;
        reg.validate_key(&key).unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;

        assert!(reg.is_valid_key(&key));
        assert_eq!(reg.expire_stale().keys, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_but_unswept_user_is_rejected() {
        // Validity honours the TTL even before the sweeper runs.
        let mut reg = registry_with_ttl(10);
        let id = reg.issue_user(0);

        tokio::time::advance(Duration::from_secs(10)).await;

        assert_eq!(reg.len_users(), 1);
        assert_eq!(reg.user(&id), Err(SessionError::InvalidUser));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_stale_without_ttl_removes_nothing() {
        let mut reg = registry_without_expiry();
        reg.issue_key();
        reg.issue_user(0);

        tokio::time::advance(Duration::from_secs(1_000_000)).await;

        assert_eq!(reg.expire_stale(), ExpiredCounts::default());
        assert_eq!(reg.len_keys(), 1);
        assert_eq!(reg.len_users(), 1);
    }
}
