//! The Wordle engine: one secret word, many independent players.
//!
//! Every player guesses the same word but has a private, append-only
//! history. Like the canvas engine, a `WordleGame` is a plain struct with
//! `&mut self` methods that the server keeps behind a single mutex.

use pixelwars_protocol::{
    Attempt, GuessResponse, Key, StatusResponse, UserId,
};
use pixelwars_session::{
    ensure_same, ExpiredCounts, SessionConfig, SessionError, SessionRegistry,
};

use crate::{score_guess, WordleError};

/// One Wordle instance.
pub struct WordleGame {
    secret: Vec<char>,
    sessions: SessionRegistry<Vec<Attempt>>,
}

impl WordleGame {
    /// Creates a game around an already-chosen secret word.
    ///
    /// The word is uppercased; its length in characters is the length every
    /// guess must have.
    ///
    /// # Errors
    /// Returns [`WordleError::InvalidSecret`] if the word is empty or
    /// contains anything other than letters.
    pub fn new(
        secret: &str,
        session_config: SessionConfig,
    ) -> Result<Self, WordleError> {
        let secret: Vec<char> = normalize_secret(secret).chars().collect();
        if secret.is_empty() {
            return Err(WordleError::InvalidSecret("secret is empty".into()));
        }
        if !secret.iter().all(|c| c.is_alphabetic()) {
            return Err(WordleError::InvalidSecret(
                "secret must contain only letters".into(),
            ));
        }

        tracing::info!(letters = secret.len(), "wordle game created");

        Ok(Self {
            secret,
            sessions: SessionRegistry::new(session_config),
        })
    }

    pub fn sessions(&self) -> &SessionRegistry<Vec<Attempt>> {
        &self.sessions
    }

    /// Issues a fresh session key.
    pub fn preinit(&mut self) -> Key {
        self.sessions.issue_key()
    }

    /// Registers a player for a previously issued key.
    ///
    /// # Errors
    /// - `KeyMismatch` if the query key and cookie key differ
    /// - `InvalidKey` if the key was not issued here
    pub fn init(
        &mut self,
        presented_key: &Key,
        cookie_key: &Key,
    ) -> Result<UserId, WordleError> {
        ensure_same(presented_key, cookie_key)?;
        self.sessions.validate_key(cookie_key)?;
        Ok(self.create_user())
    }

    /// Allocates an empty history and returns the new player's id.
    pub fn create_user(&mut self) -> UserId {
        let id = self.sessions.issue_user(Vec::new());
        tracing::info!(user_id = %id, "wordle player joined");
        id
    }

    pub fn is_valid_user(&self, user_id: &UserId) -> bool {
        self.sessions.is_valid_user(user_id)
    }

    /// Scores a guess and appends it to the player's history.
    ///
    /// The guess is uppercased first but not trimmed: surrounding
    /// whitespace counts as a non-letter. Repeated guesses, and guesses made
    /// after the word was found, are recorded like any other.
    ///
    /// # Errors
    /// - `InvalidUser` if the id was not issued here
    /// - `InvalidGuess` for a wrong length or a non-letter; the history is
    ///   left untouched
    pub fn make_guess(
        &mut self,
        user_id: &UserId,
        guess: &str,
    ) -> Result<GuessResponse, WordleError> {
        if !self.sessions.is_valid_user(user_id) {
            return Err(SessionError::InvalidUser.into());
        }

        let guess = guess.to_uppercase();
        let letters: Vec<char> = guess.chars().collect();
        if let Err(reason) = self.check_guess(&letters) {
            tracing::debug!(user_id = %user_id, %reason, "guess rejected");
            return Err(WordleError::InvalidGuess(reason));
        }

        let feedback = score_guess(&self.secret, &letters);
        let history = self.sessions.user_mut(user_id)?;
        history.push(Attempt {
            guess: guess.clone(),
            feedback: feedback.clone(),
        });

        tracing::debug!(
            user_id = %user_id,
            attempts = history.len(),
            "guess recorded"
        );

        Ok(GuessResponse { guess, feedback })
    }

    /// Same as [`make_guess`](Self::make_guess), after checking that the
    /// query id matches the cookie id.
    ///
    /// # Errors
    /// `KeyMismatch` first, then everything `make_guess` returns.
    pub fn guess(
        &mut self,
        presented_user_id: &UserId,
        cookie_user_id: &UserId,
        guess: &str,
    ) -> Result<GuessResponse, WordleError> {
        ensure_same(presented_user_id, cookie_user_id)?;
        self.make_guess(cookie_user_id, guess)
    }

    /// The player's full history, and whether any attempt was a win.
    ///
    /// # Errors
    /// Returns `InvalidUser` if the id was not issued here.
    pub fn get_status(
        &mut self,
        user_id: &UserId,
    ) -> Result<StatusResponse, WordleError> {
        let history = self.sessions.user_mut(user_id)?;
        Ok(StatusResponse {
            finished: history.iter().any(Attempt::is_win),
            attempts: history.clone(),
        })
    }

    /// [`get_status`](Self::get_status) behind a query/cookie id match.
    pub fn status(
        &mut self,
        presented_user_id: &UserId,
        cookie_user_id: &UserId,
    ) -> Result<StatusResponse, WordleError> {
        ensure_same(presented_user_id, cookie_user_id)?;
        self.get_status(cookie_user_id)
    }

    /// Sweeps idle keys and players.
    pub fn expire_stale(&mut self) -> ExpiredCounts {
        self.sessions.expire_stale()
    }

    fn check_guess(&self, letters: &[char]) -> Result<(), String> {
        if letters.len() != self.secret.len() {
            return Err(format!(
                "expected {} letters, got {}",
                self.secret.len(),
                letters.len()
            ));
        }
        if let Some(c) = letters.iter().find(|c| !c.is_alphabetic()) {
            return Err(format!("'{c}' is not a letter"));
        }
        Ok(())
    }
}

fn normalize_secret(word: &str) -> String {
    word.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelwars_protocol::LetterFeedback::{
        Correct as C, Incorrect as I, Misplaced as M,
    };
    use std::time::Duration;

    fn game(secret: &str) -> WordleGame {
        WordleGame::new(secret, SessionConfig::default()).unwrap()
    }

    fn player(game: &mut WordleGame) -> UserId {
        let key = game.preinit();
        game.init(&key, &key).unwrap()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_uppercases_secret() {
        let mut g = game("crane");
        let id = player(&mut g);
        let r = g.make_guess(&id, "CRANE").unwrap();
        assert_eq!(r.feedback, vec![C; 5]);
    }

    #[test]
    fn test_new_empty_secret_returns_error() {
        let result = WordleGame::new("  ", SessionConfig::default());
        assert!(matches!(result, Err(WordleError::InvalidSecret(_))));
    }

    #[test]
    fn test_new_non_letter_secret_returns_error() {
        let result = WordleGame::new("abc1", SessionConfig::default());
        assert!(matches!(result, Err(WordleError::InvalidSecret(_))));
    }

    #[test]
    fn test_new_length_counts_chars_not_bytes() {
        let mut g = game("écologie");
        let id = player(&mut g);
        assert!(g.make_guess(&id, "ECOLOGIE").is_ok());
        assert!(matches!(
            g.make_guess(&id, "ECOLOGI"),
            Err(WordleError::InvalidGuess(_))
        ));
    }

    // =========================================================================
    // init
    // =========================================================================

    #[test]
    fn test_init_mismatched_keys_returns_key_mismatch() {
        let mut g = game("abcd");
        let a = g.preinit();
        let b = g.preinit();
        assert_eq!(
            g.init(&a, &b),
            Err(WordleError::Session(SessionError::KeyMismatch))
        );
    }

    #[test]
    fn test_init_unknown_key_returns_invalid_key() {
        let mut g = game("abcd");
        let key = Key::from("nope");
        assert_eq!(
            g.init(&key, &key),
            Err(WordleError::Session(SessionError::InvalidKey))
        );
    }

    #[test]
    fn test_create_user_ids_are_valid_and_distinct() {
        let mut g = game("abcd");
        let a = g.create_user();
        let b = g.create_user();
        assert_ne!(a, b);
        assert!(g.is_valid_user(&a));
        assert!(g.is_valid_user(&b));
        assert!(!g.is_valid_user(&UserId::from("stranger")));
    }

    // =========================================================================
    // make_guess
    // =========================================================================

    #[test]
    fn test_make_guess_lowercase_is_normalized() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        let r = g.make_guess(&id, "abab").unwrap();
        assert_eq!(r.guess, "ABAB");
        assert_eq!(r.feedback, vec![C, C, I, I]);
    }

    #[test]
    fn test_make_guess_misplaced_letters() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        let r = g.make_guess(&id, "DCBA").unwrap();
        assert_eq!(r.feedback, vec![M, M, M, M]);
    }

    #[test]
    fn test_make_guess_wrong_length_returns_invalid_guess() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        assert!(matches!(
            g.make_guess(&id, "ABC"),
            Err(WordleError::InvalidGuess(_))
        ));
        assert!(matches!(
            g.make_guess(&id, "ABCDE"),
            Err(WordleError::InvalidGuess(_))
        ));
        assert!(g.get_status(&id).unwrap().attempts.is_empty());
    }

    #[test]
    fn test_make_guess_non_letter_returns_invalid_guess() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        assert!(matches!(
            g.make_guess(&id, "AB1D"),
            Err(WordleError::InvalidGuess(_))
        ));
        assert!(matches!(
            g.make_guess(&id, "AB D"),
            Err(WordleError::InvalidGuess(_))
        ));
        assert!(g.get_status(&id).unwrap().attempts.is_empty());
    }

    #[test]
    fn test_make_guess_surrounding_whitespace_returns_invalid_guess() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        for guess in [" abcd ", "abcd\n", " ABC", "ABCD\t"] {
            assert!(
                matches!(
                    g.make_guess(&id, guess),
                    Err(WordleError::InvalidGuess(_))
                ),
                "{guess:?} should be rejected"
            );
        }
        assert!(g.get_status(&id).unwrap().attempts.is_empty());
    }

    #[test]
    fn test_make_guess_accented_guess_is_accepted() {
        let mut g = game("énergies");
        let id = player(&mut g);
        let r = g.make_guess(&id, "ÉNERGIES").unwrap();
        assert_eq!(r.feedback, vec![C; 8]);
    }

    #[test]
    fn test_make_guess_unknown_user_returns_invalid_user() {
        let mut g = game("ABCD");
        assert_eq!(
            g.make_guess(&UserId::from("ghost"), "ABCD"),
            Err(WordleError::Session(SessionError::InvalidUser))
        );
    }

    #[test]
    fn test_make_guess_repeated_guesses_are_all_recorded() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        for _ in 0..3 {
            g.make_guess(&id, "WXYZ").unwrap();
        }
        assert_eq!(g.get_status(&id).unwrap().attempts.len(), 3);
    }

    #[test]
    fn test_make_guess_histories_are_per_user() {
        let mut g = game("ABCD");
        let alice = player(&mut g);
        let bob = player(&mut g);

        g.make_guess(&alice, "ABCD").unwrap();

        assert!(g.get_status(&alice).unwrap().finished);
        let bob_status = g.get_status(&bob).unwrap();
        assert!(!bob_status.finished);
        assert!(bob_status.attempts.is_empty());
    }

    #[test]
    fn test_guess_mismatched_ids_returns_key_mismatch() {
        let mut g = game("ABCD");
        let a = player(&mut g);
        let b = player(&mut g);
        assert_eq!(
            g.guess(&a, &b, "ABCD"),
            Err(WordleError::Session(SessionError::KeyMismatch))
        );
    }

    #[test]
    fn test_guess_mismatch_wins_over_invalid_guess() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        assert_eq!(
            g.guess(&UserId::from("other"), &id, "!!"),
            Err(WordleError::Session(SessionError::KeyMismatch))
        );
    }

    // =========================================================================
    // get_status
    // =========================================================================

    #[test]
    fn test_get_status_new_player_is_not_finished() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        let s = g.get_status(&id).unwrap();
        assert!(s.attempts.is_empty());
        assert!(!s.finished);
    }

    #[test]
    fn test_get_status_win_then_more_guesses_stays_finished() {
        let mut g = game("ABCD");
        let id = player(&mut g);

        g.make_guess(&id, "DCBA").unwrap();
        g.make_guess(&id, "ABCD").unwrap();
        g.make_guess(&id, "WXYZ").unwrap();

        let s = g.get_status(&id).unwrap();
        assert!(s.finished);
        let guesses: Vec<&str> =
            s.attempts.iter().map(|a| a.guess.as_str()).collect();
        assert_eq!(guesses, vec!["DCBA", "ABCD", "WXYZ"]);
    }

    #[test]
    fn test_status_mismatched_ids_returns_key_mismatch() {
        let mut g = game("ABCD");
        let id = player(&mut g);
        assert_eq!(
            g.status(&UserId::from("x"), &id),
            Err(WordleError::Session(SessionError::KeyMismatch))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_stale_idle_player_becomes_invalid() {
        let mut g = WordleGame::new(
            "ABCD",
            SessionConfig {
                ttl: Some(Duration::from_secs(10)),
            },
        )
        .unwrap();
        let id = player(&mut g);

        tokio::time::advance(Duration::from_secs(11)).await;
        let expired = g.expire_stale();

        assert_eq!(expired.users, 1);
        assert_eq!(
            g.get_status(&id),
            Err(WordleError::Session(SessionError::InvalidUser))
        );
    }
}
