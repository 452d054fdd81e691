//! Word list configuration.
//!
//! The secret word is picked here, once, when the server starts. The
//! engine itself never touches a random number generator: it is handed the
//! already-chosen word, which keeps it deterministic under test.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::WordleError;

/// The built-in word list.
pub const DEFAULT_WORDS: &[&str] = &[
    "informatique",
    "mathématiques",
    "mines",
    "internet",
    "énergies",
    "écologie",
    "jancovici",
    "thermodynamique",
];

/// How the secret word is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WordChoice {
    /// Use exactly this word, ignoring the list.
    Fixed(String),
    /// Use `words[i]`.
    Index(usize),
    /// Pick uniformly from the list.
    #[default]
    Random,
}

/// Configuration for the Wordle instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordleConfig {
    pub words: Vec<String>,
    pub choice: WordChoice,
}

impl Default for WordleConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            choice: WordChoice::Random,
        }
    }
}

impl WordleConfig {
    /// A config that always plays `word`.
    pub fn fixed(word: impl Into<String>) -> Self {
        Self {
            choice: WordChoice::Fixed(word.into()),
            ..Self::default()
        }
    }

    /// Resolves the choice to a concrete secret word.
    ///
    /// # Errors
    /// Returns [`WordleError::InvalidSecret`] for an out-of-range index or
    /// a random choice from an empty list.
    pub fn resolve(&self) -> Result<String, WordleError> {
        match &self.choice {
            WordChoice::Fixed(word) => Ok(word.clone()),
            WordChoice::Index(i) => self.words.get(*i).cloned().ok_or_else(|| {
                WordleError::InvalidSecret(format!(
                    "index {i} out of range for {} words",
                    self.words.len()
                ))
            }),
            WordChoice::Random => self
                .words
                .choose(&mut rand::rng())
                .cloned()
                .ok_or_else(|| {
                    WordleError::InvalidSecret("word list is empty".into())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fixed_returns_word() {
        assert_eq!(WordleConfig::fixed("crane").resolve(), Ok("crane".into()));
    }

    #[test]
    fn test_resolve_index_returns_list_entry() {
        let config = WordleConfig {
            choice: WordChoice::Index(2),
            ..WordleConfig::default()
        };
        assert_eq!(config.resolve(), Ok("mines".into()));
    }

    #[test]
    fn test_resolve_index_out_of_range_returns_error() {
        let config = WordleConfig {
            choice: WordChoice::Index(99),
            ..WordleConfig::default()
        };
        assert!(matches!(config.resolve(), Err(WordleError::InvalidSecret(_))));
    }

    #[test]
    fn test_resolve_random_picks_from_list() {
        let config = WordleConfig::default();
        let word = config.resolve().unwrap();
        assert!(config.words.contains(&word));
    }

    #[test]
    fn test_resolve_random_empty_list_returns_error() {
        let config = WordleConfig {
            words: Vec::new(),
            choice: WordChoice::Random,
        };
        assert!(matches!(config.resolve(), Err(WordleError::InvalidSecret(_))));
    }
}
