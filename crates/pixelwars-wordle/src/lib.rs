//! Wordle engine for Pixel Wars.
//!
//! One secret word per instance, chosen at startup. Players register through
//! the same key/id handshake as canvases, then submit guesses and get one
//! [`LetterFeedback`](pixelwars_protocol::LetterFeedback) per letter back.
//!
//! # Key types
//!
//! - [`WordleGame`]: the engine: `preinit`, `init`, `make_guess`, `get_status`
//! - [`WordleConfig`] / [`WordChoice`]: word list and how the secret is picked
//! - [`score_guess`]: the duplicate-aware scoring function
//! - [`WordleError`]: everything a Wordle operation can reject

mod config;
mod error;
mod feedback;
mod game;

pub use config::{DEFAULT_WORDS, WordChoice, WordleConfig};
pub use error::WordleError;
pub use feedback::score_guess;
pub use game::WordleGame;
