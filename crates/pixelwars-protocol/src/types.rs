//! Core value types shared by every Pixel Wars crate.
//!
//! These are the structures that end up inside JSON responses: session
//! tokens, colours, deltas, and Wordle feedback. The engines use them
//! directly so that what the engine computes is exactly what goes on the
//! wire, with no translation layer in between.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque per-visit token proving the client called `preinit`.
///
/// Newtype wrapper around the token string so a `Key` can never be passed
/// where a `UserId` is expected, even though both are strings underneath.
///
/// `#[serde(transparent)]` serializes this as the bare string, so
/// `Key("ab12..")` becomes `"ab12.."` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

/// An opaque per-participant token identifying one player's state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl Key {
    /// Returns the full token string (what goes into cookies and JSON).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    /// Returns the full token string (what goes into cookies and JSON).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Display prints an abbreviated form (`K-1a2b3c4d`), meant for logs.
/// Use [`Key::as_str`] when the full token is needed.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "K-{}", abbreviate(&self.0))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", abbreviate(&self.0))
    }
}

fn abbreviate(token: &str) -> &str {
    match token.char_indices().nth(8) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// One pixel colour.
///
/// On the wire a colour is a three-element array `[r, g, b]`. Using `u8`
/// components means anything outside 0–255 is rejected while decoding,
/// before the canvas ever sees it.
///
/// `#[serde(from, into)]` routes (de)serialization through the tuple
/// `(u8, u8, u8)`, which serde renders as a JSON array.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "(u8, u8, u8)", into = "(u8, u8, u8)")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// The colour every cell starts with.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// A cell whose authoritative colour differs from a user's last view.
///
/// Encoded as `[y, x, r, g, b]`. Note the coordinate order: **y first**.
/// Existing clients depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(usize, usize, u8, u8, u8)",
    into = "(usize, usize, u8, u8, u8)"
)]
pub struct Delta {
    pub y: usize,
    pub x: usize,
    pub color: Rgb,
}

impl From<(usize, usize, u8, u8, u8)> for Delta {
    fn from((y, x, r, g, b): (usize, usize, u8, u8, u8)) -> Self {
        Self {
            y,
            x,
            color: Rgb { r, g, b },
        }
    }
}

impl From<Delta> for (usize, usize, u8, u8, u8) {
    fn from(d: Delta) -> Self {
        (d.y, d.x, d.color.r, d.color.g, d.color.b)
    }
}

// ---------------------------------------------------------------------------
// Wordle feedback
// ---------------------------------------------------------------------------

/// Per-letter verdict for a Wordle guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterFeedback {
    /// Right letter, right position.
    Correct,
    /// Letter occurs in the secret, but elsewhere (and not already used
    /// up by `Correct` or earlier `Misplaced` marks).
    Misplaced,
    /// Letter is absent, or all its occurrences are already accounted for.
    Incorrect,
}

/// One submitted guess together with the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub guess: String,
    pub feedback: Vec<LetterFeedback>,
}

impl Attempt {
    /// `true` if every letter was `Correct`.
    pub fn is_win(&self) -> bool {
        !self.feedback.is_empty()
            && self.feedback.iter().all(|f| *f == LetterFeedback::Correct)
    }
}
