//! Request and response shapes for the HTTP endpoints.
//!
//! The transport layer deserializes query strings into the `*Query`
//! structs, decodes paint bodies into [`PaintCommand`], and serializes the
//! `*Response` structs back out. Field names here ARE the JSON field names.

use serde::{Deserialize, Serialize};

use crate::{Attempt, Delta, Key, LetterFeedback, ProtocolError, Rgb, UserId};

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// `?key=...` on the `init` endpoints.
///
/// Missing parameters decode to an empty string, which never matches a
/// registered token, so the engine reports the usual mismatch error
/// instead of the framework rejecting the request with its own format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub key: String,
}

/// `?id=...` on `deltas` and Wordle `status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub id: String,
}

/// `?guess=...&id=...` on Wordle `guess`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuessQuery {
    #[serde(default)]
    pub guess: String,
    #[serde(default)]
    pub id: String,
}

// ---------------------------------------------------------------------------
// Paint request
// ---------------------------------------------------------------------------

/// A validated paint command: where, and which colour.
///
/// Coordinates are signed so that a negative coordinate reaches the canvas
/// and is reported as out of bounds, like any other bad coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintCommand {
    pub x: i64,
    pub y: i64,
    pub color: Rgb,
}

/// Every body shape the `colour` endpoint accepts.
///
/// `#[serde(untagged)]` tries each variant in order:
/// - `[[x, y], [r, g, b]]`: the shape existing clients send
/// - `{"x": .., "y": .., "r": .., "g": .., "b": ..}`: explicit fields
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PaintRequest {
    Pair((i64, i64), (u8, u8, u8)),
    Fields { x: i64, y: i64, r: u8, g: u8, b: u8 },
}

impl From<PaintRequest> for PaintCommand {
    fn from(req: PaintRequest) -> Self {
        match req {
            PaintRequest::Pair((x, y), (r, g, b)) => Self {
                x,
                y,
                color: Rgb { r, g, b },
            },
            PaintRequest::Fields { x, y, r, g, b } => Self {
                x,
                y,
                color: Rgb { r, g, b },
            },
        }
    }
}

impl PaintCommand {
    /// Decodes a raw JSON body into a paint command.
    ///
    /// # Errors
    /// - [`ProtocolError::InvalidMessage`] for an empty body
    /// - [`ProtocolError::Decode`] if the body matches neither shape
    pub fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::InvalidMessage("empty body".into()));
        }
        let req: PaintRequest =
            serde_json::from_slice(body).map_err(ProtocolError::Decode)?;
        Ok(req.into())
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreinitResponse {
    pub key: Key,
}

/// Reply to canvas `init`: the new id plus the whole grid.
///
/// `data` is column-major: `data[x][y]` is the colour at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasInitResponse {
    pub id: UserId,
    pub nx: usize,
    pub ny: usize,
    pub data: Vec<Vec<Rgb>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltasResponse {
    pub id: UserId,
    pub nx: usize,
    pub ny: usize,
    pub deltas: Vec<Delta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintResponse {
    pub message: String,
    pub x: usize,
    pub y: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleInitResponse {
    pub id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub guess: String,
    pub feedback: Vec<LetterFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub attempts: Vec<Attempt>,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub canvases: Vec<String>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
