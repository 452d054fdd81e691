//! Wire types for Pixel Wars.
//!
//! This crate defines what clients and the server exchange:
//!
//! - **Types** ([`Key`], [`UserId`], [`Rgb`], [`Delta`], [`Attempt`]):
//!   values the engines compute and the transport serializes as-is.
//! - **Messages** ([`PaintCommand`], the `*Query` and `*Response`
//!   structs): one struct per endpoint input/output.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding.
//!
//! # Architecture
//!
//! ```text
//! Transport (HTTP) → Protocol (typed requests) → Session / Engines
//! ```
//!
//! The protocol layer knows nothing about sessions or grids. It only turns
//! loosely shaped client input into strongly typed values.

mod error;
mod messages;
mod types;

pub use error::ProtocolError;
pub use messages::{
    CanvasInitResponse, DeltasResponse, ErrorBody, GuessQuery, GuessResponse,
    KeyQuery, PaintCommand, PaintResponse, PreinitResponse, StatusResponse,
    UserQuery, WelcomeResponse, WordleInitResponse,
};
pub use types::{Attempt, Delta, Key, LetterFeedback, Rgb, UserId};
