//! # Pixel Wars
//!
//! Session-based multiplayer web games: a shared pixel canvas with a
//! per-painter cooldown, and a Wordle with per-player histories.
//!
//! The game engines live in their own crates and know nothing about HTTP.
//! This crate wires them to axum: one mutex per game instance, cookies for
//! the key/id handshake, and a background task that sweeps idle sessions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixelwars::prelude::*;
//!
//! # async fn start() -> Result<(), PixelwarsError> {
//! let server = PixelwarsServer::builder()
//!     .bind("0.0.0.0:8000")
//!     .canvas(CanvasConfig::new("Main", 64, 64))
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod cookies;
mod error;
mod handler;
mod server;

pub use config::{ServerConfig, WORDLE_INSTANCE, parse_canvas_arg};
pub use error::PixelwarsError;
pub use server::{PixelwarsServer, PixelwarsServerBuilder};

/// Everything needed to configure and run a server.
pub mod prelude {
    pub use crate::{
        PixelwarsError, PixelwarsServer, PixelwarsServerBuilder, ServerConfig,
    };
    pub use pixelwars_canvas::{CanvasConfig, DeltaPolicy};
    pub use pixelwars_session::SessionConfig;
    pub use pixelwars_wordle::{WordChoice, WordleConfig};
}
