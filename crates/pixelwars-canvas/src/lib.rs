//! Pixel canvas engine for Pixel Wars.
//!
//! A canvas is an `nx` by `ny` grid of colours shared by every painter.
//! Each painter has a cooldown between paints and a private snapshot of
//! the grid used to compute what changed since they last looked.
//!
//! # Key types
//!
//! - [`Canvas`]: the engine: `preinit`, `init`, `compute_deltas`, `paint`
//! - [`CanvasConfig`]: size, cooldown, delta policy
//! - [`DeltaPolicy`]: whether a delta fetch refreshes the user's view
//! - [`Grid`]: the flat, fixed-shape colour grid
//! - [`CanvasError`]: everything a canvas operation can reject

mod canvas;
mod config;
mod error;
mod grid;

pub use canvas::{Canvas, CanvasView};
pub use config::{CanvasConfig, DeltaPolicy};
pub use error::CanvasError;
pub use grid::Grid;
