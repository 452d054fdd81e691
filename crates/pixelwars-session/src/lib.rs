//! Session registry for Pixel Wars.
//!
//! Every game instance (each canvas, the Wordle game) owns one
//! [`SessionRegistry`]. It handles:
//!
//! 1. **Keys**: opaque per-visit tokens handed out by `preinit`
//! 2. **Users**: opaque per-player ids handed out by `init`, each owning
//!    the instance's per-user state (a canvas view, a guess history)
//! 3. **Expiry**: entries idle for longer than the configured TTL are
//!    swept so per-user state does not grow without bound
//!
//! # How it fits in the stack
//!
//! ```text
//! Engines (above)  ← canvas / wordle store per-user state in the registry
//!     ↕
//! Session Layer (this crate)  ← issues and validates keys and user ids
//!     ↕
//! Protocol Layer (below)  ← provides Key, UserId
//! ```

mod error;
mod registry;
mod session;

pub use error::SessionError;
pub use registry::{ensure_same, ExpiredCounts, SessionRegistry};
pub use session::SessionConfig;
