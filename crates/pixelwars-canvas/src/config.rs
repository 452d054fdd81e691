//! Canvas configuration and delta policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DeltaPolicy
// ---------------------------------------------------------------------------

/// What `compute_deltas` does to the user's stored view.
///
/// - **Refresh**: after the deltas are computed, the view becomes a copy
///   of the current grid. The next call only reports what changed since
///   this one.
/// - **Cumulative**: the view is left alone. Every call reports every cell
///   that still differs from what the user saw at `init`. Kept for clients
///   that rely on cells being delivered again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaPolicy {
    #[default]
    Refresh,
    Cumulative,
}

impl std::fmt::Display for DeltaPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refresh => write!(f, "Refresh"),
            Self::Cumulative => write!(f, "Cumulative"),
        }
    }
}

// ---------------------------------------------------------------------------
// CanvasConfig
// ---------------------------------------------------------------------------

/// Configuration for one canvas instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// The instance name, used in the URL path (`/api/v1/{name}/...`).
    pub name: String,

    /// Width in cells.
    pub nx: usize,

    /// Height in cells.
    pub ny: usize,

    /// Minimum time between two successful paints by the same user.
    pub cooldown: Duration,

    pub delta_policy: DeltaPolicy,
}

impl CanvasConfig {
    /// A config with the given name and size, defaults for everything else.
    pub fn new(name: impl Into<String>, nx: usize, ny: usize) -> Self {
        Self {
            name: name.into(),
            nx,
            ny,
            ..Self::default()
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            name: "Test".to_string(),
            nx: 10,
            ny: 10,
            cooldown: Duration::from_secs(1),
            delta_policy: DeltaPolicy::Refresh,
        }
    }
}
