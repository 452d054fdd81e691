//! Server configuration.

use std::collections::HashSet;
use std::time::Duration;

use pixelwars_canvas::CanvasConfig;
use pixelwars_session::SessionConfig;
use pixelwars_wordle::WordleConfig;

use crate::PixelwarsError;

/// Path segment reserved for the Wordle game; no canvas may use it.
pub const WORDLE_INSTANCE: &str = "wordle";

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on, e.g. `127.0.0.1:8000`. Port `0` picks a free one.
    pub bind_addr: String,

    /// `Max-Age` of the `key` and `id` cookies, in seconds.
    pub cookie_max_age: u64,

    /// How often idle keys and users are swept.
    pub sweep_interval: Duration,

    /// Session lifetime shared by every instance.
    pub session: SessionConfig,

    /// One entry per canvas instance. Names must be unique.
    pub canvases: Vec<CanvasConfig>,

    pub wordle: WordleConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            cookie_max_age: 3600,
            sweep_interval: Duration::from_secs(60),
            session: SessionConfig::default(),
            canvases: vec![CanvasConfig::default()],
            wordle: WordleConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Rejects duplicate canvas names and canvases that would shadow the
    /// Wordle routes.
    ///
    /// Dimensions are checked later, when the canvas is created.
    pub fn validate(&self) -> Result<(), PixelwarsError> {
        let mut seen = HashSet::new();
        for canvas in &self.canvases {
            if canvas.name.is_empty() {
                return Err(PixelwarsError::InvalidConfig(
                    "canvas name must not be empty".into(),
                ));
            }
            if canvas.name == WORDLE_INSTANCE {
                return Err(PixelwarsError::InvalidConfig(format!(
                    "'{WORDLE_INSTANCE}' is reserved for the word game"
                )));
            }
            if !seen.insert(canvas.name.as_str()) {
                return Err(PixelwarsError::InvalidConfig(format!(
                    "duplicate canvas name '{}'",
                    canvas.name
                )));
            }
        }
        if self.sweep_interval.is_zero() {
            return Err(PixelwarsError::InvalidConfig(
                "sweep interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parses a `--canvas` argument: `NAME=NXxNY` with an optional
/// `@COOLDOWN_MS` suffix.
///
/// ```text
/// Test=10x10
/// Big=200x100@500
/// ```
pub fn parse_canvas_arg(arg: &str) -> Result<CanvasConfig, String> {
    let (name, rest) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=NXxNY, got '{arg}'"))?;
    let (size, cooldown) = match rest.split_once('@') {
        Some((size, ms)) => {
            let ms: u64 = ms
                .parse()
                .map_err(|_| format!("invalid cooldown '{ms}' in '{arg}'"))?;
            (size, Some(Duration::from_millis(ms)))
        }
        None => (rest, None),
    };
    let (nx, ny) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected NXxNY, got '{size}'"))?;
    let nx: usize =
        nx.parse().map_err(|_| format!("invalid width '{nx}' in '{arg}'"))?;
    let ny: usize =
        ny.parse().map_err(|_| format!("invalid height '{ny}' in '{arg}'"))?;

    let mut config = CanvasConfig::new(name, nx, ny);
    if let Some(cooldown) = cooldown {
        config.cooldown = cooldown;
    }
    Ok(config)
}
