//! `PixelwarsServer` builder and server loop.
//!
//! This is the entry point for running a Pixel Wars server. It builds every
//! game instance from the configuration, binds the listener, and serves the
//! HTTP routes in [`handler`](crate::handler).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use pixelwars_canvas::{Canvas, CanvasConfig, DeltaPolicy};
use pixelwars_session::SessionConfig;
use pixelwars_wordle::{WordleConfig, WordleGame};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cookies::CookiePolicy;
use crate::handler;
use crate::{PixelwarsError, ServerConfig};

/// Shared server state passed to every handler.
///
/// The instance map is fixed at startup; only the games inside it change.
/// Each game has its own mutex, so a paint on one canvas never waits on
/// another canvas or on the word game.
pub(crate) struct AppState {
    pub(crate) canvases: HashMap<String, Mutex<Canvas>>,
    pub(crate) wordle: Mutex<WordleGame>,
    pub(crate) cookies: CookiePolicy,
}

impl AppState {
    pub(crate) fn from_config(
        config: &ServerConfig,
    ) -> Result<Self, PixelwarsError> {
        config.validate()?;

        let mut canvases = HashMap::with_capacity(config.canvases.len());
        for canvas_config in &config.canvases {
            let canvas = Canvas::new(canvas_config.clone(), config.session.clone())?;
            canvases.insert(canvas_config.name.clone(), Mutex::new(canvas));
        }

        let secret = config.wordle.resolve()?;
        let wordle = WordleGame::new(&secret, config.session.clone())?;

        Ok(Self {
            canvases,
            wordle: Mutex::new(wordle),
            cookies: CookiePolicy {
                max_age: config.cookie_max_age,
            },
        })
    }

    /// Looks up a canvas by the name in the request path.
    pub(crate) fn canvas(
        &self,
        name: &str,
    ) -> Result<&Mutex<Canvas>, PixelwarsError> {
        self.canvases
            .get(name)
            .ok_or_else(|| PixelwarsError::InstanceNotFound(name.to_string()))
    }

    /// Canvas names, sorted.
    pub(crate) fn canvas_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.canvases.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Builds the router: every route, plus CORS and request tracing.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    // Credentials are allowed, so the origin is mirrored rather than `*`.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handler::welcome))
        .route("/health", get(handler::health))
        .route("/api/v1/wordle/preinit", get(handler::wordle_preinit))
        .route("/api/v1/wordle/init", get(handler::wordle_init))
        .route("/api/v1/wordle/guess", get(handler::wordle_guess))
        .route("/api/v1/wordle/status", get(handler::wordle_status))
        .route("/api/v1/{instance}/preinit", get(handler::canvas_preinit))
        .route("/api/v1/{instance}/init", get(handler::canvas_init))
        .route("/api/v1/{instance}/deltas", get(handler::canvas_deltas))
        .route("/api/v1/{instance}/colour", post(handler::canvas_paint))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builder for configuring and starting a Pixel Wars server.
///
/// # Example
///
/// ```rust,ignore
/// use pixelwars::prelude::*;
///
/// let server = PixelwarsServer::builder()
///     .bind("0.0.0.0:8000")
///     .canvas(CanvasConfig::new("Main", 64, 64))
///     .wordle(WordleConfig::fixed("mines"))
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct PixelwarsServerBuilder {
    config: ServerConfig,
}

impl PixelwarsServerBuilder {
    /// Creates a new builder with default settings and no canvases.
    ///
    /// If no canvas is added, `build` falls back to the default `Test`
    /// canvas.
    pub fn new() -> Self {
        Self {
            config: ServerConfig {
                canvases: Vec::new(),
                ..ServerConfig::default()
            },
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration shared by every instance.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// Adds a canvas instance.
    pub fn canvas(mut self, config: CanvasConfig) -> Self {
        self.config.canvases.push(config);
        self
    }

    /// Sets the delta policy of every canvas added so far.
    pub fn delta_policy(mut self, policy: DeltaPolicy) -> Self {
        for canvas in &mut self.config.canvases {
            canvas.delta_policy = policy;
        }
        self
    }

    /// Sets the word list and how the secret is chosen.
    pub fn wordle(mut self, config: WordleConfig) -> Self {
        self.config.wordle = config;
        self
    }

    /// Sets the `Max-Age` of the session cookies, in seconds.
    pub fn cookie_max_age(mut self, secs: u64) -> Self {
        self.config.cookie_max_age = secs;
        self
    }

    /// Sets how often idle sessions are swept.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config.sweep_interval = interval;
        self
    }

    /// Creates every game instance and binds the listener.
    ///
    /// # Errors
    /// Invalid configuration (duplicate or reserved canvas names, zero-sized
    /// canvas, unusable secret word) or a failed bind.
    pub async fn build(mut self) -> Result<PixelwarsServer, PixelwarsError> {
        if self.config.canvases.is_empty() {
            self.config.canvases.push(CanvasConfig::default());
        }

        let state = Arc::new(AppState::from_config(&self.config)?);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;

        Ok(PixelwarsServer {
            listener,
            state,
            sweep_interval: self.config.sweep_interval,
        })
    }
}

impl Default for PixelwarsServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Pixel Wars server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct PixelwarsServer {
    listener: TcpListener,
    state: Arc<AppState>,
    sweep_interval: Duration,
}

impl PixelwarsServer {
    /// Creates a new builder.
    pub fn builder() -> PixelwarsServerBuilder {
        PixelwarsServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the process is terminated.
    ///
    /// Also starts the background task that sweeps idle sessions.
    pub async fn run(self) -> Result<(), PixelwarsError> {
        let addr = self.listener.local_addr()?;
        tracing::info!(
            %addr,
            canvases = ?self.state.canvas_names(),
            "Pixel Wars server running"
        );

        let sweeper = tokio::spawn(sweep_loop(
            Arc::clone(&self.state),
            self.sweep_interval,
        ));

        let result = axum::serve(self.listener, router(self.state)).await;
        sweeper.abort();
        result.map_err(PixelwarsError::from)
    }
}

/// Periodically drops idle keys and users from every instance.
async fn sweep_loop(state: Arc<AppState>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately; nothing is stale yet.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        for (name, canvas) in &state.canvases {
            let expired = canvas.lock().await.expire_stale();
            if expired.keys + expired.users > 0 {
                tracing::info!(
                    canvas = %name,
                    keys = expired.keys,
                    users = expired.users,
                    "expired idle sessions"
                );
            }
        }

        let expired = state.wordle.lock().await.expire_stale();
        if expired.keys + expired.users > 0 {
            tracing::info!(
                keys = expired.keys,
                users = expired.users,
                "expired idle wordle sessions"
            );
        }
    }
}
