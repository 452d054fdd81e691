//! The canvas engine: one shared grid, many painters.
//!
//! A `Canvas` owns the authoritative grid and a session registry whose
//! per-user state is a [`CanvasView`]. It is a plain struct with `&mut self`
//! methods; the server puts each canvas behind its own mutex, which makes
//! every operation here one critical section.

use pixelwars_protocol::{
    CanvasInitResponse, Delta, DeltasResponse, Key, PaintCommand,
    PaintResponse, UserId,
};
use pixelwars_session::{
    ensure_same, ExpiredCounts, SessionConfig, SessionError, SessionRegistry,
};
use tokio::time::Instant;

use crate::{CanvasConfig, CanvasError, DeltaPolicy, Grid};

/// What one user has seen, and when they last painted.
#[derive(Debug, Clone)]
pub struct CanvasView {
    /// The grid as of the user's last delta fetch (all black at `init`).
    pub grid: Grid,

    /// `None` until the user's first successful paint.
    pub last_paint: Option<Instant>,
}

impl CanvasView {
    /// A fresh view: all black, never painted.
    pub fn blank(nx: usize, ny: usize) -> Self {
        Self {
            grid: Grid::new(nx, ny),
            last_paint: None,
        }
    }
}

/// One shared canvas instance.
pub struct Canvas {
    config: CanvasConfig,
    grid: Grid,
    sessions: SessionRegistry<CanvasView>,
}

impl Canvas {
    /// Creates a black canvas.
    ///
    /// # Errors
    /// Returns [`CanvasError::InvalidDimensions`] if either side is zero.
    pub fn new(
        config: CanvasConfig,
        session_config: SessionConfig,
    ) -> Result<Self, CanvasError> {
        if config.nx == 0 || config.ny == 0 {
            return Err(CanvasError::InvalidDimensions {
                nx: config.nx,
                ny: config.ny,
            });
        }
        let grid = Grid::new(config.nx, config.ny);
        tracing::info!(
            canvas = %config.name,
            nx = config.nx,
            ny = config.ny,
            cooldown_ms = config.cooldown.as_millis() as u64,
            delta_policy = %config.delta_policy,
            "canvas created"
        );
        Ok(Self {
            config,
            grid,
            sessions: SessionRegistry::new(session_config),
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The authoritative grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sessions(&self) -> &SessionRegistry<CanvasView> {
        &self.sessions
    }

    /// Issues a key the client must present back to `init`.
    pub fn preinit(&mut self) -> Key {
        self.sessions.issue_key()
    }

    /// Registers a new painter and returns the full current grid.
    ///
    /// The new user's view starts all black, NOT as a copy of the current
    /// grid, so their first delta fetch reports every non-black cell.
    ///
    /// # Errors
    /// - `KeyMismatch` if the query key and cookie key differ
    /// - `InvalidKey` if the key was not issued here
    pub fn init(
        &mut self,
        presented_key: &Key,
        cookie_key: &Key,
    ) -> Result<CanvasInitResponse, CanvasError> {
        ensure_same(presented_key, cookie_key)?;
        self.sessions.validate_key(cookie_key)?;

        let id = self
            .sessions
            .issue_user(CanvasView::blank(self.config.nx, self.config.ny));
        tracing::info!(canvas = %self.config.name, user_id = %id, "painter joined");

        Ok(CanvasInitResponse {
            id,
            nx: self.config.nx,
            ny: self.config.ny,
            data: self.grid.columns(),
        })
    }

    /// Lists every cell whose colour differs from the user's view.
    ///
    /// Deltas come out row-major (y, then x). Under
    /// [`DeltaPolicy::Refresh`] the view is then replaced by the current
    /// grid; under [`DeltaPolicy::Cumulative`] it is left untouched.
    ///
    /// # Errors
    /// - `KeyMismatch` if the query id and cookie id differ
    /// - `InvalidKey` / `InvalidUser` if either was not issued here
    pub fn compute_deltas(
        &mut self,
        presented_user_id: &UserId,
        cookie_key: &Key,
        cookie_user_id: &UserId,
    ) -> Result<DeltasResponse, CanvasError> {
        ensure_same(presented_user_id, cookie_user_id)?;
        self.sessions.validate_key(cookie_key)?;
        let view = self.sessions.user_mut(cookie_user_id)?;

        let deltas: Vec<Delta> = self.grid.diff(&view.grid);
        if self.config.delta_policy == DeltaPolicy::Refresh {
            view.grid.clone_from(&self.grid);
        }

        tracing::trace!(
            canvas = %self.config.name,
            user_id = %cookie_user_id,
            deltas = deltas.len(),
            "deltas computed"
        );

        Ok(DeltasResponse {
            id: cookie_user_id.clone(),
            nx: self.config.nx,
            ny: self.config.ny,
            deltas,
        })
    }

    /// Paints one cell, subject to bounds and the per-user cooldown.
    ///
    /// Only the touched cell changes. A rejected paint leaves both the
    /// grid and the user's cooldown timer untouched.
    ///
    /// # Errors
    /// - `InvalidUser` / `InvalidKey` if either was not issued here
    /// - `OutOfBounds` if `(x, y)` is outside the grid
    /// - `CooldownActive` if the user painted less than one cooldown ago
    pub fn paint(
        &mut self,
        cmd: PaintCommand,
        cookie_key: &Key,
        cookie_user_id: &UserId,
    ) -> Result<PaintResponse, CanvasError> {
        if !self.sessions.is_valid_user(cookie_user_id) {
            return Err(SessionError::InvalidUser.into());
        }
        self.sessions.validate_key(cookie_key)?;

        let (x, y) = self.check_bounds(cmd.x, cmd.y)?;

        let cooldown = self.config.cooldown;
        let view = self.sessions.user_mut(cookie_user_id)?;
        let now = Instant::now();
        if let Some(last) = view.last_paint {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < cooldown {
                let remaining = cooldown - elapsed;
                tracing::debug!(
                    canvas = %self.config.name,
                    user_id = %cookie_user_id,
                    remaining_ms = remaining.as_millis() as u64,
                    "paint rejected, cooldown active"
                );
                return Err(CanvasError::CooldownActive { remaining });
            }
        }

        self.grid.set(x, y, cmd.color);
        view.last_paint = Some(now);

        tracing::debug!(
            canvas = %self.config.name,
            user_id = %cookie_user_id,
            x,
            y,
            color = %cmd.color,
            "pixel painted"
        );

        Ok(PaintResponse {
            message: "Pixel updated.".to_string(),
            x,
            y,
            color: cmd.color,
        })
    }

    /// Sweeps idle keys and users.
    pub fn expire_stale(&mut self) -> ExpiredCounts {
        self.sessions.expire_stale()
    }

    fn check_bounds(&self, x: i64, y: i64) -> Result<(usize, usize), CanvasError> {
        let out_of_bounds = || CanvasError::OutOfBounds {
            x,
            y,
            nx: self.config.nx,
            ny: self.config.ny,
        };
        let ux = usize::try_from(x).map_err(|_| out_of_bounds())?;
        let uy = usize::try_from(y).map_err(|_| out_of_bounds())?;
        if ux >= self.config.nx || uy >= self.config.ny {
            return Err(out_of_bounds());
        }
        Ok((ux, uy))
    }
}
