//! Unified error type for the Pixel Wars server.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pixelwars_canvas::CanvasError;
use pixelwars_protocol::{ErrorBody, ProtocolError};
use pixelwars_session::SessionError;
use pixelwars_wordle::WordleError;

/// Top-level error that wraps all crate-specific errors.
///
/// Handlers return `Result<_, PixelwarsError>` and use `?` on engine calls;
/// the `#[from]` variants convert automatically. [`IntoResponse`] turns it
/// into a status code and a `{"error": "..."}` body.
#[derive(Debug, thiserror::Error)]
pub enum PixelwarsError {
    /// The request body could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Key or user id validation failed outside of a game engine.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A canvas operation was rejected.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// A Wordle operation was rejected.
    #[error(transparent)]
    Wordle(#[from] WordleError),

    /// The query string could not be parsed.
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// No canvas is registered under this name.
    #[error("no game instance named '{0}'")]
    InstanceNotFound(String),

    /// The server configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PixelwarsError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Protocol(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::Session(e) => session_status(e),
            Self::Canvas(e) => match e {
                CanvasError::Session(e) => session_status(e),
                CanvasError::OutOfBounds { .. } => StatusCode::BAD_REQUEST,
                CanvasError::CooldownActive { .. } => {
                    StatusCode::TOO_MANY_REQUESTS
                }
                CanvasError::InvalidDimensions { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Wordle(e) => match e {
                WordleError::Session(e) => session_status(e),
                WordleError::InvalidGuess(_) => StatusCode::BAD_REQUEST,
                WordleError::InvalidSecret(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InstanceNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidConfig(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn session_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::KeyMismatch => StatusCode::FORBIDDEN,
        SessionError::InvalidKey | SessionError::InvalidUser => {
            StatusCode::UNAUTHORIZED
        }
    }
}

impl IntoResponse for PixelwarsError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_canvas_error() {
        let err: PixelwarsError = CanvasError::OutOfBounds {
            x: -1,
            y: 0,
            nx: 10,
            ny: 10,
        }
        .into();
        assert!(matches!(err, PixelwarsError::Canvas(_)));
        assert!(err.to_string().contains("(-1, 0)"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: PixelwarsError =
            ProtocolError::InvalidMessage("empty body".into()).into();
        assert!(matches!(err, PixelwarsError::Protocol(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_identity_errors() {
        let mismatch: PixelwarsError =
            CanvasError::from(SessionError::KeyMismatch).into();
        let invalid_key: PixelwarsError =
            CanvasError::from(SessionError::InvalidKey).into();
        let invalid_user: PixelwarsError =
            WordleError::from(SessionError::InvalidUser).into();

        assert_eq!(mismatch.status(), StatusCode::FORBIDDEN);
        assert_eq!(invalid_key.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid_user.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_status_cooldown_is_too_many_requests() {
        let err: PixelwarsError = CanvasError::CooldownActive {
            remaining: Duration::from_millis(250),
        }
        .into();
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(err.to_string().contains("250 ms"));
    }

    #[test]
    fn test_status_instance_not_found() {
        let err = PixelwarsError::InstanceNotFound("Nope".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_status_invalid_guess_is_bad_request() {
        let err: PixelwarsError =
            WordleError::InvalidGuess("expected 5 letters, got 3".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
