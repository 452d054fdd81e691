//! HTTP handlers: decode the request, lock one game, call the engine.
//!
//! Every handler follows the same shape:
//!   1. Pull the query and cookies out of the request
//!   2. Look up the instance (`InstanceNotFound` if the name is unknown)
//!   3. Lock it for exactly one engine call
//!   4. Serialize the result, setting cookies where the flow requires it
//!
//! Engine errors bubble up through `?` and become `{"error": ...}` bodies
//! via [`PixelwarsError`]'s `IntoResponse`.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use pixelwars_protocol::{
    GuessQuery, Key, KeyQuery, PaintCommand, PreinitResponse, UserId,
    UserQuery, WelcomeResponse, WordleInitResponse,
};

use crate::PixelwarsError;
use crate::cookies;
use crate::server::AppState;

type AppResult = Result<Response, PixelwarsError>;

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub(crate) async fn welcome(
    State(state): State<Arc<AppState>>,
) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Pixel Wars".to_string(),
        canvases: state.canvas_names(),
    })
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

pub(crate) async fn canvas_preinit(
    State(state): State<Arc<AppState>>,
    Path(instance): Path<String>,
) -> AppResult {
    let key = state.canvas(&instance)?.lock().await.preinit();
    tracing::debug!(canvas = %instance, %key, "key issued");

    Ok((
        [(SET_COOKIE, state.cookies.key(&key))],
        Json(PreinitResponse { key }),
    )
        .into_response())
}

pub(crate) async fn canvas_init(
    State(state): State<Arc<AppState>>,
    Path(instance): Path<String>,
    headers: HeaderMap,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> AppResult {
    let canvas = state.canvas(&instance)?;
    let Query(query) = query?;

    let response = canvas
        .lock()
        .await
        .init(&Key(query.key), &cookies::key(&headers))?;

    Ok((
        [(SET_COOKIE, state.cookies.id(&response.id))],
        Json(response),
    )
        .into_response())
}

pub(crate) async fn canvas_deltas(
    State(state): State<Arc<AppState>>,
    Path(instance): Path<String>,
    headers: HeaderMap,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult {
    let canvas = state.canvas(&instance)?;
    let Query(query) = query?;

    let response = canvas.lock().await.compute_deltas(
        &UserId(query.id),
        &cookies::key(&headers),
        &cookies::user_id(&headers),
    )?;

    Ok(Json(response).into_response())
}

/// `POST colour`. The body is either `[[x, y], [r, g, b]]` or
/// `{"x", "y", "r", "g", "b"}`.
pub(crate) async fn canvas_paint(
    State(state): State<Arc<AppState>>,
    Path(instance): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult {
    let canvas = state.canvas(&instance)?;
    let cmd = PaintCommand::decode(&body)?;

    let response = canvas.lock().await.paint(
        cmd,
        &cookies::key(&headers),
        &cookies::user_id(&headers),
    )?;

    Ok(Json(response).into_response())
}

// ---------------------------------------------------------------------------
// Wordle
// ---------------------------------------------------------------------------

pub(crate) async fn wordle_preinit(
    State(state): State<Arc<AppState>>,
) -> AppResult {
    let key = state.wordle.lock().await.preinit();
    tracing::debug!(%key, "wordle key issued");

    Ok((
        [(SET_COOKIE, state.cookies.key(&key))],
        Json(PreinitResponse { key }),
    )
        .into_response())
}

pub(crate) async fn wordle_init(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> AppResult {
    let Query(query) = query?;

    let id = state
        .wordle
        .lock()
        .await
        .init(&Key(query.key), &cookies::key(&headers))?;

    Ok((
        [(SET_COOKIE, state.cookies.id(&id))],
        Json(WordleInitResponse { id }),
    )
        .into_response())
}

pub(crate) async fn wordle_guess(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<GuessQuery>, QueryRejection>,
) -> AppResult {
    let Query(query) = query?;

    let response = state.wordle.lock().await.guess(
        &UserId(query.id),
        &cookies::user_id(&headers),
        &query.guess,
    )?;

    Ok(Json(response).into_response())
}

pub(crate) async fn wordle_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult {
    let Query(query) = query?;

    let response = state
        .wordle
        .lock()
        .await
        .status(&UserId(query.id), &cookies::user_id(&headers))?;

    Ok(Json(response).into_response())
}
