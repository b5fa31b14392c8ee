//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, no storage access
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct Health<'a> {
    pub status: &'static str,
    pub service: &'a str,
}

pub async fn health(State(state): State<AppState>) -> Response {
    Json(Health {
        status: "healthy",
        service: &state.cfg().server.service_name,
    })
    .into_response()
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
