//! Per-request instrumentation for the user routes.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Time the request and count it under its route template and final status.
///
/// Installed with `route_layer`, so only matched user routes are recorded.
/// Input rejections (422) never reach the store and are not recorded.
pub async fn track_requests(
    State(state): State<AppState>,
    matched: Option<MatchedPath>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_owned();
    let endpoint = matched
        .as_ref()
        .map(|m| endpoint_label(m.as_str()))
        .unwrap_or_else(|| req.uri().path().to_owned());

    let started = Instant::now();
    let resp = next.run(req).await;
    let status = resp.status();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        tracing::debug!(%method, %endpoint, "request rejected before handling");
        return resp;
    }

    state
        .metrics()
        .record(&method, &endpoint, status.as_u16(), started.elapsed());
    tracing::debug!(%method, %endpoint, status = status.as_u16(), "request finished");

    resp
}

/// Render an axum route template with brace parameters: `/:user_id` -> `/{user_id}`.
pub fn endpoint_label(template: &str) -> String {
    template
        .split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => seg.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
