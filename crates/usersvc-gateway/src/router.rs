//! Axum router wiring.
//!
//! Ops endpoints sit beside the user routes; only the latter are metered.

use axum::{middleware, routing::get, Router};

use crate::api::users;
use crate::{app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ));

    Router::new()
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .merge(user_routes)
        .with_state(state)
}
