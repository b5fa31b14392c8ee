//! User record routes.
//!
//! | Method | Path         | Success |
//! |--------|--------------|---------|
//! | POST   | `/`          | 201     |
//! | GET    | `/`          | 200     |
//! | GET    | `/{user_id}` | 200     |
//! | PUT    | `/{user_id}` | 200     |
//! | DELETE | `/{user_id}` | 204     |

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use usersvc_core::model::{UserInput, UserRecord};

use crate::api::ApiError;
use crate::app_state::AppState;

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserRecord>,
    pub count: usize,
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserRecord>)> {
    let Json(input) = payload?;
    let user = state.users().create(input).await?;
    tracing::debug!(user_id = %user.user_id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<UserRecord>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.users().get(&user_id).await?))
}

pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<UserList>> {
    let Query(q) = query?;
    let users = state.users().list(q.limit).await?;
    Ok(Json(UserList {
        count: users.len(),
        users,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<Json<UserRecord>> {
    let Path(user_id) = user_id?;
    let Json(input) = payload?;
    let user = state.users().update(&user_id, input).await?;
    tracing::debug!(user_id = %user.user_id, "user updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(user_id) = user_id?;
    state.users().delete(&user_id).await?;
    tracing::debug!(%user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
