//! User record route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use stud_core::UserId;

use crate::error::{Result, add_breadcrumb};
use crate::models::user::{NewUser, UserRecord};
use crate::state::AppState;

/// List all users, newest first.
///
/// GET /users
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>> {
    let users = state.users().list().await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Create a user.
///
/// POST /users
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserRecord>)> {
    let new_user = NewUser::from_body(&body)?;
    let user = state.users().create(new_user).await?;

    tracing::info!(user_id = %user.id, backend = %state.users().backend(), "User created");
    add_breadcrumb("users", "User created", Some(&[("user_id", user.id.as_str())]));

    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch a user by id.
///
/// GET /users/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>> {
    let user = state.users().get_by_id(&UserId::new(id)).await?;
    Ok(Json(user))
}

/// Delete a user by id, returning the removed record.
///
/// DELETE /users/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>> {
    let user = state.users().delete_by_id(&UserId::new(id)).await?;

    tracing::info!(user_id = %user.id, "User deleted");
    add_breadcrumb("users", "User deleted", Some(&[("user_id", user.id.as_str())]));

    Ok(Json(user))
}
