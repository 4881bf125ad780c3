//! Axum route handlers for the Users resource.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

/// Replacement payload for a user record. The id is a path concern and is
/// never taken from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// GET /users
///
/// Returns every user in creation order.
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at, id")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(users))
}

/// GET /users/:user_id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(find_user(&state.db, id).await?))
}

/// POST /users
///
/// Body-based registration; no session required.
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, first_name, last_name, email, avatar)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.avatar)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(user))
}

/// PUT /users/:user_id
///
/// Requires an authenticated session. Overwrites every mutable field from
/// the body; the id is preserved.
pub async fn handle_update_user(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET first_name = $2, last_name = $3, email = $4, avatar = $5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.avatar)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    Ok(Json(user))
}

/// DELETE /users/:user_id
///
/// Returns the deleted record's last-known representation. Child records go
/// with it via the schema's cascade rules.
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("DELETE FROM users WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    Ok(Json(user))
}

/// Resolves a user by id, or NotFound. Child resources use this to check
/// their owning user's path segment.
pub async fn find_user(pool: &sqlx::PgPool, id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_camel_case_fields() {
        let payload: UserPayload = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(payload.first_name, "Ada");
        assert!(payload.avatar.is_none());
    }

    #[test]
    fn test_payload_missing_email_is_rejected() {
        let result =
            serde_json::from_str::<UserPayload>(r#"{"firstName":"Ada","lastName":"Lovelace"}"#);
        assert!(result.is_err());
    }
}
