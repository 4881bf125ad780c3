//! Axum route handlers for the Experiences resource, mounted under the
//! owning user's path segment.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::experience::ExperienceRow;
use crate::state::AppState;
use crate::users::handlers::find_user;

/// Replacement payload for an experience record. The id and owner are path
/// concerns and are never taken from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// GET /users/:user_id/experiences
///
/// Returns the user's experiences in creation order. Unknown user → 404.
pub async fn handle_list_experiences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ExperienceRow>>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let experiences = sqlx::query_as::<_, ExperienceRow>(
        "SELECT * FROM experiences WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(experiences))
}

/// GET /users/:user_id/experiences/:id
///
/// Member routes resolve by the experience id alone; the user path segment
/// only scopes the collection routes.
pub async fn handle_get_experience(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ExperienceRow>, AppError> {
    Ok(Json(find_experience(&state.db, id).await?))
}

/// POST /users/:user_id/experiences
///
/// The owner comes from the path; the body supplies everything else.
pub async fn handle_create_experience(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<Json<ExperienceRow>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let experience = sqlx::query_as::<_, ExperienceRow>(
        r#"
        INSERT INTO experiences
            (id, user_id, title, company, location, description, links, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&payload.title)
    .bind(&payload.company)
    .bind(&payload.location)
    .bind(&payload.description)
    .bind(&payload.links)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(experience))
}

/// PUT /users/:user_id/experiences/:id
///
/// Overwrites every mutable field from the body; id and owner are preserved.
/// Parse failures reject before any row is touched.
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<Json<ExperienceRow>, AppError> {
    let experience = sqlx::query_as::<_, ExperienceRow>(
        r#"
        UPDATE experiences
        SET title = $2, company = $3, location = $4, description = $5,
            links = $6, start_date = $7, end_date = $8
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.title)
    .bind(&payload.company)
    .bind(&payload.location)
    .bind(&payload.description)
    .bind(&payload.links)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
    Ok(Json(experience))
}

/// DELETE /users/:user_id/experiences/:id
///
/// Returns the deleted record's last-known representation. Deleting an
/// already-deleted id → 404.
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ExperienceRow>, AppError> {
    let experience =
        sqlx::query_as::<_, ExperienceRow>("DELETE FROM experiences WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
    Ok(Json(experience))
}

async fn find_experience(pool: &sqlx::PgPool, id: Uuid) -> Result<ExperienceRow, AppError> {
    sqlx::query_as::<_, ExperienceRow>("SELECT * FROM experiences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_parses_with_defaults() {
        let payload: ExperiencePayload = serde_json::from_str(
            r#"{"title":"Engineer","company":"Acme","startDate":"2020-01-01"}"#,
        )
        .unwrap();
        assert_eq!(payload.title, "Engineer");
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(payload.location.is_empty());
        assert!(payload.description.is_empty());
        assert!(payload.links.is_empty());
        assert!(payload.end_date.is_none());
    }

    #[test]
    fn test_payload_missing_title_is_rejected() {
        let result = serde_json::from_str::<ExperiencePayload>(
            r#"{"company":"Acme","startDate":"2020-01-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_keeps_link_order() {
        let payload: ExperiencePayload = serde_json::from_str(
            r#"{"title":"Engineer","company":"Acme","startDate":"2020-01-01",
                "links":["https://a.example","https://b.example"]}"#,
        )
        .unwrap();
        assert_eq!(
            payload.links,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
