//! Axum route handlers for the Educations resource. Same contract as
//! Experiences over the education field set.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::education::EducationRow;
use crate::state::AppState;
use crate::users::handlers::find_user;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPayload {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// GET /users/:user_id/educations
pub async fn handle_list_educations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<EducationRow>>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let educations = sqlx::query_as::<_, EducationRow>(
        "SELECT * FROM educations WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(educations))
}

/// GET /users/:user_id/educations/:id
pub async fn handle_get_education(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EducationRow>, AppError> {
    Ok(Json(find_education(&state.db, id).await?))
}

/// POST /users/:user_id/educations
pub async fn handle_create_education(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<EducationPayload>,
) -> Result<Json<EducationRow>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let education = sqlx::query_as::<_, EducationRow>(
        r#"
        INSERT INTO educations
            (id, user_id, institution, degree, field, description, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&payload.institution)
    .bind(&payload.degree)
    .bind(&payload.field)
    .bind(&payload.description)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(education))
}

/// PUT /users/:user_id/educations/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<EducationPayload>,
) -> Result<Json<EducationRow>, AppError> {
    let education = sqlx::query_as::<_, EducationRow>(
        r#"
        UPDATE educations
        SET institution = $2, degree = $3, field = $4, description = $5,
            start_date = $6, end_date = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.institution)
    .bind(&payload.degree)
    .bind(&payload.field)
    .bind(&payload.description)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))?;
    Ok(Json(education))
}

/// DELETE /users/:user_id/educations/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EducationRow>, AppError> {
    let education =
        sqlx::query_as::<_, EducationRow>("DELETE FROM educations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))?;
    Ok(Json(education))
}

async fn find_education(pool: &sqlx::PgPool, id: Uuid) -> Result<EducationRow, AppError> {
    sqlx::query_as::<_, EducationRow>("SELECT * FROM educations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_parses_with_defaults() {
        let payload: EducationPayload = serde_json::from_str(
            r#"{"institution":"MIT","degree":"BSc","startDate":"2016-09-01"}"#,
        )
        .unwrap();
        assert_eq!(payload.institution, "MIT");
        assert!(payload.field.is_empty());
        assert!(payload.end_date.is_none());
    }
}
