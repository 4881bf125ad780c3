//! Axum route handlers for the Skills resource. Same contract as
//! Experiences over the skill field set; no date range.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::SkillRow;
use crate::state::AppState;
use crate::users::handlers::find_user;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub proficiency: Option<String>,
}

/// GET /users/:user_id/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let skills = sqlx::query_as::<_, SkillRow>(
        "SELECT * FROM skills WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(skills))
}

/// GET /users/:user_id/skills/:id
pub async fn handle_get_skill(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SkillRow>, AppError> {
    Ok(Json(find_skill(&state.db, id).await?))
}

/// POST /users/:user_id/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<SkillRow>, AppError> {
    let user = find_user(&state.db, user_id).await?;
    let skill = sqlx::query_as::<_, SkillRow>(
        r#"
        INSERT INTO skills (id, user_id, name, category, proficiency)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.proficiency)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(skill))
}

/// PUT /users/:user_id/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<SkillRow>, AppError> {
    let skill = sqlx::query_as::<_, SkillRow>(
        r#"
        UPDATE skills
        SET name = $2, category = $3, proficiency = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.proficiency)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))?;
    Ok(Json(skill))
}

/// DELETE /users/:user_id/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SkillRow>, AppError> {
    let skill = sqlx::query_as::<_, SkillRow>("DELETE FROM skills WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))?;
    Ok(Json(skill))
}

async fn find_skill(pool: &sqlx::PgPool, id: Uuid) -> Result<SkillRow, AppError> {
    sqlx::query_as::<_, SkillRow>("SELECT * FROM skills WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_parses_with_defaults() {
        let payload: SkillPayload = serde_json::from_str(r#"{"name":"Rust"}"#).unwrap();
        assert_eq!(payload.name, "Rust");
        assert!(payload.category.is_empty());
        assert!(payload.proficiency.is_none());
    }
}
