use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A work experience owned by exactly one user. An open `end_date` marks an
/// ongoing position.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRow {
    pub id: Uuid,
    #[serde(rename = "ownerUserId")]
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub links: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
