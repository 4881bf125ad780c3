use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillRow {
    pub id: Uuid,
    #[serde(rename = "ownerUserId")]
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub proficiency: Option<String>,
    pub created_at: DateTime<Utc>,
}
