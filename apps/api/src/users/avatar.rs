//! Avatar upload — a multipart file replacing the user's stored avatar
//! object, then the user record.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::storage::FileStore;
use crate::users::handlers::find_user;

#[derive(Debug, Default, Deserialize)]
pub struct AvatarParams {
    pub extension: Option<String>,
}

/// POST /users/:user_id/avatar
///
/// Expects a multipart field `avatar` carrying the raw file bytes, and an
/// `extension` string given either as a second multipart field or as a query
/// parameter. Returns the updated user.
///
/// The new object is written before the old one is removed and before the
/// record is persisted; the two effects are not atomic, so a failure between
/// them can orphan the freshly written object.
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AvatarParams>,
    mut multipart: Multipart,
) -> Result<Json<UserRow>, AppError> {
    let mut file_bytes: Option<Bytes> = None;
    let mut extension = params.extension;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("avatar") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable avatar field: {e}")))?;
                file_bytes = Some(bytes);
            }
            Some("extension") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable extension field: {e}"))
                })?;
                extension = Some(text);
            }
            _ => {}
        }
    }

    let file_bytes = file_bytes
        .ok_or_else(|| AppError::Validation("Missing multipart field 'avatar'".to_string()))?;
    let extension =
        extension.ok_or_else(|| AppError::Validation("Missing 'extension' field".to_string()))?;
    validate_extension(&extension)?;

    let user = find_user(&state.db, id).await?;

    let file_name = store_new_avatar(
        state.files.as_ref(),
        user.id,
        user.avatar.as_deref(),
        file_bytes,
        &extension,
    )
    .await?;

    let user =
        sqlx::query_as::<_, UserRow>("UPDATE users SET avatar = $2 WHERE id = $1 RETURNING *")
            .bind(user.id)
            .bind(&file_name)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(user))
}

/// Object key for one of a user's avatar files.
pub fn avatar_key(user_id: Uuid, file_name: &str) -> String {
    format!("avatars/{user_id}/{file_name}")
}

// The extension becomes part of an object key; only plain tokens pass.
fn validate_extension(extension: &str) -> Result<(), AppError> {
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!(
            "Invalid file extension '{extension}'"
        )));
    }
    Ok(())
}

/// Writes the new avatar under a fresh opaque name, then removes the previous
/// object if it exists. The new bytes are durable before the old ones are
/// touched; a failed removal is logged and the upload still succeeds.
pub async fn store_new_avatar(
    files: &dyn FileStore,
    user_id: Uuid,
    current: Option<&str>,
    bytes: Bytes,
    extension: &str,
) -> Result<String, AppError> {
    let file_name = format!("{}.{}", Uuid::new_v4(), extension);
    files
        .save(
            &avatar_key(user_id, &file_name),
            bytes,
            content_type_for(extension),
        )
        .await?;

    if let Some(old) = current {
        let old_key = avatar_key(user_id, old);
        match files.exists(&old_key).await {
            Ok(true) => {
                if let Err(e) = files.remove(&old_key).await {
                    warn!("Failed to remove previous avatar {old_key}: {e}");
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Failed to check previous avatar {old_key}: {e}"),
        }
    }

    Ok(file_name)
}

fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileStore;

    #[tokio::test]
    async fn test_upload_replaces_previous_avatar_object() {
        let store = MemoryFileStore::new();
        let user_id = Uuid::new_v4();
        store.insert(
            &avatar_key(user_id, "old.png"),
            Bytes::from_static(b"old bytes"),
        );

        let file_name = store_new_avatar(
            &store,
            user_id,
            Some("old.png"),
            Bytes::from_static(b"new bytes"),
            "png",
        )
        .await
        .unwrap();

        assert!(file_name.ends_with(".png"));
        assert!(!store
            .exists(&avatar_key(user_id, "old.png"))
            .await
            .unwrap());
        assert!(store
            .exists(&avatar_key(user_id, &file_name))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_upload_without_previous_avatar() {
        let store = MemoryFileStore::new();
        let user_id = Uuid::new_v4();

        let file_name =
            store_new_avatar(&store, user_id, None, Bytes::from_static(b"bytes"), "jpg")
                .await
                .unwrap();

        assert_eq!(store.keys(), vec![avatar_key(user_id, &file_name)]);
    }

    #[tokio::test]
    async fn test_missing_previous_object_is_not_an_error() {
        let store = MemoryFileStore::new();
        let user_id = Uuid::new_v4();

        // The record references a file the store no longer has.
        let result = store_new_avatar(
            &store,
            user_id,
            Some("gone.png"),
            Bytes::from_static(b"bytes"),
            "png",
        )
        .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_extension_must_be_alphanumeric() {
        assert!(validate_extension("png").is_ok());
        assert!(validate_extension("jpeg").is_ok());
        assert!(validate_extension("").is_err());
        assert!(validate_extension("../../etc").is_err());
        assert!(validate_extension("png/../x").is_err());
    }

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("PNG"), "image/png");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
        assert_eq!(content_type_for("bin"), "application/octet-stream");
    }
}
