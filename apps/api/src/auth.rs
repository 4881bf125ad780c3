//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs whose `sub` claim carries the caller's user id.
//! Issuance happens outside this service; this module only resolves the
//! authenticated caller from the `Authorization` header.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

/// The authenticated caller, loaded from the database.
///
/// Any failure along the way — missing header, bad signature, expired token,
/// unknown user — rejects with `Unauthorized`.
pub struct CurrentUser(pub UserRow);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = decode_claims(token, &state.config.auth_secret)?;

        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";
    // 2100-01-01T00:00:00Z — far enough out for any test run.
    const FAR_FUTURE: usize = 4102444800;

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_round_trips_subject() {
        let sub = Uuid::new_v4();
        let token = mint(
            &Claims {
                sub,
                exp: FAR_FUTURE,
            },
            SECRET,
        );
        let claims = decode_claims(&token, SECRET).unwrap();
        assert_eq!(claims.sub, sub);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = mint(
            &Claims {
                sub: Uuid::new_v4(),
                exp: 1000,
            },
            SECRET,
        );
        assert!(matches!(
            decode_claims(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = mint(
            &Claims {
                sub: Uuid::new_v4(),
                exp: FAR_FUTURE,
            },
            "other-secret",
        );
        assert!(matches!(
            decode_claims(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }
}
