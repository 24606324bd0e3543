use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tracing::warn;

use crate::auth::jwt::{AuthError, JwtKeys};
use crate::state::UserState;
use crate::users::repo::User;

/// Extracts the bearer token, validates it and loads the caller's user row.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<UserState> for CurrentUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &UserState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "missing Authorization header".into(),
            ))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".into()))?;

        let keys = JwtKeys::from_ref(state);
        let username = keys.resolve(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            let msg = match e {
                AuthError::Expired => "token expired",
                AuthError::Invalid => "invalid token",
            };
            (StatusCode::UNAUTHORIZED, msg.into())
        })?;

        let user = User::find_by_username(&state.db, &username)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
            .ok_or((StatusCode::UNAUTHORIZED, "user not found".into()))?;

        Ok(CurrentUser(user))
    }
}
