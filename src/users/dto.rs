use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::repo::User;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Partial-update body; absent fields keep their stored values.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
}

/// Credentials accepted by both the form and the JSON login endpoints.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Public view of a user; the password hash is never part of it.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), (StatusCode, String)> {
        if self.skip < 0 || self.limit < 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                "skip and limit must be non-negative".into(),
            ));
        }
        if self.limit > MAX_PAGE_SIZE {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("limit must not exceed {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn public_user_serialization() {
        let public = PublicUser {
            id: 7,
            username: "testuser".into(),
            email: "test@example.com".into(),
            full_name: None,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
        };
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("\"id\":7"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn token_response_is_bearer() {
        let json = serde_json::to_string(&TokenResponse::bearer("abc".into())).unwrap();
        assert!(json.contains("\"access_token\":\"abc\""));
        assert!(json.contains("\"token_type\":\"bearer\""));
    }

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        let p = Pagination { skip: -1, limit: 10 };
        assert!(p.validate().is_err());

        let p = Pagination { skip: 0, limit: MAX_PAGE_SIZE + 1 };
        assert!(p.validate().is_err());

        let p = Pagination { skip: 0, limit: MAX_PAGE_SIZE };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn update_user_partial_body_deserializes() {
        let body: UpdateUser = serde_json::from_str(r#"{"full_name":"New Name"}"#).unwrap();
        assert_eq!(body.full_name.as_deref(), Some("New Name"));
        assert!(body.username.is_none());
        assert!(body.email.is_none());
        assert!(body.password.is_none());
    }
}
