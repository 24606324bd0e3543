pub mod extractors;
pub mod jwt;
pub mod password;

use sqlx::PgPool;

use crate::users::repo::User;

/// Looks up a user by username and checks the password.
///
/// Returns `None` both when the user does not exist and when the password
/// does not match, so callers cannot distinguish the two.
pub async fn authenticate(
    db: &PgPool,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let Some(user) = User::find_by_username(db, username).await? else {
        return Ok(None);
    };
    if password::verify_password(password, &user.hashed_password)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
