pub mod dto;
pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::UserState;

pub fn router() -> Router<UserState> {
    Router::new()
        .merge(handlers::user_routes())
        .merge(handlers::login_routes())
}
