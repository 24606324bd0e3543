pub mod dto;
pub mod handlers;
pub mod repo;

use axum::Router;

use crate::state::AnalyticsState;

pub fn router() -> Router<AnalyticsState> {
    handlers::analytics_routes()
}
