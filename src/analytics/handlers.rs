use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    analytics::{
        dto::{
            breakdown, effective_range, CreateEvent, DateRangeAnalytics, DateRangeQuery,
            EventQuery, EventTypeCount, Pagination, Summary,
        },
        repo::Event,
    },
    state::AnalyticsState,
};

pub fn analytics_routes() -> Router<AnalyticsState> {
    Router::new()
        .route("/analytics/events", post(ingest_event).get(list_events))
        .route("/analytics/summary", get(summary))
        .route("/analytics/events/by-type", get(events_by_type))
        .route("/analytics/events/date-range", get(events_by_date_range))
        .route("/analytics/users/:user_id/events", get(user_events))
}

#[instrument(skip(state, payload))]
pub async fn ingest_event(
    State(state): State<AnalyticsState>,
    Json(payload): Json<CreateEvent>,
) -> Result<(StatusCode, Json<Event>), (StatusCode, String)> {
    let event = Event::insert(
        &state.db,
        &payload.event_type,
        payload.user_id,
        &payload.metadata,
    )
    .await
    .map_err(internal)?;

    info!(event_id = event.id, event_type = %event.event_type, user_id = event.user_id, "event recorded");
    Ok((StatusCode::CREATED, Json(event)))
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AnalyticsState>,
    Query(q): Query<EventQuery>,
) -> Result<Json<Vec<Event>>, (StatusCode, String)> {
    q.validate()?;
    let events = Event::list(&state.db, q.event_type.as_deref(), q.user_id, q.limit, q.skip)
        .await
        .map_err(internal)?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AnalyticsState>,
) -> Result<Json<Summary>, (StatusCode, String)> {
    // Cross-service count, degraded to a local approximation on any failure
    let total_users = match state.users.total_users().await {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "user service unavailable, falling back to event-derived count");
            Event::distinct_user_count(&state.db)
                .await
                .map_err(internal)?
        }
    };

    let last_24h = OffsetDateTime::now_utc() - TimeDuration::hours(24);
    let active_users_24h = Event::distinct_user_count_since(&state.db, last_24h)
        .await
        .map_err(internal)?;
    let total_events = Event::count_all(&state.db).await.map_err(internal)?;
    let event_type_counts = breakdown(Event::type_counts(&state.db).await.map_err(internal)?);

    Ok(Json(Summary {
        total_users,
        active_users_24h,
        total_events,
        event_type_counts,
    }))
}

#[instrument(skip(state))]
pub async fn events_by_type(
    State(state): State<AnalyticsState>,
) -> Result<Json<Vec<EventTypeCount>>, (StatusCode, String)> {
    let rows = Event::type_counts(&state.db).await.map_err(internal)?;
    Ok(Json(
        rows.into_iter()
            .map(|(event_type, count)| EventTypeCount { event_type, count })
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn events_by_date_range(
    State(state): State<AnalyticsState>,
    Query(q): Query<DateRangeQuery>,
) -> Result<Json<DateRangeAnalytics>, (StatusCode, String)> {
    let now = OffsetDateTime::now_utc();
    let (start, end) = effective_range(q.start_date, q.end_date, now);

    let total_events = Event::count_between(&state.db, start, end)
        .await
        .map_err(internal)?;
    let unique_users = Event::distinct_user_count_between(&state.db, start, end)
        .await
        .map_err(internal)?;
    let event_breakdown = breakdown(
        Event::type_counts_between(&state.db, start, end)
            .await
            .map_err(internal)?,
    );

    Ok(Json(DateRangeAnalytics {
        start_date: start,
        end_date: end,
        total_events,
        unique_users,
        event_breakdown,
    }))
}

#[instrument(skip(state))]
pub async fn user_events(
    State(state): State<AnalyticsState>,
    Path(user_id): Path<i32>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Event>>, (StatusCode, String)> {
    page.validate()?;
    let events = Event::list(&state.db, None, Some(user_id), page.limit, page.skip)
        .await
        .map_err(internal)?;
    Ok(Json(events))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
