use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

const EVENT_COLUMNS: &str = "id, event_type, user_id, metadata, created_at";

/// A recorded activity event. Never mutated or deleted once stored; the
/// `user_id` is not a validated foreign key (orphans are allowed).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub event_type: String,
    pub user_id: i32,
    pub metadata: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Event {
    pub async fn insert(
        db: &PgPool,
        event_type: &str,
        user_id: i32,
        metadata: &serde_json::Value,
    ) -> anyhow::Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (event_type, user_id, metadata)
            VALUES ($1, $2, $3)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event_type)
        .bind(user_id)
        .bind(metadata)
        .fetch_one(db)
        .await?;
        Ok(event)
    }

    /// Filtered page, most recent first. Filters are conjunctive; a NULL
    /// bind disables that filter.
    pub async fn list(
        db: &PgPool,
        event_type: Option<&str>,
        user_id: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE ($1::text IS NULL OR event_type = $1)
              AND ($2::int4 IS NULL OR user_id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(event_type)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_all(db: &PgPool) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Distinct users seen in events. As a stand-in for the user service's
    /// own count this undercounts: users with zero recorded events are
    /// invisible here.
    pub async fn distinct_user_count(db: &PgPool) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT user_id) FROM events")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn distinct_user_count_since(
        db: &PgPool,
        since: OffsetDateTime,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM events WHERE created_at >= $1",
        )
        .bind(since)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    /// Per-type counts, largest first; ties break on event_type so the
    /// ordering is deterministic.
    pub async fn type_counts(db: &PgPool) -> anyhow::Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT event_type, COUNT(*)
            FROM events
            GROUP BY event_type
            ORDER BY COUNT(*) DESC, event_type ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_between(
        db: &PgPool,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM events
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn distinct_user_count_between(
        db: &PgPool,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT user_id) FROM events
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn type_counts_between(
        db: &PgPool,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> anyhow::Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT event_type, COUNT(*)
            FROM events
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            GROUP BY event_type
            ORDER BY COUNT(*) DESC, event_type ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
