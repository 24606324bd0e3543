use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};

pub const MAX_PAGE_SIZE: i64 = 1000;

/// Ingestion body; metadata defaults to an empty document.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub event_type: String,
    pub user_id: i32,
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Query parameters for the event listing; both filters are optional and
/// conjunctive when supplied together.
#[derive(Debug, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub event_type: Option<String>,
    pub user_id: Option<i32>,
}

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

fn check_page(skip: i64, limit: i64) -> Result<(), (StatusCode, String)> {
    if skip < 0 || limit < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "skip and limit must be non-negative".into(),
        ));
    }
    if limit > MAX_PAGE_SIZE {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("limit must not exceed {MAX_PAGE_SIZE}"),
        ));
    }
    Ok(())
}

impl EventQuery {
    pub fn validate(&self) -> Result<(), (StatusCode, String)> {
        check_page(self.skip, self.limit)
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), (StatusCode, String)> {
        check_page(self.skip, self.limit)
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_users: i64,
    pub active_users_24h: i64,
    pub total_events: i64,
    pub event_type_counts: HashMap<String, i64>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct DateRangeAnalytics {
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub total_events: i64,
    pub unique_users: i64,
    pub event_breakdown: HashMap<String, i64>,
}

/// Resolves the requested window: with neither bound supplied, the trailing
/// seven days ending at `now`; a single supplied bound is left one-sided.
pub fn effective_range(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
    if start.is_none() && end.is_none() {
        (Some(now - TimeDuration::days(7)), Some(now))
    } else {
        (start, end)
    }
}

/// event_type → count map from grouped rows.
pub fn breakdown(rows: Vec<(String, i64)>) -> HashMap<String, i64> {
    rows.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_event_defaults_metadata() {
        let body: CreateEvent =
            serde_json::from_str(r#"{"event_type":"user_login","user_id":1}"#).unwrap();
        assert_eq!(body.metadata, serde_json::json!({}));

        let body: CreateEvent = serde_json::from_str(
            r#"{"event_type":"user_login","user_id":1,"metadata":{"ip":"127.0.0.1"}}"#,
        )
        .unwrap();
        assert_eq!(body.metadata["ip"], "127.0.0.1");
    }

    #[test]
    fn create_event_requires_fields() {
        assert!(serde_json::from_str::<CreateEvent>(r#"{"user_id":1}"#).is_err());
        assert!(serde_json::from_str::<CreateEvent>(r#"{"event_type":"x"}"#).is_err());
    }

    #[test]
    fn event_query_from_query_string() {
        let q: EventQuery =
            serde_urlencoded::from_str("skip=10&limit=20&event_type=user_login&user_id=3").unwrap();
        assert_eq!(q.skip, 10);
        assert_eq!(q.limit, 20);
        assert_eq!(q.event_type.as_deref(), Some("user_login"));
        assert_eq!(q.user_id, Some(3));

        let q: EventQuery = serde_urlencoded::from_str("").unwrap();
        assert_eq!(q.skip, 0);
        assert_eq!(q.limit, 100);
        assert!(q.event_type.is_none());
        assert!(q.user_id.is_none());
    }

    #[test]
    fn page_validation_bounds() {
        let page = |skip, limit| Pagination { skip, limit };
        assert!(page(0, 100).validate().is_ok());
        assert!(page(0, MAX_PAGE_SIZE).validate().is_ok());
        assert!(page(0, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(page(-1, 10).validate().is_err());
        assert!(page(0, -5).validate().is_err());

        let q: EventQuery = serde_urlencoded::from_str("limit=5000").unwrap();
        assert!(q.validate().is_err());
    }

    #[test]
    fn range_defaults_to_trailing_week() {
        let now = datetime!(2024-06-15 12:00:00 UTC);
        let (start, end) = effective_range(None, None, now);
        assert_eq!(start, Some(datetime!(2024-06-08 12:00:00 UTC)));
        assert_eq!(end, Some(now));
    }

    #[test]
    fn range_keeps_single_sided_bounds() {
        let now = datetime!(2024-06-15 12:00:00 UTC);
        let since = datetime!(2024-06-01 00:00:00 UTC);

        let (start, end) = effective_range(Some(since), None, now);
        assert_eq!(start, Some(since));
        assert_eq!(end, None);

        let (start, end) = effective_range(None, Some(since), now);
        assert_eq!(start, None);
        assert_eq!(end, Some(since));
    }

    #[test]
    fn breakdown_sums_match_input() {
        let rows = vec![("user_login".to_string(), 3), ("user_registered".to_string(), 2)];
        let map = breakdown(rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["user_login"], 3);
        assert_eq!(map["user_registered"], 2);
        assert_eq!(map.values().sum::<i64>(), 5);
    }

    #[test]
    fn type_count_serialization() {
        let row = EventTypeCount {
            event_type: "user_login".into(),
            count: 3,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"event_type":"user_login","count":3}"#);
    }

    #[test]
    fn date_range_query_parses_rfc3339() {
        let q: DateRangeQuery =
            serde_urlencoded::from_str("start_date=2024-01-01T00:00:00Z").unwrap();
        assert_eq!(q.start_date, Some(datetime!(2024-01-01 00:00:00 UTC)));
        assert!(q.end_date.is_none());
    }
}
