use serde_json::{json, Value};
use tracing::{debug, warn};

/// Fire-and-forget emission of activity events to the analytics service.
///
/// Delivery is best effort: the call runs on a spawned task bounded by the
/// client timeout, and any failure is logged and dropped. The request path
/// that triggered the event never waits on or learns about the outcome.
/// No retries, no queue, no ordering between concurrent emissions.
#[derive(Clone)]
pub struct EventRelay {
    client: reqwest::Client,
    ingest_url: String,
}

pub(crate) fn event_payload(event_type: &str, user_id: i32, metadata: Option<Value>) -> Value {
    json!({
        "event_type": event_type,
        "user_id": user_id,
        "metadata": metadata.unwrap_or_else(|| json!({})),
    })
}

impl EventRelay {
    pub fn new(client: reqwest::Client, analytics_base_url: &str) -> Self {
        Self {
            client,
            ingest_url: format!(
                "{}/analytics/events",
                analytics_base_url.trim_end_matches('/')
            ),
        }
    }

    pub fn emit(&self, event_type: &'static str, user_id: i32, metadata: Option<Value>) {
        let client = self.client.clone();
        let url = self.ingest_url.clone();
        let payload = event_payload(event_type, user_id, metadata);

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(res) if res.status().is_success() => {
                    debug!(event_type, user_id, "event delivered");
                }
                Ok(res) => {
                    warn!(event_type, user_id, status = %res.status(), "analytics rejected event");
                }
                Err(e) => {
                    warn!(event_type, user_id, error = %e, "failed to send event to analytics");
                }
            }
        });
    }
}
