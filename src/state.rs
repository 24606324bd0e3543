use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::clients::UserDirectoryClient;
use crate::config::{AnalyticsServiceConfig, UserServiceConfig};
use crate::relay::EventRelay;

/// Every cross-service call (event emission, total-user lookup) is bounded
/// by this timeout; the initiating request is never blocked past it.
pub const CROSS_SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

fn build_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(CROSS_SERVICE_TIMEOUT)
        .user_agent(concat!("pulsetrack/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))
}

#[derive(Clone)]
pub struct UserState {
    pub db: PgPool,
    pub config: Arc<UserServiceConfig>,
    pub relay: EventRelay,
}

impl UserState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(UserServiceConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        let relay = EventRelay::new(build_http_client()?, &config.analytics_base_url);
        Ok(Self { db, config, relay })
    }
}

#[derive(Clone)]
pub struct AnalyticsState {
    pub db: PgPool,
    pub config: Arc<AnalyticsServiceConfig>,
    pub users: UserDirectoryClient,
}

impl AnalyticsState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AnalyticsServiceConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        let users = UserDirectoryClient::new(build_http_client()?, &config.users_base_url);
        Ok(Self { db, config, users })
    }
}
