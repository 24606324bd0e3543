use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Configuration for the user service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Base URL of the analytics service, used for best-effort event emission.
    pub analytics_base_url: String,
}

impl UserServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        let analytics_base_url = std::env::var("ANALYTICS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8001".into());
        Ok(Self {
            database_url,
            jwt,
            analytics_base_url,
        })
    }
}

/// Configuration for the analytics service.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsServiceConfig {
    pub database_url: String,
    /// Base URL of the user service, used for the total-user lookup in summaries.
    pub users_base_url: String,
}

impl AnalyticsServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let users_base_url =
            std::env::var("USER_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000".into());
        Ok(Self {
            database_url,
            users_base_url,
        })
    }
}
