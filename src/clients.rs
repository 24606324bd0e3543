use tracing::debug;

/// Read-only client for the user service, used by the analytics summary.
#[derive(Clone)]
pub struct UserDirectoryClient {
    client: reqwest::Client,
    list_url: String,
}

impl UserDirectoryClient {
    pub fn new(client: reqwest::Client, users_base_url: &str) -> Self {
        Self {
            client,
            list_url: format!("{}/users/", users_base_url.trim_end_matches('/')),
        }
    }

    /// Counts the records returned by the user service's listing endpoint.
    /// A timeout, connection error or non-2xx status is an `Err`; the caller
    /// falls back to its local approximation.
    pub async fn total_users(&self) -> anyhow::Result<i64> {
        let users: Vec<serde_json::Value> = self
            .client
            .get(&self.list_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = users.len(), "fetched user listing");
        Ok(users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_url_normalizes_trailing_slash() {
        let client = reqwest::Client::new();
        let users = UserDirectoryClient::new(client.clone(), "http://localhost:8000");
        assert_eq!(users.list_url, "http://localhost:8000/users/");
        let users = UserDirectoryClient::new(client, "http://localhost:8000/");
        assert_eq!(users.list_url, "http://localhost:8000/users/");
    }
}
