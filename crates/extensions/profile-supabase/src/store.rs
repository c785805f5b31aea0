//! Supabase REST profile store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use autoapply_config::SupabaseConfig;
use autoapply_protocols::{Profile, ProfileStore, StoreError};

use crate::row::ProfileRow;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Loads the first row of the profile table.
///
/// Row-level security on the backend scopes the table to the user behind the
/// bearer token, so the first row is that user's profile.
pub struct SupabaseProfileStore {
    client: Client,
    url: String,
    anon_key: String,
    access_token: Option<String>,
    table: String,
}

impl SupabaseProfileStore {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("autoapply/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
            table: "user_profiles".to_string(),
        }
    }

    /// Authenticate as a signed-in user instead of the anonymous role.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn from_config(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::NotFound("supabase.url is not configured".to_string()))?;
        let anon_key = config
            .anon_key
            .as_deref()
            .ok_or_else(|| StoreError::Unauthorized("supabase.anon_key is not configured".to_string()))?;

        let mut store = Self::new(url, anon_key).with_table(config.table.clone());
        if let Some(token) = &config.access_token {
            store = store.with_access_token(token.clone());
        }
        Ok(store)
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn load(&self) -> Result<Profile, StoreError> {
        let endpoint = self.endpoint();
        debug!("Fetching profile from {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("select", "*"), ("limit", "1")])
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http(format!("{}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let rows: Vec<ProfileRow> = serde_json::from_str(&body)?;
        let row = rows.into_iter().next().ok_or(StoreError::Empty)?;

        Ok(row.into())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
