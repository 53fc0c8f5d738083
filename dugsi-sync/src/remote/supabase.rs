//! Supabase (PostgREST) replica implementation.
//!
//! Talks to the `/rest/v1` surface with the project's publishable key.
//! Upserts rely on `Prefer: resolution=merge-duplicates` so re-sending a
//! whole table is an insert-or-replace per row.

use super::RemoteReplica;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use dugsi_types::{Record, TableId};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// PostgREST error code for a relation that does not exist.
const CODE_UNDEFINED_TABLE: &str = "42P01";
/// PostgREST error code for a row-level-security / privilege rejection.
const CODE_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Supabase connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Publishable (anon) API key.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Error body PostgREST returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Remote replica backed by a Supabase project.
pub struct SupabaseReplica {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseReplica {
    /// Creates a new replica client.
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        Self { config, client }
    }

    /// Whether a base URL and key are configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.base_url.is_empty() && !self.config.api_key.is_empty()
    }

    fn table_url(&self, table: TableId) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Maps a non-success response to the error taxonomy, preferring the
    /// PostgREST error code over the HTTP status.
    async fn map_error(response: Response) -> SyncError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<PostgrestError> = serde_json::from_str(&body).ok();
        let (code, message) = match parsed {
            Some(err) => (
                err.code.unwrap_or_default(),
                err.message.unwrap_or_else(|| body.clone()),
            ),
            None => (String::new(), body),
        };

        match code.as_str() {
            CODE_UNDEFINED_TABLE => SyncError::SchemaMissing(message),
            CODE_INSUFFICIENT_PRIVILEGE => SyncError::PermissionDenied(message),
            _ if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
                SyncError::PermissionDenied(message)
            }
            _ => SyncError::Network(format!("{status}: {message}")),
        }
    }
}

#[async_trait]
impl RemoteReplica for SupabaseReplica {
    fn provider_name(&self) -> &'static str {
        "Supabase"
    }

    async fn check_connection(&self) -> SyncResult<()> {
        // Same probe the settings screen runs: a minimal read against
        // the students table tells apart "no schema", "no write policy
        // will follow anyway" and plain connectivity.
        let url = self.table_url(TableId::Students);
        let response = self
            .request(self.client.get(&url))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("connection probe failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::map_error(response).await);
        }
        debug!("remote replica reachable");
        Ok(())
    }

    async fn fetch_table(&self, table: TableId) -> SyncResult<Vec<Record>> {
        let url = self.table_url(table);
        let response = self
            .request(self.client.get(&url))
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("fetch {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::map_error(response).await);
        }

        let records: Vec<Record> = response
            .json()
            .await
            .map_err(|e| SyncError::Network(format!("fetch {table} returned bad body: {e}")))?;
        debug!(%table, count = records.len(), "fetched remote table");
        Ok(records)
    }

    async fn upsert_table(&self, table: TableId, records: &[Record]) -> SyncResult<()> {
        let url = self.table_url(table);
        let response = self
            .request(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(records)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("upsert {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::map_error(response).await);
        }
        debug!(%table, count = records.len(), "upserted table");
        Ok(())
    }
}
