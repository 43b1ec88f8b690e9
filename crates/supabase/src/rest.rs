//! PostgREST client (`/rest/v1`).
//!
//! Every call is a single round trip authenticated with the configured key
//! (sent both as `apikey` and as the bearer token, as Supabase expects for
//! service-role access).

use serde::de::DeserializeOwned;

use crate::config::{build_http_client, SupabaseConfig};
use crate::error::{ensure_success, SupabaseError};

pub struct PostgrestClient {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl PostgrestClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        Ok(Self::with_client(build_http_client()?, config))
    }

    pub fn with_client(client: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the single row of `table` whose `email` equals `email`.
    ///
    /// Sends `GET /rest/v1/{table}?email=eq.{email}&select={columns}`. Zero
    /// rows yields `Ok(None)`; more than one is
    /// [`SupabaseError::MultipleRows`]. A body that does not decode as rows
    /// of `T` is [`SupabaseError::Decode`].
    pub async fn find_by_email<T: DeserializeOwned>(
        &self,
        table: &str,
        email: &str,
        columns: &[&str],
    ) -> Result<Option<T>, SupabaseError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&[("email", format!("eq.{email}")), ("select", columns.join(","))])
            .send()
            .await?;

        let body = ensure_success(response).await?.bytes().await?;
        let mut rows: Vec<T> = serde_json::from_slice(&body)?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(SupabaseError::MultipleRows(n)),
        }
    }

    /// Apply `fields` to the row of `table` with the given `id`.
    ///
    /// Sends `PATCH /rest/v1/{table}?id=eq.{id}` with `Prefer: return=minimal`.
    pub async fn update_by_id(
        &self,
        table: &str,
        id: &str,
        fields: &serde_json::Value,
    ) -> Result<(), SupabaseError> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(fields)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.config.endpoint(&format!("/rest/v1/{table}")))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}
