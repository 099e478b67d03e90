//! Provider relational API
//!
//! Thin query builder over the provider's REST interface. Filters are
//! encoded as query parameters (`id=eq.<value>`), writes ask for
//! `return=representation` so the affected rows come back in the response.
//!
//! Referential integrity, defaults and constraints live in the hosted
//! store; this layer only moves rows.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ProviderError, ProviderResult, error_from_response};
use super::ProviderClient;

/// Builder for a single query against one table
pub struct TableQuery<'a> {
    client: &'a ProviderClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(super) fn new(client: &'a ProviderClient, table: String) -> Self {
        Self {
            client,
            table,
            params: Vec::new(),
        }
    }

    /// Column list, including embedded relations (`*,documents(*)`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality filter: `column = value`
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    /// Ordering clause, e.g. `created_at.desc`
    pub fn order(mut self, clause: &str) -> Self {
        self.params.push(("order".into(), clause.into()));
        self
    }

    fn url(&self) -> ProviderResult<reqwest::Url> {
        let base = format!("{}/rest/v1/{}", self.client.base_url(), self.table);
        reqwest::Url::parse_with_params(&base, &self.params)
            .map_err(|e| ProviderError::Transport(format!("Invalid query URL: {e}")))
    }

    async fn read_rows<T: DeserializeOwned>(resp: reqwest::Response) -> ProviderResult<Vec<T>> {
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    /// Fetch all matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> ProviderResult<Vec<T>> {
        let url = self.url()?;
        let req = self.client.service_headers(self.client.http().get(url));
        Self::read_rows(req.send().await?).await
    }

    /// Fetch at most one matching row
    pub async fn fetch_one<T: DeserializeOwned>(self) -> ProviderResult<Option<T>> {
        let rows = self.fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row, returning it as stored (with generated columns)
    pub async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        self,
        row: &B,
    ) -> ProviderResult<T> {
        let mut rows = self.insert_many(&[row]).await?;
        rows.pop()
            .ok_or_else(|| ProviderError::Decode("Insert returned no rows".into()))
    }

    /// Insert a batch of rows, returning them as stored
    pub async fn insert_many<T: DeserializeOwned, B: Serialize + ?Sized>(
        self,
        rows: &B,
    ) -> ProviderResult<Vec<T>> {
        let url = self.url()?;
        let req = self
            .client
            .service_headers(self.client.http().post(url))
            .header("Prefer", "return=representation")
            .json(rows);
        Self::read_rows(req.send().await?).await
    }

    /// Partially update matching rows; `None` when nothing matched
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        self,
        changes: &B,
    ) -> ProviderResult<Option<T>> {
        let url = self.url()?;
        let req = self
            .client
            .service_headers(self.client.http().patch(url))
            .header("Prefer", "return=representation")
            .json(changes);
        let mut rows: Vec<T> = Self::read_rows(req.send().await?).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    /// Delete matching rows, returning what was removed
    pub async fn delete<T: DeserializeOwned>(self) -> ProviderResult<Vec<T>> {
        let url = self.url()?;
        let req = self
            .client
            .service_headers(self.client.http().delete(url))
            .header("Prefer", "return=representation");
        Self::read_rows(req.send().await?).await
    }
}
