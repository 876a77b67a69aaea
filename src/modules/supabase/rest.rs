use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use super::client::SupabaseClient;
use crate::core::error::AppError;

/// PostgREST query parameters for a select
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = vec!["select=*".to_string()];
        parts.extend(self.filters.iter().map(|(column, expr)| {
            format!(
                "{}={}",
                urlencoding::encode(column),
                urlencoding::encode(expr)
            )
        }));
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            parts.push(format!(
                "order={}.{}",
                urlencoding::encode(column),
                direction
            ));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        parts.join("&")
    }
}

impl SupabaseClient {
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), AppError> {
        self.ensure_configured()?;

        let request = self
            .rest_request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(row);

        let operation = format!("insert into {}", table);
        let response = self.send(request, &operation).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from_response(response, &operation, false).await)
    }

    /// Insert-or-merge on `on_conflict`, returning the stored rows
    pub async fn upsert<T, R>(&self, table: &str, row: &T, on_conflict: &str) -> Result<Vec<R>, AppError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        self.ensure_configured()?;

        let path = format!("{}?on_conflict={}", table, urlencoding::encode(on_conflict));
        let request = self
            .rest_request(Method::POST, &path)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row);

        let operation = format!("upsert into {}", table);
        self.expect_rows(request, &operation).await
    }

    pub async fn select<R: DeserializeOwned>(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Vec<R>, AppError> {
        self.ensure_configured()?;

        let path = format!("{}?{}", table, query.to_query_string());
        let request = self.rest_request(Method::GET, &path);

        let operation = format!("select from {}", table);
        self.expect_rows(request, &operation).await
    }

    async fn expect_rows<R: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<Vec<R>, AppError> {
        let response = self.send(request, operation).await?;
        if !response.status().is_success() {
            return Err(self.error_from_response(response, operation, false).await);
        }

        response.json::<Vec<R>>().await.map_err(|e| {
            tracing::error!("Failed to parse rows ({}): {}", operation, e);
            AppError::ExternalServiceError(format!("Failed to parse backend rows: {}", e))
        })
    }
}
