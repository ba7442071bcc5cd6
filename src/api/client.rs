//! HTTP API Client
//!
//! Typed operations against the expense backend's REST surface.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpTransport, Method};
use super::url::{QueryParams, UrlBuilder};
use crate::model::{Expense, ExpenseId, ExpenseInput, MutationAck, Summary};

/// Expense backend client over any [`HttpTransport`]
pub struct ApiClient<T> {
    transport: T,
    urls: UrlBuilder,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, urls: UrlBuilder) -> Self {
        Self { transport, urls }
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /expenses[?category=..]`
    pub async fn list(&self, category: Option<&str>) -> ApiResult<Vec<Expense>> {
        let query = QueryParams::new().with("category", category);
        let url = self.urls.build("/expenses", &query);

        let rows: Vec<serde_json::Value> = self
            .fetch_json(HttpRequest::new(Method::Get, url))
            .await?
            .ok_or_else(|| ApiError::Decode("empty expense list response".to_string()))?;

        Ok(decode_rows(rows))
    }

    /// `GET /summary`
    pub async fn summary(&self) -> ApiResult<Summary> {
        let url = self.urls.build("/summary", &QueryParams::new());

        self.fetch_json(HttpRequest::new(Method::Get, url))
            .await?
            .ok_or_else(|| ApiError::Decode("empty summary response".to_string()))
    }

    /// `POST /expenses`
    pub async fn create(&self, input: &ExpenseInput) -> ApiResult<Option<MutationAck>> {
        let url = self.urls.build("/expenses", &QueryParams::new());
        let request = HttpRequest::new(Method::Post, url).with_body(encode(input)?);

        self.mutate(request).await
    }

    /// `PUT /expenses/{id}`
    pub async fn update(&self, id: &ExpenseId, input: &ExpenseInput) -> ApiResult<Option<MutationAck>> {
        let request = HttpRequest::new(Method::Put, self.record_url(id)).with_body(encode(input)?);

        self.mutate(request).await
    }

    /// `DELETE /expenses/{id}`
    pub async fn delete(&self, id: &ExpenseId) -> ApiResult<()> {
        let request = HttpRequest::new(Method::Delete, self.record_url(id));

        self.fetch_json::<serde_json::Value>(request).await?;
        Ok(())
    }

    fn record_url(&self, id: &ExpenseId) -> String {
        let path = format!("/expenses/{}", urlencoding::encode(&id.to_string()));
        self.urls.build(&path, &QueryParams::new())
    }

    async fn mutate(&self, request: HttpRequest) -> ApiResult<Option<MutationAck>> {
        let body: Option<serde_json::Value> = self.fetch_json(request).await?;
        Ok(body.map(|value| serde_json::from_value(value).unwrap_or_default()))
    }

    /// Send a request and decode a JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Status`] carrying the body text;
    /// `204 No Content` yields `None`.
    async fn fetch_json<R: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<Option<R>> {
        let method = request.method;
        let url = request.url.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::debug!(method = method.as_str(), url = %url, error = %e, "Request failed");
            e
        })?;

        if !response.is_success() {
            tracing::debug!(
                method = method.as_str(),
                url = %url,
                status = response.status,
                "Backend rejected request"
            );
            return Err(ApiError::Status {
                status: response.status,
                message: response.body,
            });
        }

        if response.status == 204 {
            return Ok(None);
        }

        let decoded = serde_json::from_str(&response.body)?;
        Ok(Some(decoded))
    }
}

/// Keep every row that decodes; rows without an `id` are dropped.
fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Expense> {
    let total = rows.len();
    let items: Vec<Expense> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable expense row");
                None
            }
        })
        .collect();

    if items.len() < total {
        tracing::debug!(kept = items.len(), total, "Expense list partially decoded");
    }
    items
}

fn encode<B: Serialize>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}
