//! HTTP API Client
//!
//! `fetch`-based transport for the expense backend, plus base-address
//! resolution from the page.

use async_trait::async_trait;
use futures_util::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;

use expense_tracker::api::{
    ApiBase, ApiClient, ApiError, ApiResult, HttpRequest, HttpResponse, HttpTransport, Method,
    UrlBuilder,
};

/// Requests still pending after this long are abandoned
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// [`HttpTransport`] over the browser's `fetch`
#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Default for GlooTransport {
    fn default() -> Self {
        Self::new(REQUEST_TIMEOUT_MS)
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("Content-Type", "application/json");

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let exchange = async move {
            let response = prepared
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(HttpResponse { status, body })
        };

        match select(Box::pin(exchange), TimeoutFuture::new(self.timeout_ms)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout(u64::from(self.timeout_ms))),
        }
    }
}

/// `window.API_BASE_URL` when the page sets it
pub fn api_base() -> ApiBase {
    let configured = web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("API_BASE_URL")).ok())
        .and_then(|value| value.as_string());

    ApiBase::from_setting(configured.as_deref())
}

fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

/// Client for the configured backend, resolved against the page origin
pub fn build_client() -> ApiResult<ApiClient<GlooTransport>> {
    let origin = page_origin();
    let urls = UrlBuilder::new(api_base(), origin.as_deref())?;
    Ok(ApiClient::new(GlooTransport::default(), urls))
}
