//! Expense Backend API
//!
//! Client side of the backend's REST surface.
//!
//! # Endpoints
//!
//! - `GET /expenses[?category=..]` - List records
//! - `POST /expenses` - Create a record
//! - `PUT /expenses/:id` - Update a record
//! - `DELETE /expenses/:id` - Delete a record (204)
//! - `GET /summary` - Income/expense/balance and per-category totals
//!
//! The base address is configurable (absolute or relative, default `/api`);
//! see [`ApiBase`] and [`UrlBuilder`].

pub mod client;
pub mod error;
pub mod transport;
pub mod url;

#[cfg(not(target_arch = "wasm32"))]
pub mod reqwest_transport;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use url::{ApiBase, QueryParams, UrlBuilder, DEFAULT_API_BASE};

#[cfg(not(target_arch = "wasm32"))]
pub use reqwest_transport::ReqwestTransport;
