//! # Expense Tracker
//!
//! Client core for a personal expense-tracking service: a REST client for the
//! expense backend, a last-known-good snapshot cache, monthly aggregation,
//! view models and a chart adapter, tied together by an offline-resilient
//! sync session.
//!
//! ## Features
//!
//! - **Offline-resilient reads**: failed fetches fall back to cached snapshots
//! - **Safe writes**: failed saves are reported and never discard the form draft
//! - **Derived views**: monthly income/expense/net series and category totals
//! - **Target independent**: browser objects are reached through traits, so the
//!   same core runs in the Leptos UI and in native tests
//!
//! ## Modules
//!
//! - [`api`]: URL building, transports and the typed backend client
//! - [`cache`]: Snapshot cache over a pluggable key/value store
//! - [`aggregate`]: Monthly series and category totals
//! - [`view`]: Table rows, filter options, summary figures, edit form
//! - [`chart`]: Chart configurations and the single-instance chart adapter
//! - [`sync`]: The [`Session`] orchestrating all of the above
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use expense_tracker::chart::NullChart;
//! use expense_tracker::config::ClientConfig;
//! use expense_tracker::native::open_session;
//! # use expense_tracker::view::*;
//! # struct Log;
//! # impl Renderer for Log {
//! #     fn render_rows(&self, _: &[ExpenseRow]) {}
//! #     fn render_filter(&self, _: &FilterOptions) {}
//! #     fn render_summary(&self, _: &SummaryFigures) {}
//! #     fn render_form(&self, _: &ExpenseForm) {}
//! #     fn notify(&self, _: Notice) {}
//! # }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load_default();
//!     expense_tracker::telemetry::init_tracing(&config.logging);
//!
//!     let session = open_session(&config, Some("http://localhost:5000"), Log, NullChart)?;
//!
//!     // Cached data first, then live data (or the cache again if offline)
//!     session.start().await;
//!
//!     println!("Balance: {:?}", session.state().summary.balance);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod chart;
pub mod config;
pub mod format;
pub mod model;
pub mod sync;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

pub use api::{ApiClient, ApiError, ApiResult, HttpTransport};
pub use cache::{CacheError, SnapshotCache, SnapshotStore};
pub use chart::{ChartAdapter, ChartKind, ChartSelection, ChartSink, DatasetMode};
pub use config::ClientConfig;
pub use format::to_currency;
pub use model::{EntryType, Expense, ExpenseId, ExpenseInput, Summary};
pub use sync::{FetchOutcome, ResourceState, Session, SubmitError};
pub use view::{Notice, Renderer};
