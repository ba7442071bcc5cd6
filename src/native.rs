//! Session wiring for native hosts: `reqwest` transport and a file-backed
//! snapshot store, both taken from [`ClientConfig`].

use thiserror::Error;

use crate::api::{ApiClient, ApiError, ReqwestTransport, UrlBuilder};
use crate::cache::{CacheError, FileStore, SnapshotCache};
use crate::chart::ChartSink;
use crate::config::ClientConfig;
use crate::sync::Session;
use crate::view::Renderer;

pub type NativeSession<R, C> = Session<ReqwestTransport, FileStore, R, C>;

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("API setup failed: {0}")]
    Api(#[from] ApiError),

    #[error("Cache setup failed: {0}")]
    Cache(#[from] CacheError),
}

/// Build a session from `config`.
///
/// A relative base address needs an `origin` (e.g. `http://localhost:5000`).
pub fn open_session<R: Renderer, C: ChartSink>(
    config: &ClientConfig,
    origin: Option<&str>,
    renderer: R,
    chart: C,
) -> Result<NativeSession<R, C>, OpenError> {
    let urls = UrlBuilder::new(config.api.base(), origin)?;
    let transport = ReqwestTransport::new(config.api.request_timeout_ms)?;
    let cache_dir = config.cache.path();
    let store = FileStore::open(&cache_dir)?;

    tracing::info!(
        base = urls.base().as_str(),
        cache_dir = %cache_dir.display(),
        "Opening session"
    );

    Ok(Session::new(ApiClient::new(transport, urls), SnapshotCache::new(store), renderer, chart)
        .with_currency(config.display.currency_format()))
}
