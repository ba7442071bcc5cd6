//! Request URL construction
//!
//! Resolves the configured base address against the page origin and joins
//! resource paths and query parameters onto it.

use std::fmt::Display;

use super::error::{ApiError, ApiResult};

/// Base address used when nothing is configured
pub const DEFAULT_API_BASE: &str = "/api";

/// Configured backend base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// `http(s)://host[:port]/prefix`, used verbatim
    Absolute(String),
    /// `/prefix`, rooted at the current origin
    Relative(String),
}

impl ApiBase {
    /// Interpret a configured value; blank or unset means [`DEFAULT_API_BASE`].
    pub fn from_setting(setting: Option<&str>) -> Self {
        let raw = setting
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE);
        let trimmed = raw.trim_end_matches('/');

        if is_absolute(trimmed) {
            ApiBase::Absolute(trimmed.to_string())
        } else {
            ApiBase::Relative(format!("/{}", trimmed.trim_start_matches('/')))
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, ApiBase::Absolute(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiBase::Absolute(s) | ApiBase::Relative(s) => s,
        }
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        ApiBase::from_setting(None)
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Ordered query parameters; blank values are dropped and the last write
/// for a key wins while keeping the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryParams::insert`]
    pub fn with<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<V: Display>(&mut self, key: &str, value: Option<V>) {
        let Some(value) = value.map(|v| v.to_string()) else {
            return;
        };
        if value.is_empty() {
            return;
        }

        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `k=v&k2=v2`, percent-encoded
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Produces fully-qualified request URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: ApiBase,
    origin: Option<String>,
}

impl UrlBuilder {
    /// `origin` is the page origin (`https://host[:port]`). Without one,
    /// relative bases yield origin-relative URLs such as `/api/expenses`.
    pub fn new(base: ApiBase, origin: Option<&str>) -> ApiResult<Self> {
        let origin = match origin.map(str::trim).filter(|o| !o.is_empty()) {
            Some(o) if is_absolute(o) => Some(o.trim_end_matches('/').to_string()),
            Some(o) => return Err(ApiError::InvalidUrl(format!("origin '{}' is not http(s)", o))),
            None => None,
        };
        Ok(Self { base, origin })
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Join `path` onto the base with exactly one separator and append the
    /// non-empty query parameters.
    pub fn build(&self, path: &str, query: &QueryParams) -> String {
        let prefix = match &self.base {
            ApiBase::Absolute(base) => base.trim_end_matches('/').to_string(),
            ApiBase::Relative(base) => format!(
                "{}{}",
                self.origin.as_deref().unwrap_or_default(),
                base.trim_end_matches('/')
            ),
        };

        let mut url = format!("{}/{}", prefix, path.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_query_string());
        }

        tracing::debug!(url = %url, "Built request URL");
        url
    }
}
