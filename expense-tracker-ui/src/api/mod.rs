//! Browser side of the backend client.

pub mod client;

pub use client::{api_base, build_client, GlooTransport};
