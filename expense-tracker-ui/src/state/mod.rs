//! State Management
//!
//! Reactive dashboard state and the session that feeds it.

pub mod global;
pub mod session;
