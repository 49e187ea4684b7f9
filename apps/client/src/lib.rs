//! Client library for the jobtrack backend: typed resource clients over a
//! shared HTTP transport, plus a keyed query cache with per-family
//! invalidation and patch rules.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod sync;
pub mod transport;

pub use client::Client;
pub use config::Config;
pub use errors::{ApiError, QueryError};
