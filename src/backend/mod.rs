//! HTTP client for the chat backend service.
//!
//! Implements the `ChatBackend` trait over three endpoints: history fetch,
//! chat send, and session clear. The base URL is injected via
//! `BackendConfig` at construction.

mod api;
mod client;
mod config;

pub use client::HttpBackend;
pub use config::BackendConfig;
