//! Blocking client for JSON HTTP APIs.
//!
//! # Overview
//! Builds requests against a base URL, attaches authentication headers,
//! serializes JSON bodies, performs the call through a pluggable `Transport`
//! and decodes the JSON response into a caller-chosen type.
//!
//! # Design
//! - `ApiClient` owns its base URL, `Auth` strategy and timeout; the transport
//!   is shared and never mutated, so clients built over one transport cannot
//!   clobber each other's settings.
//! - Building (`build_request` / `build`) is pure and separate from executing
//!   (`execute`), so a request can be inspected before it is sent.
//! - HTTP status codes are data, not errors. Only transport failures and
//!   bodies that do not decode are reported as `ApiError`.
//! - No retries, rate limiting or streaming.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use auth::Auth;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{Header, HttpMethod, HttpRequest, ResponseMeta, TransportResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{ApiResponse, RequestOptions};
