//! Request builder and executor for a JSON API.
//!
//! # Design
//! `ApiClient` owns its base URL, authentication strategy and timeout, and
//! borrows network I/O from a shared `Transport`. Building a request is pure:
//! it resolves the path, serializes the body and sets headers. Executing a
//! request performs the round-trip and decodes the JSON body whatever the
//! status code; deciding whether a 4xx/5xx is a failure is up to the caller.
//!
//! Paths are resolved as URL references against the base URL, and the base
//! URL never keeps a trailing slash. So with base `https://api.example.com/v1`:
//!
//! - `/widgets/42` is absolute and replaces the base path:
//!   `https://api.example.com/widgets/42`
//! - `widgets/42` is relative and replaces the last segment:
//!   `https://api.example.com/widgets/42`
//! - `v1/widgets/42` keeps the prefix: `https://api.example.com/v1/widgets/42`

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::Auth;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{ApiError, TransportError};
use crate::http::{validate_header, Header, HttpMethod, HttpRequest, ACCEPT, APPLICATION_JSON, CONTENT_TYPE};
use crate::transport::{default_transport, Transport};
use crate::types::{ApiResponse, RequestOptions};

/// Blocking client for a JSON API rooted at one base URL.
///
/// Holds no per-call state, so `&ApiClient` can be shared across threads.
/// Changing the timeout needs `&mut self`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    auth: Auth,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client over the shared default transport.
    pub fn new(base_url: &str, auth: Auth) -> Result<Self, ApiError> {
        Self::with_transport(default_transport(), base_url, auth)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str, auth: Auth) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        debug!(base_url:% = parsed; "API client created");
        Ok(Self {
            base_url: parsed,
            auth,
            timeout: DEFAULT_TIMEOUT,
            transport,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::from_config_with_transport(default_transport(), config)
    }

    pub fn from_config_with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Result<Self, ApiError> {
        let mut client = Self::with_transport(transport, &config.base_url, config.auth())?;
        client.set_timeout(config.timeout());
        Ok(client)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Applies to calls started after this returns. `Duration::ZERO` means no
    /// limit.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Build a request from an options struct. Caller headers are applied only
    /// under `Auth::StaticHeaderList`.
    pub fn build_request<B: Serialize>(&self, options: &RequestOptions<B>) -> Result<HttpRequest, ApiError> {
        self.assemble(&options.method, &options.path, &options.headers, options.body.as_ref())
    }

    /// Build a request from positional arguments, without extra headers.
    pub fn build<B: Serialize>(&self, method: &str, path: &str, body: Option<&B>) -> Result<HttpRequest, ApiError> {
        self.assemble(method, path, &[], body)
    }

    fn assemble<B: Serialize>(
        &self,
        method: &str,
        path: &str,
        headers: &[Header],
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(ApiError::Serialization))
            .transpose()?;
        let method: HttpMethod = method.parse()?;
        let url = self.resolve(path)?;

        let mut request = HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body,
        };
        if request.body.is_some() {
            request.set_header(CONTENT_TYPE, APPLICATION_JSON);
        }
        request.set_header(ACCEPT, APPLICATION_JSON);
        self.auth.apply(&mut request, headers);
        for (name, value) in &request.headers {
            validate_header(name, value)?;
        }

        debug!(method:% = request.method, url:% = request.url; "Request built");
        Ok(request)
    }

    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::RequestConstruction(format!("cannot resolve path {path:?}: {e}")))?;
        if url.origin() != self.base_url.origin() {
            return Err(ApiError::RequestConstruction(format!(
                "path {path:?} leaves the base URL's origin"
            )));
        }
        Ok(url)
    }

    /// Perform the round-trip and decode the JSON body into `T`.
    ///
    /// Any status is accepted. On a decode failure the error still carries
    /// the response status and headers. A body that stops mid-read is a
    /// transport failure, not a decode failure.
    pub fn execute<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<ApiResponse<T>, ApiError> {
        let response = self.transport.send(request, self.timeout).map_err(|e| {
            warn!(method:% = request.method, url:% = request.url, error:% = e; "Transport failure");
            ApiError::Transport(e)
        })?;

        let meta = response.meta;
        let decoded = serde_json::from_reader(response.body);
        match decoded {
            Ok(body) => Ok(ApiResponse { meta, body }),
            Err(source) if source.is_io() => {
                warn!(url:% = request.url, status = meta.status, error:% = source; "Response body read failed");
                let io = std::io::Error::from(source);
                let err = match io.kind() {
                    std::io::ErrorKind::TimedOut => TransportError::Timeout,
                    _ => TransportError::Io(io),
                };
                Err(ApiError::Transport(err))
            }
            Err(source) => {
                warn!(url:% = request.url, status = meta.status, error:% = source; "Response body did not decode");
                Err(ApiError::Decode { response: meta, source })
            }
        }
    }

    /// `build_request` followed by `execute`.
    pub fn send<B: Serialize, T: DeserializeOwned>(&self, options: &RequestOptions<B>) -> Result<ApiResponse<T>, ApiError> {
        let request = self.build_request(options)?;
        self.execute(&request)
    }
}
