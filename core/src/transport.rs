//! The network boundary: anything that can turn an `HttpRequest` into a
//! `TransportResponse`.
//!
//! # Design
//! The client never performs I/O itself. It hands a fully built request and
//! its own timeout to a `Transport`. The timeout travels with the call rather
//! than living on the transport, so one transport can be shared by any number
//! of clients without their settings interfering.
//!
//! `UreqTransport` is the default implementation. Status codes are returned as
//! data (`http_status_as_error(false)`), leaving their interpretation to the
//! caller.

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use log::debug;
use ureq::http;
use ureq::{Agent, AsSendBody};

use crate::error::TransportError;
use crate::http::{HttpRequest, TransportResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must return `Ok` for every response received, whatever its
/// status, and `Err` only when no response was obtained. A zero `timeout`
/// means the call has no time limit.
pub trait Transport: fmt::Debug + Send + Sync {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<TransportResponse, TransportError>;
}

static DEFAULT_TRANSPORT: LazyLock<Arc<UreqTransport>> = LazyLock::new(|| Arc::new(UreqTransport::new()));

/// The process-wide transport used by clients built without one.
pub fn default_transport() -> Arc<dyn Transport> {
    DEFAULT_TRANSPORT.clone()
}

/// Blocking transport backed by a `ureq::Agent` and its connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an existing agent. It should be configured with
    /// `http_status_as_error(false)`, otherwise 4xx/5xx surface as transport
    /// errors.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }

    fn dispatch<S: AsSendBody>(
        &self,
        request: http::Request<S>,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let request = self
            .agent
            .configure_request(request)
            .timeout_global((!timeout.is_zero()).then_some(timeout))
            .build();
        let response = self.agent.run(request).map_err(map_ureq_error)?;

        let (parts, body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        debug!(status = parts.status.as_u16(); "Response received");
        Ok(TransportResponse::new(
            parts.status.as_u16(),
            headers,
            Box::new(body.into_reader()),
        ))
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match &request.body {
            Some(body) => {
                let request = builder
                    .body(body.clone().into_bytes())
                    .map_err(|e| TransportError::Other(Box::new(e)))?;
                self.dispatch(request, timeout)
            }
            None => {
                let request = builder
                    .body(())
                    .map_err(|e| TransportError::Other(Box::new(e)))?;
                self.dispatch(request, timeout)
            }
        }
    }
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => TransportError::Timeout,
        ureq::Error::Io(e) => TransportError::Io(e),
        other => TransportError::Other(Box::new(other)),
    }
}
