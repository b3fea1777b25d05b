//! Error types for the API client.
//!
//! # Design
//! Each variant names the stage that failed: parsing the base URL,
//! serializing the body, forming the request, moving bytes over the wire, or
//! decoding the response. HTTP status codes never produce an error here; a
//! 4xx/5xx with a decodable body is a successful call. `Decode` keeps the
//! response metadata so callers can still look at the status.

use crate::http::ResponseMeta;

/// Errors returned by `ApiClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The base URL given at construction could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The method or resolved URL cannot form a request.
    #[error("cannot construct request: {0}")]
    RequestConstruction(String),

    /// No response was obtained from the transport.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but its body is not JSON of the expected shape.
    #[error("decoding response (HTTP {}) failed: {source}", .response.status)]
    Decode {
        response: ResponseMeta,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Response metadata carried by the error, present only for decode failures.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            ApiError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Network-level failure reported by a `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call did not complete within the client's timeout.
    #[error("request timed out")]
    Timeout,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure (DNS, TLS, protocol).
    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_exposes_response_metadata() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::Decode {
            response: ResponseMeta {
                status: 200,
                headers: Vec::new(),
            },
            source,
        };
        assert_eq!(err.response().map(|r| r.status), Some(200));
        assert!(err.to_string().starts_with("decoding response (HTTP 200) failed"));
    }

    #[test]
    fn other_errors_carry_no_response() {
        let err = ApiError::RequestConstruction("bad method".to_string());
        assert!(err.response().is_none());

        let err = ApiError::from(TransportError::Timeout);
        assert!(err.response().is_none());
        assert_eq!(err.to_string(), "transport failed: request timed out");
    }
}
