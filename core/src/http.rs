//! HTTP request and response types passed across the transport boundary.
//!
//! # Design
//! `HttpRequest` describes a request as plain data: the client builds it
//! without touching the network, and a `Transport` turns it into bytes on the
//! wire. Header names are stored lower-cased so set semantics can compare
//! them directly.
//!
//! `TransportResponse` owns the response body as a reader. Whoever consumes
//! the body takes ownership of it, so it is read and released exactly once.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use url::Url;

use crate::error::ApiError;

pub const ACCEPT: &str = "accept";
pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
    /// Any other syntactically valid method token, kept verbatim.
    Extension(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Extension(token) => token,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    /// Method names are case-sensitive: `get` is an extension method, not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            "CONNECT" => HttpMethod::Connect,
            other if is_token(other) => HttpMethod::Extension(other.to_string()),
            other => {
                return Err(ApiError::RequestConstruction(format!(
                    "invalid method {other:?}"
                )))
            }
        };
        Ok(method)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `token = 1*tchar` from RFC 9110.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+'
                        | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
                )
        })
}

/// Field values may hold visible characters, spaces, tabs and obs-text, but
/// no other control bytes.
fn is_field_value(s: &str) -> bool {
    s.bytes().all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}

/// Reject header names and values that cannot go on the wire.
pub(crate) fn validate_header(name: &str, value: &str) -> Result<(), ApiError> {
    if !is_token(name) {
        return Err(ApiError::RequestConstruction(format!("invalid header name {name:?}")));
    }
    if !is_field_value(value) {
        return Err(ApiError::RequestConstruction(format!("invalid value for header {name:?}")));
    }
    Ok(())
}

/// A single caller-supplied header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_request` and `ApiClient::build`, then handed to
/// `ApiClient::execute`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.headers.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name, value.to_string())),
        }
    }
}

/// Status and headers of a response, available whether or not the body decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ResponseMeta {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as returned by a `Transport`, body not yet read.
pub struct TransportResponse {
    pub meta: ResponseMeta,
    pub body: Box<dyn Read>,
}

impl TransportResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Box<dyn Read>) -> Self {
        Self {
            meta: ResponseMeta { status, headers },
            body,
        }
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("http://localhost:3000/widgets").unwrap(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn standard_methods_parse_to_named_variants() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap().as_str(), "DELETE");
    }

    #[test]
    fn lowercase_method_is_an_extension() {
        let method: HttpMethod = "get".parse().unwrap();
        assert_eq!(method, HttpMethod::Extension("get".to_string()));
        assert_eq!(method.to_string(), "get");
    }

    #[test]
    fn invalid_method_tokens_are_rejected() {
        for bad in ["", "GET POST", "BAD\nMETHOD", "(GET)", "GÉT"] {
            let err = bad.parse::<HttpMethod>().unwrap_err();
            assert!(matches!(err, ApiError::RequestConstruction(_)), "{bad:?}");
        }
    }

    #[test]
    fn header_validation() {
        assert!(validate_header("X-Tenant", "a b\tc").is_ok());
        assert!(validate_header("X-Tenant", "").is_ok());
        let bad = [
            ("X Tenant", "a"),
            ("", "a"),
            ("X-Tenant:", "a"),
            ("X-Tenant", "a\nb"),
            ("X-Tenant", "a\rb"),
            ("X-Tenant", "a\u{7f}"),
        ];
        for (name, value) in bad {
            let err = validate_header(name, value).unwrap_err();
            assert!(matches!(err, ApiError::RequestConstruction(_)), "{name:?}: {value:?}");
        }
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut req = request();
        req.set_header("X-Trace", "one");
        req.set_header("x-trace", "two");
        assert_eq!(req.headers, vec![("x-trace".to_string(), "two".to_string())]);
        assert_eq!(req.header("X-TRACE"), Some("two"));
    }

    #[test]
    fn set_header_keeps_position_of_existing_entry() {
        let mut req = request();
        req.set_header("accept", "text/plain");
        req.set_header("x-other", "1");
        req.set_header("Accept", APPLICATION_JSON);
        assert_eq!(req.headers[0], (ACCEPT.to_string(), APPLICATION_JSON.to_string()));
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn response_meta_header_lookup_ignores_case() {
        let meta = ResponseMeta {
            status: 200,
            headers: vec![("Content-Type".to_string(), APPLICATION_JSON.to_string())],
        };
        assert_eq!(meta.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(meta.header("x-missing"), None);
    }
}
