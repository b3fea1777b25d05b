//! Request input and decoded response wrappers.

use serde::Serialize;

use crate::http::{Header, ResponseMeta};

/// Options-struct form of a request: method, path, headers and optional body.
///
/// Starts without a body (`B = ()`); `json` attaches one and changes the body
/// type.
#[derive(Debug, Clone)]
pub struct RequestOptions<B = ()> {
    pub method: String,
    pub path: String,
    pub headers: Vec<Header>,
    pub body: Option<B>,
}

impl RequestOptions<()> {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }
}

impl<B: Serialize> RequestOptions<B> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn json<T: Serialize>(self, body: T) -> RequestOptions<T> {
        RequestOptions {
            method: self.method,
            path: self.path,
            headers: self.headers,
            body: Some(body),
        }
    }
}

/// A response whose body decoded into `T`.
///
/// The status is not interpreted: a 500 with a decodable body lands here too.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub meta: ResponseMeta,
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        self.meta.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.meta.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.meta.header(name)
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_start_without_body() {
        let opts = RequestOptions::new("GET", "/widgets").header("X-Tenant", "a");
        assert!(opts.body.is_none());
        assert_eq!(opts.headers, vec![Header::new("X-Tenant", "a")]);
    }

    #[test]
    fn json_attaches_body_and_keeps_headers() {
        let opts = RequestOptions::new("POST", "/widgets")
            .header("X-Tenant", "a")
            .json(serde_json::json!({"name": "bolt"}));
        assert_eq!(opts.body.as_ref().unwrap()["name"], "bolt");
        assert_eq!(opts.headers.len(), 1);
        assert_eq!(opts.method, "POST");
    }

    #[test]
    fn api_response_reports_status_without_judging_it() {
        let resp = ApiResponse {
            meta: ResponseMeta {
                status: 500,
                headers: Vec::new(),
            },
            body: (),
        };
        assert_eq!(resp.status(), 500);
        assert!(!resp.is_success());
    }
}
