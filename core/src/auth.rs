//! Authentication strategy applied to every built request.
//!
//! # Design
//! A client picks one strategy at construction. `StaticHeaderList` applies the
//! headers supplied with each request. `FixedCredentialHeader` ignores them and
//! always writes its own header, last, so the stored credential can never be
//! replaced by anything the caller passes.

use std::fmt;

use log::debug;

use crate::http::{Header, HttpRequest};

/// Header carrying the credential when none is named explicitly.
pub const DEFAULT_CREDENTIAL_HEADER: &str = "x-api-key";

#[derive(Clone, PartialEq, Eq, Default)]
pub enum Auth {
    /// Apply the caller's headers, in order, with set semantics.
    #[default]
    StaticHeaderList,
    /// Ignore caller headers and set `header` to `credential` on every request.
    FixedCredentialHeader { header: String, credential: String },
}

impl Auth {
    /// Fixed credential sent in the `x-api-key` header.
    pub fn api_key(credential: impl Into<String>) -> Self {
        Auth::FixedCredentialHeader {
            header: DEFAULT_CREDENTIAL_HEADER.to_string(),
            credential: credential.into(),
        }
    }

    pub(crate) fn apply(&self, request: &mut HttpRequest, headers: &[Header]) {
        match self {
            Auth::StaticHeaderList => {
                for h in headers {
                    request.set_header(&h.key, &h.value);
                }
            }
            Auth::FixedCredentialHeader { header, credential } => {
                if !headers.is_empty() {
                    debug!(dropped = headers.len(); "Ignoring caller headers under fixed-credential auth");
                }
                request.set_header(header, credential);
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::StaticHeaderList => f.write_str("StaticHeaderList"),
            Auth::FixedCredentialHeader { header, .. } => f
                .debug_struct("FixedCredentialHeader")
                .field("header", header)
                .field("credential", &"<redacted>")
                .finish(),
        }
    }
}
