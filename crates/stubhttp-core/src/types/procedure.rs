//! Registered procedures and their canned responses.

use std::collections::HashMap;
use thiserror::Error;

/// Header name to ordered list of values.
pub type Headers = HashMap<String, Vec<String>>;

/// Status code used when a template does not set one.
pub const DEFAULT_STATUS: u16 = 200;

/// Canned response replayed verbatim for every matching request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTemplate {
    /// HTTP status code (200-599), `None` means 200
    pub status: Option<u16>,
    /// Response headers
    pub headers: Headers,
    /// Raw response body
    pub body: Vec<u8>,
}

impl ResponseTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Append a value to the header, keeping previously added values.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Status code written to the wire.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }
}

/// A registered `(method, path)` with the response it answers with.
///
/// Both method and path match exactly and case-sensitively: `GET` and `get`
/// are different procedures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// URI path without query string or fragment
    pub path: String,
    /// Response returned on match
    pub response: ResponseTemplate,
}

impl Procedure {
    /// Create a procedure answering with an empty `200`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            response: ResponseTemplate::default(),
        }
    }

    pub fn respond_with(mut self, response: ResponseTemplate) -> Self {
        self.response = response;
        self
    }

    /// Check that the procedure can be served.
    ///
    /// # Errors
    /// Returns error if:
    /// - Method is empty or not an HTTP token
    /// - Path does not start with `/` or carries a query, fragment or whitespace
    /// - Status is outside 200-599 (a 1xx cannot be a final response)
    /// - A header name is not an HTTP token or a value holds a control character
    ///   other than tab
    pub fn validate(&self) -> Result<(), ProcedureError> {
        if !is_token(&self.method) {
            return Err(ProcedureError::InvalidMethod {
                method: self.method.clone(),
            });
        }

        let path_is_valid = self.path.starts_with('/')
            && !self
                .path
                .chars()
                .any(|c| c == '?' || c == '#' || c.is_whitespace() || c.is_control());
        if !path_is_valid {
            return Err(ProcedureError::InvalidPath {
                path: self.path.clone(),
            });
        }

        if let Some(status) = self.response.status {
            if !(200..=599).contains(&status) {
                return Err(ProcedureError::InvalidStatus {
                    method: self.method.clone(),
                    path: self.path.clone(),
                    status,
                });
            }
        }

        for (name, values) in &self.response.headers {
            if !is_token(name) {
                return Err(ProcedureError::InvalidHeaderName { name: name.clone() });
            }
            if values.iter().any(|v| !is_header_value(v)) {
                return Err(ProcedureError::InvalidHeaderValue { name: name.clone() });
            }
        }

        Ok(())
    }
}

/// Errors raised when a procedure cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureError {
    #[error("Invalid HTTP method: '{method}'")]
    InvalidMethod { method: String },
    #[error("Invalid procedure path: '{path}'")]
    InvalidPath { path: String },
    #[error("Invalid status {status} for {method} {path}")]
    InvalidStatus {
        method: String,
        path: String,
        status: u16,
    },
    #[error("Invalid header name: '{name}'")]
    InvalidHeaderName { name: String },
    #[error("Invalid value for header '{name}'")]
    InvalidHeaderValue { name: String },
}

/// Visible characters, spaces and tabs; no other control characters.
fn is_header_value(s: &str) -> bool {
    !s.chars().any(|c| c.is_ascii_control() && c != '\t')
}

/// RFC 9110 token: one or more visible ASCII characters excluding delimiters.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}
