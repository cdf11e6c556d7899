use hyper::StatusCode;

use crate::{Body, Challenge, Headers};

/// Header carrying the [Challenge] of a 401 response.
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// An outbound response. An empty [Body] stands for "no body".
#[derive(Debug)]
pub struct Response {
    /// The status code
    pub status: StatusCode,
    /// Response headers, in order
    pub headers: Headers,
    /// The body stream
    pub body: Body,
}

impl Response {
    /// A response with the given status, no headers and no body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Body::empty(),
        }
    }

    /// Append a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Replace the body
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// `204 No Content`
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT)
    }

    /// `404 Not Found`
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    /// `403 Forbidden`
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN)
    }

    /// `401 Unauthorized`, carrying `challenge` in [WWW_AUTHENTICATE]
    pub fn unauthorized(challenge: &Challenge) -> Self {
        Self::new(StatusCode::UNAUTHORIZED).with_header(WWW_AUTHENTICATE, challenge.to_string())
    }
}
