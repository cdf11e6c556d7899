use crate::{Body, DepotHttpError, Headers, RequestLine};

/// An inbound request: the raw request line, the header sequence and the
/// (not yet consumed) body.
#[derive(Debug, Default)]
pub struct Request {
    /// `METHOD TARGET VERSION`, as received
    pub line: String,
    /// Headers in the order they were received
    pub headers: Headers,
    /// The body stream
    pub body: Body,
}

impl Request {
    /// Assemble a request from its parts
    pub fn new(line: impl Into<String>, headers: Headers, body: Body) -> Self {
        Self {
            line: line.into(),
            headers,
            body,
        }
    }

    /// Parse the request line
    pub fn request_line(&self) -> Result<RequestLine, DepotHttpError> {
        self.line.parse()
    }
}
