use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use hyper::{Method, Uri};
use percent_encoding::percent_decode_str;

use crate::DepotHttpError;

/// Protocol assumed when a request line omits it.
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// A parsed request line: `METHOD TARGET VERSION`.
///
/// The version may be omitted, in which case [DEFAULT_VERSION] is assumed.
///
/// ```rust
/// use depot_http::RequestLine;
///
/// let line: RequestLine = "DELETE /pkg/1.0/a.jar?force=1 HTTP/1.1".parse().unwrap();
/// assert_eq!(line.method(), "DELETE");
/// assert_eq!(line.path(), "/pkg/1.0/a.jar");
///
/// let line: RequestLine = "DELETE /pkg/a%20b.jar HTTP/1.1".parse().unwrap();
/// assert_eq!(line.decoded_path().unwrap(), "/pkg/a b.jar");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
    version: String,
}

impl RequestLine {
    /// The request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request target
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path component of the request target, without the query
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The path with percent-encoded octets decoded. Fails with
    /// [DepotHttpError::MalformedRequestLine] if the decoded octets are not
    /// valid UTF-8.
    pub fn decoded_path(&self) -> Result<String, DepotHttpError> {
        percent_decode_str(self.path())
            .decode_utf8()
            .map(|path| path.into_owned())
            .map_err(|_| DepotHttpError::MalformedRequestLine(self.to_string()))
    }

    /// The protocol version, e.g. `HTTP/1.1`
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl FromStr for RequestLine {
    type Err = DepotHttpError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || DepotHttpError::MalformedRequestLine(line.to_owned());
        let mut parts = line.split_ascii_whitespace();

        let method = parts
            .next()
            .and_then(|method| Method::from_bytes(method.as_bytes()).ok())
            .ok_or_else(malformed)?;
        let uri = parts
            .next()
            .and_then(|target| target.parse::<Uri>().ok())
            .ok_or_else(malformed)?;
        let version = match parts.next() {
            Some(version) if version.starts_with("HTTP/") => version.to_owned(),
            Some(_) => return Err(malformed()),
            None => DEFAULT_VERSION.to_owned(),
        };

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self {
            method,
            uri,
            version,
        })
    }
}

impl Display for RequestLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.method, self.uri, self.version)
    }
}
