use depot_storage::DepotStorageError;
use thiserror::Error;

/// The common error type used by this crate. Every variant is a genuine
/// failure: refusals such as 401, 403 and 404 are ordinary [crate::Response]s.
#[derive(Error, Debug)]
pub enum DepotHttpError {
    /// The request line could not be parsed
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The authentication scheme failed to reach a decision
    #[error(transparent)]
    Authentication(#[from] AuthError),

    /// The storage collaborator failed
    #[error(transparent)]
    Storage(#[from] DepotStorageError),

    /// A body stream failed
    #[error(transparent)]
    Body(#[from] BodyError),

    /// A response could not be converted for the transport
    #[error("Invalid response: {0}")]
    Response(String),

    /// The transport could not be set up
    #[error("Transport error: {0}")]
    Transport(String),
}

/// A failure raised by an [crate::AuthScheme] while inspecting credentials,
/// e.g. an unreachable user directory. Not to be confused with credentials
/// that simply do not resolve, which yield [crate::AuthResult::Unresolved].
#[derive(Error, Debug)]
#[error("Authentication failed: {0}")]
pub struct AuthError(pub String);

impl AuthError {
    /// Describe an authentication failure
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A failure while producing or consuming a [crate::Body]
#[derive(Error, Debug)]
#[error("Body stream failed: {0}")]
pub struct BodyError(pub String);

impl BodyError {
    /// Describe a body failure
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
