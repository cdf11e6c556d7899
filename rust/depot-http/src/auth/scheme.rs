use std::sync::Arc;

use async_trait::async_trait;
use depot_common::ConditionalSync;

use crate::{AuthError, Challenge, Headers, User};

/// The outcome of one authentication attempt: exactly one of a resolved
/// [User] or a [Challenge] for the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthResult {
    /// The credentials identify this user
    Resolved(User),
    /// No user could be resolved; the client should retry as challenged
    Unresolved(Challenge),
}

/// Resolves the caller of a request from its headers.
///
/// An implementation may suspend (e.g. to consult a user directory) and must
/// not touch the request body. Credentials that do not resolve are reported as
/// [AuthResult::Unresolved]; `Err` is reserved for failures to reach a
/// decision at all.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthScheme: ConditionalSync {
    /// Inspect `headers` and resolve a user or produce a challenge
    async fn authenticate(&self, headers: &Headers) -> Result<AuthResult, AuthError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<A> AuthScheme for Arc<A>
where
    A: AuthScheme + ?Sized,
{
    async fn authenticate(&self, headers: &Headers) -> Result<AuthResult, AuthError> {
        (**self).authenticate(headers).await
    }
}
