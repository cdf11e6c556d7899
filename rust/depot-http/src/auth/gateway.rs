use async_trait::async_trait;

use crate::{
    AuthResult, AuthScheme, DepotHttpError, Identity, Permission, Request, Response, Slice,
};

/// Guards a [Slice] with a [Permission] check.
///
/// For every request:
///
/// 1. The permission is asked about [Identity::AnyUser]. If the route is public
///    the request goes straight to the wrapped slice and the [AuthScheme] is
///    never invoked.
/// 2. Otherwise the scheme authenticates the request headers. An
///    [AuthResult::Unresolved] outcome yields `401 Unauthorized` carrying the
///    challenge.
/// 3. A resolved user is checked against the permission: allowed requests go
///    to the wrapped slice, the rest get `403 Forbidden` with no body.
///
/// The request body is never read here; on the forward path the wrapped slice
/// receives the request exactly as it arrived and its response is returned
/// verbatim. Failures of the scheme or of the wrapped slice propagate as
/// `Err` without retries.
#[derive(Clone, Debug)]
pub struct AuthSlice<Origin, Scheme, Perm> {
    origin: Origin,
    auth: Scheme,
    permission: Perm,
}

impl<Origin, Scheme, Perm> AuthSlice<Origin, Scheme, Perm>
where
    Origin: Slice,
    Scheme: AuthScheme,
    Perm: Permission,
{
    /// Guard `origin`, authenticating with `auth` and authorizing with
    /// `permission`
    pub fn new(origin: Origin, auth: Scheme, permission: Perm) -> Self {
        Self {
            origin,
            auth,
            permission,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Origin, Scheme, Perm> Slice for AuthSlice<Origin, Scheme, Perm>
where
    Origin: Slice,
    Scheme: AuthScheme,
    Perm: Permission,
{
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError> {
        if self.permission.allowed(&Identity::AnyUser) {
            tracing::trace!(line = %request.line, "Public route, skipping authentication");
            return self.origin.response(request).await;
        }

        match self.auth.authenticate(&request.headers).await? {
            AuthResult::Resolved(user) => {
                let identity = Identity::User(user);
                if self.permission.allowed(&identity) {
                    self.origin.response(request).await
                } else {
                    tracing::debug!(line = %request.line, ?identity, "Permission denied");
                    Ok(Response::forbidden())
                }
            }
            AuthResult::Unresolved(challenge) => {
                tracing::debug!(line = %request.line, %challenge, "Authentication required");
                Ok(Response::unauthorized(&challenge))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use anyhow::Result;
    use async_trait::async_trait;
    use bytes::Bytes;
    use futures_util::stream;
    use hyper::StatusCode;

    use crate::{
        AuthError, AuthResult, AuthScheme, AuthSlice, Body, BodyError, Challenge,
        DepotHttpError, Everyone, Headers, Identity, Nobody, Predicate, Request, Response,
        Slice, SliceFn, User, Users, WWW_AUTHENTICATE,
    };

    /// Resolves the `X-User` header, counting invocations.
    #[derive(Default)]
    struct HeaderScheme {
        calls: AtomicUsize,
    }

    impl HeaderScheme {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthScheme for HeaderScheme {
        async fn authenticate(&self, headers: &Headers) -> Result<AuthResult, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match headers.get("X-User") {
                Some(name) => AuthResult::Resolved(User::new(name)),
                None => AuthResult::Unresolved(Challenge::new("Basic").with_param("realm", "repo")),
            })
        }
    }

    struct BrokenScheme;

    #[async_trait]
    impl AuthScheme for BrokenScheme {
        async fn authenticate(&self, _headers: &Headers) -> Result<AuthResult, AuthError> {
            Err(AuthError::new("user directory unreachable"))
        }
    }

    /// Echoes the request back with a distinctive status, counting invocations.
    fn origin(calls: Arc<AtomicUsize>) -> impl Slice {
        SliceFn::new(move |request: Request| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Response::new(StatusCode::ACCEPTED)
                    .with_header("X-Origin-Line", request.line)
                    .with_header("X-Origin-Headers", request.headers.len().to_string())
                    .with_body(request.body))
            }
        })
    }

    fn request(headers: Headers) -> Request {
        Request::new(
            "GET /pkg/1.0/a.jar HTTP/1.1",
            headers,
            Body::from_stream(stream::iter([
                Ok::<_, BodyError>(Bytes::from_static(b"first,")),
                Ok(Bytes::from_static(b"second")),
            ])),
        )
    }

    #[tokio::test]
    async fn it_forwards_public_routes_without_authenticating() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let scheme = Arc::new(HeaderScheme::default());
        let slice = AuthSlice::new(origin(calls.clone()), scheme.clone(), Everyone);

        let response = slice.response(request(Headers::new())).await?;

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(
            response.headers.get("X-Origin-Line"),
            Some("GET /pkg/1.0/a.jar HTTP/1.1")
        );
        assert_eq!(response.body.collect().await?, "first,second");
        assert_eq!(scheme.calls(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn it_forwards_public_routes_even_when_authentication_is_broken() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let slice = AuthSlice::new(
            origin(calls.clone()),
            BrokenScheme,
            Users::default().with_any_user(),
        );

        let response = slice.response(request(Headers::new())).await?;

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn it_challenges_unauthenticated_requests() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let scheme = Arc::new(HeaderScheme::default());
        let slice = AuthSlice::new(
            origin(calls.clone()),
            scheme.clone(),
            Users::default().with_user(User::new("alice")),
        );

        let response = slice.response(request(Headers::new())).await?;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers.get(WWW_AUTHENTICATE),
            Some(r#"Basic realm="repo""#)
        );
        assert!(response.body.collect().await?.is_empty());
        assert_eq!(scheme.calls(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        Ok(())
    }

    #[tokio::test]
    async fn it_forwards_permitted_users_verbatim() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let scheme = Arc::new(HeaderScheme::default());
        let slice = AuthSlice::new(
            origin(calls.clone()),
            scheme.clone(),
            Users::default().with_user(User::new("alice")),
        );

        let headers = Headers::new()
            .with("X-User", "alice")
            .with("Accept", "*/*");
        let response = slice.response(request(headers)).await?;

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(response.headers.get("X-Origin-Headers"), Some("2"));
        assert_eq!(response.body.collect().await?, "first,second");
        assert_eq!(scheme.calls(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn it_forbids_users_without_permission() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let slice = AuthSlice::new(
            origin(calls.clone()),
            HeaderScheme::default(),
            Users::default().with_user(User::new("alice")),
        );

        let response = slice
            .response(request(Headers::new().with("X-User", "mallory")))
            .await?;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(response.headers.is_empty());
        assert!(response.body.collect().await?.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        Ok(())
    }

    #[tokio::test]
    async fn it_asks_about_the_sentinel_before_the_user() -> Result<()> {
        let asked = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = asked.clone();
        let permission = Predicate::new(move |identity: &Identity| {
            if let Ok(mut asked) = recorder.lock() {
                asked.push(identity.clone());
            }
            identity.user().is_some()
        });
        let calls = Arc::new(AtomicUsize::new(0));
        let slice = AuthSlice::new(origin(calls.clone()), HeaderScheme::default(), permission);

        let response = slice
            .response(request(Headers::new().with("X-User", "bob")))
            .await?;

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(
            *asked.lock().map_err(|_| anyhow::anyhow!("poisoned"))?,
            vec![Identity::AnyUser, Identity::from(User::new("bob"))]
        );

        Ok(())
    }

    #[tokio::test]
    async fn it_propagates_authentication_failures() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let slice = AuthSlice::new(origin(calls.clone()), BrokenScheme, Nobody);

        let result = slice.response(request(Headers::new())).await;

        assert!(matches!(result, Err(DepotHttpError::Authentication(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        Ok(())
    }
}
