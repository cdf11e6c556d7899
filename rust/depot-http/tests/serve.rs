#![cfg(not(target_arch = "wasm32"))]

use anyhow::Result;
use async_trait::async_trait;
use depot_http::{
    AuthError, AuthResult, AuthScheme, AuthSlice, Challenge, Headers, PermissionSettings,
    SliceDelete, SliceServer, User, Users,
};
use depot_storage::{Key, MemoryStorage, Storage};
use reqwest::StatusCode;

/// Trusts the `X-User` header; enough to drive the gateway end to end.
struct TrustedHeader;

#[async_trait]
impl AuthScheme for TrustedHeader {
    async fn authenticate(&self, headers: &Headers) -> Result<AuthResult, AuthError> {
        Ok(match headers.get("x-user") {
            Some(name) => AuthResult::Resolved(User::new(name)),
            None => AuthResult::Unresolved(Challenge::new("Basic").with_param("realm", "repo")),
        })
    }
}

async fn start(storage: MemoryStorage, settings: &str) -> Result<SliceServer> {
    let settings: PermissionSettings = serde_json::from_str(settings)?;
    let slice = AuthSlice::new(
        SliceDelete::new(storage),
        TrustedHeader,
        Users::from(settings),
    );
    Ok(SliceServer::start("127.0.0.1:0", slice).await?)
}

#[tokio::test(flavor = "multi_thread")]
async fn it_guards_deletes_over_http() -> Result<()> {
    let storage = MemoryStorage::default();
    storage
        .save(Key::from_path("pkg/1.0/a.jar"), b"jar".to_vec())
        .await?;
    let server = start(storage.clone(), r#"{ "users": ["alice"] }"#).await?;
    let url = format!("{}/pkg/1.0/a.jar", server.endpoint);
    let client = reqwest::Client::new();

    let anonymous = client.delete(&url).send().await?;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        anonymous
            .headers()
            .get("www-authenticate")
            .map(|value| value.to_str())
            .transpose()?,
        Some(r#"Basic realm="repo""#)
    );

    let mallory = client.delete(&url).header("X-User", "mallory").send().await?;
    assert_eq!(mallory.status(), StatusCode::FORBIDDEN);
    assert!(mallory.bytes().await?.is_empty());
    assert!(storage.exists(&Key::from_path("pkg/1.0/a.jar")).await?);

    let alice = client.delete(&url).header("X-User", "alice").send().await?;
    assert_eq!(alice.status(), StatusCode::NO_CONTENT);
    assert!(!storage.exists(&Key::from_path("pkg/1.0/a.jar")).await?);

    let again = client.delete(&url).header("X-User", "alice").send().await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    server.stop();

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn it_serves_public_routes_without_credentials() -> Result<()> {
    let storage = MemoryStorage::default();
    storage.save(Key::from_path("one/two"), vec![1]).await?;
    let server = start(storage.clone(), r#"{ "users": ["*"] }"#).await?;

    let response = reqwest::Client::new()
        .delete(format!("{}/one/two", server.endpoint))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(storage.list(&Key::default()).await?.is_empty());

    server.stop();

    Ok(())
}
