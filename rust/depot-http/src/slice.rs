use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use depot_common::{ConditionalSend, ConditionalSync};

use crate::{DepotHttpError, Request, Response};

/// A unit that maps an incoming [Request] to a [Response].
///
/// Slices compose by wrapping: a decorator holds the slice it guards and
/// forwards the untouched request to it. One instance serves every in-flight
/// request concurrently, so a slice holds only immutable configuration.
///
/// An `Err` is reserved for collaborator failures; refusals are responses.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Slice: ConditionalSync {
    /// Produce the response for `request`
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<S> Slice for Arc<S>
where
    S: Slice + ?Sized,
{
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError> {
        (**self).response(request).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<S> Slice for Box<S>
where
    S: Slice + ?Sized,
{
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError> {
        (**self).response(request).await
    }
}

/// Adapts an async function into a [Slice].
///
/// ```rust
/// use depot_http::{Request, Response, SliceFn};
/// use hyper::StatusCode;
///
/// let teapot = SliceFn::new(|_request: Request| async {
///     Ok(Response::new(StatusCode::IM_A_TEAPOT))
/// });
/// # let _ = teapot;
/// ```
#[derive(Clone, Debug)]
pub struct SliceFn<F>(F);

impl<F, Fut> SliceFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Result<Response, DepotHttpError>>,
{
    /// Wrap `function`
    pub fn new(function: F) -> Self {
        Self(function)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F, Fut> Slice for SliceFn<F>
where
    F: Fn(Request) -> Fut + ConditionalSync,
    Fut: Future<Output = Result<Response, DepotHttpError>> + ConditionalSend,
{
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError> {
        (self.0)(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use hyper::StatusCode;

    use crate::{Headers, Request, Response, Slice, SliceFn};

    #[tokio::test]
    async fn it_adapts_functions_into_slices() -> Result<()> {
        let echo = SliceFn::new(|request: Request| async move {
            Ok(Response::new(StatusCode::OK).with_body(request.body))
        });

        let response = echo
            .response(Request::new("PUT /a HTTP/1.1", Headers::new(), "payload".into()))
            .await?;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.collect().await?, "payload");

        Ok(())
    }

    #[tokio::test]
    async fn it_dispatches_through_shared_trait_objects() -> Result<()> {
        let slice: Arc<dyn Slice> = Arc::new(SliceFn::new(|_: Request| async {
            Ok(Response::not_found())
        }));

        let boxed: Box<dyn Slice> = Box::new(slice.clone());

        assert_eq!(
            boxed.response(Request::default()).await?.status,
            StatusCode::NOT_FOUND
        );

        Ok(())
    }
}
