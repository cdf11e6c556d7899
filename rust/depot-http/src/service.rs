use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use bytes::Bytes;
use futures_util::{TryStreamExt, future};
use http_body_util::{BodyExt, BodyStream, StreamBody, combinators::UnsyncBoxBody};
use hyper::body::Frame;

use crate::{Body, BodyError, DepotHttpError, Headers, Request, Response, Slice};

/// Body type of the responses produced by [SliceService].
pub type ServiceBody = UnsyncBoxBody<Bytes, BodyError>;

/// Exposes a [Slice] as a [tower::Service] over hyper requests.
///
/// Requests are converted into the `(line, headers, body)` triple: the line is
/// `METHOD TARGET VERSION`, headers keep the order of the incoming header map
/// and the body is streamed without buffering. A slice failure is answered
/// with `500 Internal Server Error` and logged.
pub struct SliceService<S: ?Sized> {
    slice: Arc<S>,
}

impl<S> SliceService<S>
where
    S: Slice,
{
    /// Serve `slice`
    pub fn new(slice: S) -> Self {
        Self {
            slice: Arc::new(slice),
        }
    }
}

impl<S: ?Sized> Clone for SliceService<S> {
    fn clone(&self) -> Self {
        Self {
            slice: self.slice.clone(),
        }
    }
}

impl<S> From<Arc<S>> for SliceService<S>
where
    S: Slice + ?Sized,
{
    fn from(slice: Arc<S>) -> Self {
        Self { slice }
    }
}

impl<S, B> tower::Service<hyper::Request<B>> for SliceService<S>
where
    S: Slice + ?Sized + 'static,
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: std::fmt::Display,
{
    type Response = hyper::Response<ServiceBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: hyper::Request<B>) -> Self::Future {
        let slice = self.slice.clone();
        Box::pin(async move {
            let request = into_request(request);
            let line = request.line.clone();
            let response = match slice.response(request).await {
                Ok(response) => into_response(response),
                Err(error) => Err(error),
            };
            Ok(response.unwrap_or_else(|error| {
                tracing::error!(%line, %error, "Slice failed");
                internal_error()
            }))
        })
    }
}

fn into_request<B>(request: hyper::Request<B>) -> Request
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: std::fmt::Display,
{
    let (parts, body) = request.into_parts();
    let line = format!("{} {} {:?}", parts.method, parts.uri, parts.version);
    let headers: Headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            let value = match std::str::from_utf8(value.as_bytes()) {
                Ok(value) => value.to_owned(),
                Err(_) => {
                    tracing::debug!(%name, "Header value is not valid UTF-8, replacing invalid bytes");
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                }
            };
            (name.as_str().to_owned(), value)
        })
        .collect();
    let body = TryStreamExt::map_err(BodyStream::new(body), |error| {
        BodyError::new(error.to_string())
    })
    .try_filter_map(|frame| future::ready(Ok(frame.into_data().ok())));

    Request::new(line, headers, Body::from_stream(body))
}

fn into_response(response: Response) -> Result<hyper::Response<ServiceBody>, DepotHttpError> {
    let mut builder = hyper::Response::builder().status(response.status);
    for (name, value) in response.headers.iter() {
        builder = builder.header(name, value);
    }
    builder
        .body(StreamBody::new(response.body.map_ok(Frame::data)).boxed_unsync())
        .map_err(|error| DepotHttpError::Response(error.to_string()))
}

fn internal_error() -> hyper::Response<ServiceBody> {
    let mut response = hyper::Response::new(
        http_body_util::Empty::new()
            .map_err(|never: Infallible| -> BodyError { match never {} })
            .boxed_unsync(),
    );
    *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    response
}
