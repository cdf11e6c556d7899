use std::{
    fmt::{Debug, Formatter},
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use depot_common::ConditionalSend;
use futures_util::{Stream, TryStreamExt, stream};

use crate::BodyError;

#[cfg(not(target_arch = "wasm32"))]
type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, BodyError>> + Send>>;

#[cfg(target_arch = "wasm32")]
type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, BodyError>>>>;

/// A lazy stream of body chunks.
///
/// A body can be consumed exactly once. Slices that only inspect the request
/// line or headers must pass the body along untouched.
pub struct Body(ByteStream);

impl Body {
    /// A body with no chunks
    pub fn empty() -> Self {
        Self(Box::pin(stream::empty()))
    }

    /// Wrap an arbitrary chunk stream
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, BodyError>> + ConditionalSend + 'static,
    {
        Self(Box::pin(stream))
    }

    /// Drain every chunk into a single buffer
    pub async fn collect(self) -> Result<Bytes, BodyError> {
        let mut stream = self.0;
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.try_next().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(buffer))
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Body { .. }")
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BodyError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.as_mut().poll_next(cx)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_stream(stream::iter([Ok(bytes)]))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}
