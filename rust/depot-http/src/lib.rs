#![warn(missing_docs)]

//! Composable HTTP request handlers ("slices").
//!
//! A [Slice] maps a [Request] to a [Response]. Slices compose by wrapping:
//! the [AuthSlice] decorator enforces a [Permission] check before letting a
//! request through to the slice it wraps, resolving identities with a
//! pluggable [AuthScheme]. The [SliceDelete] handler turns an existence check
//! plus delete against a [depot_storage::Storage] into the matching HTTP
//! outcome.
//!
//! ```rust
//! use depot_http::{AuthSlice, SliceDelete, User, Users};
//! use depot_storage::MemoryStorage;
//! # use async_trait::async_trait;
//! # use depot_http::{AuthError, AuthResult, AuthScheme, Challenge, Headers};
//! # struct Scheme;
//! # #[async_trait]
//! # impl AuthScheme for Scheme {
//! #     async fn authenticate(&self, _: &Headers) -> Result<AuthResult, AuthError> {
//! #         Ok(AuthResult::Unresolved(Challenge::new("Basic").with_param("realm", "repo")))
//! #     }
//! # }
//!
//! let storage = MemoryStorage::default();
//! let slice = AuthSlice::new(
//!     SliceDelete::new(storage),
//!     Scheme,
//!     Users::default().with_user(User::new("alice")),
//! );
//! # let _ = slice;
//! ```
//!
//! On native targets a slice can be served over HTTP/1 with [SliceServer], or
//! embedded into an existing hyper/tower stack with [SliceService].

mod error;
pub use error::*;

mod headers;
pub use headers::*;

mod body;
pub use body::*;

mod line;
pub use line::*;

mod request;
pub use request::*;

mod response;
pub use response::*;

mod slice;
pub use slice::*;

mod auth;
pub use auth::*;

mod delete;
pub use delete::*;

#[cfg(not(target_arch = "wasm32"))]
mod service;
#[cfg(not(target_arch = "wasm32"))]
pub use service::*;

#[cfg(not(target_arch = "wasm32"))]
mod server;
#[cfg(not(target_arch = "wasm32"))]
pub use server::*;
