#![warn(missing_docs)]

//! Storage collaborators for depot slices.
//!
//! Every stored value lives under a [Key]. Keys are derived from request paths
//! by [Key::from_path], which strips leading separators so that `/foo/bar` and
//! `foo/bar` address the same value:
//!
//! ```rust
//! use depot_storage::Key;
//!
//! assert_eq!(Key::from_path("/foo/bar"), Key::from_path("foo/bar"));
//! assert_eq!(Key::from_path("/foo/bar").as_str(), "foo/bar");
//! ```
//!
//! Backends implement the [Storage] trait. This crate ships a
//! [MemoryStorage], a [FileSystemStorage] (native targets only) and a
//! [MeasuredStorage] proxy that counts the operations performed against the
//! backend it wraps.

mod error;
pub use error::*;

mod key;
pub use key::*;

mod storage;
pub use storage::*;
