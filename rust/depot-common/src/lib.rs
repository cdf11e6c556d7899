#![warn(missing_docs)]

//! Light weight helpers shared by the depot crates. This crate has no
//! dependencies of its own.

mod sync;
pub use sync::*;
