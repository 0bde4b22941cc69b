//! Optional and two-track values that compose inside pipelines.
//!
//! [`Maybe`] models a value that may be absent, [`Either`] a computation that
//! either succeeded or failed. Both short-circuit on `bind`, so they can be
//! threaded through pipeline steps without early returns.

pub mod either;
pub mod maybe;

pub use either::Either;
pub use maybe::Maybe;
