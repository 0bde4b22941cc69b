//! Core composition primitives for `amalfi`.
//!
//! Everything here is a thin, typed layer over ordinary closures and futures.
//!
//! ## Key Components
//!
//! - **`pipeline`**: [`Pipeline`], an input bound to a chain of synchronous
//!   steps, built with `step`, `then` or the `|` operator.
//! - **`async_pipeline`**: [`AsyncPipeline`], the same shape for steps that
//!   suspend; each step is awaited before the next is invoked.
//! - **`chain`**: the unbound compositions both pipelines are built on.
//! - **`step`**: the [`AsyncStep`] capability and the [`as_async`] adapter
//!   that lets plain functions take part in async pipelines.
//! - **`errors`**: the library [`Error`] enum and [`Result`] alias.
//!
//! Type compatibility between consecutive steps is checked by the compiler:
//! appending `Fn(O) -> U` to a `Pipeline<I, O>` yields a `Pipeline<I, U>`.

pub mod async_pipeline;
pub mod chain;
pub mod constants;
pub mod errors;
mod macros;
pub mod pipeline;
pub mod step;

pub use self::{
    async_pipeline::{apipe, AsyncPipeline},
    chain::{chain, AsyncChain, Chain},
    errors::{Error, Result, ResultExt},
    pipeline::{pipe, Pipeline},
    step::{as_async, identity, AsyncStep, Immediate},
};
