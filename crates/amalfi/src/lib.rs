//! Typed pipeline composition.
//!
//! A [`Pipeline`] binds an input to an ordered list of steps and runs them
//! left to right on demand; an [`AsyncPipeline`] does the same with steps
//! that suspend. Iterable operators in [`ops`] turn per-item functions into
//! whole-collection steps, [`Stream`] and [`AsyncStream`] process items
//! lazily, and [`Maybe`]/[`Either`] carry absence and failure as values.
//!
//! ```rust
//! use amalfi::prelude::*;
//!
//! let pipeline = pipe(3) | (|x: i32| x + 1) | (|x: i32| x * 2);
//! assert_eq!(pipeline.run(), 8);
//!
//! let evens = pipe(vec![1, 2, 3, 4])
//!     .step(filter_(|x: &i32| x % 2 == 0))
//!     .step(|v: Vec<i32>| v.into_iter().sum::<i32>());
//! assert_eq!(evens.run(), 6);
//! ```

pub use amalfi_core::{
    apipe, as_async, chain, constants, identity, pipe, AsyncChain, AsyncPipeline, AsyncStep, Chain,
    Error, Immediate, Pipeline, Result, ResultExt,
};
pub use amalfi_monad::{Either, Maybe};
pub use amalfi_stream::{astream, stream, AsyncStream, Stream};
pub use amalfi_utils as utils;

/// Iterable operators usable as pipeline steps.
pub mod ops {
    pub use amalfi_ops::*;
}

/// Everything needed to build and run pipelines.
pub mod prelude {
    pub use crate::ops::{
        acollect, afilter, afold, amap, amap_buffered, areduce, astarmap, atap, collect_, compact,
        filter_, fold_, map_, reduce_, starmap, tap, tap_each, try_amap,
    };
    pub use crate::utils::{amemoize, memoize, retry, retry_step, Memo, RetryConfig, Settings};
    pub use crate::{
        apipe, as_async, astream, identity, pipe, stream, AsyncPipeline, AsyncStep, AsyncStream,
        Either, Error, Maybe, Pipeline, Result, Stream,
    };
}
