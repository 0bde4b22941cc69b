//! Operator adapters for amalfi pipelines
//!
//! Each adapter takes a per-item function and returns a whole-iterable
//! function that fits in a single pipeline step:
//!
//! ```rust
//! use amalfi_core::pipe;
//! use amalfi_ops::filter_;
//!
//! let pipeline = pipe(vec![1, 2, 3, 4])
//!     .step(filter_(|x: &i32| x % 2 == 0))
//!     .step(|evens: Vec<i32>| evens.into_iter().sum::<i32>());
//! assert_eq!(pipeline.run(), 6);
//! ```
//!
//! The `a`-prefixed twins return futures and slot into async pipelines.
//! `amap`, `afilter` and `astarmap` start every per-item future at once and
//! always report results in input order. `areduce` and `afold` combine one
//! pair at a time.

pub mod collect;
pub mod filter;
pub mod map;
pub mod reduce;
pub mod starmap;
pub mod tap;

pub use collect::{acollect, collect_};
pub use filter::{afilter, compact, filter_};
pub use map::{amap, amap_buffered, map_, try_amap};
pub use reduce::{afold, areduce, fold_, reduce_};
pub use starmap::{astarmap, starmap, Spread};
pub use tap::{atap, tap, tap_each};
