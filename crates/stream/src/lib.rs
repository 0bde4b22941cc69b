//! Lazy item streams
//!
//! Where a pipeline transforms one value, a stream transforms a sequence of
//! items one at a time. Nothing is evaluated until the stream is collected
//! or iterated.
//!
//! ```rust
//! use amalfi_stream::stream;
//!
//! let result = stream(vec![1, 2, 3, 4, 5])
//!     .map(|x| x + 1)
//!     .filter(|x| x % 2 == 0)
//!     .take(2)
//!     .collect();
//! assert_eq!(result, vec![2, 4]);
//! ```

pub mod astream;
pub mod sync_stream;

pub use astream::{astream, AsyncStream};
pub use sync_stream::{stream, Stream};
