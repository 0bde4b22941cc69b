//! Two-track results: a success or a failure, both ordinary values

use amalfi_core::Error;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// The outcome of a computation that may fail.
///
/// Unlike a pipeline step returning `Err`, an `Either` carries its failure
/// as data: `map` passes it through and `bind` short-circuits on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<T, E = Error> {
    Success(T),
    Failure(E),
}

impl<T> Either<T, Error> {
    /// Run `f`, capturing a panic as `Failure(Error::Panicked)`.
    ///
    /// The panic message is kept; the default panic hook still reports it.
    pub fn from_exception<F>(f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Either::Success(value),
            Err(payload) => Either::Failure(Error::from_panic_payload(payload)),
        }
    }
}

impl<T, E> Either<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Either::Success(value),
            Err(error) => Either::Failure(error),
        }
    }

    /// Transform a success; a failure passes through unchanged.
    pub fn map<U, F>(self, f: F) -> Either<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Either::Success(value) => Either::Success(f(value)),
            Either::Failure(error) => Either::Failure(error),
        }
    }

    /// Chain a computation that may itself fail.
    ///
    /// `f` is not called on a failure.
    pub fn bind<U, F>(self, f: F) -> Either<U, E>
    where
        F: FnOnce(T) -> Either<U, E>,
    {
        match self {
            Either::Success(value) => f(value),
            Either::Failure(error) => Either::Failure(error),
        }
    }

    /// Transform a failure; a success passes through unchanged.
    pub fn map_failure<G, F>(self, f: F) -> Either<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Either::Success(value) => Either::Success(value),
            Either::Failure(error) => Either::Failure(f(error)),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Either::Success(value) => value,
            Either::Failure(_) => default,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Either::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Either::Failure(_))
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Either::Success(value) => Ok(value),
            Either::Failure(error) => Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Either<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Either::from_result(result)
    }
}

impl<T, E> From<Either<T, E>> for Result<T, E> {
    fn from(either: Either<T, E>) -> Self {
        either.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::pipe;
    use amalfi_ops::map_;

    fn parse(s: &str) -> Either<i32, String> {
        s.parse::<i32>()
            .map_err(|e| format!("{s}: {e}"))
            .into()
    }

    #[test]
    fn test_map_passes_failure_through() {
        assert_eq!(
            Either::<i32, String>::Success(2).map(|x| x * 3),
            Either::Success(6)
        );
        let failure: Either<i32, String> = Either::Failure("bad".into());
        assert_eq!(failure.map(|x| x * 3), Either::Failure("bad".to_string()));
    }

    #[test]
    fn test_bind_short_circuits_without_calling() {
        let mut called = false;
        let failure: Either<&str, String> = Either::Failure("bad".into());
        let out = failure.bind(|s| {
            called = true;
            parse(s)
        });
        assert_eq!(out, Either::Failure("bad".to_string()));
        assert!(!called);

        assert_eq!(Either::Success("42").bind(parse), Either::Success(42));
        assert!(Either::Success("x").bind(parse).is_failure());
    }

    #[test]
    fn test_from_exception_captures_panics() {
        assert!(matches!(
            Either::from_exception(|| 1 + 1),
            Either::Success(2)
        ));

        let outcome = Either::<i32>::from_exception(|| panic!("division by zero"));
        match outcome {
            Either::Failure(Error::Panicked { message }) => {
                assert_eq!(message, "division by zero");
            }
            other => panic!("expected a captured panic, got {other:?}"),
        }
    }

    #[test]
    fn test_conversions() {
        let ok: Result<i32, String> = Ok(1);
        assert_eq!(Either::from_result(ok.clone()), Either::Success(1));
        assert_eq!(Result::from(Either::from(ok)), Ok(1));
        assert!(matches!(parse("").map_failure(|e| e.len()), Either::Failure(n) if n > 0));
        assert_eq!(parse("z").unwrap_or(0), 0);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Either::<i32, String>::Success(3)).unwrap();
        assert_eq!(json, r#"{"Success":3}"#);
        let back: Either<i32, String> = serde_json::from_str(r#"{"Failure":"no"}"#).unwrap();
        assert_eq!(back, Either::Failure("no".to_string()));
    }

    #[test]
    fn test_keeps_every_outcome_in_pipeline() {
        let pipeline = pipe(vec!["1", "x", "3"])
            .step(map_(parse))
            .step(map_(|e: Either<i32, String>| e.map(|x| x * 10)));
        let outcomes = pipeline.run();
        assert_eq!(outcomes[0], Either::Success(10));
        assert!(outcomes[1].is_failure());
        assert_eq!(outcomes[2], Either::Success(30));
    }
}
