//! A value that may be absent

use serde::{Deserialize, Serialize};

/// Either `Just` a value or `Nothing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maybe<T> {
    Just(T),
    Nothing,
}

impl<T> Maybe<T> {
    /// `Just(value)` for `Some(value)`, `Nothing` for `None`.
    pub fn from_optional(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Just(value),
            None => Maybe::Nothing,
        }
    }

    /// Transform the payload, leaving `Nothing` untouched.
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Maybe::Just(value) => Maybe::Just(f(value)),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    /// Chain a computation that may itself produce `Nothing`.
    ///
    /// `f` is not called on `Nothing`.
    pub fn bind<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Maybe::Just(value) => f(value),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Maybe::Just(value) => value,
            Maybe::Nothing => default,
        }
    }

    pub fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Maybe::Nothing)
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Just(value) => Maybe::Just(value),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Just(value) => Some(value),
            Maybe::Nothing => None,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Nothing
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Maybe::from_optional(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::pipe;
    use rstest::rstest;

    fn safe_div(x: i32) -> Maybe<i32> {
        if x == 0 {
            Maybe::Nothing
        } else {
            Maybe::Just(100 / x)
        }
    }

    #[rstest]
    #[case(Some(5), Maybe::Just(5))]
    #[case(None, Maybe::Nothing)]
    fn test_from_optional(#[case] input: Option<i32>, #[case] expected: Maybe<i32>) {
        assert_eq!(Maybe::from_optional(input), expected);
        assert_eq!(Maybe::from(input), expected);
    }

    #[test]
    fn test_map() {
        assert_eq!(Maybe::Just(5).map(|x| x + 1), Maybe::Just(6));
        assert_eq!(Maybe::<i32>::Nothing.map(|x| x + 1), Maybe::Nothing);
    }

    #[test]
    fn test_bind_short_circuits_without_calling() {
        let mut called = false;
        let out = Maybe::<i32>::Nothing.bind(|x| {
            called = true;
            Maybe::Just(x)
        });
        assert_eq!(out, Maybe::Nothing);
        assert!(!called);

        assert_eq!(Maybe::Just(4).bind(safe_div), Maybe::Just(25));
        assert_eq!(Maybe::Just(0).bind(safe_div), Maybe::Nothing);
    }

    #[test]
    fn test_accessors() {
        assert!(Maybe::Just(1).is_just());
        assert!(Maybe::<i32>::Nothing.is_nothing());
        assert_eq!(Maybe::Nothing.unwrap_or(7), 7);
        assert_eq!(Maybe::Just("x").as_ref(), Maybe::Just(&"x"));
        assert_eq!(Option::from(Maybe::Just(3)), Some(3));
        assert_eq!(Maybe::<i32>::default(), Maybe::Nothing);
    }

    #[test]
    fn test_threads_through_pipeline() {
        let pipeline = pipe(Some(4))
            .step(Maybe::from_optional)
            .step(|m: Maybe<i32>| m.bind(safe_div))
            .step(|m: Maybe<i32>| m.map(|x| x * 2));
        assert_eq!(pipeline.run(), Maybe::Just(50));
        assert_eq!(pipeline.with_input(None).run(), Maybe::Nothing);
        assert_eq!(pipeline.with_input(Some(0)).run(), Maybe::Nothing);
    }
}
