//! Tuple-unpacking maps

use futures::future::{join_all, BoxFuture, FutureExt};
use std::future::Future;

/// A function that can be called with its arguments packed in a tuple.
///
/// Implemented for every `Fn` of one to four arguments.
pub trait Spread<Args> {
    type Output;

    fn spread(&self, args: Args) -> Self::Output;
}

macro_rules! impl_spread {
    ($($arg:ident),+) => {
        impl<Func, Out, $($arg),+> Spread<($($arg,)+)> for Func
        where
            Func: Fn($($arg),+) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn spread(&self, ($($arg,)+): ($($arg,)+)) -> Out {
                (self)($($arg),+)
            }
        }
    };
}

impl_spread!(A);
impl_spread!(A, B);
impl_spread!(A, B, C);
impl_spread!(A, B, C, D);

/// Apply `f` to every tuple, spreading the tuple into arguments.
pub fn starmap<Args, O, It, F>(f: F) -> impl Fn(It) -> Vec<O>
where
    It: IntoIterator<Item = Args>,
    F: Spread<Args, Output = O>,
{
    move |items| items.into_iter().map(|args| f.spread(args)).collect()
}

/// Async [`starmap`]: every call is started at once and the results are
/// joined in input order.
pub fn astarmap<Args, O, It, F, Fut>(f: F) -> impl Fn(It) -> BoxFuture<'static, Vec<O>>
where
    It: IntoIterator<Item = Args>,
    F: Spread<Args, Output = Fut>,
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    move |items| {
        let pending: Vec<Fut> = items.into_iter().map(|args| f.spread(args)).collect();
        join_all(pending).boxed()
    }
}
