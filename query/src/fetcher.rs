use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture};

/// An async function that can fetch data for a query.
///
/// The marker `M` selects how the resolved arguments are handed to the function:
/// - [`Single`]: `Fn(A)`, the arguments are passed as one value.
/// - [`Spread`]: `Fn(A1, .., An)` for `A = (A1, .., An)`, the tuple is spread positionally.
///
/// The marker is inferred from the arity of the function, so callers never name it.
///
/// ```
/// use leptos_async_query::*;
///
/// async fn get_repo(owner: String, name: String) -> Result<String, String> {
///     Ok(format!("{owner}/{name}"))
/// }
///
/// fn fetch<M>(fetcher: impl QueryFetcher<M, (String, String)>) {}
///
/// // Invoked as `get_repo(owner, name)`, not `get_repo((owner, name))`.
/// fetch(get_repo);
/// ```
pub trait QueryFetcher<M, A>: 'static {
    /// Value the fetch resolves to.
    type Output;
    /// The pending fetch.
    type Future: Future<Output = Self::Output> + 'static;

    /// Invokes the function with the resolved arguments.
    fn fetch(&self, args: A) -> Self::Future;
}

/// Marker for fetchers that take the arguments as a single value.
#[derive(Debug, Clone, Copy)]
pub enum Single {}

/// Marker for fetchers that take a tuple of arguments positionally.
#[derive(Debug, Clone, Copy)]
pub enum Spread {}

impl<F, Fu, A> QueryFetcher<Single, A> for F
where
    F: Fn(A) -> Fu + 'static,
    Fu: Future + 'static,
{
    type Output = Fu::Output;
    type Future = Fu;

    fn fetch(&self, args: A) -> Self::Future {
        self(args)
    }
}

macro_rules! impl_spread_fetcher {
    ($($arg:ident),*) => {
        impl<F, Fu, $($arg,)*> QueryFetcher<Spread, ($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> Fu + 'static,
            Fu: Future + 'static,
        {
            type Output = Fu::Output;
            type Future = Fu;

            #[allow(non_snake_case)]
            fn fetch(&self, args: ($($arg,)*)) -> Self::Future {
                let ($($arg,)*) = args;
                self($($arg),*)
            }
        }
    };
}

impl_spread_fetcher!();
impl_spread_fetcher!(A1);
impl_spread_fetcher!(A1, A2);
impl_spread_fetcher!(A1, A2, A3);
impl_spread_fetcher!(A1, A2, A3, A4);
impl_spread_fetcher!(A1, A2, A3, A4, A5);
impl_spread_fetcher!(A1, A2, A3, A4, A5, A6);

/// Type erased fetcher shared between a query and its scope.
pub(crate) type BoxedFetcher<A, V, E> =
    std::rc::Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<V, E>>>;

pub(crate) fn boxed_fetcher<M, A, V, E>(
    fetcher: impl QueryFetcher<M, A, Output = Result<V, E>>,
) -> BoxedFetcher<A, V, E>
where
    A: 'static,
    V: 'static,
    E: 'static,
{
    std::rc::Rc::new(move |args| fetcher.fetch(args).boxed_local())
}
