use crate::fetcher::{boxed_fetcher, BoxedFetcher};
use crate::use_query::use_boxed_query;
use crate::{ArgumentSource, QueryFetcher, QueryOptions, QueryResult, RefetchFn};

/// Creates a new [`QueryScope`]: a fetcher and its default options, defined once and reused
/// by every component that queries the same kind of data.
///
/// Queries created from the same scope share nothing but the fetcher and options. Each one
/// keeps its own state.
///
/// # Parameters
///
/// * `fetcher`: The async function to use for fetching query data.
/// * `options`: Query options used as the defaults of all queries within this scope.
///
/// # Example
///
/// ```
/// use leptos::*;
/// use leptos_async_query::*;
///
/// // Query for a track.
/// fn track_query() -> QueryScope<TrackId, TrackData, String> {
///     create_query(get_track, QueryOptions::default())
/// }
///
/// #[derive(Debug, Copy, Clone, PartialEq)]
/// struct TrackId(i32);
///
/// #[derive(Debug, Clone)]
/// struct TrackData {
///    name: String,
/// }
///
/// async fn get_track(id: TrackId) -> Result<TrackData, String> {
///     todo!()
/// }
///
/// fn track_view(id: TrackId) -> Signal<Option<String>> {
///     let QueryResult { data, .. } = track_query().use_static_query(id);
///     Signal::derive(move || data.get().map(|track| track.name))
/// }
/// ```
pub fn create_query<M, A, V, E>(
    fetcher: impl QueryFetcher<M, A, Output = Result<V, E>>,
    options: QueryOptions<V>,
) -> QueryScope<A, V, E>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    QueryScope {
        fetcher: boxed_fetcher(fetcher),
        options,
    }
}

/// A reusable query definition for specific argument, value and error types.
pub struct QueryScope<A: 'static, V: 'static, E: 'static> {
    fetcher: BoxedFetcher<A, V, E>,
    options: QueryOptions<V>,
}

impl<A: 'static, V: 'static, E: 'static> Clone for QueryScope<A, V, E> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            options: self.options.clone(),
        }
    }
}

impl<A, V, E> QueryScope<A, V, E>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    /// Creates a query whose arguments are derived from reactive values, see [`use_query`](crate::use_query()).
    pub fn use_query(&self, args: impl Fn() -> A + 'static) -> QueryResult<V, E, impl RefetchFn> {
        self.use_query_with_options(args, self.options.clone())
    }

    /// Creates a query with fixed arguments, see [`use_static_query`](crate::use_static_query()).
    pub fn use_static_query(&self, args: A) -> QueryResult<V, E, impl RefetchFn> {
        use_boxed_query(
            ArgumentSource::fixed(args),
            self.fetcher.clone(),
            self.options.clone(),
        )
    }

    /// Creates a query with options that replace the scope's defaults.
    pub fn use_query_with_options(
        &self,
        args: impl Fn() -> A + 'static,
        options: QueryOptions<V>,
    ) -> QueryResult<V, E, impl RefetchFn> {
        use_boxed_query(ArgumentSource::derived(args), self.fetcher.clone(), options)
    }

    /// Creates a query with options derived from the scope's defaults.
    pub fn use_query_map_options(
        &self,
        args: impl Fn() -> A + 'static,
        options: impl FnOnce(QueryOptions<V>) -> QueryOptions<V>,
    ) -> QueryResult<V, E, impl RefetchFn> {
        self.use_query_with_options(args, options(self.options.clone()))
    }

    /// Retrieves the default options for this scope.
    pub fn get_options(&self) -> &QueryOptions<V> {
        &self.options
    }
}
