use std::rc::Rc;

use crate::fetcher::{boxed_fetcher, BoxedFetcher};
use crate::query::Query;
use crate::query_result::QueryResult;
use crate::{use_query_executor, ArgumentSource, QueryFetcher, QueryOptions, RefetchFn};
use leptos::*;

/// Creates a query whose arguments are derived from other reactive values.
/// The fetcher runs once immediately, and again every time the derived arguments change.
///
/// A Query provides:
/// - De-duplication: at most one fetch is in flight, triggers arriving meanwhile are dropped
/// - Refetch on argument change
/// - Gating on a reactive condition
/// - Manual refetching
///
/// The arguments are a single value or a tuple. A tuple is spread over a fetcher that takes
/// one parameter per element, see [`QueryFetcher`].
///
/// Example
/// ```
/// use leptos::*;
/// use leptos_async_query::*;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Status(u16);
///
/// async fn ping(host: String, path: String) -> Result<Status, String> {
///     todo!()
/// }
///
/// fn use_ping(host: Signal<String>) -> QueryResult<Status, String, impl RefetchFn> {
///     use_query(
///         move || (host.get(), "/health".to_string()),
///         ping,
///         QueryOptions::default().enabled_when(move || !host.get().is_empty()),
///     )
/// }
/// ```
pub fn use_query<M, A, V, E>(
    args: impl Fn() -> A + 'static,
    fetcher: impl QueryFetcher<M, A, Output = Result<V, E>>,
    options: QueryOptions<V>,
) -> QueryResult<V, E, impl RefetchFn>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    use_query_with_source(ArgumentSource::derived(args), fetcher, options)
}

/// Creates a query with arguments that never change. The fetcher runs once immediately,
/// and afterwards only on [`refetch`](QueryResult::refetch) or when the query gets enabled.
///
/// ```
/// use leptos::*;
/// use leptos_async_query::*;
///
/// async fn get_repo(owner: String, name: String) -> Result<String, String> {
///     Ok(format!("{owner}/{name}"))
/// }
///
/// fn use_repo() -> QueryResult<String, String, impl RefetchFn> {
///     use_static_query(
///         ("leptos-rs".to_string(), "leptos".to_string()),
///         get_repo,
///         QueryOptions::default(),
///     )
/// }
/// ```
pub fn use_static_query<M, A, V, E>(
    args: A,
    fetcher: impl QueryFetcher<M, A, Output = Result<V, E>>,
    options: QueryOptions<V>,
) -> QueryResult<V, E, impl RefetchFn>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    use_query_with_source(ArgumentSource::fixed(args), fetcher, options)
}

/// Creates a query from an explicit [`ArgumentSource`].
pub fn use_query_with_source<M, A, V, E>(
    args: ArgumentSource<A>,
    fetcher: impl QueryFetcher<M, A, Output = Result<V, E>>,
    options: QueryOptions<V>,
) -> QueryResult<V, E, impl RefetchFn>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    use_boxed_query(args, boxed_fetcher(fetcher), options)
}

pub(crate) fn use_boxed_query<A, V, E>(
    args: ArgumentSource<A>,
    fetcher: BoxedFetcher<A, V, E>,
    options: QueryOptions<V>,
) -> QueryResult<V, E, impl RefetchFn>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    let query = Query::new(args, fetcher, options, use_query_executor());

    register_watchers_handle_cleanup(&query);

    let state = query.state();
    QueryResult {
        data: state.data.into(),
        error: state.error.into(),
        loading: state.loading.into(),
        is_initial: state.is_initial.into(),
        updated_at: state.updated_at.into(),
        status: Signal::derive(move || state.status()),
        refetch: move || query.attempt(),
    }
}

/// Wires gate and argument changes to attempts, and performs the initial attempt.
fn register_watchers_handle_cleanup<A, V, E>(query: &Query<A, V, E>)
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    let mut stop_handles: Vec<Rc<dyn Fn()>> = Vec::new();

    // Gate changes. Turning it off needs no handling, the attempt itself checks the gate.
    if let Some(enabled) = query.options().enabled {
        let query = query.clone();
        let stop = watch(
            move || enabled.get(),
            move |enabled, previous, _| {
                if previous != Some(enabled) {
                    query.attempt()
                }
            },
            false,
        );
        stop_handles.push(Rc::new(stop));
    }

    match query.args() {
        // The immediate run is the initial attempt.
        ArgumentSource::Derived(args) => {
            let args = *args;
            let query = query.clone();
            let stop = watch(move || args.get(), move |_, _, _| query.attempt(), true);
            stop_handles.push(Rc::new(stop));
        }
        ArgumentSource::Fixed(_) => query.attempt(),
    }

    on_cleanup(move || {
        for stop in stop_handles {
            stop();
        }
    });
}
