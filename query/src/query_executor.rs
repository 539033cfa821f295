use std::{cell::Cell, future::Future, rc::Rc};

use futures::task::{LocalFutureObj, LocalSpawn, LocalSpawnExt, SpawnError};
use leptos::*;

thread_local! {
    static SUPPRESS_QUERY_LOAD: Cell<bool> = const { Cell::new(false) };
}

/// Disable or enable query loading.
///
/// While suppressed, queries never start an attempt. Their state is left untouched.
///
/// Useful for disabling query loads during App introspection, such as SSR Router integrations for Actix/Axum.
///
/// Example for `generate_route_list`
/// ```ignore
/// use leptos::*;
/// use leptos_async_query::*;
///
/// fn make_routes()  {
///     // Disable query loading.
///     leptos_async_query::suppress_query_load(true);
///     // Introspect App Routes.
///     leptos_axum::generate_route_list(App);
///     // Enable query loading.
///     leptos_async_query::suppress_query_load(false);
/// }
/// ```
pub fn suppress_query_load(suppress: bool) {
    SUPPRESS_QUERY_LOAD.with(|w| w.set(suppress));
}

pub(crate) fn query_is_suppressed() -> bool {
    SUPPRESS_QUERY_LOAD.with(|w| w.get())
}

/// Runs the asynchronous part of query attempts.
///
/// Wraps any single-threaded [`LocalSpawn`]er, such as a [`LocalPool`](futures::executor::LocalPool) spawner.
/// Without one in context, queries spawn onto [`leptos::spawn_local`].
#[derive(Clone)]
pub struct QueryExecutor(Rc<dyn LocalSpawn>);

impl QueryExecutor {
    /// Executor backed by the given spawner.
    pub fn new(spawner: impl LocalSpawn + 'static) -> Self {
        QueryExecutor(Rc::new(spawner))
    }

    /// Executor backed by [`leptos::spawn_local`].
    pub fn leptos() -> Self {
        QueryExecutor::new(LeptosSpawner)
    }

    pub(crate) fn spawn(&self, fut: impl Future<Output = ()> + 'static) -> Result<(), SpawnError> {
        self.0.spawn_local(fut)
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("QueryExecutor").field(&"...").finish()
    }
}

/// Provides a [`QueryExecutor`] for all queries created under the current owner.
///
/// ```
/// use futures::executor::LocalPool;
/// use leptos::*;
/// use leptos_async_query::*;
///
/// let _ = create_runtime();
/// let mut pool = LocalPool::new();
/// provide_query_executor(pool.spawner());
///
/// let query = use_static_query(
///     "https://github.com".to_string(),
///     |url: String| async move { Ok::<_, String>(url.len()) },
///     QueryOptions::default(),
/// );
/// assert!(query.loading.get_untracked());
///
/// pool.run_until_stalled();
/// assert_eq!(query.data.get_untracked(), Some(18));
/// ```
pub fn provide_query_executor(spawner: impl LocalSpawn + 'static) {
    provide_context(QueryExecutor::new(spawner))
}

/// Retrieves the provided [`QueryExecutor`], falling back to [`QueryExecutor::leptos`].
pub fn use_query_executor() -> QueryExecutor {
    use_context::<QueryExecutor>().unwrap_or_else(QueryExecutor::leptos)
}

#[derive(Debug, Clone, Copy)]
struct LeptosSpawner;

impl LocalSpawn for LeptosSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        cfg_if::cfg_if! {
            if #[cfg(not(any(feature = "hydrate", feature = "csr", feature = "ssr")))] {
                logging::debug_warn!("You are missing a Cargo feature for leptos_async_query. Please enable one of 'ssr', 'hydrate', or 'csr'.");
            }
        }
        leptos::spawn_local(future);
        Ok(())
    }
}
