use std::rc::Rc;

use leptos::*;

use crate::{
    fetcher::BoxedFetcher, query_executor::query_is_suppressed, query_state::QueryState,
    ArgumentSource, Instant, QueryExecutor, QueryOptions,
};

/// One query instance: its arguments, its fetcher and the state its attempts write to.
///
/// At most one attempt is in flight at any time. Triggers that arrive while one is in flight
/// are dropped, not queued.
pub(crate) struct Query<A: 'static, V: 'static, E: 'static> {
    inner: Rc<QueryInner<A, V, E>>,
}

struct QueryInner<A: 'static, V: 'static, E: 'static> {
    args: ArgumentSource<A>,
    fetcher: BoxedFetcher<A, V, E>,
    options: QueryOptions<V>,
    executor: QueryExecutor,
    state: QueryState<V, E>,
}

impl<A: 'static, V: 'static, E: 'static> Clone for Query<A, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, V, E> Query<A, V, E>
where
    A: crate::QueryArgs,
    V: crate::QueryValue,
    E: crate::QueryError,
{
    pub(crate) fn new(
        args: ArgumentSource<A>,
        fetcher: BoxedFetcher<A, V, E>,
        options: QueryOptions<V>,
        executor: QueryExecutor,
    ) -> Self {
        Query {
            inner: Rc::new(QueryInner {
                args,
                fetcher,
                options,
                executor,
                state: QueryState::new(),
            }),
        }
    }

    pub(crate) fn state(&self) -> QueryState<V, E> {
        self.inner.state
    }

    pub(crate) fn args(&self) -> &ArgumentSource<A> {
        &self.inner.args
    }

    pub(crate) fn options(&self) -> &QueryOptions<V> {
        &self.inner.options
    }

    /// Starts an attempt, unless one is already in flight or the query is disabled.
    /// Blocked attempts are silent: no state changes, the fetcher is not called.
    pub(crate) fn attempt(&self) {
        let state = self.inner.state;

        if state.loading.get_untracked() {
            return;
        }
        if !self.inner.options.is_enabled() || query_is_suppressed() {
            return;
        }

        // Claim the in-flight slot before any other write can re-enter.
        state.loading.set(true);
        state.error.set(None);

        let fetch = (self.inner.fetcher)(self.inner.args.current());
        let on_success = self.inner.options.on_success.clone();

        let spawned = self.inner.executor.spawn(async move {
            match fetch.await {
                Ok(data) => {
                    state.data.set(Some(data.clone()));
                    state.updated_at.set(Some(Instant::now()));
                    if let Some(on_success) = on_success {
                        on_success(&data);
                    }
                }
                Err(error) => {
                    logging::debug_warn!("Query fetch failed: {:?}", error);
                    state.error.set(Some(error));
                }
            }
            state.is_initial.set(false);
            state.loading.set(false);
        });

        // Nothing settles if the attempt never runs, so release the slot.
        if let Err(error) = spawned {
            logging::error!("Failed to spawn query attempt: {}", error);
            state.loading.set(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::LocalPool;
    use futures_channel::oneshot;

    use super::*;
    use crate::fetcher::boxed_fetcher;

    /// Fetcher whose attempts resolve only when the test says so.
    struct Pending {
        calls: Rc<RefCell<Vec<String>>>,
        senders: Rc<RefCell<Vec<oneshot::Sender<Result<u32, String>>>>>,
    }

    impl Pending {
        fn new() -> Self {
            Pending {
                calls: Rc::new(RefCell::new(Vec::new())),
                senders: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn fetcher(&self) -> BoxedFetcher<String, u32, String> {
            let calls = self.calls.clone();
            let senders = self.senders.clone();
            boxed_fetcher(move |url: String| {
                calls.borrow_mut().push(url);
                let (sender, receiver) = oneshot::channel();
                senders.borrow_mut().push(sender);
                async move {
                    receiver
                        .await
                        .unwrap_or_else(|_| Err("dropped".to_string()))
                }
            })
        }

        fn calls(&self) -> usize {
            self.calls.borrow().len()
        }

        fn resolve(&self, result: Result<u32, String>) {
            let sender = self.senders.borrow_mut().remove(0);
            sender.send(result).unwrap();
        }
    }

    fn fixed_query(
        pending: &Pending,
        options: QueryOptions<u32>,
        pool: &LocalPool,
    ) -> Query<String, u32, String> {
        Query::new(
            ArgumentSource::fixed("https://github.com".to_string()),
            pending.fetcher(),
            options,
            QueryExecutor::new(pool.spawner()),
        )
    }

    #[test]
    fn attempt_goes_in_flight_synchronously() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);

        query.attempt();

        let state = query.state();
        assert!(state.loading.get_untracked());
        assert!(state.is_initial.get_untracked());
        assert_eq!(pending.calls(), 1);

        pool.run_until_stalled();
        assert!(state.loading.get_untracked(), "Fetch has not resolved yet");

        pending.resolve(Ok(200));
        pool.run_until_stalled();

        assert_eq!(state.data.get_untracked(), Some(200));
        assert_eq!(state.error.get_untracked(), None);
        assert!(!state.loading.get_untracked());
        assert!(!state.is_initial.get_untracked());
        assert!(state.updated_at.get_untracked().is_some());
    }

    #[test]
    fn attempts_in_flight_are_deduplicated() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);

        query.attempt();
        query.attempt();
        query.attempt();
        assert_eq!(pending.calls(), 1);

        pending.resolve(Ok(1));
        pool.run_until_stalled();

        query.attempt();
        assert_eq!(pending.calls(), 2);
    }

    #[test]
    fn failure_keeps_previous_data() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);
        let state = query.state();

        query.attempt();
        pending.resolve(Ok(200));
        pool.run_until_stalled();
        let updated_at = state.updated_at.get_untracked();

        query.attempt();
        pending.resolve(Err("timeout".to_string()));
        pool.run_until_stalled();

        assert_eq!(state.data.get_untracked(), Some(200));
        assert_eq!(state.error.get_untracked(), Some("timeout".to_string()));
        assert_eq!(state.updated_at.get_untracked(), updated_at);
        assert!(!state.loading.get_untracked());
        assert!(!state.is_initial.get_untracked());
    }

    #[test]
    fn failed_first_attempt_is_no_longer_initial() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);
        let state = query.state();

        query.attempt();
        pending.resolve(Err("E".to_string()));
        pool.run_until_stalled();

        assert_eq!(state.data.get_untracked(), None);
        assert_eq!(state.error.get_untracked(), Some("E".to_string()));
        assert!(!state.is_initial.get_untracked());
    }

    #[test]
    fn new_attempt_clears_error() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);
        let state = query.state();

        query.attempt();
        pending.resolve(Err("E".to_string()));
        pool.run_until_stalled();
        assert!(state.error.get_untracked().is_some());

        query.attempt();
        assert_eq!(state.error.get_untracked(), None);
        assert!(state.loading.get_untracked());
        assert_eq!(pending.calls(), 2);
    }

    #[test]
    fn disabled_query_does_not_fetch() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let enabled = RwSignal::new(false);
        let query = fixed_query(
            &pending,
            QueryOptions::default().set_enabled(enabled),
            &pool,
        );

        query.attempt();
        pool.run_until_stalled();

        assert_eq!(pending.calls(), 0);
        assert!(!query.state().loading.get_untracked());
        assert!(query.state().is_initial.get_untracked());

        enabled.set(true);
        query.attempt();
        assert_eq!(pending.calls(), 1);
    }

    #[test]
    fn success_callback_sees_data() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let loading_during_callback = Rc::new(Cell::new(false));
        let state_slot = Rc::new(RefCell::new(None::<QueryState<u32, String>>));
        let options = QueryOptions::default().set_on_success({
            let seen = seen.clone();
            let loading_during_callback = loading_during_callback.clone();
            let state_slot = state_slot.clone();
            move |data: &u32| {
                seen.borrow_mut().push(*data);
                if let Some(state) = *state_slot.borrow() {
                    loading_during_callback.set(state.loading.get_untracked());
                }
            }
        });
        let query = fixed_query(&pending, options, &pool);
        *state_slot.borrow_mut() = Some(query.state());

        query.attempt();
        pending.resolve(Err("E".to_string()));
        pool.run_until_stalled();
        assert!(seen.borrow().is_empty(), "Failures do not call on_success");

        query.attempt();
        pending.resolve(Ok(7));
        pool.run_until_stalled();

        assert_eq!(*seen.borrow(), vec![7]);
        assert!(loading_during_callback.get());
    }

    #[test]
    fn suppressed_query_does_not_fetch() {
        let _ = create_runtime();
        let mut pool = LocalPool::new();
        let pending = Pending::new();
        let query = fixed_query(&pending, QueryOptions::default(), &pool);

        crate::suppress_query_load(true);
        query.attempt();
        crate::suppress_query_load(false);
        pool.run_until_stalled();

        assert_eq!(pending.calls(), 0);
        assert!(query.state().is_initial.get_untracked());
    }

    #[test]
    fn spawn_failure_releases_the_slot() {
        let _ = create_runtime();
        let pending = Pending::new();
        let spawner = LocalPool::new().spawner();
        let query = Query::new(
            ArgumentSource::fixed("https://github.com".to_string()),
            pending.fetcher(),
            QueryOptions::default(),
            QueryExecutor::new(spawner),
        );

        query.attempt();

        let state = query.state();
        assert!(!state.loading.get_untracked());
        assert!(state.is_initial.get_untracked());
        assert_eq!(state.error.get_untracked(), None);
    }
}
