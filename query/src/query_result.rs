use crate::{Instant, QueryStatus};
use leptos::*;

/// Reactive query result.
#[derive(Clone)]
pub struct QueryResult<V, E, R>
where
    V: 'static,
    E: 'static,
    R: RefetchFn,
{
    /// Value of the last successful fetch. None until the first one succeeds.
    /// A failed fetch leaves it untouched.
    pub data: Signal<Option<V>>,
    /// Rejection of the latest fetch. Cleared as soon as the next fetch starts.
    pub error: Signal<Option<E>>,
    /// True while a fetch is in flight.
    pub loading: Signal<bool>,
    /// True until the first fetch settles.
    pub is_initial: Signal<bool>,
    /// When `data` was last updated.
    pub updated_at: Signal<Option<Instant>>,
    /// The current stage of the query lifecycle.
    pub status: Signal<QueryStatus>,

    /// Refetch the query. Does nothing while a fetch is in flight or the query is disabled.
    pub refetch: R,
}

/// Convenience Trait alias for a Query Result's refetch function.
pub trait RefetchFn: Fn() + Clone {}
impl<R: Fn() + Clone> RefetchFn for R {}
