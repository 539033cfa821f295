use leptos::*;

use crate::Instant;

/// The observable record behind a query.
///
/// Every field is its own signal, so consumers only re-run when the field they read changes.
/// Only the query writes to it; callers receive read-only signals through [`QueryResult`](crate::QueryResult).
pub(crate) struct QueryState<V: 'static, E: 'static> {
    /// Result of the last successful attempt. Survives failed attempts.
    pub(crate) data: RwSignal<Option<V>>,
    /// Rejection of the most recent attempt. Cleared when the next attempt starts.
    pub(crate) error: RwSignal<Option<E>>,
    /// True exactly while an attempt is in flight.
    pub(crate) loading: RwSignal<bool>,
    /// True until the first attempt settles, successfully or not.
    pub(crate) is_initial: RwSignal<bool>,
    /// When `data` was last written.
    pub(crate) updated_at: RwSignal<Option<Instant>>,
}

impl<V: 'static, E: 'static> QueryState<V, E> {
    /// A state no attempt has touched yet.
    pub(crate) fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            is_initial: RwSignal::new(true),
            updated_at: RwSignal::new(None),
        }
    }

    /// The lifecycle stage this state is in. Tracks `loading`, `is_initial` and `error`.
    pub(crate) fn status(&self) -> QueryStatus {
        if self.loading.get() {
            QueryStatus::InFlight
        } else if self.is_initial.get() {
            QueryStatus::Idle
        } else if self.error.with(Option::is_some) {
            QueryStatus::Failure
        } else {
            QueryStatus::Success
        }
    }
}

impl<V: 'static, E: 'static> Default for QueryState<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static, E: 'static> Clone for QueryState<V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: 'static, E: 'static> Copy for QueryState<V, E> {}

impl<V: 'static, E: 'static> std::fmt::Debug for QueryState<V, E>
where
    V: std::fmt::Debug + Clone,
    E: std::fmt::Debug + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryState")
            .field("data", &self.data.get_untracked())
            .field("error", &self.error.get_untracked())
            .field("loading", &self.loading.get_untracked())
            .field("is_initial", &self.is_initial.get_untracked())
            .field("updated_at", &self.updated_at.get_untracked())
            .finish()
    }
}

/// The lifecycle of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryStatus {
    /// No attempt has started yet, for example because the query is disabled.
    #[default]
    Idle,
    /// An attempt is in flight.
    ///
    /// Data from a previous attempt may still be present.
    InFlight,
    /// The last attempt resolved. Its value is the current data.
    Success,
    /// The last attempt was rejected.
    ///
    /// Data from an earlier successful attempt is kept.
    Failure,
}

impl QueryStatus {
    /// Whether at least one attempt has settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, QueryStatus::Success | QueryStatus::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle() {
        let _ = create_runtime();

        let state = QueryState::<u32, String>::new();

        assert_eq!(state.data.get_untracked(), None);
        assert_eq!(state.error.get_untracked(), None);
        assert!(!state.loading.get_untracked());
        assert!(state.is_initial.get_untracked());
        assert_eq!(state.updated_at.get_untracked(), None);
        assert_eq!(state.status(), QueryStatus::Idle);
        assert!(!state.status().is_settled());
    }

    #[test]
    fn status_follows_fields() {
        let _ = create_runtime();

        let state = QueryState::<u32, String>::new();

        state.loading.set(true);
        assert_eq!(state.status(), QueryStatus::InFlight);

        state.loading.set(false);
        state.is_initial.set(false);
        state.data.set(Some(1));
        assert_eq!(state.status(), QueryStatus::Success);

        state.error.set(Some("boom".to_string()));
        assert_eq!(state.status(), QueryStatus::Failure);
        assert!(state.status().is_settled());

        // In flight wins over a stale error.
        state.loading.set(true);
        assert_eq!(state.status(), QueryStatus::InFlight);
    }
}
