use std::rc::Rc;

use leptos::*;

/**
 * Options for a query [`use_query()`](crate::use_query())
 */
pub struct QueryOptions<V> {
    /// Gates the query. While the signal reads `false` no attempt starts, neither on mount,
    /// on argument change, nor on [`refetch`](crate::QueryResult::refetch).
    /// Every time it flips back to `true` the query attempts a fetch.
    /// Disabling never cancels an attempt that is already in flight.
    /// Default is `None`, the query is always enabled.
    pub enabled: Option<Signal<bool>>,
    /// Called with the data of every successful attempt,
    /// after `data` is updated and before `loading` is cleared.
    pub on_success: Option<Rc<dyn Fn(&V)>>,
}

impl<V> QueryOptions<V> {
    /// Gate the query on a reactive boolean, used as is.
    pub fn set_enabled(self, enabled: impl Into<Signal<bool>>) -> Self {
        QueryOptions {
            enabled: Some(enabled.into()),
            ..self
        }
    }

    /// Gate the query on a closure. It is wrapped in a memo, so it is re-evaluated only
    /// when the signals it reads change.
    pub fn enabled_when(self, enabled: impl Fn() -> bool + 'static) -> Self {
        self.set_enabled(create_memo(move |_| enabled()))
    }

    /// Set the success callback.
    pub fn set_on_success(self, on_success: impl Fn(&V) + 'static) -> Self {
        QueryOptions {
            on_success: Some(Rc::new(on_success)),
            ..self
        }
    }

    /// Whether the gate currently allows attempts. Never subscribes the caller.
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
            .map(|enabled| enabled.get_untracked())
            .unwrap_or(true)
    }
}

impl<V> Default for QueryOptions<V> {
    fn default() -> Self {
        Self {
            enabled: None,
            on_success: None,
        }
    }
}

impl<V> Clone for QueryOptions<V> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            on_success: self.on_success.clone(),
        }
    }
}

impl<V> std::fmt::Debug for QueryOptions<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryOptions")
            .field("enabled", &self.enabled.map(|e| e.get_untracked()))
            .field("on_success", &self.on_success.as_ref().map(|_| "..."))
            .finish()
    }
}
