use leptos::*;

/// Where a query reads the arguments for its fetcher from.
///
/// A query either calls its fetcher with the same arguments every time, or with arguments derived
/// from other reactive values, in which case the query refetches whenever they change.
pub enum ArgumentSource<A: 'static> {
    /// Arguments captured once, at construction.
    Fixed(A),
    /// Arguments recomputed whenever their reactive dependencies change.
    Derived(Memo<A>),
}

impl<A> ArgumentSource<A>
where
    A: crate::QueryArgs,
{
    /// Arguments that never change.
    pub fn fixed(args: A) -> Self {
        ArgumentSource::Fixed(args)
    }

    /// Arguments derived from reactive values.
    ///
    /// Changes are detected with [`PartialEq`], so recomputing an equal value does not count as a change.
    pub fn derived(derive: impl Fn() -> A + 'static) -> Self {
        ArgumentSource::Derived(create_memo(move |_| derive()))
    }

    /// The current arguments. Never subscribes the caller to changes.
    pub fn current(&self) -> A {
        match self {
            ArgumentSource::Fixed(args) => args.clone(),
            ArgumentSource::Derived(memo) => memo.get_untracked(),
        }
    }

    /// Whether the arguments can change over the lifetime of the query.
    pub fn is_reactive(&self) -> bool {
        matches!(self, ArgumentSource::Derived(_))
    }
}

impl<A: Clone + 'static> Clone for ArgumentSource<A> {
    fn clone(&self) -> Self {
        match self {
            ArgumentSource::Fixed(args) => ArgumentSource::Fixed(args.clone()),
            ArgumentSource::Derived(memo) => ArgumentSource::Derived(*memo),
        }
    }
}

impl<A: 'static> From<Memo<A>> for ArgumentSource<A> {
    fn from(memo: Memo<A>) -> Self {
        ArgumentSource::Derived(memo)
    }
}

impl<A: std::fmt::Debug + 'static> std::fmt::Debug for ArgumentSource<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(args) => f.debug_tuple("Fixed").field(args).finish(),
            Self::Derived(_) => f.debug_tuple("Derived").field(&"..").finish(),
        }
    }
}
