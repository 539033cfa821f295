#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About Async Query
//!
//! Leptos Async Query is a reactive primitive for running async fetches in [Leptos](https://github.com/leptos-rs/leptos).
//!
//! Give it the arguments for a fetch (fixed, or derived from signals) and an async function, and it
//! keeps a set of signals up to date with the outcome:
//! - `data`: the last successful result, kept while a later fetch fails
//! - `loading`: whether a fetch is in flight
//! - `error`: the rejection of the latest fetch
//! - `is_initial`: whether no fetch has settled yet
//!
//! A Query provides:
//! - refetching whenever the derived arguments change
//! - gating on a reactive condition
//! - de-duplication: at most one fetch in flight, triggers arriving meanwhile are dropped
//! - manual refetching
//!
//! There is no cache shared between queries, no cancellation and no retries.
//!
//! ## The main entry points to using Queries are:
//! - [`use_query`](crate::use_query::use_query()) - Query with arguments derived from reactive values.
//! - [`use_static_query`](crate::use_query::use_static_query()) - Query with fixed arguments.
//! - [`create_query`](crate::create_query::create_query()) - Creates a [`QueryScope`] to reuse a fetcher and its options.
//!
//! # Feature Flags
//! - `csr` Client-side rendering: Use queries on the client.
//! - `ssr` Server-side rendering: Initiate queries on the server.
//! - `hydrate` Hydration: Use queries on the client, when using server-side rendering.
//!
//! # A Simple Example
//!
//! ```rust
//! use leptos::*;
//! use leptos_async_query::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Response {
//!     status: u16,
//! }
//!
//! // Query fetcher.
//! async fn get_status(host: String) -> Result<Response, String> {
//!     todo!()
//! }
//!
//! fn use_status(host: RwSignal<String>) -> QueryResult<Response, String, impl RefetchFn> {
//!     // Fetches once now, and again every time `host` changes.
//!     use_query(move || host.get(), get_status, QueryOptions::default())
//! }
//! ```
//!
//! Fetchers taking several parameters receive the arguments spread from a tuple.
//!
//! ```rust
//! use leptos::*;
//! use leptos_async_query::*;
//!
//! async fn search(path: String, query: String) -> Result<Vec<String>, String> {
//!     todo!()
//! }
//!
//! fn use_search(
//!     query: RwSignal<String>,
//!     logged_in: Signal<bool>,
//! ) -> QueryResult<Vec<String>, String, impl RefetchFn> {
//!     use_query(
//!         move || ("/search".to_string(), query.get()),
//!         search,
//!         QueryOptions::default()
//!             .set_enabled(logged_in)
//!             .set_on_success(|results: &Vec<String>| logging::log!("{} results", results.len())),
//!     )
//! }
//! ```
//!

mod argument_source;
mod create_query;
mod fetcher;
mod instant;
mod query;
mod query_executor;
mod query_options;
mod query_result;
mod query_state;
mod use_query;

pub use argument_source::*;
pub use create_query::*;
pub use fetcher::{QueryFetcher, Single, Spread};
pub use instant::*;
pub use query_executor::*;
pub use query_options::*;
pub use query_result::*;
pub use query_state::QueryStatus;
pub use use_query::*;

/// Convenience trait for query argument requirements.
pub trait QueryArgs: Clone + PartialEq + 'static {}
impl<A> QueryArgs for A where A: Clone + PartialEq + 'static {}

/// Convenience trait for query value requirements.
pub trait QueryValue: std::fmt::Debug + Clone + 'static {}
impl<V> QueryValue for V where V: std::fmt::Debug + Clone + 'static {}

/// Convenience trait for query error requirements.
pub trait QueryError: std::fmt::Debug + Clone + 'static {}
impl<E> QueryError for E where E: std::fmt::Debug + Clone + 'static {}
