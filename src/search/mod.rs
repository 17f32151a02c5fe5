//! Concurrent searches over the extensions of an AF.
//!
//! A search is made of tasks executed by a bounded pool of workers.
//! A task works on a framework derived from the input one, together with the set of arguments accepted so far;
//! it may spawn new tasks on smaller frameworks.
//! All the tasks of a search share a context,
//! which holds the cancellation flag, the set of already explored branches, the collected extensions and the first error.
//! The search returns when all its tasks are done.

mod preferred_search;
pub(crate) use preferred_search::search_preferred;

mod search_context;
pub use search_context::SearchConfig;
pub(crate) use search_context::SearchContext;
pub(crate) use search_context::SearchGoal;
pub(crate) use search_context::SearchOutcome;
pub(crate) use search_context::StopReason;

mod unchallenged_search;
pub(crate) use unchallenged_search::search_unchallenged;
