use crate::{
    aa::LabelType,
    sat::{SatSolver, SatSolverFactory},
};
use anyhow::{Context, Error, Result};
use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::{
    collections::{BTreeSet, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex, MutexGuard, OnceLock, PoisonError,
    },
};

/// The configuration of a concurrent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    n_workers: usize,
}

impl SearchConfig {
    /// Builds a configuration using the given number of workers.
    ///
    /// A number of workers equal to zero is replaced by one.
    pub fn new(n_workers: usize) -> Self {
        Self {
            n_workers: usize::max(1, n_workers),
        }
    }

    /// Returns the number of workers used by the search.
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    pub(crate) fn build_pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.n_workers)
            .thread_name(|i| format!("reducto-worker-{}", i))
            .build()
            .context("while building the worker pool")
    }
}

impl Default for SearchConfig {
    /// One worker less than the available parallelism, and at least one.
    fn default() -> Self {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(available.saturating_sub(1))
    }
}

/// What a search is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchGoal<T>
where
    T: LabelType,
{
    /// Looks for an extension that does not contain the argument.
    Skeptical(T),
    /// Looks for an extension that contains the argument.
    Credulous(T),
    /// Collects all the extensions.
    Enumerate,
}

/// The reason why a search was stopped before its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    /// A decisive witness (or counterexample) was found.
    Decisive,
    /// An error occurred in a task.
    Aborted,
}

/// The result of a completed search.
#[derive(Debug)]
pub(crate) struct SearchOutcome<T>
where
    T: LabelType,
{
    pub(crate) decisive: bool,
    pub(crate) extensions: Vec<Vec<T>>,
}

/// The state shared by all the tasks of a top-level search.
///
/// The first stop reason to be set wins; a later call to [stop](Self::stop) has no effect on it.
pub(crate) struct SearchContext<'a, T>
where
    T: LabelType,
{
    goal: SearchGoal<T>,
    solver_factory: &'a dyn SatSolverFactory,
    cancelled: AtomicBool,
    stop_reason: OnceLock<StopReason>,
    branches: Mutex<HashSet<BTreeSet<T>>>,
    extensions: Mutex<BTreeSet<BTreeSet<T>>>,
    error: Mutex<Option<Error>>,
    n_tasks: AtomicUsize,
}

fn lock<U>(mutex: &Mutex<U>) -> MutexGuard<'_, U> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<'a, T> SearchContext<'a, T>
where
    T: LabelType,
{
    pub(crate) fn new(goal: SearchGoal<T>, solver_factory: &'a dyn SatSolverFactory) -> Self {
        Self {
            goal,
            solver_factory,
            cancelled: AtomicBool::new(false),
            stop_reason: OnceLock::new(),
            branches: Mutex::new(HashSet::new()),
            extensions: Mutex::new(BTreeSet::new()),
            error: Mutex::new(None),
            n_tasks: AtomicUsize::new(0),
        }
    }

    pub(crate) fn goal(&self) -> &SearchGoal<T> {
        &self.goal
    }

    pub(crate) fn new_solver(&self) -> Box<dyn SatSolver> {
        self.solver_factory.new_solver()
    }

    pub(crate) fn solver_factory(&self) -> &dyn SatSolverFactory {
        self.solver_factory
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn stop(&self, reason: StopReason) {
        if self.stop_reason.set(reason).is_ok() {
            debug!("search stopped ({:?})", reason);
        }
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn abort(&self, error: Error) {
        let mut guard = lock(&self.error);
        if guard.is_none() {
            *guard = Some(error);
        }
        drop(guard);
        self.stop(StopReason::Aborted);
    }

    /// Registers a branch; returns `false` if it was already registered.
    pub(crate) fn register_branch(&self, key: BTreeSet<T>) -> bool {
        lock(&self.branches).insert(key)
    }

    pub(crate) fn record_extension(&self, extension: BTreeSet<T>) {
        lock(&self.extensions).insert(extension);
    }

    pub(crate) fn task_started(&self) {
        self.n_tasks.fetch_add(1, Ordering::Relaxed);
    }

    /// Consumes the context after all the tasks are done.
    ///
    /// An error is returned if the search was aborted before any decisive result.
    pub(crate) fn into_outcome(self) -> Result<SearchOutcome<T>> {
        let n_branches = lock(&self.branches).len();
        info!(
            "search ended after {} task(s) and {} registered branch(es)",
            self.n_tasks.load(Ordering::Relaxed),
            n_branches
        );
        let stop_reason = self.stop_reason.get().copied();
        if stop_reason == Some(StopReason::Aborted) {
            let error = self
                .error
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner);
            return Err(error.unwrap_or_else(|| anyhow::anyhow!("the search was aborted")));
        }
        let extensions = self
            .extensions
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_iter()
            .map(|ext| ext.into_iter().collect())
            .collect();
        Ok(SearchOutcome {
            decisive: stop_reason == Some(StopReason::Decisive),
            extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::DefaultSatSolverFactory;
    use anyhow::anyhow;

    #[test]
    fn test_config_min_workers() {
        assert_eq!(1, SearchConfig::new(0).n_workers());
        assert_eq!(3, SearchConfig::new(3).n_workers());
        assert!(SearchConfig::default().n_workers() >= 1);
    }

    #[test]
    fn test_first_stop_reason_wins() {
        let context = SearchContext::<String>::new(SearchGoal::Enumerate, &DefaultSatSolverFactory);
        assert!(!context.is_cancelled());
        context.stop(StopReason::Decisive);
        context.abort(anyhow!("late error"));
        assert!(context.is_cancelled());
        let outcome = context.into_outcome().unwrap();
        assert!(outcome.decisive);
    }

    #[test]
    fn test_abort_returns_first_error() {
        let context = SearchContext::<String>::new(SearchGoal::Enumerate, &DefaultSatSolverFactory);
        context.abort(anyhow!("first"));
        context.abort(anyhow!("second"));
        context.stop(StopReason::Decisive);
        assert_eq!("first", context.into_outcome().unwrap_err().to_string());
    }

    #[test]
    fn test_branch_registration() {
        let context = SearchContext::<&str>::new(SearchGoal::Enumerate, &DefaultSatSolverFactory);
        assert!(context.register_branch(["a", "b"].into_iter().collect()));
        assert!(!context.register_branch(["b", "a"].into_iter().collect()));
        assert!(context.register_branch(["a"].into_iter().collect()));
    }

    #[test]
    fn test_extensions_are_deduplicated() {
        let context = SearchContext::<&str>::new(SearchGoal::Enumerate, &DefaultSatSolverFactory);
        context.record_extension(["b", "a"].into_iter().collect());
        context.record_extension(["a", "b"].into_iter().collect());
        context.record_extension(BTreeSet::new());
        let outcome = context.into_outcome().unwrap();
        assert!(!outcome.decisive);
        assert_eq!(vec![vec![], vec!["a", "b"]], outcome.extensions);
    }
}
