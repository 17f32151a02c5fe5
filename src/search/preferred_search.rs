use super::{SearchConfig, SearchContext, SearchGoal, SearchOutcome, StopReason};
use crate::{
    aa::{AAFramework, LabelType},
    sat::SatSolverFactory,
    solvers::{EnumerationStep, InitialSetEnumerator},
    utils::{self, GroundedStatus},
};
use anyhow::{anyhow, Context, Result};
use log::debug;
use rayon::Scope;
use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

/// Runs a search over the preferred extensions of an AF.
///
/// Each task reduces its framework by the grounded extension, splits the result into strongly connected components,
/// and runs one subtask per component with more than one argument.
/// A subtask enumerates the initial sets of its component; each new initial set leads to a new task on the reduct.
/// A framework whose components have no initial set closes its branch: the accepted arguments form a preferred extension.
pub(crate) fn search_preferred<T>(
    af: &AAFramework<T>,
    goal: SearchGoal<T>,
    solver_factory: &dyn SatSolverFactory,
    config: &SearchConfig,
) -> Result<SearchOutcome<T>>
where
    T: LabelType,
{
    let pool = config.build_pool()?;
    let context = SearchContext::new(goal, solver_factory);
    let root = PreferredTask {
        af: af.clone(),
        base: vec![],
    };
    pool.scope(|s| spawn_task(s, &context, root));
    context.into_outcome()
}

struct PreferredTask<T>
where
    T: LabelType,
{
    af: AAFramework<T>,
    base: Vec<T>,
}

struct SccTask<T>
where
    T: LabelType,
{
    af: Arc<AAFramework<T>>,
    base: Arc<Vec<T>>,
    scc: Vec<usize>,
    siblings: Arc<SccSiblings>,
}

/// Tracks the subtasks launched for the components of a same framework.
struct SccSiblings {
    remaining: AtomicUsize,
    found_any: AtomicBool,
}

impl SccSiblings {
    fn new(n: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(n),
            found_any: AtomicBool::new(false),
        }
    }

    /// Returns `true` iff the caller is the last sibling to end and no sibling found an initial set.
    fn end_and_check_none_found(&self) -> bool {
        self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 && !self.found_any.load(Ordering::Acquire)
    }
}

fn spawn_task<'s, T>(scope: &Scope<'s>, context: &'s SearchContext<'s, T>, task: PreferredTask<T>)
where
    T: LabelType + 's,
{
    scope.spawn(move |s| {
        context.task_started();
        if let Err(e) = run_task(s, context, task) {
            context.abort(e);
        }
    })
}

fn spawn_scc_task<'s, T>(scope: &Scope<'s>, context: &'s SearchContext<'s, T>, task: SccTask<T>)
where
    T: LabelType + 's,
{
    scope.spawn(move |s| {
        context.task_started();
        if let Err(e) = run_scc_task(s, context, task) {
            context.abort(e);
        }
    })
}

fn query_index<T>(af: &AAFramework<T>, query: &T) -> Result<usize>
where
    T: LabelType,
{
    af.argument_set()
        .get_argument_index(query)
        .context("the query argument was removed from a derived framework")
}

fn close_branch<T>(context: &SearchContext<T>, extension: BTreeSet<T>)
where
    T: LabelType,
{
    match context.goal() {
        SearchGoal::Skeptical(_) => {
            debug!("found a preferred extension without the query argument");
            context.stop(StopReason::Decisive)
        }
        SearchGoal::Credulous(_) => {}
        SearchGoal::Enumerate => context.record_extension(extension),
    }
}

fn run_task<'s, T>(
    scope: &Scope<'s>,
    context: &'s SearchContext<'s, T>,
    task: PreferredTask<T>,
) -> Result<()>
where
    T: LabelType + 's,
{
    if context.is_cancelled() {
        return Ok(());
    }
    let grounded = match context.goal() {
        SearchGoal::Skeptical(query) => {
            let query_id = query_index(&task.af, query)?;
            if task.af.is_self_attacking(query_id) {
                debug!("the query argument attacks itself");
                context.stop(StopReason::Decisive);
                return Ok(());
            }
            match utils::grounded_status_of(&task.af, query_id) {
                GroundedStatus::Accepted => return Ok(()),
                GroundedStatus::Rejected => {
                    debug!("the query argument is rejected by the grounded extension");
                    context.stop(StopReason::Decisive);
                    return Ok(());
                }
                GroundedStatus::Undecided(grounded) => grounded,
            }
        }
        SearchGoal::Credulous(_) => {
            return Err(anyhow!(
                "credulous acceptance is not handled by the preferred search"
            ))
        }
        SearchGoal::Enumerate => utils::grounded_extension(&task.af),
    };
    let reduced = utils::reduct(&task.af, &grounded)?;
    let mut base = task.base;
    base.append(&mut task.af.argument_set().labels_of(&grounded));
    let sccs = utils::strongly_connected_components(&reduced)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect::<Vec<Vec<usize>>>();
    if sccs.is_empty() {
        close_branch(context, base.into_iter().collect());
        return Ok(());
    }
    let reduced = Arc::new(reduced);
    let base = Arc::new(base);
    let siblings = Arc::new(SccSiblings::new(sccs.len()));
    for scc in sccs {
        spawn_scc_task(
            scope,
            context,
            SccTask {
                af: Arc::clone(&reduced),
                base: Arc::clone(&base),
                scc,
                siblings: Arc::clone(&siblings),
            },
        );
    }
    Ok(())
}

fn run_scc_task<'s, T>(
    scope: &Scope<'s>,
    context: &'s SearchContext<'s, T>,
    task: SccTask<T>,
) -> Result<()>
where
    T: LabelType + 's,
{
    if context.is_cancelled() {
        return Ok(());
    }
    let query_id = match context.goal() {
        SearchGoal::Skeptical(query) => Some(query_index(&task.af, query)?),
        _ => None,
    };
    let mut enumerator =
        InitialSetEnumerator::new_restricted(&task.af, context.new_solver(), &task.scc);
    let is_interrupted = || context.is_cancelled();
    loop {
        let initial_set = match enumerator.next_initial_set(&is_interrupted)? {
            EnumerationStep::Found(ext) => ext,
            EnumerationStep::Exhausted => break,
            EnumerationStep::Interrupted => return Ok(()),
        };
        task.siblings.found_any.store(true, Ordering::Release);
        if let Some(q) = query_id {
            if initial_set.contains(&q) {
                continue;
            }
            if task.af.is_attacked_by_set(q, &initial_set) {
                debug!("an initial set attacks the query argument");
                context.stop(StopReason::Decisive);
                return Ok(());
            }
        }
        let initial_set_labels = task.af.argument_set().labels_of(&initial_set);
        let mut child_base = (*task.base).clone();
        child_base.extend_from_slice(&initial_set_labels);
        if !context.register_branch(child_base.iter().cloned().collect()) {
            continue;
        }
        debug!(
            "new branch with {} accepted argument(s)",
            child_base.len()
        );
        let child_af = utils::reduct(&task.af, &initial_set)?;
        spawn_task(
            scope,
            context,
            PreferredTask {
                af: child_af,
                base: child_base,
            },
        );
    }
    if task.siblings.end_and_check_none_found() {
        close_branch(context, task.base.iter().cloned().collect());
    }
    Ok(())
}
