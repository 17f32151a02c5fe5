use super::{SearchConfig, SearchContext, SearchGoal, SearchOutcome, StopReason};
use crate::{
    aa::{AAFramework, LabelType},
    sat::SatSolverFactory,
    solvers::{compute_initial_sets, retain_unchallenged},
    utils,
};
use anyhow::{Context, Result};
use log::debug;
use rayon::Scope;

/// Runs a search over the unchallenged extensions of an AF.
///
/// The candidates of a framework are its initial sets with no attack relation with another initial set.
/// Each candidate is added to the accepted arguments and a new task is run on the reduct.
/// A framework without candidate closes its branch.
pub(crate) fn search_unchallenged<T>(
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
    let root = UnchallengedTask {
        af: af.clone(),
        base: vec![],
    };
    pool.scope(|s| spawn_task(s, &context, root));
    context.into_outcome()
}

struct UnchallengedTask<T>
where
    T: LabelType,
{
    af: AAFramework<T>,
    base: Vec<T>,
}

fn spawn_task<'s, T>(
    scope: &Scope<'s>,
    context: &'s SearchContext<'s, T>,
    task: UnchallengedTask<T>,
) where
    T: LabelType + 's,
{
    scope.spawn(move |s| {
        context.task_started();
        if let Err(e) = run_task(s, context, task) {
            context.abort(e);
        }
    })
}

fn run_task<'s, T>(
    scope: &Scope<'s>,
    context: &'s SearchContext<'s, T>,
    task: UnchallengedTask<T>,
) -> Result<()>
where
    T: LabelType + 's,
{
    if context.is_cancelled() {
        return Ok(());
    }
    let query_id = match context.goal() {
        SearchGoal::Skeptical(q) | SearchGoal::Credulous(q) => Some(
            task.af
                .argument_set()
                .get_argument_index(q)
                .context("the query argument was removed from a derived framework")?,
        ),
        SearchGoal::Enumerate => None,
    };
    if let (SearchGoal::Skeptical(_), Some(q)) = (context.goal(), query_id) {
        if task.af.is_self_attacking(q) {
            debug!("the query argument attacks itself");
            context.stop(StopReason::Decisive);
            return Ok(());
        }
    }
    let is_interrupted = || context.is_cancelled();
    let initial_sets =
        match compute_initial_sets(&task.af, context.solver_factory(), &is_interrupted)? {
            Some(sets) => sets,
            None => return Ok(()),
        };
    let candidates = retain_unchallenged(&task.af, initial_sets);
    if candidates.is_empty() {
        match context.goal() {
            SearchGoal::Skeptical(_) => {
                debug!("found an unchallenged extension without the query argument");
                context.stop(StopReason::Decisive);
            }
            SearchGoal::Credulous(_) => {}
            SearchGoal::Enumerate => context.record_extension(task.base.into_iter().collect()),
        }
        return Ok(());
    }
    for candidate in candidates {
        if let Some(q) = query_id {
            let contains_query = candidate.contains(&q);
            let attacks_query = task.af.is_attacked_by_set(q, &candidate);
            match context.goal() {
                SearchGoal::Skeptical(_) if contains_query => continue,
                SearchGoal::Skeptical(_) if attacks_query => {
                    debug!("an unchallenged candidate attacks the query argument");
                    context.stop(StopReason::Decisive);
                    return Ok(());
                }
                SearchGoal::Credulous(_) if contains_query => {
                    debug!("an unchallenged candidate contains the query argument");
                    context.stop(StopReason::Decisive);
                    return Ok(());
                }
                SearchGoal::Credulous(_) if attacks_query => continue,
                _ => {}
            }
        }
        let mut child_base = task.base.clone();
        child_base.append(&mut task.af.argument_set().labels_of(&candidate));
        if !context.register_branch(child_base.iter().cloned().collect()) {
            continue;
        }
        let child_af = utils::reduct(&task.af, &candidate)?;
        spawn_task(
            scope,
            context,
            UnchallengedTask {
                af: child_af,
                base: child_base,
            },
        );
    }
    Ok(())
}
