use super::{
    retain_unchallenged,
    utils::{all_initial_sets, labels_to_init_af_extension},
    CredulousAcceptanceComputer, ExtensionEnumerator, SingleExtensionComputer,
    SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    sat::{DefaultSatSolverFactory, SatSolverFactory},
    search::{self, SearchConfig, SearchGoal},
    utils,
};
use anyhow::Result;
use log::debug;

/// A SAT-based solver for the unchallenged semantics.
///
/// An initial set is unchallenged when it has no attack relation with another initial set.
/// The unchallenged extensions are built by accepting an unchallenged initial set,
/// computing the reduct of the framework by this set, and repeating this process until no unchallenged initial set remains.
///
/// All the problems except the computation of a single extension rely on a concurrent search over these choices.
pub struct UnchallengedSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver_factory: Box<dyn SatSolverFactory>,
    search_config: SearchConfig,
}

impl<'a, T> UnchallengedSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new SAT based solver for the unchallenged semantics.
    ///
    /// The underlying SAT solvers are returned by [DefaultSatSolverFactory].
    pub fn new(af: &'a AAFramework<T>) -> Self {
        Self::new_with_sat_solver_factory(af, Box::new(DefaultSatSolverFactory))
    }

    /// Builds a new SAT based solver for the unchallenged semantics.
    ///
    /// The SAT solvers to use are given through the solver factory.
    pub fn new_with_sat_solver_factory(
        af: &'a AAFramework<T>,
        solver_factory: Box<dyn SatSolverFactory>,
    ) -> Self {
        Self {
            af,
            solver_factory,
            search_config: SearchConfig::default(),
        }
    }

    /// Sets the configuration used by the concurrent searches.
    pub fn set_search_config(&mut self, search_config: SearchConfig) {
        self.search_config = search_config;
    }

    fn search(&self, goal: SearchGoal<T>) -> Result<search::SearchOutcome<T>> {
        search::search_unchallenged(
            self.af,
            goal,
            self.solver_factory.as_ref(),
            &self.search_config,
        )
    }
}

impl<T> SingleExtensionComputer<T> for UnchallengedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        let mut current = self.af.clone();
        let mut accepted = vec![];
        loop {
            let initial_sets = all_initial_sets(&current, self.solver_factory.as_ref())?;
            let candidate = match retain_unchallenged(&current, initial_sets).into_iter().next() {
                Some(c) => c,
                None => break,
            };
            debug!("accepting an unchallenged initial set of size {}", candidate.len());
            accepted.append(&mut current.argument_set().labels_of(&candidate));
            current = utils::reduct(&current, &candidate)?;
        }
        labels_to_init_af_extension(&accepted, self.af).map(Some)
    }
}

impl<T> CredulousAcceptanceComputer<T> for UnchallengedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        let outcome = self.search(SearchGoal::Credulous(arg.label().clone()))?;
        Ok(outcome.decisive)
    }
}

impl<T> SkepticalAcceptanceComputer<T> for UnchallengedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        let outcome = self.search(SearchGoal::Skeptical(arg.label().clone()))?;
        Ok(!outcome.decisive)
    }
}

impl<T> ExtensionEnumerator<T> for UnchallengedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn enumerate_extensions(&mut self) -> Result<Vec<Vec<&Argument<T>>>> {
        let af = self.af;
        self.search(SearchGoal::Enumerate)?
            .extensions
            .iter()
            .map(|ext| labels_to_init_af_extension(ext, af))
            .collect()
    }
}
