use super::{
    utils::{ids_to_extension, labels_to_init_af_extension},
    CredulousAcceptanceComputer, EnumerationStep, ExtensionEnumerator, InitialSetEnumerator,
    SingleExtensionComputer, SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    encodings::{self, ConstraintsEncoder},
    sat::{DefaultSatSolverFactory, SatSolverFactory},
    search::{self, SearchConfig, SearchGoal},
    utils,
};
use anyhow::{anyhow, Result};
use log::debug;

/// A SAT-based solver for the preferred semantics.
///
/// Skeptical acceptance and enumeration rely on a concurrent search.
/// The grounded extension of the framework is accepted and its reduct is computed;
/// the search then branches on the initial sets of each strongly connected component of the reduct,
/// each branch working on the reduct by the chosen initial set.
/// A branch in which no initial set remains holds a preferred extension.
///
/// Credulous acceptance is checked by a single call to the SAT solver,
/// since an argument is credulously accepted under the preferred semantics iff it belongs to a complete extension.
pub struct PreferredSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver_factory: Box<dyn SatSolverFactory>,
    search_config: SearchConfig,
}

impl<'a, T> PreferredSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new SAT based solver for the preferred semantics.
    ///
    /// The underlying SAT solvers are returned by [DefaultSatSolverFactory].
    ///
    /// # Example
    ///
    /// ```
    /// # use reducto::aa::{AAFramework, LabelType};
    /// # use reducto::solvers::{ExtensionEnumerator, PreferredSemanticsSolver};
    /// fn count_extensions<T>(af: &AAFramework<T>) -> usize where T: LabelType {
    ///     let mut solver = PreferredSemanticsSolver::new(af);
    ///     solver.count_extensions().unwrap()
    /// }
    /// # assert_eq!(1, count_extensions::<usize>(&AAFramework::default()));
    /// ```
    pub fn new(af: &'a AAFramework<T>) -> Self {
        Self::new_with_sat_solver_factory(af, Box::new(DefaultSatSolverFactory))
    }

    /// Builds a new SAT based solver for the preferred semantics.
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
        search::search_preferred(
            self.af,
            goal,
            self.solver_factory.as_ref(),
            &self.search_config,
        )
    }
}

impl<T> SingleExtensionComputer<T> for PreferredSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        let mut current = self.af.clone();
        let mut accepted = vec![];
        loop {
            let grounded = utils::grounded_extension(&current);
            accepted.append(&mut current.argument_set().labels_of(&grounded));
            current = utils::reduct(&current, &grounded)?;
            let step = {
                let mut enumerator =
                    InitialSetEnumerator::new(&current, self.solver_factory.new_solver());
                enumerator.next_initial_set(&|| false)?
            };
            match step {
                EnumerationStep::Found(initial_set) => {
                    debug!("extending the current set with an initial set");
                    accepted.append(&mut current.argument_set().labels_of(&initial_set));
                    current = utils::reduct(&current, &initial_set)?;
                }
                EnumerationStep::Exhausted => break,
                EnumerationStep::Interrupted => {
                    return Err(anyhow!("the computation of an initial set was interrupted"))
                }
            }
        }
        labels_to_init_af_extension(&accepted, self.af).map(Some)
    }
}

impl<T> CredulousAcceptanceComputer<T> for PreferredSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        let mut solver = self.solver_factory.new_solver();
        let constraints_encoder = encodings::new_for_complete_semantics();
        constraints_encoder.encode_constraints(self.af, solver.as_mut());
        let assumption = constraints_encoder.arg_to_lit(self.af, arg.id());
        let model = solver.solve_under_assumptions(&[assumption])?.into_model()?;
        if let Some(m) = model.as_ref() {
            let ext = constraints_encoder.assignment_to_extension(m, self.af);
            debug!(
                "found a complete extension containing the argument: {:?}",
                ids_to_extension(&ext, self.af)
            );
        }
        Ok(model.is_some())
    }
}

impl<T> SkepticalAcceptanceComputer<T> for PreferredSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        let outcome = self.search(SearchGoal::Skeptical(arg.label().clone()))?;
        Ok(!outcome.decisive)
    }
}

impl<T> ExtensionEnumerator<T> for PreferredSemanticsSolver<'_, T>
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
