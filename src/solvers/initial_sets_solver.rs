use super::{
    retain_unchallenged,
    utils::{all_initial_sets, ids_to_extension},
    CredulousAcceptanceComputer, ExtensionEnumerator, SingleExtensionComputer,
    SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    sat::{DefaultSatSolverFactory, SatSolverFactory},
};
use anyhow::Result;
use log::info;

/// A SAT-based solver for the initial sets of an AF.
///
/// Initial sets are the nonempty, subset-minimal admissible sets.
/// They are computed for each strongly connected component of the framework.
pub struct InitialSetsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver_factory: Box<dyn SatSolverFactory>,
    initial_sets: Option<Vec<Vec<usize>>>,
}

impl<'a, T> InitialSetsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new SAT based solver for the initial sets.
    ///
    /// The underlying SAT solvers are returned by [DefaultSatSolverFactory].
    pub fn new(af: &'a AAFramework<T>) -> Self {
        Self::new_with_sat_solver_factory(af, Box::new(DefaultSatSolverFactory))
    }

    /// Builds a new SAT based solver for the initial sets.
    ///
    /// The SAT solvers to use are given through the solver factory.
    pub fn new_with_sat_solver_factory(
        af: &'a AAFramework<T>,
        solver_factory: Box<dyn SatSolverFactory>,
    ) -> Self {
        Self {
            af,
            solver_factory,
            initial_sets: None,
        }
    }

    // The initial sets are computed once, at the first query.
    fn initial_sets(&mut self) -> Result<&[Vec<usize>]> {
        if self.initial_sets.is_none() {
            let mut sets = all_initial_sets(self.af, self.solver_factory.as_ref())?;
            sets.sort_unstable();
            self.initial_sets = Some(sets);
        }
        Ok(self.initial_sets.as_deref().unwrap_or_default())
    }

    fn log_classification(&mut self) -> Result<()> {
        let af = self.af;
        let sets = self.initial_sets()?.to_vec();
        let n_sets = sets.len();
        let n_unattacked = sets
            .iter()
            .filter(|s| s.len() == 1 && af.is_unattacked(s[0]))
            .count();
        let n_unchallenged = retain_unchallenged(af, sets)
            .iter()
            .filter(|s| s.len() != 1 || !af.is_unattacked(s[0]))
            .count();
        info!(
            "initial sets: {} unattacked, {} unchallenged, {} challenged",
            n_unattacked,
            n_unchallenged,
            n_sets - n_unattacked - n_unchallenged
        );
        Ok(())
    }
}

impl<T> SingleExtensionComputer<T> for InitialSetsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        let af = self.af;
        Ok(self
            .initial_sets()?
            .first()
            .map(|s| ids_to_extension(s, af)))
    }
}

impl<T> CredulousAcceptanceComputer<T> for InitialSetsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        Ok(self.initial_sets()?.iter().any(|s| s.contains(&arg.id())))
    }
}

impl<T> SkepticalAcceptanceComputer<T> for InitialSetsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        Ok(self.initial_sets()?.iter().all(|s| s.contains(&arg.id())))
    }
}

impl<T> ExtensionEnumerator<T> for InitialSetsSolver<'_, T>
where
    T: LabelType,
{
    fn enumerate_extensions(&mut self) -> Result<Vec<Vec<&Argument<T>>>> {
        let af = self.af;
        Ok(self
            .initial_sets()?
            .iter()
            .map(|s| ids_to_extension(s, af))
            .collect())
    }

    fn count_extensions(&mut self) -> Result<usize> {
        self.log_classification()?;
        Ok(self.initial_sets()?.len())
    }
}
