use crate::{
    aa::{AAFramework, LabelType},
    encodings::{self, AuxVarConstraintsEncoder, ConstraintsEncoder},
    sat::{Literal, SatSolver, SatSolverFactory},
    utils,
};
use anyhow::Result;

/// The result of a step of an [InitialSetEnumerator].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EnumerationStep {
    /// A new initial set was found; it is given by sorted argument ids.
    Found(Vec<usize>),
    /// All the initial sets have been returned.
    Exhausted,
    /// The interruption function returned `true` after an oracle call.
    Interrupted,
}

/// Enumerates the initial sets (⊆-minimal nonempty admissible sets) of an AF.
///
/// Each step looks for a nonempty admissible set, then shrinks it until it is minimal.
/// Shrinking uses one-shot clauses: the next set must avoid one argument of the current set and all the arguments outside it.
/// A minimal set is then blocked by a permanent clause, so that it cannot be returned again.
pub(crate) struct InitialSetEnumerator<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver: Box<dyn SatSolver>,
    constraints_encoder: AuxVarConstraintsEncoder,
    exhausted: bool,
}

impl<'a, T> InitialSetEnumerator<'a, T>
where
    T: LabelType,
{
    /// Builds an enumerator over the whole framework.
    pub(crate) fn new(af: &'a AAFramework<T>, mut solver: Box<dyn SatSolver>) -> Self {
        let constraints_encoder = encodings::new_for_admissibility();
        constraints_encoder.encode_constraints(af, solver.as_mut());
        encodings::encode_non_emptiness(af, solver.as_mut());
        Self {
            af,
            solver,
            constraints_encoder,
            exhausted: false,
        }
    }

    /// Builds an enumerator restricted to the initial sets included in the given set of arguments.
    pub(crate) fn new_restricted(
        af: &'a AAFramework<T>,
        mut solver: Box<dyn SatSolver>,
        subset: &[usize],
    ) -> Self {
        let constraints_encoder = encodings::new_for_admissibility();
        constraints_encoder.encode_constraints(af, solver.as_mut());
        encodings::encode_non_emptiness_in_subset(af, solver.as_mut(), subset);
        Self {
            af,
            solver,
            constraints_encoder,
            exhausted: false,
        }
    }

    fn solve(&mut self) -> Result<Option<Vec<usize>>> {
        Ok(self
            .solver
            .solve()?
            .into_model()?
            .map(|model| {
                self.constraints_encoder
                    .assignment_to_extension(&model, self.af)
            }))
    }

    fn negated_lits(&self, ids: &[usize]) -> Vec<Literal> {
        ids.iter()
            .map(|id| self.af.accepted_var(*id).negative())
            .collect()
    }

    /// Computes the next initial set.
    ///
    /// The interruption function is polled after each oracle call.
    /// An interrupted enumerator must not be used anymore.
    pub(crate) fn next_initial_set(
        &mut self,
        is_interrupted: &dyn Fn() -> bool,
    ) -> Result<EnumerationStep> {
        if self.exhausted {
            return Ok(EnumerationStep::Exhausted);
        }
        let mut current = match self.solve()? {
            Some(ext) => ext,
            None => {
                self.exhausted = true;
                return Ok(EnumerationStep::Exhausted);
            }
        };
        if is_interrupted() {
            return Ok(EnumerationStep::Interrupted);
        }
        while current.len() > 1 {
            let must_shrink = self.negated_lits(&current);
            self.solver.add_one_shot_clause(must_shrink);
            let mut in_current = vec![false; self.af.n_arguments()];
            current.iter().for_each(|id| in_current[*id] = true);
            for (id, _) in in_current.iter().enumerate().filter(|(_, b)| !**b) {
                let lit = self.af.accepted_var(id).negative();
                self.solver.add_one_shot_clause(vec![lit]);
            }
            let smaller = self.solve()?;
            if is_interrupted() {
                return Ok(EnumerationStep::Interrupted);
            }
            match smaller {
                Some(ext) => current = ext,
                None => break,
            }
        }
        let blocking_clause = self.negated_lits(&current);
        self.solver.add_clause(blocking_clause);
        Ok(EnumerationStep::Found(current))
    }
}

/// Computes all the initial sets of an AF.
///
/// Since an initial set always lies inside a strongly connected component,
/// a restricted enumerator is run for each component with more than one argument.
/// The initial sets inside a single-argument component are the unattacked arguments.
/// Returns [Option::None] if the interruption function returned `true`.
pub(crate) fn compute_initial_sets<T>(
    af: &AAFramework<T>,
    solver_factory: &dyn SatSolverFactory,
    is_interrupted: &dyn Fn() -> bool,
) -> Result<Option<Vec<Vec<usize>>>>
where
    T: LabelType,
{
    let mut initial_sets = Vec::new();
    for scc in utils::strongly_connected_components(af) {
        if scc.len() == 1 {
            if af.is_unattacked(scc[0]) {
                initial_sets.push(scc);
            }
            continue;
        }
        let mut enumerator =
            InitialSetEnumerator::new_restricted(af, solver_factory.new_solver(), &scc);
        loop {
            match enumerator.next_initial_set(is_interrupted)? {
                EnumerationStep::Found(ext) => initial_sets.push(ext),
                EnumerationStep::Exhausted => break,
                EnumerationStep::Interrupted => return Ok(None),
            }
        }
    }
    Ok(Some(initial_sets))
}

/// Keeps the initial sets that have no attack, in either direction, with another initial set.
pub(crate) fn retain_unchallenged<T>(
    af: &AAFramework<T>,
    initial_sets: Vec<Vec<usize>>,
) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let mut owners = vec![vec![]; af.n_arguments()];
    initial_sets
        .iter()
        .enumerate()
        .for_each(|(i, s)| s.iter().for_each(|a| owners[*a].push(i)));
    let is_challenged = |i: usize| {
        initial_sets[i].iter().any(|a| {
            af.attackers_of(*a)
                .iter()
                .chain(af.targets_of(*a).iter())
                .any(|neighbor| owners[*neighbor].iter().any(|j| *j != i))
        })
    };
    let challenged = (0..initial_sets.len())
        .map(is_challenged)
        .collect::<Vec<bool>>();
    initial_sets
        .into_iter()
        .zip(challenged)
        .filter_map(|(s, c)| if c { None } else { Some(s) })
        .collect()
}
