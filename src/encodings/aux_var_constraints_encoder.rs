//! A module dedicated to encodings based on auxiliary variables addition.
//!
//! For each argument `a`, the variable `acc(a)` states `a` is accepted,
//! and the auxiliary variable `rej(a)` states `a` is attacked by an accepted argument.
//! The mapping from arguments to variables is given by [AAFramework::accepted_var] and [AAFramework::rejected_var].

use super::ConstraintsEncoder;
use crate::{
    aa::{AAFramework, LabelType},
    sat::{Assignment, Literal, SatSolver},
};

enum EncodingType {
    ConflictFreeness,
    Admissibility,
    CompleteSemantics,
}

impl EncodingType {
    fn encode_constraints<T>(&self, af: &AAFramework<T>, solver: &mut dyn SatSolver)
    where
        T: LabelType,
    {
        solver.reserve(af.n_vars());
        (0..af.n_arguments()).for_each(|id| {
            encode_conflict_freeness_attack_constraints_for_arg(af, solver, id)
        });
        if let EncodingType::ConflictFreeness = self {
            return;
        }
        (0..af.n_arguments()).for_each(|id| encode_rejected_var(af, solver, id));
        (0..af.n_arguments()).for_each(|id| {
            encode_admissibility_attack_constraints_for_arg(af, solver, id)
        });
        if let EncodingType::CompleteSemantics = self {
            (0..af.n_arguments()).for_each(|id| {
                encode_complete_semantics_attack_constraints_for_arg(af, solver, id)
            });
        }
    }
}

/// Returns an encoder for conflict-freeness based on auxiliary variables addition.
///
/// Since no defense is required, no auxiliary variable is constrained.
pub fn new_for_conflict_freeness() -> AuxVarConstraintsEncoder {
    AuxVarConstraintsEncoder(EncodingType::ConflictFreeness)
}

fn encode_conflict_freeness_attack_constraints_for_arg<T>(
    af: &AAFramework<T>,
    solver: &mut dyn SatSolver,
    attacked_id: usize,
) where
    T: LabelType,
{
    let attacked_lit = af.accepted_var(attacked_id).negative();
    af.attackers_of(attacked_id).iter().for_each(|attacker_id| {
        if *attacker_id == attacked_id {
            solver.add_clause(vec![attacked_lit]);
        } else {
            solver.add_clause(vec![attacked_lit, af.accepted_var(*attacker_id).negative()]);
        }
    });
}

fn encode_rejected_var<T>(af: &AAFramework<T>, solver: &mut dyn SatSolver, id: usize)
where
    T: LabelType,
{
    let rejected_var = af.rejected_var(id);
    let mut full_cl = vec![rejected_var.negative()];
    af.attackers_of(id).iter().for_each(|attacker_id| {
        let attacker_var = af.accepted_var(*attacker_id);
        solver.add_clause(vec![attacker_var.negative(), rejected_var.positive()]);
        full_cl.push(attacker_var.positive());
    });
    solver.add_clause(full_cl);
    solver.add_clause(vec![
        af.accepted_var(id).negative(),
        rejected_var.negative(),
    ]);
}

/// Returns an encoder for admissibility based on auxiliary variables addition.
pub fn new_for_admissibility() -> AuxVarConstraintsEncoder {
    AuxVarConstraintsEncoder(EncodingType::Admissibility)
}

fn encode_admissibility_attack_constraints_for_arg<T>(
    af: &AAFramework<T>,
    solver: &mut dyn SatSolver,
    attacked_id: usize,
) where
    T: LabelType,
{
    if af.is_self_attacking(attacked_id) {
        return;
    }
    let attacked_lit = af.accepted_var(attacked_id).negative();
    af.attackers_of(attacked_id)
        .iter()
        .filter(|attacker_id| !af.has_attack(attacked_id, **attacker_id))
        .for_each(|attacker_id| {
            solver.add_clause(vec![
                attacked_lit,
                af.rejected_var(*attacker_id).positive(),
            ]);
        });
}

/// Returns an encoder for the complete semantics based on auxiliary variables addition.
pub fn new_for_complete_semantics() -> AuxVarConstraintsEncoder {
    AuxVarConstraintsEncoder(EncodingType::CompleteSemantics)
}

fn encode_complete_semantics_attack_constraints_for_arg<T>(
    af: &AAFramework<T>,
    solver: &mut dyn SatSolver,
    id: usize,
) where
    T: LabelType,
{
    let mut full_cl = vec![af.accepted_var(id).positive()];
    af.attackers_of(id)
        .iter()
        .for_each(|attacker_id| full_cl.push(af.rejected_var(*attacker_id).negative()));
    solver.add_clause(full_cl);
}

/// Adds a clause forbidding the empty extension.
pub fn encode_non_emptiness<T>(af: &AAFramework<T>, solver: &mut dyn SatSolver)
where
    T: LabelType,
{
    solver.add_clause(
        (0..af.n_arguments())
            .map(|id| af.accepted_var(id).positive())
            .collect(),
    );
}

/// Restricts the extensions to the nonempty subsets of the given set of arguments.
///
/// The arguments outside the subset are forced to be rejected by unit clauses.
pub fn encode_non_emptiness_in_subset<T>(
    af: &AAFramework<T>,
    solver: &mut dyn SatSolver,
    subset: &[usize],
) where
    T: LabelType,
{
    let mut in_subset = vec![false; af.n_arguments()];
    subset.iter().for_each(|id| in_subset[*id] = true);
    solver.add_clause(
        subset
            .iter()
            .map(|id| af.accepted_var(*id).positive())
            .collect(),
    );
    in_subset
        .iter()
        .enumerate()
        .filter(|(_, b)| !**b)
        .for_each(|(id, _)| solver.add_clause(vec![af.accepted_var(id).negative()]));
}

/// A common type for encodings based on auxiliary variables addition.
pub struct AuxVarConstraintsEncoder(EncodingType);

impl<T> ConstraintsEncoder<T> for AuxVarConstraintsEncoder
where
    T: LabelType,
{
    fn encode_constraints(&self, af: &AAFramework<T>, solver: &mut dyn SatSolver) {
        self.0.encode_constraints(af, solver)
    }

    fn assignment_to_extension(&self, assignment: &Assignment, af: &AAFramework<T>) -> Vec<usize> {
        (0..af.n_arguments())
            .filter(|id| assignment.is_true(af.accepted_var(*id)))
            .collect()
    }

    fn arg_to_lit(&self, af: &AAFramework<T>, id: usize) -> Literal {
        af.accepted_var(id).positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aa::ArgumentSet,
        io::{AspartixReader, InstanceReader},
        sat::default_solver,
        utils::naive_semantics,
    };

    fn all_models(
        af: &AAFramework<String>,
        encoder: &AuxVarConstraintsEncoder,
        extra: &dyn Fn(&mut dyn SatSolver),
    ) -> Vec<Vec<usize>> {
        let mut solver = default_solver();
        encoder.encode_constraints(af, solver.as_mut());
        extra(solver.as_mut());
        let mut models = vec![];
        while let Some(assignment) = solver.solve().unwrap().into_model().unwrap() {
            let ext = encoder.assignment_to_extension(&assignment, af);
            solver.add_clause(
                (0..af.n_arguments())
                    .map(|id| {
                        if ext.contains(&id) {
                            af.accepted_var(id).negative()
                        } else {
                            af.accepted_var(id).positive()
                        }
                    })
                    .collect(),
            );
            models.push(ext);
        }
        models.sort_unstable();
        models
    }

    fn read_af(instance: &str) -> AAFramework<String> {
        AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap()
    }

    const INSTANCES: [&str; 5] = [
        "arg(a).\n",
        "arg(a).\narg(b).\natt(a,a).\n",
        "arg(a).\narg(b).\narg(c).\natt(a,b).\natt(b,c).\natt(c,a).\n",
        "arg(a).\narg(b).\narg(c).\narg(d).\natt(a,b).\natt(b,a).\natt(c,d).\natt(d,c).\n",
        "arg(a).\narg(b).\narg(c).\narg(d).\narg(e).\natt(a,b).\natt(b,a).\natt(b,c).\natt(c,d).\natt(d,e).\natt(e,c).\natt(e,e).\n",
    ];

    #[test]
    fn test_no_attacks_complete_semantics() {
        let af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&["a0"]));
        let encoder = new_for_complete_semantics();
        let mut solver = default_solver();
        encoder.encode_constraints(&af, solver.as_mut());
        assert_eq!(2, solver.n_vars());
        let model = solver.solve().unwrap().into_model().unwrap().unwrap();
        assert_eq!(vec![0], encoder.assignment_to_extension(&model, &af));
    }

    #[test]
    fn test_conflict_freeness() {
        for instance in INSTANCES {
            let af = read_af(instance);
            let expected = naive_semantics::conflict_free_sets(&af);
            let actual = all_models(&af, &new_for_conflict_freeness(), &|_| {});
            assert_eq!(expected, actual, "{}", instance);
        }
    }

    #[test]
    fn test_admissibility() {
        for instance in INSTANCES {
            let af = read_af(instance);
            let expected = naive_semantics::admissible_sets(&af);
            let actual = all_models(&af, &new_for_admissibility(), &|_| {});
            assert_eq!(expected, actual, "{}", instance);
        }
    }

    #[test]
    fn test_complete_semantics() {
        for instance in INSTANCES {
            let af = read_af(instance);
            let expected = naive_semantics::complete_extensions(&af);
            let actual = all_models(&af, &new_for_complete_semantics(), &|_| {});
            assert_eq!(expected, actual, "{}", instance);
        }
    }

    #[test]
    fn test_non_emptiness() {
        let af = read_af(INSTANCES[3]);
        let mut expected = naive_semantics::admissible_sets(&af);
        expected.retain(|s| !s.is_empty());
        let actual = all_models(&af, &new_for_admissibility(), &|s| {
            encode_non_emptiness(&af, s)
        });
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_non_emptiness_in_subset() {
        let af = read_af(INSTANCES[3]);
        let actual = all_models(&af, &new_for_admissibility(), &|s| {
            encode_non_emptiness_in_subset(&af, s, &[2, 3])
        });
        assert_eq!(vec![vec![2], vec![3]], actual);
    }

    #[test]
    fn test_non_emptiness_in_cycle() {
        let af = read_af(INSTANCES[2]);
        let actual = all_models(&af, &new_for_admissibility(), &|s| {
            encode_non_emptiness_in_subset(&af, s, &[0, 1, 2])
        });
        assert!(actual.is_empty());
    }

    #[test]
    fn test_arg_to_lit() {
        let af = read_af(INSTANCES[2]);
        let encoder = new_for_admissibility();
        assert_eq!(Literal::from(2), encoder.arg_to_lit(&af, 1));
    }
}
