use crate::{
    aa::{AAFramework, LabelType},
    sat::{Assignment, Literal, SatSolver},
};

/// The trait for encoders from AF to SAT.
pub trait ConstraintsEncoder<T>
where
    T: LabelType,
{
    /// Encodes the constraints for the underlying semantics into the SAT solver.
    fn encode_constraints(&self, af: &AAFramework<T>, solver: &mut dyn SatSolver);

    /// Translates back a SAT assignment into the ids of the corresponding set of arguments.
    fn assignment_to_extension(&self, assignment: &Assignment, af: &AAFramework<T>)
        -> Vec<usize>;

    /// Translates an argument id into the literal stating it is accepted.
    fn arg_to_lit(&self, af: &AAFramework<T>, id: usize) -> Literal;
}
