use super::cadical_solver::CadicalSolver;
use anyhow::{anyhow, Result};
use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable in a SAT solver.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(NonZeroUsize);

impl Variable {
    /// Returns the positive literal of this variable.
    pub fn positive(self) -> Literal {
        Literal(NonZeroIsize::try_from(self.0.get() as isize).unwrap())
    }

    /// Returns the negative literal of this variable.
    pub fn negative(self) -> Literal {
        self.positive().negate()
    }
}

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                Self(NonZeroUsize::try_from(v as usize).unwrap())
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

macro_rules! impl_var_from_neg {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                if v < 0 {
                    panic!("cannot build a variable from a negative integer")
                }
                Self(NonZeroUsize::try_from(v as usize).unwrap())
            }
        }
    };
}
impl_var_from_neg!(isize);
impl_var_from_neg!(i64);
impl_var_from_neg!(i32);

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

/// A literal in a SAT solver.
///
/// A literal is represented by a non-null integer.
/// It can be obtained through the [From] trait from a signed integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the opposite literal.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Literal {
            fn from(l: $t) -> Self {
                Self(NonZeroIsize::try_from(l as isize).unwrap())
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[cfg(test)]
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::sat::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map($crate::sat::Literal::from).collect::<Vec<$crate::sat::Literal>>()
    );
}
#[cfg(test)]
pub(crate) use clause;

/// An assignment of a set of variables.
///
/// Inside the set of variables involved in the assignment, some may be unassigned.
/// This is the reason why accessors to assigned value returns an [Option<bool>].
#[derive(Debug, PartialEq, Eq)]
pub struct Assignment(Vec<Option<bool>>);

impl Assignment {
    pub(crate) fn new(assignment: Vec<Option<bool>>) -> Self {
        Self(assignment)
    }

    /// Returns the value potentially assigned to the variable.
    ///
    /// In case the variable is not assigned (or is out of the assignment bounds), [Option::None] is returned.
    pub fn value_of<T>(&self, v: T) -> Option<bool>
    where
        T: Into<Variable>,
    {
        self.0
            .get(usize::from(v.into()) - 1)
            .copied()
            .flatten()
    }

    /// Returns `true` iff the variable is assigned to `true`.
    pub fn is_true<T>(&self, v: T) -> bool
    where
        T: Into<Variable>,
    {
        self.value_of(v) == Some(true)
    }
}

/// The result of a call to a SAT solver.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The problem is satisfiable; a model is provided.
    Satisfiable(Assignment),
    /// The problem is unsatisfiable.
    Unsatisfiable,
    /// The solver was not able to give a definite answer.
    Unknown,
}

impl SolvingResult {
    /// Returns the underlying model if it exists, or [Option::None] if the problem is unsatisfiable.
    ///
    /// Since the solvers of this library need definite answers, an [SolvingResult::Unknown] result is turned into an error.
    pub fn into_model(self) -> Result<Option<Assignment>> {
        match self {
            SolvingResult::Satisfiable(assignment) => Ok(Some(assignment)),
            SolvingResult::Unsatisfiable => Ok(None),
            SolvingResult::Unknown => Err(anyhow!(
                r#"the SAT solver returned "Unknown" while a definite answer was required"#
            )),
        }
    }
}

/// A trait for objects listening to SAT solvers calls.
pub trait SolvingListener: Send + Sync {
    /// Called when a SAT solver starts solving a problem.
    fn solving_start(&self, n_vars: usize, n_clauses: usize);

    /// Called when a SAT solver ends solving a problem.
    fn solving_end(&self, result: &SolvingResult);
}

/// A trait for incremental SAT solvers.
///
/// Solvers expose two channels for clauses.
/// Clauses added through [add_clause](Self::add_clause) are permanent.
/// Clauses added through [add_one_shot_clause](Self::add_one_shot_clause) are only taken into account
/// by the next call to a solving function, and are discarded afterwards, whatever the result of this call.
pub trait SatSolver {
    /// Adds a permanent clause to this solver.
    fn add_clause(&mut self, cl: Vec<Literal>);

    /// Adds a clause that is discarded after the next solving call.
    fn add_one_shot_clause(&mut self, cl: Vec<Literal>);

    /// Solves the problem formed by the clauses added so far.
    fn solve(&mut self) -> Result<SolvingResult> {
        self.solve_under_assumptions(&[])
    }

    /// Solves the problem formed by the clauses added so far and the provided assumptions.
    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> Result<SolvingResult>;

    /// Returns the highest variable index known by this solver.
    fn n_vars(&self) -> usize;

    /// Ensures the variables up to the given index are considered as used by the solver.
    ///
    /// This prevents the solver from using them as internal variables.
    fn reserve(&mut self, new_max_id: usize);

    /// Adds a listener that is notified of solving calls.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);
}

/// The default SAT solver (CaDiCaL).
pub fn default_solver() -> Box<dyn SatSolver> {
    Box::new(CadicalSolver::default())
}

/// A trait for objects building new SAT solvers.
///
/// Factories are shared by the workers of a search, so they must be thread safe.
/// Each call to [new_solver](Self::new_solver) returns a fresh solver, owned by the caller.
pub trait SatSolverFactory: Send + Sync {
    /// Builds a new SAT solver.
    fn new_solver(&self) -> Box<dyn SatSolver>;
}

/// A factory for the default SAT solver.
#[derive(Default)]
pub struct DefaultSatSolverFactory;

impl SatSolverFactory for DefaultSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        default_solver()
    }
}
