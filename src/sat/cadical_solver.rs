use super::{
    sat_solver::{SolvingListener, SolvingResult},
    Assignment, Literal, SatSolver,
};
use anyhow::Result;
use cadical::Solver as CadicalCSolver;

/// A wrapper around the CaDiCaL SAT solver.
///
/// One-shot clauses are implemented with a selector variable:
/// each one-shot clause `C` is added as the permanent clause `C ∨ ¬s`, and `s` is assumed during the next solving call.
/// After this call, the unit clause `¬s` is added, definitively satisfying the one-shot clauses.
/// A new selector is allocated for the next batch of one-shot clauses.
#[derive(Default)]
pub struct CadicalSolver {
    solver: CadicalCSolver,
    n_vars: usize,
    n_clauses: usize,
    one_shot_selector: Option<Literal>,
    listeners: Vec<Box<dyn SolvingListener>>,
}

impl CadicalSolver {
    fn push_clause(&mut self, cl: &[Literal]) {
        cl.iter()
            .for_each(|l| self.n_vars = usize::max(self.n_vars, usize::from(l.var())));
        self.solver
            .add_clause(cl.iter().map(|l| isize::from(*l) as i32));
        self.n_clauses += 1;
    }

    fn selector(&mut self) -> Literal {
        match self.one_shot_selector {
            Some(s) => s,
            None => {
                self.n_vars += 1;
                let s = Literal::from(self.n_vars as isize);
                self.one_shot_selector = Some(s);
                s
            }
        }
    }
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.push_clause(&cl)
    }

    fn add_one_shot_clause(&mut self, mut cl: Vec<Literal>) {
        let selector = self.selector();
        cl.push(selector.negate());
        self.push_clause(&cl)
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> Result<SolvingResult> {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars, self.n_clauses));
        let selector = self.one_shot_selector.take();
        let all_assumptions = assumptions
            .iter()
            .chain(selector.iter())
            .map(|l| isize::from(*l) as i32)
            .collect::<Vec<i32>>();
        let result = match self.solver.solve_with(all_assumptions.into_iter()) {
            Some(true) => {
                let max_known = self.solver.max_variable() as usize;
                let assignment = Assignment::new(
                    (1..=self.n_vars)
                        .map(|i| {
                            if i <= max_known {
                                self.solver.value(i as i32)
                            } else {
                                None
                            }
                        })
                        .collect(),
                );
                SolvingResult::Satisfiable(assignment)
            }
            Some(false) => SolvingResult::Unsatisfiable,
            None => SolvingResult::Unknown,
        };
        if let Some(s) = selector {
            self.push_clause(&[s.negate()]);
        }
        self.listeners.iter().for_each(|l| l.solving_end(&result));
        Ok(result)
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.n_vars = usize::max(self.n_vars, new_max_id);
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }
}
