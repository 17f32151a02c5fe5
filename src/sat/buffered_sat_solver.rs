use super::{
    sat_solver::{SolvingListener, SolvingResult},
    Assignment, Literal, SatSolver,
};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Cursor, Read};

/// The type of functions that solve a DIMACS instance and return the output of the solver.
pub type SolvingFn = dyn Fn(DimacsInstanceRead) -> Result<Box<dyn Read>> + Send + Sync;

/// A reader over a DIMACS instance built by a [BufferedSatSolver].
pub struct DimacsInstanceRead {
    preamble: Cursor<String>,
    clauses: Cursor<String>,
    one_shot_clauses: Cursor<String>,
    assumptions: Cursor<String>,
}

impl Read for DimacsInstanceRead {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let r = self.preamble.read(buf)?;
        if r > 0 {
            return Ok(r);
        }
        let r = self.clauses.read(buf)?;
        if r > 0 {
            return Ok(r);
        }
        let r = self.one_shot_clauses.read(buf)?;
        if r > 0 {
            return Ok(r);
        }
        self.assumptions.read(buf)
    }
}

const DEFAULT_BUFFER_CAP: usize = 1 << 20;

/// A SAT solver that stores its clauses as a DIMACS text and delegates each solving call to a function.
///
/// Permanent clauses, one-shot clauses and assumptions are kept in three separate buffers.
/// Assumptions are written as unit clauses.
/// The one-shot buffer is cleared after each solving call, whatever its result.
pub struct BufferedSatSolver {
    n_vars: usize,
    n_clauses: usize,
    clauses: String,
    n_one_shot_clauses: usize,
    one_shot_clauses: String,
    solving_fn: Box<SolvingFn>,
    listeners: Vec<Box<dyn SolvingListener>>,
}

impl BufferedSatSolver {
    /// Builds a new buffered solver given the function used to solve the instances.
    pub fn new(solving_fn: Box<SolvingFn>) -> Self {
        Self {
            n_vars: 0,
            n_clauses: 0,
            clauses: String::with_capacity(DEFAULT_BUFFER_CAP),
            n_one_shot_clauses: 0,
            one_shot_clauses: String::new(),
            solving_fn,
            listeners: Vec::new(),
        }
    }

    fn write_clause(n_vars: &mut usize, buffer: &mut String, cl: &[Literal]) {
        cl.iter().for_each(|l| {
            *n_vars = usize::max(*n_vars, usize::from(l.var()));
            buffer.push_str(&format!("{} ", l));
        });
        buffer.push_str("0\n");
    }

    fn read_solver_output(&self, solver_output: Box<dyn Read>) -> Result<SolvingResult> {
        let context = "error while reading solving function output in BufferedSatSolver";
        let mut status = None;
        let mut assignment = vec![None; self.n_vars];
        let mut assignment_line_seen = false;
        let mut assignment_line_end = false;
        for line in BufReader::new(solver_output).lines() {
            let line = line.context(context)?;
            if line == "s SATISFIABLE" || line == "s UNSATISFIABLE" {
                if status.is_some() {
                    return Err(anyhow!("multiple status lines")).context(context);
                }
                status = Some(line == "s SATISFIABLE");
            } else if line.starts_with("v ") {
                assignment_line_seen = true;
                for w in line.split_ascii_whitespace().skip(1) {
                    let n = w
                        .parse::<isize>()
                        .map_err(|_| anyhow!(r#""{}" is not a literal"#, w))
                        .context(context)?;
                    if n == 0 {
                        if assignment_line_end {
                            return Err(anyhow!("multiple zeroes on value line")).context(context);
                        }
                        assignment_line_end = true;
                    } else {
                        let v = n.unsigned_abs() - 1;
                        if v >= self.n_vars {
                            return Err(anyhow!("a variable in value line is out of bounds"))
                                .context(context);
                        }
                        assignment[v] = Some(n > 0);
                    }
                }
            } else if !line.starts_with("c ") && line != "c" && line != "v" && !line.is_empty() {
                return Err(anyhow!(r#"unexpected line "{}""#, line)).context(context);
            }
        }
        Ok(match status {
            Some(true) if assignment_line_seen => {
                SolvingResult::Satisfiable(Assignment::new(assignment))
            }
            Some(false) => SolvingResult::Unsatisfiable,
            _ => SolvingResult::Unknown,
        })
    }
}

impl SatSolver for BufferedSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        Self::write_clause(&mut self.n_vars, &mut self.clauses, &cl);
        self.n_clauses += 1;
    }

    fn add_one_shot_clause(&mut self, cl: Vec<Literal>) {
        Self::write_clause(&mut self.n_vars, &mut self.one_shot_clauses, &cl);
        self.n_one_shot_clauses += 1;
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> Result<SolvingResult> {
        let n_clauses = self.n_clauses + self.n_one_shot_clauses + assumptions.len();
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars, n_clauses));
        assumptions
            .iter()
            .for_each(|a| self.n_vars = usize::max(self.n_vars, usize::from(a.var())));
        let preamble = format!("p cnf {} {}\n", self.n_vars, n_clauses);
        let assumptions =
            assumptions
                .iter()
                .map(|a| format!("{} 0\n", a))
                .fold(String::new(), |mut acc, a| {
                    acc.push_str(&a);
                    acc
                });
        let instance_reader = DimacsInstanceRead {
            preamble: Cursor::new(preamble),
            clauses: Cursor::new(self.clauses.clone()),
            one_shot_clauses: Cursor::new(std::mem::take(&mut self.one_shot_clauses)),
            assumptions: Cursor::new(assumptions),
        };
        self.n_one_shot_clauses = 0;
        let solver_output = (self.solving_fn)(instance_reader)?;
        let solving_result = self.read_solver_output(solver_output)?;
        self.listeners
            .iter()
            .for_each(|l| l.solving_end(&solving_result));
        Ok(solving_result)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause;
    use std::sync::{Arc, Mutex};

    fn input_check_solving_fn(expected_input: &'static str) -> Box<SolvingFn> {
        Box::new(move |mut r| {
            let mut buffer = String::new();
            r.read_to_string(&mut buffer).unwrap();
            assert_eq!(expected_input, buffer);
            Ok(Box::new("s UNSATISFIABLE\n".as_bytes()))
        })
    }

    #[test]
    fn test_input_ok() {
        let expected = "p cnf 2 3\n1 2 0\n-1 -2 0\n1 0\n";
        let mut s = BufferedSatSolver::new(input_check_solving_fn(expected));
        s.add_clause(clause![1, 2]);
        s.add_clause(clause![-1, -2]);
        s.solve_under_assumptions(&[Literal::from(1)]).unwrap();
    }

    #[test]
    fn test_one_shot_clauses_are_cleared_after_solving() {
        let inputs = Arc::new(Mutex::new(Vec::new()));
        let inputs_clone = Arc::clone(&inputs);
        let mut s = BufferedSatSolver::new(Box::new(move |mut r| {
            let mut buffer = String::new();
            r.read_to_string(&mut buffer).unwrap();
            inputs_clone.lock().unwrap().push(buffer);
            Ok(Box::new("s UNSATISFIABLE\n".as_bytes()))
        }));
        s.add_clause(clause![1, 2]);
        s.add_one_shot_clause(clause![-1]);
        s.add_one_shot_clause(clause![-2]);
        s.solve().unwrap();
        s.solve().unwrap();
        let inputs = inputs.lock().unwrap();
        assert_eq!("p cnf 2 3\n1 2 0\n-1 0\n-2 0\n", inputs[0]);
        assert_eq!("p cnf 2 1\n1 2 0\n", inputs[1]);
    }

    fn fake_output_solving_fn(output: &'static str) -> Box<SolvingFn> {
        Box::new(move |_| Ok(Box::new(output.as_bytes())))
    }

    fn solve_with_output(output: &'static str) -> Result<SolvingResult> {
        let mut s = BufferedSatSolver::new(fake_output_solving_fn(output));
        s.add_clause(clause![1, 2]);
        s.solve()
    }

    #[test]
    fn test_output_sat_ok() {
        let assignment = solve_with_output("s SATISFIABLE\nv -1 2 0\n")
            .unwrap()
            .into_model()
            .unwrap()
            .unwrap();
        assert!(!assignment.value_of(1).unwrap());
        assert!(assignment.value_of(2).unwrap());
    }

    #[test]
    fn test_output_sat_ok_with_v_lines_without_lits() {
        let assignment = solve_with_output("s SATISFIABLE\nv\nv -1 2 0\nv\n")
            .unwrap()
            .into_model()
            .unwrap()
            .unwrap();
        assert!(!assignment.value_of(1).unwrap());
        assert!(assignment.value_of(2).unwrap());
    }

    #[test]
    fn test_output_sat_ok_multiple_v_lines() {
        let assignment = solve_with_output("s SATISFIABLE\nv 1\nv 2\nv 0\n")
            .unwrap()
            .into_model()
            .unwrap()
            .unwrap();
        assert!(assignment.value_of(1).unwrap());
        assert!(assignment.value_of(2).unwrap());
    }

    #[test]
    fn test_output_sat_no_s_line() {
        assert_eq!(
            SolvingResult::Unknown,
            solve_with_output("v 1 2 0\n").unwrap()
        );
    }

    #[test]
    fn test_output_sat_no_v_line() {
        assert_eq!(
            SolvingResult::Unknown,
            solve_with_output("s SATISFIABLE\n").unwrap()
        );
    }

    #[test]
    fn test_output_sat_var_out_of_bounds() {
        let err = solve_with_output("s SATISFIABLE\nv 1 2 3 0\n").unwrap_err();
        assert_eq!(
            "a variable in value line is out of bounds",
            err.root_cause().to_string()
        );
    }

    #[test]
    fn test_output_sat_not_a_var() {
        let err = solve_with_output("s SATISFIABLE\nv 1 2 foo 0\n").unwrap_err();
        assert_eq!(r#""foo" is not a literal"#, err.root_cause().to_string());
    }

    #[test]
    fn test_output_sat_multiple_status_lines() {
        let err = solve_with_output("s SATISFIABLE\ns SATISFIABLE\nv 1 2 0\n").unwrap_err();
        assert_eq!("multiple status lines", err.root_cause().to_string());
    }

    #[test]
    fn test_output_sat_multiple_zeroes_in_v_lines() {
        let err = solve_with_output("s SATISFIABLE\nv 1 0\nv 2 0\n").unwrap_err();
        assert_eq!("multiple zeroes on value line", err.root_cause().to_string());
    }

    #[test]
    fn test_output_unsat_ok() {
        assert!(solve_with_output("c foo\nc\ns UNSATISFIABLE\n")
            .unwrap()
            .into_model()
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_output_no_s_line() {
        assert_eq!(SolvingResult::Unknown, solve_with_output("").unwrap());
    }

    #[test]
    fn test_output_unexpected_line() {
        let err = solve_with_output("foo\ns SATISFIABLE\nv 1 2 0\n").unwrap_err();
        assert_eq!(r#"unexpected line "foo""#, err.root_cause().to_string());
    }

    #[test]
    fn test_solving_fn_error() {
        let mut s = BufferedSatSolver::new(Box::new(|_| Err(anyhow!("cannot launch"))));
        s.add_clause(clause![1]);
        assert!(s.solve().is_err());
    }
}
