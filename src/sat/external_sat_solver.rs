use super::{
    buffered_sat_solver::{BufferedSatSolver, DimacsInstanceRead},
    sat_solver::{SatSolverFactory, SolvingListener, SolvingResult},
    Literal, SatSolver,
};
use anyhow::{anyhow, Context, Result};
use std::{
    io::{Cursor, Read, Write},
    process::{Command, Stdio},
    sync::Arc,
};

/// A SAT solver which execution is made by a system command.
///
/// The system command is composed by an executable program, and a potential list of CLI arguments.
///
/// The SAT solver must read from the standard input (if it does not by default, this may be possible with the right CLI arguments).
/// The input and output formats must follow the ones from the SAT competitions.
/// Since a new process is launched for each solving call, one-shot clauses are simply not written to the next instances.
pub struct ExternalSatSolver {
    buffered_sat_solver: BufferedSatSolver,
}

impl ExternalSatSolver {
    /// Builds a new external SAT solver.
    ///
    /// The `program` argument is the path from a directory in execution path to the software to execute.
    /// The `options` parameter is the CLI options to provide to the software under execution.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use reducto::sat::{ExternalSatSolver, Literal, SatSolver};
    /// let mut solver = ExternalSatSolver::new(
    ///     "/home/me/my_solver".to_string(),
    ///     vec!["-i".to_string(), "/dev/stdin".to_string()],
    /// );
    /// solver.add_clause(vec![Literal::from(-1), Literal::from(-2)]);
    /// solver.add_clause(vec![Literal::from(-1), Literal::from(2)]);
    /// let model = solver.solve().unwrap().into_model().unwrap().unwrap();
    /// assert_eq!(Some(false), model.value_of(1));
    /// ```
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            buffered_sat_solver: BufferedSatSolver::new(Box::new(move |r| {
                exec_solver(r, &program, &options)
            })),
        }
    }
}

impl SatSolver for ExternalSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.buffered_sat_solver.add_clause(cl)
    }

    fn add_one_shot_clause(&mut self, cl: Vec<Literal>) {
        self.buffered_sat_solver.add_one_shot_clause(cl)
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> Result<SolvingResult> {
        self.buffered_sat_solver
            .solve_under_assumptions(assumptions)
    }

    fn n_vars(&self) -> usize {
        self.buffered_sat_solver.n_vars()
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.buffered_sat_solver.reserve(new_max_id)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.buffered_sat_solver.add_listener(listener);
    }
}

fn exec_solver(
    mut reader: DimacsInstanceRead,
    program: &str,
    options: &[String],
) -> Result<Box<dyn Read>> {
    let context = || format!(r#"while executing the external SAT solver "{}""#, program);
    let mut child = Command::new(program)
        .args(options)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(context)?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow!("cannot open the standard input of the solver"))
        .with_context(context)?;
    let writer = std::thread::spawn(move || -> std::io::Result<()> {
        std::io::copy(&mut reader, &mut stdin)?;
        stdin.flush()
    });
    let mut output = Vec::new();
    let read_result = match child.stdout.take() {
        Some(mut stdout) => stdout
            .read_to_end(&mut output)
            .map(|_| ())
            .map_err(anyhow::Error::from),
        None => Err(anyhow!("cannot open the standard output of the solver")),
    };
    if read_result.is_err() {
        let _ = child.kill();
    }
    let wait_result = child.wait();
    let writer_result = writer.join();
    read_result.with_context(context)?;
    wait_result.with_context(context)?;
    check_writer_result(writer_result).with_context(context)?;
    Ok(Box::new(Cursor::new(output)))
}

// A solver may exit before reading its whole input, so broken pipes are not errors.
fn check_writer_result(result: std::thread::Result<std::io::Result<()>>) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Ok(Err(e)) => Err(e).context("while writing the instance to the solver"),
        Err(_) => Err(anyhow!(
            "the thread writing the instance to the solver panicked"
        )),
    }
}

type SolvingListenerFactoryFn = dyn Fn() -> Box<dyn SolvingListener> + Send + Sync;

/// A factory building [ExternalSatSolver] instances sharing the same command.
pub struct ExternalSatSolverFactory {
    program: String,
    options: Vec<String>,
    listener_factories: Vec<Arc<SolvingListenerFactoryFn>>,
}

impl ExternalSatSolverFactory {
    /// Builds a new factory for the given program and options.
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            program,
            options,
            listener_factories: vec![],
        }
    }

    /// Adds a function producing a listener for each solver built by this factory.
    pub fn add_solver_listener(&mut self, listener_factory: Box<SolvingListenerFactoryFn>) {
        self.listener_factories.push(Arc::from(listener_factory));
    }
}

impl SatSolverFactory for ExternalSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        let mut solver = ExternalSatSolver::new(self.program.clone(), self.options.clone());
        self.listener_factories
            .iter()
            .for_each(|f| solver.add_listener((f)()));
        Box::new(solver)
    }
}
