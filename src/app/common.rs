use super::{
    AppHelper, AuthorsCommand, CheckCommand, Command, ProblemsCommand, SolveCommand,
};
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use log::{debug, info, warn};
use reducto::{
    aa::{AAFramework, LabelType},
    io::InstanceReader,
    sat::{
        DefaultSatSolverFactory, ExternalSatSolverFactory, SatSolver, SatSolverFactory,
        SolvingListener, SolvingResult,
    },
    search::SearchConfig,
};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Reducto, a reduct-based solver for abstract argumentation frameworks.",
    );
    let commands: Vec<Box<dyn Command<'static>>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ProblemsCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the AF")
        .required(true)
}

pub(crate) const ARG_PROBLEM: &str = "PROBLEM";
pub(crate) const ARG_ARG: &str = "ARG";

pub(crate) fn problem_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_PROBLEM)
            .short("p")
            .empty_values(false)
            .multiple(false)
            .help("the problem to solve")
            .required(true),
        Arg::with_name(ARG_ARG)
            .short("a")
            .empty_values(false)
            .multiple(false)
            .help("the argument (for DC/DS queries)")
            .required(false),
    ]
}

pub(crate) const ARG_READER: &str = "READER";

pub(crate) fn reader_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_READER)
        .short("r")
        .long("reader")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["apx", "iccma23"])
        .default_value("iccma23")
        .help("the input file format")
        .required(false)
}

const ARG_THREADS: &str = "THREADS";

pub(crate) fn threads_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_THREADS)
        .long("threads")
        .empty_values(false)
        .multiple(false)
        .validator(|s| {
            s.parse::<usize>()
                .map(|_| ())
                .map_err(|_| format!(r#"expected a number of workers, got "{}""#, s))
        })
        .help("the number of workers used by the searches (defaults to the number of cores minus one)")
        .required(false)
}

pub(crate) fn read_search_config(arg_matches: &ArgMatches<'_>) -> Result<SearchConfig> {
    let config = match arg_matches.value_of(ARG_THREADS) {
        Some(n) => SearchConfig::new(
            n.parse::<usize>()
                .with_context(|| format!(r#"while parsing the number of workers "{}""#, n))?,
        ),
        None => SearchConfig::default(),
    };
    info!("searches will use {} worker(s)", config.n_workers());
    Ok(config)
}

/// Returns the value of an argument that clap guarantees to be present.
pub(crate) fn required_value<'a>(arg_matches: &'a ArgMatches<'_>, name: &str) -> Result<&'a str> {
    arg_matches
        .value_of(name)
        .ok_or_else(|| anyhow!("missing value for {}", name))
}

pub(crate) fn read_file_path<T>(
    file_path: &str,
    reader: &mut dyn InstanceReader<T>,
) -> Result<AAFramework<T>>
where
    T: LabelType,
{
    reader.add_warning_handler(Box::new(|line: usize, msg: &str| {
        warn!("at line {}: {}", line, msg)
    }));
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let file = File::open(&canonicalized)
        .with_context(|| format!(r#"while opening file "{}""#, file_path))?;
    let af = reader.read(&mut BufReader::new(file))?;
    info!(
        "the argumentation framework has {} argument(s) and {} attack(s)",
        af.n_arguments(),
        af.n_attacks(),
    );
    Ok(af)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

const ARG_EXTERNAL_SAT_SOLVER: &str = "EXTERNAL_SAT_SOLVER";
const ARG_EXTERNAL_SAT_SOLVER_OPTIONS: &str = "EXTERNAL_SAT_SOLVER_OPTIONS";

pub(crate) fn external_sat_solver_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_EXTERNAL_SAT_SOLVER)
            .long("external-sat-solver")
            .empty_values(false)
            .multiple(false)
            .help("a path to an external SAT solver to replace the embedded one")
            .required(false),
        Arg::with_name(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
            .long("external-sat-solver-opt")
            .requires(ARG_EXTERNAL_SAT_SOLVER)
            .empty_values(false)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
            .help("an option to give to the external SAT solver")
            .required(false),
    ]
}

pub(crate) fn create_sat_solver_factory(
    arg_matches: &ArgMatches<'_>,
) -> Result<Box<dyn SatSolverFactory>> {
    let external_solver_options = arg_matches
        .values_of(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
        .map(|v| v.map(|o| o.to_string()).collect::<Vec<String>>())
        .unwrap_or_default();
    match arg_matches.value_of(ARG_EXTERNAL_SAT_SOLVER) {
        Some(s) => {
            let path = canonicalize_file_path(s)?;
            info!("using {:?} for problems requiring a SAT solver", path);
            let program = path
                .to_str()
                .ok_or_else(|| anyhow!("the path to the external SAT solver is not valid UTF-8"))?
                .to_string();
            let mut factory = ExternalSatSolverFactory::new(program, external_solver_options);
            factory.add_solver_listener(Box::new(|| {
                Box::<SatSolvingLogger>::default() as Box<dyn SolvingListener>
            }));
            Ok(Box::new(factory))
        }
        None => {
            info!("using the default SAT solver for problems requiring a SAT solver");
            Ok(Box::new(LoggedSatSolverFactory(DefaultSatSolverFactory)))
        }
    }
}

struct LoggedSatSolverFactory<F>(F)
where
    F: SatSolverFactory;

impl<F> SatSolverFactory for LoggedSatSolverFactory<F>
where
    F: SatSolverFactory,
{
    fn new_solver(&self) -> Box<dyn SatSolver> {
        let mut solver = self.0.new_solver();
        solver.add_listener(Box::<SatSolvingLogger>::default());
        solver
    }
}

#[derive(Default)]
struct SatSolvingLogger;

impl SolvingListener for SatSolvingLogger {
    fn solving_start(&self, n_vars: usize, n_clauses: usize) {
        debug!(
            "launching SAT solver on an instance with {} variables and {} clauses",
            n_vars, n_clauses
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        let r = match result {
            SolvingResult::Satisfiable(_) => "SAT",
            SolvingResult::Unsatisfiable => "UNSAT",
            SolvingResult::Unknown => "UNKNOWN",
        };
        debug!("SAT solver ended with result {}", r);
    }
}
