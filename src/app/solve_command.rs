use super::{common, logging_level_cli_arg, Command};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use log::{info, warn};
use reducto::{
    aa::{self, AAFramework, Argument, LabelType, Query, Semantics},
    io::{
        AspartixReader, AspartixWriter, Iccma23Reader, Iccma23Writer, InstanceReader,
        ResponseWriter,
    },
    solvers::{
        CredulousAcceptanceComputer, ExtensionEnumerator, GroundedSemanticsSolver,
        InitialSetsSolver, PreferredSemanticsSolver, SingleExtensionComputer,
        SkepticalAcceptanceComputer, UnchallengedSemanticsSolver,
    },
};

const CMD_NAME: &str = "solve";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Solves an argumentation framework problem")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .args(&common::problem_args())
            .arg(common::reader_arg())
            .arg(common::threads_arg())
            .args(&common::external_sat_solver_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        match common::required_value(arg_matches, common::ARG_READER)? {
            "apx" => solve(arg_matches, AspartixReader::default(), AspartixWriter),
            _ => solve(arg_matches, Iccma23Reader::default(), Iccma23Writer),
        }
    }
}

trait SemanticsSolver<T>:
    SingleExtensionComputer<T>
    + CredulousAcceptanceComputer<T>
    + SkepticalAcceptanceComputer<T>
    + ExtensionEnumerator<T>
where
    T: LabelType,
{
}

impl<T, S> SemanticsSolver<T> for S
where
    T: LabelType,
    S: SingleExtensionComputer<T>
        + CredulousAcceptanceComputer<T>
        + SkepticalAcceptanceComputer<T>
        + ExtensionEnumerator<T>,
{
}

fn solve<T, R, W>(arg_matches: &ArgMatches<'_>, mut reader: R, writer: W) -> Result<()>
where
    T: LabelType,
    R: InstanceReader<T>,
    W: ResponseWriter<T>,
{
    let (query, semantics) =
        aa::read_problem_string(common::required_value(arg_matches, common::ARG_PROBLEM)?)?;
    let file = common::required_value(arg_matches, common::ARG_INPUT)?;
    let af = common::read_file_path(file, &mut reader)?;
    let arg = arg_matches
        .value_of(common::ARG_ARG)
        .map(|a| reader.read_arg_from_str(&af, a))
        .transpose()
        .context("while parsing the argument passed to the command line")?;
    check_arg_definition(query, arg.is_some())?;
    info!(
        "solving query {} under {} semantics",
        query.as_ref(),
        semantics.as_ref()
    );
    let mut solver = create_solver(&af, semantics, arg_matches)?;
    let mut out = std::io::stdout();
    match query {
        Query::SE => match solver.compute_one_extension()? {
            Some(mut extension) => {
                sort_by_id(&mut extension);
                writer.write_single_extension(&mut out, &extension)
            }
            None => writer.write_no_extension(&mut out),
        },
        Query::DC => {
            let status = solver.is_credulously_accepted(required_arg(arg)?)?;
            writer.write_acceptance_status(&mut out, status)
        }
        Query::DS => {
            let status = solver.is_skeptically_accepted(required_arg(arg)?)?;
            writer.write_acceptance_status(&mut out, status)
        }
        Query::EE => {
            let mut extensions = solver.enumerate_extensions()?;
            extensions.iter_mut().for_each(|e| sort_by_id(e));
            info!("found {} extension(s)", extensions.len());
            writer.write_extension_list(&mut out, &extensions)
        }
        Query::CE => {
            let count = solver.count_extensions()?;
            writer.write_extension_count(&mut out, count)
        }
    }
}

fn check_arg_definition(query: Query, has_arg: bool) -> Result<()> {
    if query.requires_argument() && !has_arg {
        return Err(anyhow!(
            "missing argument on the command line (required for query {})",
            query.as_ref()
        ));
    }
    if !query.requires_argument() && has_arg {
        warn!(
            "unexpected argument on the command line (useless for query {})",
            query.as_ref()
        );
    }
    Ok(())
}

fn required_arg<T>(arg: Option<&Argument<T>>) -> Result<&Argument<T>>
where
    T: LabelType,
{
    arg.ok_or_else(|| anyhow!("missing argument on the command line"))
}

fn sort_by_id<T>(extension: &mut [&Argument<T>])
where
    T: LabelType,
{
    extension.sort_unstable_by_key(|a| a.id());
}

fn create_solver<'a, T>(
    af: &'a AAFramework<T>,
    semantics: Semantics,
    arg_matches: &ArgMatches<'_>,
) -> Result<Box<dyn SemanticsSolver<T> + 'a>>
where
    T: LabelType,
{
    let solver: Box<dyn SemanticsSolver<T> + 'a> = match semantics {
        Semantics::GR => Box::new(GroundedSemanticsSolver::new(af)),
        Semantics::PR => {
            let mut solver = PreferredSemanticsSolver::new_with_sat_solver_factory(
                af,
                common::create_sat_solver_factory(arg_matches)?,
            );
            solver.set_search_config(common::read_search_config(arg_matches)?);
            Box::new(solver)
        }
        Semantics::UC => {
            let mut solver = UnchallengedSemanticsSolver::new_with_sat_solver_factory(
                af,
                common::create_sat_solver_factory(arg_matches)?,
            );
            solver.set_search_config(common::read_search_config(arg_matches)?);
            Box::new(solver)
        }
        Semantics::IT => Box::new(InitialSetsSolver::new_with_sat_solver_factory(
            af,
            common::create_sat_solver_factory(arg_matches)?,
        )),
    };
    Ok(solver)
}
