use super::Command;
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg};
use log::{error, info, LevelFilter};
use std::{ffi::OsString, str::FromStr, sync::Once, time::Instant};
use sysinfo::System;

static LOGGER_INIT: Once = Once::new();

const LOGGING_LEVEL_ARG: &str = "LOGGING_LEVEL";

/// Returns the CLI argument setting the minimal logging level.
///
/// Every command should accept it.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

/// Initializes the logger, if it was not already done.
///
/// Log lines are written on the standard output, and are prefixed by `![LEVEL]`
/// to be distinguishable from the answers of the solver.
pub(crate) fn init_logger(level: LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S%.3f]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply()
            .unwrap_or(());
    });
}

/// The entry point of the binaries.
///
/// Parses the command line, initializes the logger and dispatches to the selected [Command].
pub(crate) struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    /// Launches the app with the provided arguments.
    ///
    /// If the command returns an error, the error chain is logged and the process exits with status 1.
    pub(crate) fn launch_app_with_args<I, T>(self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Err(e) = self.execute_app(args) {
            error!("an error occurred: {}", e);
            e.chain()
                .skip(1)
                .for_each(|err| error!("caused by: {}", err));
            std::process::exit(1);
        }
    }

    fn execute_app<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let start_time = Instant::now();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        let matches = match app.get_matches_from_safe(args) {
            Ok(m) => m,
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                message,
                ..
            }) => {
                init_logger(LevelFilter::Info);
                message.lines().for_each(|l| info!("{}", l));
                return Ok(());
            }
            Err(e) => {
                init_logger(LevelFilter::Info);
                return Err(anyhow!("{}", e.message));
            }
        };
        let (command, command_matches) = self
            .commands
            .iter()
            .find_map(|c| matches.subcommand_matches(c.name()).map(|m| (c, m)))
            .ok_or_else(|| anyhow!("no command was provided"))?;
        let level = command_matches
            .value_of(LOGGING_LEVEL_ARG)
            .and_then(|l| LevelFilter::from_str(l).ok())
            .unwrap_or(LevelFilter::Info);
        init_logger(level);
        info!("{} {}", self.app_name, self.version);
        log_host_info();
        command.execute(command_matches)?;
        info!("exiting successfully after {:?}", start_time.elapsed());
        Ok(())
    }
}

fn log_host_info() {
    let unknown = || "[unknown]".to_string();
    let sys = System::new_all();
    info!("----------------------------------------");
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_brands = sys.cpus().iter().map(|c| c.brand()).collect::<Vec<&str>>();
    cpu_brands.sort_unstable();
    cpu_brands.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|n| n.to_string())
            .unwrap_or_else(unknown),
        cpu_brands
    );
    info!("total memory: {} MB", sys.total_memory() >> 20);
    info!("----------------------------------------");
}
