use std::ffi::OsString;

mod app;

const COMMON_ARGS: [&str; 2] = ["--logging-level", "off"];

fn main() {
    let app = app::common::create_app_helper();
    app.launch_app_with_args(translate_args(std::env::args_os().collect()));
}

// Translates the flat ICCMA command line into the subcommand interface of the app.
fn translate_args(args: Vec<OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let program_name = args
        .next()
        .unwrap_or_else(|| OsString::from(env!("CARGO_BIN_NAME")));
    let real_args = args.collect::<Vec<OsString>>();
    let (command, extra_args): (&str, &[&str]) = if real_args.is_empty() {
        ("authors", &[])
    } else if real_args == ["--problems"] {
        ("problems", &[])
    } else {
        ("solve", &["--reader", "iccma23"])
    };
    let passed_args = if command == "solve" { real_args } else { vec![] };
    std::iter::once(program_name)
        .chain(std::iter::once(OsString::from(command)))
        .chain(passed_args)
        .chain(extra_args.iter().map(OsString::from))
        .chain(COMMON_ARGS.iter().map(OsString::from))
        .collect()
}
