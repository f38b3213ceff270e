use std::ffi::OsString;

use crate::error::LogError;
use crate::log::{try_init, LoggerRegistry};
use clap::{ArgMatches, Args, Command, FromArgMatches as _};

/// Default cli arguments for the log registry runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Write debug messages to standard output instead of discarding them
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

fn create_runner_cli() -> Command {
    let cli = Command::new("log-registry");
    BaseArgs::augment_args(cli)
}

/// Installs the loggers from the command line and runs a setup function with custom cli
/// arguments.
///
/// # Parameters
/// - `setup_fn`: A function that takes the installed `LoggerRegistry`, a `BaseArgs` struct and
///   an `Option<A>` where `A` is the custom cli arguments struct
///
/// # Errors
/// Returns an error if argument parsing or the setup function fails
pub fn run_with_custom_args<A, F>(setup_fn: F) -> Result<LoggerRegistry, Box<dyn std::error::Error>>
where
    A: Args,
    F: FnOnce(&LoggerRegistry, BaseArgs, Option<A>) -> Result<(), LogError>,
{
    let mut cli = create_runner_cli();
    cli = A::augment_args(cli);
    let matches = cli.get_matches();
    run_with_matches(&matches, setup_fn)
}

/// Installs the loggers from the command line and runs a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes the installed `LoggerRegistry` and a `BaseArgs` struct
///
/// # Errors
/// Returns an error if argument parsing or the setup function fails
pub fn run_with_args<F>(setup_fn: F) -> Result<LoggerRegistry, Box<dyn std::error::Error>>
where
    F: FnOnce(&LoggerRegistry, BaseArgs, Option<PlaceholderCustom>) -> Result<(), LogError>,
{
    let cli = create_runner_cli();
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, None, setup_fn)
}

/// Same as [`run_with_custom_args`], but parses `args` instead of the process arguments. The
/// first item is the program name.
///
/// # Errors
/// Returns an error if argument parsing or the setup function fails
pub fn run_with_args_from<A, F, I, T>(
    args: I,
    setup_fn: F,
) -> Result<LoggerRegistry, Box<dyn std::error::Error>>
where
    A: Args,
    F: FnOnce(&LoggerRegistry, BaseArgs, Option<A>) -> Result<(), LogError>,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = A::augment_args(create_runner_cli());
    let matches = cli.try_get_matches_from(args)?;
    run_with_matches(&matches, setup_fn)
}

fn run_with_matches<A, F>(
    matches: &ArgMatches,
    setup_fn: F,
) -> Result<LoggerRegistry, Box<dyn std::error::Error>>
where
    A: Args,
    F: FnOnce(&LoggerRegistry, BaseArgs, Option<A>) -> Result<(), LogError>,
{
    let base_args_matches = BaseArgs::from_arg_matches(matches)?;
    let custom_matches = A::from_arg_matches(matches)?;
    run_with_args_internal(base_args_matches, Some(custom_matches), setup_fn)
}

fn run_with_args_internal<A, F>(
    args: BaseArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<LoggerRegistry, Box<dyn std::error::Error>>
where
    F: FnOnce(&LoggerRegistry, BaseArgs, Option<A>) -> Result<(), LogError>,
{
    // Loggers must exist before anything else runs
    let registry = try_init(args.debug)?;

    // Run the provided Fn
    setup_fn(&registry, args, custom_args)?;
    Ok(registry)
}
