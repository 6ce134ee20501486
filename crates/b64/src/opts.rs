use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command, ValueHint};
use log::LevelFilter;

const ARGS_ENCODE: &str = "encode";
const ARGS_DECODE: &str = "decode";
const ARGS_INPUT: &str = "input";
const ARGS_OUTPUT: &str = "output";
const ARGS_PRINT: &str = "print";
const ARGS_VERBOSE: &str = "verbose";
const ARGS_QUIET: &str = "quiet";

/// Overrides the level chosen with `-v`/`-q`.
pub const LOG_ENV: &str = "B64_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

impl Mode {
    /// Appended to the input's stem when no output path is given.
    pub fn suffix(self) -> &'static str {
        match self {
            Mode::Encode => "_enc.txt",
            Mode::Decode => "_dec.bin",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encode => f.write_str("encode"),
            Mode::Decode => f.write_str("decode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub print: bool,
    pub log_level: LevelFilter,
}

fn build_cli_args() -> Command {
    Command::new("b64")
        .about("Encode a file to base64 (76 columns, CRLF) or decode it back")
        .arg(
            Arg::new(ARGS_ENCODE)
                .help("Encode the input file")
                .action(ArgAction::SetTrue)
                .short('e')
                .long("encode"),
        )
        .arg(
            Arg::new(ARGS_DECODE)
                .help("Decode the input file")
                .action(ArgAction::SetTrue)
                .short('d')
                .long("decode"),
        )
        .group(
            ArgGroup::new("mode")
                .args([ARGS_ENCODE, ARGS_DECODE])
                .required(true),
        )
        .arg(
            Arg::new(ARGS_INPUT)
                .help("Input file path")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new(ARGS_OUTPUT)
                .help("Output file path [default: input stem + _enc.txt or _dec.bin]")
                .num_args(1)
                .value_name("OUTPUT")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .short('o')
                .long("output"),
        )
        .arg(
            Arg::new(ARGS_PRINT)
                .help("Also print the result to stdout")
                .action(ArgAction::SetTrue)
                .short('p')
                .long("print"),
        )
        .arg(
            Arg::new(ARGS_VERBOSE)
                .help("Show verbose output")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .long("verbose"),
        )
        .arg(
            Arg::new(ARGS_QUIET)
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARGS_VERBOSE)
                .short('q')
                .long("quiet"),
        )
}

/// Maps `-v` count and `-q` to a level; `env_level` wins when set.
pub fn log_level(verbose: u8, quiet: bool, env_level: Option<&str>) -> anyhow::Result<LevelFilter> {
    if let Some(s) = env_level {
        return LevelFilter::from_str(s.trim()).context(format!("invalid {LOG_ENV} value {s:?}"));
    }
    if quiet {
        return Ok(LevelFilter::Error);
    }
    Ok(match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

fn options_from_matches(args: &ArgMatches, env_level: Option<&str>) -> anyhow::Result<Options> {
    let mode = if args.get_flag(ARGS_ENCODE) {
        Mode::Encode
    } else {
        Mode::Decode
    };
    let input = args
        .get_one::<PathBuf>(ARGS_INPUT)
        .cloned()
        .ok_or_else(|| anyhow!("no input file given"))?;
    let verbose = args.get_one::<u8>(ARGS_VERBOSE).copied().unwrap_or(0);

    Ok(Options {
        mode,
        input,
        output: args.get_one::<PathBuf>(ARGS_OUTPUT).cloned(),
        print: args.get_flag(ARGS_PRINT),
        log_level: log_level(verbose, args.get_flag(ARGS_QUIET), env_level)?,
    })
}

/// Parses an explicit argument list; `args` includes the program name.
pub fn parse_from<I, T>(args: I, env_level: Option<&str>) -> anyhow::Result<Options>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli_args().try_get_matches_from(args)?;
    options_from_matches(&matches, env_level)
}

/// Parses the process arguments. Usage errors exit through clap.
pub fn parse_clap() -> anyhow::Result<Options> {
    let matches = build_cli_args().get_matches();
    let env_level = env::var(LOG_ENV).ok();
    options_from_matches(&matches, env_level.as_deref())
}
