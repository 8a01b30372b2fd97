//! Command-line interface for ahkfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Columns per indent level
    pub tab_width: Option<usize>,

    /// Indent with tab characters
    pub use_tabs: bool,

    /// Maximum consecutive blank lines (-1 = unlimited)
    pub max_blank_lines: Option<i32>,

    /// Keep runs of interior spaces
    pub no_trim_spaces: bool,

    /// Disable re-indentation
    pub no_indent: bool,

    /// Keep the author's indentation on continuation lines
    pub preserve_continuation_indent: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Report files that would change without writing them
    pub check: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Script extensions in addition to the defaults
    pub extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("ahkfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Formatter for AutoHotkey scripts")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format (- reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("tab-width")
                .short('t')
                .long("tab-width")
                .help("Columns per indent level [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("use-tabs")
                .long("use-tabs")
                .help("Indent with tabs instead of spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-blank-lines")
                .short('b')
                .long("max-blank-lines")
                .help("Maximum consecutive blank lines, -1 for unlimited [default: 1]")
                .value_name("NUM")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            Arg::new("no-trim-spaces")
                .long("no-trim-spaces")
                .help("Keep runs of spaces inside lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .help("Disable re-indentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preserve-continuation-indent")
                .long("preserve-continuation-indent")
                .help("Keep original indentation of continuation lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("List files that would change and exit with status 1")
                .action(ArgAction::SetTrue)
                .conflicts_with("stdout"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively format directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ext")
                .short('x')
                .long("ext")
                .help("Additional script extension (can be repeated, e.g., -x ahk1 -x txt)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-max-lines")
                .short('m')
                .long("exclude-max-lines")
                .help("Exclude files with more than this many lines")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, discovered files, directives)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn strings(matches: &clap::ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        tab_width: matches.get_one::<usize>("tab-width").copied(),
        use_tabs: matches.get_flag("use-tabs"),
        max_blank_lines: matches.get_one::<i32>("max-blank-lines").copied(),
        no_trim_spaces: matches.get_flag("no-trim-spaces"),
        no_indent: matches.get_flag("no-indent"),
        preserve_continuation_indent: matches.get_flag("preserve-continuation-indent"),
        stdout: matches.get_flag("stdout"),
        check: matches.get_flag("check"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: strings(matches, "exclude"),
        extensions: strings(matches, "ext"),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}
