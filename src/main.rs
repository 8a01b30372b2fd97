//! ahkfmt - Formatter for AutoHotkey scripts

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ahkfmt::process::format_file;
use ahkfmt::{find_directive, parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

/// Script extensions to process, compared case-insensitively
const SCRIPT_EXTENSIONS: &[&str] = &["ahk", "ah2", "ahk2"];

/// Default maximum file size in bytes (100 MB)
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What happened to one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Changed,
    Skipped,
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(&args);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config);
    }

    // An explicit config file applies to every input; otherwise each file
    // discovers its own.
    let base_config = if args.config.is_some() {
        Some(build_config(&args, None)?)
    } else {
        None
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);
    if files.is_empty() {
        if !args.silent {
            eprintln!("No AutoHotkey scripts found to format.");
        }
        return Ok(());
    }

    let changed = if args.stdout || args.jobs == Some(1) {
        process_files_sequential(&files, base_config.as_ref(), &args)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args)
    };

    if args.check && changed > 0 {
        if !args.silent {
            eprintln!("{changed} file(s) would be reformatted.");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over the CLI level
fn init_logging(args: &CliArgs) {
    let level = if args.silent {
        "off"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build configuration from a config file or discovery, then CLI overrides
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!(path = %start.display(), "no config files discovered");
        }
        for file in &discovered {
            debug!(path = %file.display(), "discovered config file");
        }
        Config::from_discovered_files(&start)
    };

    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    if args.use_tabs {
        config.use_spaces = false;
    }
    if let Some(max_blank_lines) = args.max_blank_lines {
        config.max_blank_lines = max_blank_lines;
    }
    if args.no_trim_spaces {
        config.trim_extra_spaces = false;
    }
    if args.no_indent {
        config.impose_indent = false;
    }
    if args.preserve_continuation_indent {
        config.preserve_continuation_indent = true;
    }

    debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let wanted = |path: &Path| {
        path.is_file()
            && is_script_file(path, &args.extensions)
            && !is_excluded(path, &exclude_patterns)
    };

    let mut files = Vec::new();
    for input in &args.inputs {
        if input.is_file() {
            // Explicit files are taken whatever their extension
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // follow_links reports symlink loops as errors, which are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    if wanted(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if wanted(&path) {
                        files.push(path);
                    }
                }
            }
        } else {
            warn!(path = %input.display(), "input not found");
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();
    patterns.iter().any(|pattern| {
        // Full path, then each component (covers the file name and directories)
        pattern.matches(&path_str)
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)]
fn count_lines(contents: &[u8]) -> usize {
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() || contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a script extension, default or custom
fn is_script_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCRIPT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
                || custom_extensions.iter().any(|custom| {
                    ext.eq_ignore_ascii_case(custom.strip_prefix('.').unwrap_or(custom))
                })
        })
}

/// Resolve the configuration for one file and format it
fn run_single_file(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<Outcome> {
    match base_config {
        Some(config) => process_single_file(path, config, args),
        None => process_single_file(path, &build_config(args, Some(path))?, args),
    }
}

/// Process files sequentially (for stdout output), returning the change count
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) -> usize {
    let mut changed = 0;
    for path in files {
        match run_single_file(path, base_config, args) {
            Ok(Outcome::Changed) => changed += 1,
            Ok(_) => {}
            Err(e) => error!("error formatting {}: {e}", path.display()),
        }
    }
    changed
}

/// Process files in parallel using Rayon, returning the change count
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) -> usize {
    let success_count = AtomicUsize::new(0);
    let changed_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| match run_single_file(path, base_config, args) {
        Ok(outcome) => {
            success_count.fetch_add(1, Ordering::Relaxed);
            if outcome == Outcome::Changed {
                changed_count.fetch_add(1, Ordering::Relaxed);
            }
        }
        Err(e) => {
            error_count.fetch_add(1, Ordering::Relaxed);
            error!("error formatting {}: {e}", path.display());
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let changed = changed_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent && !args.check {
        if errors == 0 {
            eprintln!("Processed {success} files, {changed} reformatted.");
        } else {
            eprintln!("Processed {success} files, {changed} reformatted, {errors} errors.");
        }
    }
    changed
}

/// Apply a `; ahkfmt:` directive found in the text to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &str, source_name: &str) {
    if let Some(overrides) = find_directive(contents) {
        debug!(source = source_name, ?overrides, "file directive");
        overrides.apply(config);
    }
}

/// Format one file according to the output mode
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<Outcome> {
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        warn!(
            "skipping {} ({} MB exceeds limit of {} MB)",
            path.display(),
            file_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
        return Ok(Outcome::Skipped);
    }

    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            warn!(
                "skipping {} ({line_count} lines exceeds limit of {max_lines})",
                path.display()
            );
            return Ok(Outcome::Skipped);
        }
    }

    let name = path.to_string_lossy();
    let text = String::from_utf8(file_contents)
        .map_err(|e| anyhow::anyhow!("{name} is not valid UTF-8: {e}"))?;

    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &text, &name);

    let mut output = Vec::new();
    format_file(Cursor::new(text.as_bytes()), &mut output, &file_config, &name)?;
    let outcome = if output == text.as_bytes() {
        Outcome::Unchanged
    } else {
        Outcome::Changed
    };

    if args.stdout {
        io::stdout().write_all(&output)?;
    } else if args.check {
        if outcome == Outcome::Changed && !args.silent {
            println!("{}", path.display());
        }
    } else if outcome == Outcome::Changed {
        debug!(file = %name, "writing");
        std::fs::write(path, &output)?;
    }

    Ok(outcome)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config) -> Result<()> {
    let mut stdin_contents = String::new();
    io::stdin().read_to_string(&mut stdin_contents)?;

    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, "stdin");

    let mut output = Vec::new();
    format_file(
        Cursor::new(stdin_contents.as_bytes()),
        &mut output,
        &file_config,
        "stdin",
    )?;
    io::stdout().write_all(&output)?;

    Ok(())
}

fn print_usage() {
    println!(
        "ahkfmt v{} - AutoHotkey script formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  ahkfmt [OPTIONS] <FILE>...");
    println!("  ahkfmt [OPTIONS] -r <DIRECTORY>");
    println!("  ahkfmt [OPTIONS] -              # Read from stdin");
    println!("  cat script.ahk | ahkfmt         # Pipe input");
    println!();
    println!("Examples:");
    println!("  ahkfmt script.ahk               # Format single file in-place");
    println!("  ahkfmt -r src/                  # Recursively format directory");
    println!("  ahkfmt --check -r src/          # List files that would change");
    println!("  ahkfmt -t 2 --use-tabs a.ahk    # Tabs, width 2");
    println!();
    println!("Run `ahkfmt --help` for all options.");
    println!();
    println!("Supported extensions: .ahk, .ah2, .ahk2 (case-insensitive)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for ahkfmt.toml in the home directory and in every");
    println!("  directory from the root down to the file being formatted.");
    println!("  More specific configs (closer to file) override less specific ones.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"a\nb\n"), 2);
        assert_eq!(count_lines(b"a\nb"), 2);
    }

    #[test]
    fn test_is_script_file() {
        assert!(is_script_file(Path::new("a.ahk"), &[]));
        assert!(is_script_file(Path::new("a.AHK"), &[]));
        assert!(is_script_file(Path::new("dir/b.ah2"), &[]));
        assert!(!is_script_file(Path::new("a.txt"), &[]));
        assert!(is_script_file(Path::new("a.txt"), &[".txt".to_string()]));
        assert!(!is_script_file(Path::new("Makefile"), &[]));
    }

    #[test]
    fn test_is_excluded() {
        let patterns = vec![Pattern::new("lib*").unwrap()];
        assert!(is_excluded(Path::new("src/lib/a.ahk"), &patterns));
        assert!(is_excluded(Path::new("libfoo.ahk"), &patterns));
        assert!(!is_excluded(Path::new("src/main.ahk"), &patterns));
        assert!(!is_excluded(Path::new("src/lib/a.ahk"), &[]));
    }
}
