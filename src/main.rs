/*!
Main binary for jsonvet.

Checks a `.json` file, or every `*.json` file in a directory, against the
JSON grammar and prints a pass/fail line per file. A file whose name
contains `fail` is expected to be invalid; the process exits nonzero if any
file's outcome differs from its expectation.
*/

use anyhow::{bail, Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use colored::Colorize;
use log::debug;
use std::fs;
use std::io::stdout;
use std::path::{Path, PathBuf};

use jsonvet::validator::DEFAULT_MAX_DEPTH;
use jsonvet::{commands, is_valid_json_with, ValidateOptions};

/// Validate JSON files against the RFC 8259 grammar.
#[derive(Parser)]
#[command(name = "jv", version, about, arg_required_else_help = true, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to a `.json` file, or a directory whose `*.json` files to check
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,
    /// Maximum allowed nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Require the top-level value to be an object or array
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Print pass/fail totals after all files
    #[arg(long, action = ArgAction::SetTrue)]
    summary: bool,
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

/// Available subcommands for `jv`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jv to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Outcome of checking one file against its filename expectation.
struct FileReport {
    valid: bool,
    expected_invalid: bool,
}

impl FileReport {
    /// Whether the result matched what the filename promised.
    fn as_expected(&self) -> bool {
        self.valid != self.expected_invalid
    }
}

/// Entry point for main binary.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "jv", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                commands::generate::generate_man_pages(&Args::command(), output_dir)?;
            }
        },
        None => {
            let path = args
                .input
                .ok_or_else(|| anyhow::anyhow!("PATH required unless using a subcommand"))?;
            let options = ValidateOptions {
                max_depth: args.max_depth,
                require_container: args.strict,
            };
            run_checks(&path, options, args.summary)?;
        }
    }

    Ok(())
}

/// Check `path` (a file, or every `*.json` file in a directory) and print a
/// line per file. Fails with a nonzero exit if any file's outcome differs
/// from its filename expectation.
fn run_checks(path: &Path, options: ValidateOptions, summary: bool) -> Result<()> {
    let files = collect_json_files(path)?;
    if files.is_empty() {
        bail!("no .json files found under {}", path.display());
    }

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut mismatches = 0usize;

    for file in &files {
        let report = check_file(file, options)
            .with_context(|| format!("checking {}", file.display()))?;

        if report.valid {
            passed += 1;
        } else {
            failed += 1;
        }
        if !report.as_expected() {
            mismatches += 1;
        }
    }

    if summary {
        println!("{passed} passed, {failed} failed, {} total", files.len());
    }

    if mismatches > 0 {
        bail!("{mismatches} file(s) did not match their expected outcome");
    }
    Ok(())
}

/// The files to check: `path` itself, or its `*.json` entries sorted by name
/// for deterministic output.
fn collect_json_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .with_context(|| format!("reading directory {}", path.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Validate one file and print its PASS/FAIL line.
fn check_file(file: &Path, options: ValidateOptions) -> Result<FileReport> {
    let name = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
    // Files named like `fail33.json` are conformance fixtures that are
    // supposed to be rejected.
    let expected_invalid = name.contains("fail");

    let content = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    debug!("checking {} ({} bytes)", file.display(), content.len());

    let report = match is_valid_json_with(&content, options) {
        Ok(()) => {
            println!("{} {}", "PASS".green().bold(), file.display());
            FileReport {
                valid: true,
                expected_invalid,
            }
        }
        Err(err) => {
            println!("{} {}: {err}", "FAIL".red().bold(), file.display());
            FileReport {
                valid: false,
                expected_invalid,
            }
        }
    };

    if !report.as_expected() {
        let expectation = if report.expected_invalid { "invalid" } else { "valid" };
        eprintln!(
            "{} {} was expected to be {expectation}",
            "MISMATCH".yellow().bold(),
            file.display()
        );
    }

    Ok(report)
}
