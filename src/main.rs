// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! lox - scanner front end for the Lox scripting language
//!
//! This is the main entry point for the lox CLI/REPL.
//!
//! ## Modes
//!
//! - `lox <file>` scans a file and prints its tokens
//! - `lox -e <code>` scans a snippet from the command line
//! - `lox` starts the interactive REPL

mod repl;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use lox_lexer::{ErrorReporter, Scanner};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command line usage error (sysexits `EX_USAGE`).
const EX_USAGE: u8 = 64;
/// Input data was malformed (sysexits `EX_DATAERR`).
const EX_DATAERR: u8 = 65;
/// Input file missing or unreadable (sysexits `EX_NOINPUT`).
const EX_NOINPUT: u8 = 66;

#[derive(Parser, Debug)]
#[command(
    name = "lox",
    version,
    about = "Scan Lox source into tokens",
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Lox script to scan; starts the REPL when omitted
    script: Option<PathBuf>,

    /// Scan code given on the command line
    #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "script")]
    eval: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(&err),
    };

    init_tracing(cli.verbose);

    if let Some(code) = cli.eval {
        return run_source(&code);
    }

    match cli.script {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

/// Help and version requests succeed; every other argument error is a usage error.
fn usage_error(err: &clap::Error) -> ExitCode {
    // Nothing useful can be done if stdout/stderr are gone.
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EX_USAGE),
    }
}

/// Logs go to stderr so stdout carries only tokens and diagnostics.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lox=debug,lox_lexer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scans `source` and prints one line per token.
///
/// Diagnostics are echoed by `reporter` as they are found, before the
/// token listing.
pub(crate) fn run(source: &str, reporter: &mut ErrorReporter) {
    let tokens = Scanner::new(source).scan_tokens(reporter);
    for token in &tokens {
        println!("{token}");
    }
}

/// Start the interactive REPL
fn run_repl() -> ExitCode {
    match repl::Repl::new() {
        Ok(mut repl) => {
            if let Err(e) = repl.run() {
                eprintln!("{}: {:?}", "REPL Error".red().bold(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to initialize REPL: {:?}",
                "Error".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

/// Scan a whole file once; any diagnostic fails the run after everything is printed.
fn run_file(path: &Path) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            return ExitCode::from(EX_NOINPUT);
        }
    };

    tracing::debug!(path = %path.display(), bytes = source.len(), "scanning file");
    run_source(&source)
}

fn run_source(source: &str) -> ExitCode {
    let mut reporter = ErrorReporter::new();
    run(source, &mut reporter);

    if reporter.had_error() {
        ExitCode::from(EX_DATAERR)
    } else {
        ExitCode::SUCCESS
    }
}

/// Reads a source file. Bytes that are not UTF-8 are replaced so they still
/// reach the scanner and get reported.
pub(crate) fn read_source(path: &Path) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("could not read '{}'", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
