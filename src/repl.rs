// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive REPL for the Lox scanner.
//!
//! Every line is scanned on its own and its tokens printed. Errors on one
//! line are reported and then forgotten before the next line is read.

use lox_lexer::lexer::KEYWORDS;
use lox_lexer::{ErrorReporter, Scanner, Token, TokenKind};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor, Helper, Validator};
use std::borrow::Cow;
use std::path::PathBuf;

/// REPL configuration constants
const HISTORY_FILE: &str = ".lox_history";
const MAX_HISTORY_SIZE: usize = 1000;
const PROMPT: &str = "> ";

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Load,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let rest = input.trim().strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".load <file>", "Scan a Lox file and print its tokens"),
        ]
    }
}

/// Helper struct for rustyline that provides completion, hints, and highlighting
#[derive(Helper, Validator)]
struct LoxHelper {
    /// Keywords and REPL commands for completion
    words: Vec<String>,
}

impl LoxHelper {
    fn new() -> Self {
        let words = KEYWORDS
            .iter()
            .copied()
            .chain([".help", ".exit", ".clear", ".version", ".load"])
            .map(String::from)
            .collect();

        Self { words }
    }
}

/// Start of the word ending at `pos`. Always a char boundary of `line`.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rev()
        .find(|&(_, c)| !c.is_ascii_alphanumeric() && c != '_' && c != '.')
        .map_or(0, |(i, c)| i + c.len_utf8())
}

impl LoxHelper {
    /// Words that extend the one under the cursor.
    fn completions(&self, line: &str, pos: usize) -> Vec<Pair> {
        let word = &line[word_start(line, pos)..pos];
        if word.is_empty() {
            return vec![];
        }

        self.words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w[word.len()..].to_string(),
            })
            .collect()
    }

    /// Rest of the first word extending the one at the end of the line.
    fn hint_for(&self, line: &str, pos: usize) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        let word = &line[word_start(line, pos)..];
        if word.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| w[word.len()..].to_string())
    }
}

impl Completer for LoxHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((pos, self.completions(line, pos)))
    }
}

impl Hinter for LoxHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        self.hint_for(line, pos).map(|rest| rest.dimmed().to_string())
    }
}

impl Highlighter for LoxHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if ReplCommand::parse(line).is_some() {
            return Cow::Owned(line.magenta().to_string());
        }

        // Diagnostics are discarded here; they are reported when the line runs.
        let mut ignored = ErrorReporter::silent();
        let tokens = Scanner::new(line).scan_tokens(&mut ignored);
        Cow::Owned(highlight_tokens(line, &tokens))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Colors each token by class. Text between tokens (whitespace, comments,
/// rejected characters) is copied through unchanged.
fn highlight_tokens(line: &str, tokens: &[Token]) -> String {
    let mut result = String::with_capacity(line.len() * 2);
    let mut last = 0;

    for token in tokens {
        let span = token.span;
        result.push_str(&line[last..span.start]);
        result.push_str(&highlight_token(&token.kind, &line[span.start..span.end]));
        last = span.end;
    }

    result.push_str(&line[last..]);
    result
}

fn highlight_token(kind: &TokenKind, text: &str) -> String {
    match kind {
        TokenKind::True | TokenKind::False | TokenKind::Nil | TokenKind::This => {
            text.blue().to_string()
        }
        _ if kind.is_keyword() => text.magenta().bold().to_string(),
        TokenKind::String(_) => text.green().to_string(),
        TokenKind::Number(_) => text.yellow().to_string(),
        _ if kind.is_operator() => text.cyan().to_string(),
        TokenKind::LeftParen | TokenKind::RightParen | TokenKind::LeftBrace | TokenKind::RightBrace => {
            text.yellow().to_string()
        }
        _ => text.to_string(),
    }
}

/// The interactive REPL for the Lox scanner
pub struct Repl {
    reporter: ErrorReporter,
    editor: Editor<LoxHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(LoxHelper::new()));

        // Determine history file path
        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lox")
            .join(HISTORY_FILE);

        if let Some(parent) = history_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::debug!(error = %e, "cannot create history directory");
            }
        }

        // A missing history file is normal on first start.
        if let Err(e) = editor.load_history(&history_path) {
            tracing::debug!(error = %e, "no history loaded");
        }

        Ok(Self {
            reporter: ErrorReporter::new(),
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    // Check for REPL commands
                    if let Some((cmd, arg)) = ReplCommand::parse(&line) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    self.scan_and_print(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        if let Err(e) = self.editor.save_history(&self.history_path) {
            tracing::warn!(error = %e, path = %self.history_path.display(), "failed to save history");
        }

        self.print_goodbye();
        Ok(())
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!(
            "  {} {} {}",
            "Lox Scanner".white().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn print_goodbye(&self) {
        println!();
        println!("{}", "Goodbye!".bright_cyan());
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => {
                self.print_help();
                CommandResult::Continue
            }
            ReplCommand::Exit => CommandResult::Exit,
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[H");
                CommandResult::Continue
            }
            ReplCommand::Version => {
                self.print_version();
                CommandResult::Continue
            }
            ReplCommand::Load => {
                if let Some(path) = arg {
                    self.load_file(path);
                } else {
                    eprintln!(
                        "{}: {} {}",
                        "Error".red().bold(),
                        ".load".cyan(),
                        "requires a file path".dimmed()
                    );
                }
                CommandResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }

        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!(
            "  {:16} {}",
            "Ctrl+C".yellow(),
            "Cancel current input".dimmed()
        );
        println!("  {:16} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:16} {}", "Ctrl+L".yellow(), "Clear screen".dimmed());
        println!("  {:16} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!("  {:16} {}", "↑/↓".yellow(), "Navigate history".dimmed());
        println!();
    }

    fn print_version(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!("{}: {}", "Lox".bright_cyan().bold(), version.yellow());
        println!("{}: {}", "Rust".dimmed(), env!("CARGO_PKG_RUST_VERSION"));
        println!();
    }

    fn load_file(&mut self, path: &str) {
        match crate::read_source(std::path::Path::new(path)) {
            Ok(source) => self.scan_and_print(&source),
            Err(e) => eprintln!("{}: {:#}", "Error".red().bold(), e),
        }
    }

    fn scan_and_print(&mut self, source: &str) {
        crate::run(source, &mut self.reporter);
        if self.reporter.had_error() {
            tracing::debug!(errors = self.reporter.error_count(), "clearing line errors");
        }
        self.reporter.reset();
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}
