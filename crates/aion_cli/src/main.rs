//! Aion CLI — extracts tags from Verilog and SystemVerilog source.
//!
//! `aion tags <PATHS>...` walks each given file or directory and prints one
//! line per recognised declaration, in a format modeled on Universal Ctags.

#![warn(missing_docs)]

mod tags;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Aion — a tag extractor for Verilog and SystemVerilog.
#[derive(Parser, Debug)]
#[command(name = "aion", version, about = "Verilog/SystemVerilog tag extractor")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `aion-tags.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract tags from Verilog/SystemVerilog source files.
    Tags(tags::TagsArgs),
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether verbose/debug logging was requested.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(log_level).init();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Tags(ref args) => tags::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            report_error(&e, color);
            process::exit(1);
        }
    }
}

/// Renders a CLI-level error the way every other Aion subcommand reports
/// one, via a one-off [`Diagnostic`](aion_diagnostics::Diagnostic) with no
/// source span attached.
fn report_error(err: &tags::TagsError, color: bool) {
    use aion_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticRenderer, TerminalRenderer};
    use aion_source::{SourceDb, Span};

    let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 1), err.to_string(), Span::DUMMY);
    let renderer = TerminalRenderer::new(color, 80);
    eprint!("{}", renderer.render(&diag, &SourceDb::new()));
}

/// Rough terminal detection — checks if stdout is a terminal.
fn atty_is_terminal() -> bool {
    // Use a simple heuristic: check the TERM env var.
    // In a real build we'd use the `is-terminal` crate, but this is
    // sufficient for now.
    std::env::var("TERM").is_ok()
}

/// Returns the directory a `--config` path's configuration should be loaded
/// relative to, falling back to the current directory when unset.
pub(crate) fn config_dir(config: &Option<String>) -> PathBuf {
    match config {
        Some(path) => PathBuf::from(path)
            .parent()
            .map(|p| p.to_path_buf())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(".")),
        None => PathBuf::from("."),
    }
}
