//! msgfmt CLI entry point.
//!
//! Provides command-line tools for working with message templates:
//! - `msgfmt check` - Validate and lint message catalogs
//! - `msgfmt eval` - Resolve a template with arguments
//! - `msgfmt compile` - Print the flattened form of a template

mod commands;
mod output;

use std::error::Error;
use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_compile, run_eval, CheckArgs, CompileArgs, EvalArgs};
use tracing_subscriber::EnvFilter;

/// ICU message template tools.
#[derive(Debug, Parser)]
#[command(name = "msgfmt")]
#[command(about = "ICU message template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate and lint JSON message catalogs
    Check(CheckArgs),
    /// Resolve a template with arguments
    Eval(EvalArgs),
    /// Print the compiled form of a template
    Compile(CompileArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
///
/// Fails when a global subscriber is already installed.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let default = if verbose { "msgfmt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .try_init()
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Compile(args) => run_compile(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
