//! Implementation of the `msgfmt check` command.
//!
//! A catalog is a JSON object mapping message names to templates.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::{miette, IntoDiagnostic, Report, Result};
use msgfmt::{argument_names, compile_tokens, lint_tokens, parse, CompileError, CompileOptions};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::table::{format_summary_table, MessageSummary};
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Catalog files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Locale for plural keys and lints
    #[arg(long, default_value = "en", env = "MSGFMT_LOCALE")]
    pub locale: String,

    /// Only accept the plural keys the locale uses
    #[arg(long, conflicts_with = "any_plural_keys")]
    pub locale_keys: bool,

    /// Accept any plural key
    #[arg(long)]
    pub any_plural_keys: bool,

    /// Parse in strict mode
    #[arg(long)]
    pub strict: bool,

    /// Exit with non-zero code if any lint warning is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    fn compile_options(&self) -> CompileOptions {
        let mut options = if self.locale_keys {
            CompileOptions::for_locale_categories(self.locale.as_str())
        } else {
            CompileOptions::builder().locale(self.locale.as_str()).build()
        };
        options.strict = self.strict;
        options.strict_plural_keys = !self.any_plural_keys;
        options
    }
}

/// JSON output for one checked message.
#[derive(Debug, Serialize)]
struct MessageReport {
    file: String,
    name: String,
    error: Option<String>,
    warnings: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let options = args.compile_options();
    let mut summaries = Vec::new();
    let mut reports = Vec::new();
    let mut errors = 0usize;
    let mut warnings = 0usize;

    for path in &args.files {
        let catalog = read_catalog(path)?;
        debug!(file = %path.display(), messages = catalog.len(), "checking catalog");

        for (name, source) in &catalog {
            let label = format!("{}#{name}", path.display());
            let mut report = MessageReport {
                file: path.display().to_string(),
                name: name.clone(),
                error: None,
                warnings: Vec::new(),
            };

            let checked = parse(source, &options.parse_options())
                .map_err(CompileError::from)
                .and_then(|tokens| compile_tokens(&tokens, &options).map(|message| (tokens, message)));
            let (tokens, message) = match checked {
                Ok(checked) => checked,
                Err(err) => {
                    errors += 1;
                    report.error = Some(err.to_string());
                    reports.push(report);
                    if !args.json {
                        let diagnostic = TemplateDiagnostic::from_compile_error(&label, source, &err);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                    continue;
                }
            };

            let lints = lint_tokens(&tokens, &args.locale);
            warnings += lints.len();
            if !args.json {
                for lint in &lints {
                    eprintln!("{} {label}: {lint}", "warning:".yellow().bold());
                }
            }
            report.warnings = lints.iter().map(ToString::to_string).collect();
            reports.push(report);

            summaries.push(MessageSummary {
                name: label,
                selectors: message.selectors().len(),
                variants: message.variant_count(),
                arguments: argument_names(&tokens),
                warnings: lints.len(),
            });
        }
    }

    if args.json {
        let output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{}", output);
    } else {
        if !summaries.is_empty() {
            println!("{}", format_summary_table(&summaries));
        }
        let status = format!("{errors} error(s), {warnings} warning(s)");
        if errors > 0 {
            println!("{}", status.red().bold());
        } else if warnings > 0 {
            println!("{}", status.yellow());
        } else {
            println!("{}", status.green());
        }
    }

    if errors > 0 || (args.deny_warnings && warnings > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Read a catalog, keeping messages in name order.
fn read_catalog(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read catalog {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| miette!("Catalog {} is not a JSON object of strings: {}", path.display(), e))
}
