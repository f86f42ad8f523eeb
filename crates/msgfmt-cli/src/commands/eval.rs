//! Implementation of the `msgfmt eval` command.

use std::collections::HashMap;

use miette::{IntoDiagnostic, Report, Result};
use msgfmt::{compile, fallback_text, CompileOptions, ErrorHandler, Part, Resolver, Value};
use serde::Serialize;

use crate::output::TemplateDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Template string to evaluate
    #[arg(long, required = true)]
    pub template: String,

    /// Locale for plural rules and formatting (e.g., en, de, ru)
    #[arg(long, default_value = "en", env = "MSGFMT_LOCALE")]
    pub locale: String,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Parse in strict mode
    #[arg(long)]
    pub strict: bool,

    /// Replace failing placeholders with `{name}` instead of failing
    #[arg(long)]
    pub fallback: bool,

    /// Print the resolved parts instead of the joined string
    #[arg(long)]
    pub parts: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Convert a command-line value, preferring integers, then floats.
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Value::from(f)
    } else {
        Value::from(raw)
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let options = CompileOptions::builder()
        .locale(args.locale.as_str())
        .strict(args.strict)
        .build();
    let message = match compile(&args.template, &options) {
        Ok(message) => message,
        Err(err) => {
            let diagnostic = TemplateDiagnostic::from_compile_error("template", &args.template, &err);
            if args.json {
                let output = serde_json::json!({ "error": err.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("{:?}", Report::new(diagnostic));
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let params: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();

    let resolver = Resolver::builder()
        .locale(args.locale.as_str())
        .maybe_on_error(args.fallback.then_some(fallback_text as ErrorHandler))
        .build();

    match resolver.format_to_parts(&message, &params) {
        Ok(parts) => {
            let result: String = parts.iter().map(ToString::to_string).collect();
            if args.json {
                let output = EvalResult {
                    result,
                    parts: args.parts.then_some(parts),
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else if args.parts {
                for part in &parts {
                    println!("{}", serde_json::to_string(part).into_diagnostic()?);
                }
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Evaluation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn values_prefer_numbers() {
        assert_eq!(parse_value("3".to_string()), Value::Number(3));
        assert_eq!(parse_value("2.5".to_string()), Value::Float(2.5));
        assert_eq!(parse_value("inf".to_string()), Value::from("inf"));
        assert_eq!(parse_value("Ana".to_string()), Value::from("Ana"));
    }
}
