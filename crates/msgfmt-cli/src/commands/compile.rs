//! Implementation of the `msgfmt compile` command.

use miette::{IntoDiagnostic, Report, Result};
use msgfmt::{compile, CompileOptions, CompiledMessage, Key};

use crate::output::TemplateDiagnostic;

/// Arguments for the compile command.
#[derive(Debug, clap::Args)]
pub struct CompileArgs {
    /// Template string to compile
    #[arg(long, required = true)]
    pub template: String,

    /// Locale used to route exact keys while flattening
    #[arg(long, default_value = "en", env = "MSGFMT_LOCALE")]
    pub locale: String,

    /// Parse in strict mode
    #[arg(long)]
    pub strict: bool,

    /// Print an equivalent template with selectors lifted to the top
    #[arg(long, conflicts_with = "json")]
    pub stringify: bool,

    /// Output the compiled message as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the compile command.
pub fn run_compile(args: CompileArgs) -> Result<i32> {
    let options = CompileOptions::builder()
        .locale(args.locale.as_str())
        .strict(args.strict)
        .build();
    let message = match compile(&args.template, &options) {
        Ok(message) => message,
        Err(err) => {
            let diagnostic = TemplateDiagnostic::from_compile_error("template", &args.template, &err);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&message).into_diagnostic()?);
    } else if args.stringify {
        println!("{}", message.stringify());
    } else {
        print!("{}", describe(&message));
    }
    Ok(exitcode::OK)
}

/// Human-readable listing of selectors and variants.
fn describe(message: &CompiledMessage) -> String {
    let CompiledMessage::Select {
        selectors,
        variants,
    } = message
    else {
        return format!("pattern: {}\n", message.stringify());
    };

    let mut out = String::new();
    for selector in selectors {
        let reference = &selector.reference;
        let keys: Vec<String> = selector.keys.iter().map(Key::to_string).collect();
        out.push_str(&format!(
            "selector {} {} offset {}: {}\n",
            reference.name,
            reference.kind,
            reference.offset,
            keys.join(" ")
        ));
    }
    for variant in variants {
        let keys: Vec<String> = variant.keys.iter().map(Key::to_string).collect();
        let body = variant.pattern.stringify();
        out.push_str(&format!("[{}] {}\n", keys.join(", "), body));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_variants() {
        let message = compile(
            "{n, plural, one{# file} other{# files}}",
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(
            describe(&message),
            "selector n plural offset 0: one other\n[one] # file\n[other] # files\n"
        );
    }

    #[test]
    fn describes_plain_patterns() {
        let message = compile("Hi {name}", &CompileOptions::default()).unwrap();
        assert_eq!(describe(&message), "pattern: Hi {name}\n");
    }
}
