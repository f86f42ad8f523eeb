//! Miette diagnostic wrapper for template compile errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use msgfmt::{CompileError, ValidationError};
use thiserror::Error;

/// A miette-compatible diagnostic for a template that failed to compile.
///
/// Fields are read by the miette derive, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(msgfmt::template))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    label: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic for the template `source`, named `name` in
    /// reports.
    pub fn from_compile_error(name: &str, source: &str, err: &CompileError) -> Self {
        let (span, label, help) = match err {
            CompileError::Syntax(parse) => {
                let span = parse.span();
                // Clamp to the source to avoid miette panics on out-of-bounds spans.
                let offset = span.offset.min(source.len());
                let len = span.len.max(1).min(source.len() - offset);
                ((offset, len).into(), "error here".to_string(), None)
            }
            CompileError::Invalid(invalid) => {
                let help = match invalid {
                    ValidationError::MissingCatchall { .. } => {
                        Some("every selector needs an `other{...}` case".to_string())
                    }
                    ValidationError::DuplicateCase { .. } => {
                        Some("remove or merge the repeated case".to_string())
                    }
                    ValidationError::InvalidPluralKey { .. } => Some(
                        "use `=N` for exact values or pass --any-plural-keys".to_string(),
                    ),
                };
                ((0, source.len()).into(), "in this message".to_string(), help)
            }
        };

        TemplateDiagnostic {
            src: NamedSource::new(name, source.to_string()),
            span,
            label,
            message: err.to_string(),
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgfmt::{compile, CompileOptions};

    fn diagnose(source: &str) -> TemplateDiagnostic {
        let err = compile(source, &CompileOptions::default()).unwrap_err();
        TemplateDiagnostic::from_compile_error("test", source, &err)
    }

    #[test]
    fn syntax_errors_point_at_the_span() {
        let diagnostic = diagnose("Hi {name");
        assert_eq!(diagnostic.span.offset(), 8);
        assert_eq!(diagnostic.span.len(), 0);
        assert!(diagnostic.help.is_none());
    }

    #[test]
    fn validation_errors_cover_the_message() {
        let diagnostic = diagnose("{g, select, a{x}}");
        assert_eq!(diagnostic.span.offset(), 0);
        assert_eq!(diagnostic.span.len(), 17);
        assert!(diagnostic.help.is_some());
    }
}
