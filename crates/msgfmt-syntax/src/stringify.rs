//! Serialize a token tree back into template source.

use crate::ast::{FunctionParam, SelectorNode, Token};
use crate::parser::ParseOptions;

/// Serialize a token tree parsed with default options.
pub fn stringify(tokens: &[Token]) -> String {
    stringify_with(tokens, &ParseOptions::default())
}

/// Serialize a token tree so that parsing the result with `options` yields the
/// same tree.
pub fn stringify_with(tokens: &[Token], options: &ParseOptions) -> String {
    let mut writer = Writer {
        out: String::new(),
        strict: options.strict,
    };
    writer.tokens(tokens, false);
    writer.out
}

struct Writer {
    out: String,
    strict: bool,
}

impl Writer {
    fn tokens(&mut self, tokens: &[Token], in_plural: bool) {
        for token in tokens {
            match token {
                Token::Content(text) => self.content(text, in_plural),
                Token::Argument { arg } => {
                    self.out.push('{');
                    self.out.push_str(arg);
                    self.out.push('}');
                }
                Token::Function { arg, key, param } => {
                    self.out.push('{');
                    self.out.push_str(arg);
                    self.out.push_str(", ");
                    self.out.push_str(key);
                    match param {
                        Some(FunctionParam::Raw(raw)) => {
                            self.out.push_str(", ");
                            self.out.push_str(raw);
                        }
                        Some(FunctionParam::Tokens(param)) => {
                            self.out.push_str(", ");
                            self.tokens(param, in_plural);
                        }
                        None => {}
                    }
                    self.out.push('}');
                }
                Token::Selector(node) => self.selector(node, in_plural),
                Token::Octothorpe => self.out.push('#'),
            }
        }
    }

    fn selector(&mut self, node: &SelectorNode, in_plural: bool) {
        let in_plural = if node.kind.is_plural() {
            true
        } else {
            !self.strict && in_plural
        };
        self.out.push('{');
        self.out.push_str(&node.arg);
        self.out.push_str(", ");
        self.out.push_str(node.kind.keyword());
        self.out.push(',');
        if let Some(offset) = node.offset {
            self.out.push_str(" offset:");
            self.out.push_str(&offset.to_string());
        }
        for case in &node.cases {
            self.out.push(' ');
            self.out.push_str(&case.key);
            self.out.push('{');
            self.tokens(&case.body, in_plural);
            self.out.push('}');
        }
        self.out.push('}');
    }

    /// Write literal text, doubling apostrophes and quoting runs of
    /// structural characters.
    fn content(&mut self, text: &str, in_plural: bool) {
        let special = |c: char| c == '{' || c == '}' || (in_plural && c == '#');
        let mut quoting = false;
        for c in text.chars() {
            // `''` reads as one apostrophe both inside and outside a quoted run.
            if c == '\'' {
                self.out.push_str("''");
            } else {
                if special(c) != quoting {
                    self.out.push('\'');
                    quoting = !quoting;
                }
                self.out.push(c);
            }
        }
        if quoting {
            self.out.push('\'');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn round_trip(source: &str, options: &ParseOptions) {
        let tokens = parse(source, options).unwrap();
        let printed = stringify_with(&tokens, options);
        assert_eq!(parse(&printed, options).unwrap(), tokens, "printed: {printed}");
    }

    #[test]
    fn quotes_grouped_braces() {
        let tokens = vec![Token::Content("a{{b}".to_string())];
        assert_eq!(stringify(&tokens), "a'{{'b'}'");
    }

    #[test]
    fn apostrophes_next_to_quoted_runs() {
        round_trip("it''s '{'''", &ParseOptions::default());
        round_trip("'{'''{x}", &ParseOptions::default());
        round_trip("'{''{'", &ParseOptions::default());
    }

    #[test]
    fn hash_outside_plural_is_plain() {
        let tokens = vec![Token::Content("#1".to_string())];
        assert_eq!(stringify(&tokens), "#1");
    }

    #[test]
    fn hash_under_select_follows_mode() {
        let source = "{n, plural, other{{g, select, other{'#' #}}}}";
        round_trip(source, &ParseOptions::default());
        round_trip(source, &ParseOptions::strict());
    }
}
