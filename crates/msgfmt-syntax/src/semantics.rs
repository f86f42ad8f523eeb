//! Semantic tables shared by the runtime and the `messages!` macro.
//!
//! Keyword spellings, plural category names and identifier character classes
//! live here so that compile-time and runtime validation cannot drift apart.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The key every selector must declare.
pub const CATCHALL: &str = "other";

/// CLDR plural category names in canonical order.
pub const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// The keyword that introduces a plural offset.
pub const OFFSET_KEYWORD: &str = "offset";

/// The three branching constructs of the template grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Plural,
    Select,
    #[serde(rename = "selectordinal")]
    SelectOrdinal,
}

impl SelectorKind {
    /// Parse a selector keyword as written after the argument name.
    pub fn from_keyword(keyword: &str) -> Option<SelectorKind> {
        match keyword {
            "plural" => Some(SelectorKind::Plural),
            "select" => Some(SelectorKind::Select),
            "selectordinal" => Some(SelectorKind::SelectOrdinal),
            _ => None,
        }
    }

    /// The keyword spelling of this selector kind.
    pub fn keyword(self) -> &'static str {
        match self {
            SelectorKind::Plural => "plural",
            SelectorKind::Select => "select",
            SelectorKind::SelectOrdinal => "selectordinal",
        }
    }

    /// Whether this selector branches on plural categories and sets the `#` context.
    pub fn is_plural(self) -> bool {
        !matches!(self, SelectorKind::Select)
    }

    /// The plural rule type consulted by this selector, if any.
    pub fn plural_type(self) -> Option<PluralType> {
        match self {
            SelectorKind::Plural => Some(PluralType::Cardinal),
            SelectorKind::SelectOrdinal => Some(PluralType::Ordinal),
            SelectorKind::Select => None,
        }
    }
}

impl Display for SelectorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.keyword())
    }
}

/// Cardinal ("3 files") versus ordinal ("3rd file") plural rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralType {
    Cardinal,
    Ordinal,
}

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Every category, in CLDR order.
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    /// The category's key spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Look up a category by its key spelling.
    pub fn from_name(name: &str) -> Option<PluralCategory> {
        PluralCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Parse an exact-value case key such as `=3`.
///
/// Returns `None` for anything that is not `=` followed by ASCII digits, or
/// when the value does not fit in a `u64`.
pub fn parse_exact_key(key: &str) -> Option<u64> {
    let digits = key.strip_prefix('=')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Unicode `Pattern_White_Space`.
pub fn is_pattern_white_space(c: char) -> bool {
    matches!(
        c,
        '\u{9}'..='\u{D}' | ' ' | '\u{85}' | '\u{200E}' | '\u{200F}' | '\u{2028}' | '\u{2029}'
    )
}

/// Unicode `Pattern_Syntax`.
pub fn is_pattern_syntax(c: char) -> bool {
    matches!(
        c,
        '!'..='/'
            | ':'..='@'
            | '['..='^'
            | '`'
            | '{'..='~'
            | '\u{A1}'..='\u{A7}'
            | '\u{A9}'
            | '\u{AB}'
            | '\u{AC}'
            | '\u{AE}'
            | '\u{B0}'
            | '\u{B1}'
            | '\u{B6}'
            | '\u{BB}'
            | '\u{BF}'
            | '\u{D7}'
            | '\u{F7}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{203E}'
            | '\u{2041}'..='\u{2053}'
            | '\u{2055}'..='\u{205E}'
            | '\u{2190}'..='\u{245F}'
            | '\u{2500}'..='\u{2775}'
            | '\u{2794}'..='\u{2BFF}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3020}'
            | '\u{3030}'
            | '\u{FD3E}'
            | '\u{FD3F}'
            | '\u{FE45}'
            | '\u{FE46}'
    )
}

/// Characters allowed in argument names, function names and case keys.
pub fn is_identifier_char(c: char) -> bool {
    !is_pattern_white_space(c) && !is_pattern_syntax(c) && !c.is_whitespace()
}

/// Check that a generated function name is `snake_case`.
pub fn is_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
