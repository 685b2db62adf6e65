//! Built-in grammars
//!
//! This module provides grammars for common languages, plus the shared
//! rule shapes (C-style comments, quoted strings, numbers) they are
//! assembled from.

mod bash;
mod c;
mod javascript;
mod json;
mod markdown;
mod python;
mod rust;
mod toml_lang;

use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Build all built-in grammars in registration order
///
/// Order matters for detection ties: earlier grammars win.
pub fn all_grammars() -> Result<Vec<Grammar>> {
    Ok(vec![
        rust::rust_grammar()?,
        c::c_grammar()?,
        python::python_grammar()?,
        javascript::javascript_grammar()?,
        json::json_grammar()?,
        toml_lang::toml_grammar()?,
        bash::bash_grammar()?,
        markdown::markdown_grammar()?,
    ])
}

/// Backslash escape inside a string
pub(super) fn backslash_escape() -> RuleSpec {
    RuleSpec::pattern("escape", r"\\(?s:.)", TokenClass::Escape)
}

/// Comment tags worth calling out
pub(super) fn doctag() -> RuleSpec {
    RuleSpec::pattern("doctag", r"\b(?:TODO|FIXME|XXX|NOTE|SAFETY)\b", TokenClass::DocTag)
}

/// `// ...` to end of line
pub(super) fn c_line_comment() -> RuleSpec {
    RuleSpec::pattern("line_comment", r"//.*$", TokenClass::Comment)
}

/// `/* ... */`
pub(super) fn c_block_comment() -> RuleSpec {
    RuleSpec::region("block_comment", r"/\*", r"\*/", TokenClass::Comment).containing(doctag())
}

/// `# ...` to end of line
pub(super) fn hash_comment() -> RuleSpec {
    RuleSpec::pattern("hash_comment", r"#.*$", TokenClass::Comment)
}

/// String delimited by `quote` with backslash escapes
pub(super) fn quoted_string(name: &str, quote: &str) -> RuleSpec {
    RuleSpec::region(name, quote, quote, TokenClass::String).containing(backslash_escape())
}

/// Decimal, hex, octal and binary numbers with an optional suffix
pub(super) fn c_number(suffix: &str) -> RuleSpec {
    let suffix = if suffix.is_empty() {
        String::new()
    } else {
        format!("(?:{})?", suffix)
    };
    let pattern = format!(
        r"\b(?:0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?){}\b",
        suffix
    );
    RuleSpec::pattern("number", &pattern, TokenClass::Number)
}
