//! TOML grammar

use super::{backslash_escape, hash_comment};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the TOML grammar
pub fn toml_grammar() -> Result<Grammar> {
    Grammar::builder("toml")
        .name("TOML")
        .alias("ini")
        .keywords(TokenClass::Literal, "true false inf nan")
        .rule(hash_comment())
        .rule(
            RuleSpec::pattern("table", r"^[ \t]*\[\[?[^\]\n]+\]\]?[ \t]*$", TokenClass::Section)
                .with_relevance(1.0),
        )
        .rule(
            RuleSpec::pattern("key", r"^[ \t]*[A-Za-z0-9_\-.]+[ \t]*=", TokenClass::Attr)
                .with_relevance(0.5),
        )
        .rule(
            RuleSpec::region("multiline_basic", r#"""""#, r#"""""#, TokenClass::String)
                .containing(backslash_escape()),
        )
        .rule(RuleSpec::region("multiline_literal", r"'''", r"'''", TokenClass::String))
        .rule(
            RuleSpec::region("basic_string", "\"", "\"", TokenClass::String)
                .containing(backslash_escape()),
        )
        .rule(RuleSpec::region("literal_string", "'", "'", TokenClass::String))
        .rule(RuleSpec::pattern(
            "datetime",
            r"\b\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?\b",
            TokenClass::Number,
        ))
        .rule(RuleSpec::pattern(
            "number",
            r"[+-]?\b(?:0x[0-9a-fA-F_]+|0o[0-7_]+|0b[01_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)\b",
            TokenClass::Number,
        ))
        .build()
}
