//! Rust grammar

use super::{backslash_escape, c_block_comment, c_line_comment, c_number};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the Rust grammar
pub fn rust_grammar() -> Result<Grammar> {
    Grammar::builder("rust")
        .name("Rust")
        .alias("rs")
        .keywords(
            TokenClass::Keyword,
            "as async await break const continue crate|2 dyn|2 else enum extern false fn|2 for \
             if impl|2 in let loop match mod move mut|2 pub|2 ref return self Self static struct \
             super trait true type union unsafe|2 use where while",
        )
        .keywords(TokenClass::Literal, "Some None Ok Err")
        .keywords(
            TokenClass::Type,
            "bool char str u8 u16 u32 u64 u128 usize|2 i8 i16 i32 i64 i128 isize|2 f32 f64 \
             String Vec Box Rc Arc Option Result HashMap",
        )
        .rule(c_line_comment())
        .rule(c_block_comment())
        .rule(RuleSpec::region("raw_string", r##"b?r#""##, r##""#"##, TokenClass::String).with_relevance(1.0))
        .rule(RuleSpec::region("raw_string_plain", r#"b?r""#, "\"", TokenClass::String))
        .rule(RuleSpec::region("string", r#"b?""#, "\"", TokenClass::String).containing(backslash_escape()))
        .rule(RuleSpec::pattern(
            "char",
            r"b?'(?:\\(?:x[0-9a-fA-F]{2}|u\{[0-9a-fA-F]{1,6}\}|.)|[^'\\\n])'",
            TokenClass::String,
        ))
        .rule(RuleSpec::pattern("lifetime", r"'[A-Za-z_]\w*\b", TokenClass::Symbol))
        .rule(RuleSpec::pattern("attribute", r"#!?\[[^\]\n]*\]", TokenClass::Meta).with_relevance(1.0))
        .rule(RuleSpec::pattern("macro", r"\b[a-z_][a-z0-9_]*!", TokenClass::BuiltIn).with_relevance(1.0))
        .rule(c_number("u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64"))
        .rule(RuleSpec::pattern("path", r"::", TokenClass::Punctuation).with_relevance(0.5))
        .rule(RuleSpec::pattern("operator", r"[+\-*/%&|^!<>=@?]+", TokenClass::Operator))
        .build()
}
