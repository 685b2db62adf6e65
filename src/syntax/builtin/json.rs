//! JSON grammar

use super::quoted_string;
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the JSON grammar
///
/// Any bare text outside strings, numbers and punctuation is illegal, so
/// JSON only qualifies for input that actually looks like JSON.
pub fn json_grammar() -> Result<Grammar> {
    Grammar::builder("json")
        .name("JSON")
        .alias("jsonc")
        .keywords(TokenClass::Literal, "true false null")
        .illegal(r"\S")
        .rule(
            RuleSpec::pattern("key", r#""(?:[^"\\\n]|\\.)*"[ \t]*:"#, TokenClass::Attr)
                .with_relevance(1.0),
        )
        .rule(quoted_string("string", "\""))
        .rule(RuleSpec::pattern(
            "number",
            r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b",
            TokenClass::Number,
        ))
        .rule(RuleSpec::pattern("punctuation", r"[{}\[\],:]", TokenClass::Punctuation))
        .build()
}
