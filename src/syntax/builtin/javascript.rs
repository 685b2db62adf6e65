//! JavaScript grammar

use super::{backslash_escape, c_line_comment, c_number, quoted_string};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the JavaScript grammar
pub fn javascript_grammar() -> Result<Grammar> {
    let jsdoc = RuleSpec::pattern("doctag", r"@[A-Za-z]+|\b(?:TODO|FIXME)\b", TokenClass::DocTag);
    let interpolation = RuleSpec::region("subst", r"\$\{", r"\}", TokenClass::Variable)
        .containing(c_number(""));

    Grammar::builder("javascript")
        .name("JavaScript")
        .alias("js")
        .alias("mjs")
        .keywords(
            TokenClass::Keyword,
            "as async await break case catch class const|2 continue debugger default delete do \
             else export extends finally for from function|2 if import in instanceof let new \
             of return static super switch this throw try typeof var|2 void while with yield",
        )
        .keywords(TokenClass::Literal, "true false null|2 undefined|2 NaN Infinity")
        .keywords(
            TokenClass::BuiltIn,
            "console|2 window document|2 require|2 module exports Promise JSON Math Object Array \
             String Number Boolean Symbol Map Set Error setTimeout",
        )
        .illegal(r"</|\$\$|#include")
        .rule(c_line_comment())
        .rule(RuleSpec::region("block_comment", r"/\*", r"\*/", TokenClass::Comment).containing(jsdoc))
        .rule(quoted_string("double_string", "\""))
        .rule(quoted_string("single_string", "'"))
        .rule(
            RuleSpec::region("template", "`", "`", TokenClass::String)
                .containing(backslash_escape())
                .containing(interpolation)
                .with_relevance(1.0),
        )
        .rule(c_number("n"))
        .rule(RuleSpec::pattern("arrow", r"=>", TokenClass::Operator).with_relevance(1.0))
        .rule(RuleSpec::pattern("strict_eq", r"[=!]==", TokenClass::Operator).with_relevance(1.0))
        .rule(RuleSpec::pattern("operator", r"[+\-*/%&|^!<>=~?:]+", TokenClass::Operator))
        .build()
}
