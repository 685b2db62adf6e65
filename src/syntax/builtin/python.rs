//! Python grammar

use super::{backslash_escape, doctag, c_number};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the Python grammar
pub fn python_grammar() -> Result<Grammar> {
    Grammar::builder("python")
        .name("Python")
        .alias("py")
        .alias("gyp")
        .keywords(
            TokenClass::Keyword,
            "and as assert async await break class continue def|2 del elif|3 else except|2 \
             finally for from global if import in is lambda nonlocal|3 not or pass|2 raise \
             return try while with yield",
        )
        .keywords(TokenClass::Literal, "False|2 None|2 True|2 Ellipsis NotImplemented")
        .keywords(
            TokenClass::BuiltIn,
            "abs all any bool bytes dict enumerate|2 filter float getattr hasattr int isinstance|2 \
             len list map max min object open print range|2 repr set sorted str sum super tuple \
             type zip self|2 cls",
        )
        .illegal(r"</|=>|\?\?")
        .rule(
            RuleSpec::pattern("comment", r"#.*$", TokenClass::Comment),
        )
        .rule(
            RuleSpec::region("docstring", r#"[rRbBuUfF]{0,2}""""#, r#"""""#, TokenClass::String)
                .containing(doctag())
                .with_relevance(1.0),
        )
        .rule(RuleSpec::region("docstring_single", r"[rRbBuUfF]{0,2}'''", r"'''", TokenClass::String))
        .rule(
            RuleSpec::region("double_string", r#"[rRbBuUfF]{0,2}""#, "\"", TokenClass::String)
                .containing(backslash_escape()),
        )
        .rule(
            RuleSpec::region("single_string", r"[rRbBuUfF]{0,2}'", "'", TokenClass::String)
                .containing(backslash_escape()),
        )
        .rule(RuleSpec::pattern("decorator", r"^[ \t]*@[\w.]+", TokenClass::Meta).with_relevance(1.0))
        .rule(c_number("[jJ]"))
        .rule(RuleSpec::pattern("operator", r"[+\-*/%&|^!<>=@~:]+", TokenClass::Operator))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;

    #[test]
    fn test_python_def() {
        let grammar = python_grammar().unwrap();
        let text = "def greet(name):\n    return f\"hi {name}\"";
        let keywords: Vec<_> = tokenize(text, &grammar)
            .filter(|t| t.keyword)
            .map(|t| t.text(text).to_string())
            .collect();
        assert_eq!(keywords, vec!["def", "return"]);
    }

    #[test]
    fn test_docstring_spans_lines() {
        let grammar = python_grammar().unwrap();
        let text = "\"\"\"Doc\nTODO: more\n\"\"\"\nx = 1";
        let tokens: Vec<_> = tokenize(text, &grammar).collect();
        assert_eq!(tokens[0].text(text), "\"\"\"");
        assert!(tokens
            .iter()
            .any(|t| t.class == TokenClass::DocTag && t.text(text) == "TODO"));
        assert!(tokens.iter().any(|t| t.class == TokenClass::Number));
    }

    #[test]
    fn test_prefixed_string() {
        let grammar = python_grammar().unwrap();
        let text = "b'\\x00'";
        let tokens: Vec<_> = tokenize(text, &grammar).collect();
        assert_eq!(tokens[0].text(text), "b'");
        assert!(tokens.iter().any(|t| t.class == TokenClass::Escape));
    }
}
