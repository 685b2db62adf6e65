//! Markdown grammar

use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the Markdown grammar
///
/// Markdown has no keywords; it is detected from structure alone.
pub fn markdown_grammar() -> Result<Grammar> {
    Grammar::builder("markdown")
        .name("Markdown")
        .alias("md")
        .alias("mkdown")
        .rule(
            RuleSpec::region("fenced_code", r"^[ \t]*```[\w+\-]*[ \t]*$", r"^[ \t]*```", TokenClass::Code)
                .with_relevance(1.0),
        )
        .rule(RuleSpec::pattern("header", r"^#{1,6}[ \t]+\S.*$", TokenClass::Section).with_relevance(1.0))
        .rule(RuleSpec::pattern("underline", r"^(?:=+|-+)[ \t]*$", TokenClass::Section))
        .rule(RuleSpec::pattern("blockquote", r"^[ \t]*>.*$", TokenClass::Comment))
        .rule(RuleSpec::pattern("bullet", r"^[ \t]*(?:[*+\-]|\d+\.)[ \t]+", TokenClass::Bullet))
        .rule(RuleSpec::pattern("strong", r"\*\*[^*\n]+\*\*|__[^_\n]+__", TokenClass::Strong))
        .rule(RuleSpec::pattern("emphasis", r"\*[^*\s][^*\n]*\*|\b_[^_\n]+_\b", TokenClass::Emphasis))
        .rule(RuleSpec::pattern("inline_code", r"`[^`\n]+`", TokenClass::Code))
        .rule(
            RuleSpec::pattern("link", r"!?\[[^\]\n]*\]\([^)\n]*\)", TokenClass::Link).with_relevance(1.0),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::{tokenize, Role};

    fn classes(text: &str) -> Vec<(TokenClass, String)> {
        let grammar = markdown_grammar().unwrap();
        tokenize(text, &grammar)
            .filter(|t| !t.class.is_plain())
            .map(|t| (t.class, t.text(text).to_string()))
            .collect()
    }

    #[test]
    fn test_header_and_link() {
        let tokens = classes("# Title\n\nSee [docs](https://example.com).\n");
        assert_eq!(tokens[0], (TokenClass::Section, "# Title".to_string()));
        assert!(tokens.contains(&(TokenClass::Link, "[docs](https://example.com)".to_string())));
    }

    #[test]
    fn test_fenced_code_block() {
        let grammar = markdown_grammar().unwrap();
        let text = "```rust\nlet x = 1;\n```\n";
        let mut tokens = tokenize(text, &grammar);
        let collected: Vec<_> = tokens.by_ref().collect();
        assert_eq!(collected[0].role, Role::Open);
        assert_eq!(collected[0].text(text), "```rust");
        assert!(collected.iter().any(|t| t.role == Role::Close));
        assert!(!tokens.unterminated());
    }

    #[test]
    fn test_inline_markup() {
        let tokens = classes("- **bold** and *soft* with `code`\n");
        assert_eq!(tokens[0], (TokenClass::Bullet, "- ".to_string()));
        assert!(tokens.contains(&(TokenClass::Strong, "**bold**".to_string())));
        assert!(tokens.contains(&(TokenClass::Emphasis, "*soft*".to_string())));
        assert!(tokens.contains(&(TokenClass::Code, "`code`".to_string())));
    }
}
