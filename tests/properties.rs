//! Property-based invariant tests for tokenizing and rendering.
//!
//! 1. Token ranges are contiguous and cover the input for every grammar.
//! 2. Highlighting is deterministic.
//! 3. Rendered markup escapes every character of the input exactly once.
//! 4. Spans are balanced, even for unterminated regions.
//! 5. Low-confidence results are the escaped input.

use std::sync::OnceLock;

use autohighlight::syntax::{escape_html, tokenize};
use autohighlight::{GrammarRegistry, Highlighter, SealedRegistry};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn builtins() -> &'static SealedRegistry {
    static REGISTRY: OnceLock<SealedRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| GrammarRegistry::with_builtins().unwrap().seal())
}

fn highlighter() -> &'static Highlighter {
    static HIGHLIGHTER: OnceLock<Highlighter> = OnceLock::new();
    HIGHLIGHTER.get_or_init(|| Highlighter::new(builtins().clone(), Default::default()))
}

/// Text built from the characters grammars care about
fn code_strategy() -> impl Strategy<Value = String> {
    "[a-z_ ]{0,6}|[a-zA-Z0-9_ \t\n{}()\\[\\];,.:=+*/<>&|!#$@%'\"`\\\\-]{0,120}"
}

fn unescape(markup: &str) -> String {
    let tags = regex::Regex::new(r#"<span class="[^"]*">|</span>"#).unwrap();
    tags.replace_all(markup, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Contiguous coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tokens_cover_input(text in code_strategy()) {
        for grammar in builtins().all() {
            let mut expected = 0;
            for token in tokenize(&text, grammar) {
                prop_assert_eq!(token.start(), expected, "gap in {} for {:?}", grammar.id(), text);
                prop_assert!(!token.is_empty());
                expected = token.end();
            }
            prop_assert_eq!(expected, text.len());
        }
    }

    #[test]
    fn tokens_cover_any_unicode(text in any::<String>()) {
        for grammar in builtins().all() {
            let total: usize = tokenize(&text, grammar).map(|t| t.len()).sum();
            prop_assert_eq!(total, text.len(), "coverage mismatch in {}", grammar.id());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn highlighting_is_deterministic(text in code_strategy()) {
        let first = highlighter().highlight_auto(&text);
        let second = highlighter().highlight_auto(&text);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Escaping and 4. balanced spans
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn markup_round_trips(text in code_strategy()) {
        let result = highlighter().highlight_auto(&text);
        prop_assert_eq!(unescape(&result.value), text);
    }

    #[test]
    fn spans_are_balanced(text in code_strategy()) {
        for grammar in builtins().names() {
            let result = highlighter().highlight(&text, grammar).unwrap();
            let opened = result.value.matches("<span").count();
            let closed = result.value.matches("</span>").count();
            prop_assert_eq!(opened, closed, "unbalanced spans for {}", grammar);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Low confidence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_language_means_plain_markup(text in code_strategy()) {
        let result = highlighter().highlight_auto(&text);
        if result.language.is_empty() {
            prop_assert_eq!(result.value, escape_html(&text));
        } else {
            prop_assert!(builtins().get(&result.language).is_ok());
        }
    }
}
