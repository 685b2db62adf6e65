//! Grammar definitions for syntax highlighting
//!
//! A [`Grammar`] combines ordered token rules, keyword tables and
//! detection hints for one language. Grammars are only created through
//! [`GrammarBuilder::build`], which validates every pattern, so a
//! `Grammar` value is always usable by the tokenizer.

use std::collections::HashMap;

use regex::Regex;

use super::rules::{compile_pattern, Rule, RuleSpec};
use super::tokens::TokenClass;
use crate::error::{HighlightError, Result};

/// Default pattern for keyword lookup
pub const DEFAULT_WORD_PATTERN: &str = r"\b[A-Za-z_][A-Za-z0-9_]*";

/// Relevance of a keyword without an explicit `|N` suffix
pub const DEFAULT_KEYWORD_RELEVANCE: f64 = 1.0;

/// A keyword table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyword {
    pub class: TokenClass,
    pub relevance: f64,
}

/// A complete, validated language definition
#[derive(Debug)]
pub struct Grammar {
    id: String,
    name: String,
    aliases: Vec<String>,
    rules: Vec<Rule>,
    keywords: HashMap<String, Keyword>,
    word_pattern: Regex,
    illegal: Option<Regex>,
    case_insensitive: bool,
    disable_autodetect: bool,
}

impl Grammar {
    /// Start building a grammar with the given identifier
    pub fn builder(id: &str) -> GrammarBuilder {
        GrammarBuilder::new(id)
    }

    /// Grammar identifier (e.g., "rust", "python")
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name (e.g., "Rust")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative identifiers (e.g., "rs", "py")
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Top-level rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Pattern used to find keyword candidates
    pub fn word_pattern(&self) -> &Regex {
        &self.word_pattern
    }

    /// Pattern whose presence in plain code disqualifies the grammar
    pub fn illegal(&self) -> Option<&Regex> {
        self.illegal.as_ref()
    }

    /// Whether keywords and patterns ignore case
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Whether auto-detection skips this grammar
    pub fn disable_autodetect(&self) -> bool {
        self.disable_autodetect
    }

    /// Whether the grammar has any reserved words
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Look up a word in the keyword tables
    pub fn keyword(&self, word: &str) -> Option<Keyword> {
        if self.case_insensitive {
            self.keywords.get(&word.to_lowercase()).copied()
        } else {
            self.keywords.get(word).copied()
        }
    }

    /// Whether `name` is this grammar's id or one of its aliases
    pub fn answers_to(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for [`Grammar`]
///
/// Nothing is compiled until [`build`](Self::build); all pattern errors
/// surface there as [`HighlightError::MalformedGrammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    id: String,
    name: Option<String>,
    aliases: Vec<String>,
    rules: Vec<RuleSpec>,
    keywords: Vec<(TokenClass, String)>,
    word_pattern: Option<String>,
    illegal: Option<String>,
    case_insensitive: bool,
    disable_autodetect: bool,
}

impl GrammarBuilder {
    /// Create an empty builder
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            aliases: Vec::new(),
            rules: Vec::new(),
            keywords: Vec::new(),
            word_pattern: None,
            illegal: None,
            case_insensitive: false,
            disable_autodetect: false,
        }
    }

    /// Set the display name (defaults to the id)
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Add an alias
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Add a whitespace-separated keyword list for a class
    ///
    /// A `word|N` entry gives the word relevance N; `word|0` marks a
    /// common word that highlights but never helps detection.
    pub fn keywords(mut self, class: TokenClass, words: &str) -> Self {
        self.keywords.push((class, words.to_string()));
        self
    }

    /// Add a top-level rule
    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Override the keyword candidate pattern
    pub fn word_pattern(mut self, pattern: &str) -> Self {
        self.word_pattern = Some(pattern.to_string());
        self
    }

    /// Set a pattern that disqualifies the grammar during detection
    pub fn illegal(mut self, pattern: &str) -> Self {
        self.illegal = Some(pattern.to_string());
        self
    }

    /// Make keywords and patterns ignore case
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Exclude the grammar from auto-detection
    pub fn disable_autodetect(mut self, yes: bool) -> Self {
        self.disable_autodetect = yes;
        self
    }

    /// Validate and compile the grammar
    pub fn build(self) -> Result<Grammar> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(HighlightError::malformed(&self.id, "grammar id is empty"));
        }
        let ci = self.case_insensitive;

        let rules = self
            .rules
            .iter()
            .map(|spec| spec.compile(0, ci))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|reason| HighlightError::malformed(&id, reason))?;

        let word_pattern = compile_pattern(
            "word",
            "word",
            self.word_pattern.as_deref().unwrap_or(DEFAULT_WORD_PATTERN),
            ci,
        )
        .map_err(|reason| HighlightError::malformed(&id, reason))?;

        let illegal = match &self.illegal {
            Some(p) => Some(
                compile_pattern("illegal", "illegal", p, ci)
                    .map_err(|reason| HighlightError::malformed(&id, reason))?,
            ),
            None => None,
        };

        let mut keywords = HashMap::new();
        for (class, list) in &self.keywords {
            for entry in list.split_whitespace() {
                let (word, relevance) = parse_keyword(entry)
                    .ok_or_else(|| HighlightError::malformed(&id, format!("bad keyword `{}`", entry)))?;
                let word = if ci { word.to_lowercase() } else { word.to_string() };
                // First declaration wins
                keywords.entry(word).or_insert(Keyword {
                    class: *class,
                    relevance,
                });
            }
        }

        Ok(Grammar {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            aliases: self.aliases,
            rules,
            keywords,
            word_pattern,
            illegal,
            case_insensitive: ci,
            disable_autodetect: self.disable_autodetect,
        })
    }
}

/// Parse `word` or `word|N`
fn parse_keyword(entry: &str) -> Option<(&str, f64)> {
    match entry.split_once('|') {
        Some((word, rel)) if !word.is_empty() => {
            let relevance: f64 = rel.parse().ok()?;
            (relevance >= 0.0).then_some((word, relevance))
        }
        Some(_) => None,
        None => Some((entry, DEFAULT_KEYWORD_RELEVANCE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_minimal() {
        let grammar = Grammar::builder("generic-code")
            .keywords(TokenClass::Keyword, "function return")
            .build()
            .unwrap();
        assert_eq!(grammar.id(), "generic-code");
        assert_eq!(grammar.name(), "generic-code");
        assert!(grammar.has_keywords());
        assert_eq!(
            grammar.keyword("function"),
            Some(Keyword {
                class: TokenClass::Keyword,
                relevance: 1.0
            })
        );
        assert_eq!(grammar.keyword("Function"), None);
    }

    #[test]
    fn test_keyword_relevance_suffix() {
        let grammar = Grammar::builder("t")
            .keywords(TokenClass::Keyword, "if|0 elif|3")
            .build()
            .unwrap();
        assert_eq!(grammar.keyword("if").unwrap().relevance, 0.0);
        assert_eq!(grammar.keyword("elif").unwrap().relevance, 3.0);
    }

    #[test]
    fn test_first_keyword_declaration_wins() {
        let grammar = Grammar::builder("t")
            .keywords(TokenClass::Keyword, "null")
            .keywords(TokenClass::Literal, "null true")
            .build()
            .unwrap();
        assert_eq!(grammar.keyword("null").unwrap().class, TokenClass::Keyword);
        assert_eq!(grammar.keyword("true").unwrap().class, TokenClass::Literal);
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let grammar = Grammar::builder("sql")
            .keywords(TokenClass::Keyword, "SELECT from")
            .case_insensitive(true)
            .build()
            .unwrap();
        assert!(grammar.keyword("select").is_some());
        assert!(grammar.keyword("FROM").is_some());
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = Grammar::builder("  ").build().unwrap_err();
        assert!(matches!(err, HighlightError::MalformedGrammar { .. }));
    }

    #[test]
    fn test_bad_keyword_rejected() {
        let err = Grammar::builder("t")
            .keywords(TokenClass::Keyword, "if|x")
            .build()
            .unwrap_err();
        assert!(matches!(err, HighlightError::MalformedGrammar { .. }));
    }

    #[test]
    fn test_bad_rule_reports_grammar() {
        let err = Grammar::builder("broken")
            .rule(RuleSpec::pattern("bad", "[", TokenClass::Plain))
            .build()
            .unwrap_err();
        match err {
            HighlightError::MalformedGrammar { grammar, .. } => assert_eq!(grammar, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_answers_to_aliases() {
        let grammar = Grammar::builder("javascript").alias("js").build().unwrap();
        assert!(grammar.answers_to("JavaScript"));
        assert!(grammar.answers_to("JS"));
        assert!(!grammar.answers_to("ts"));
    }
}
