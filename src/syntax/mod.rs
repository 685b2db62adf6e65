//! Syntax highlighting engine
//!
//! This module provides the pieces behind [`crate::Highlighter`]:
//! - Grammars and their rules (`grammar`, `rules`, `tokens`)
//! - A registry of grammars, sealed before use (`registry`)
//! - Tokenization, scoring and markup rendering

mod builtin;
mod grammar;
mod loader;
mod registry;
mod render;
mod rules;
mod scorer;
mod tokenizer;
mod tokens;

pub use grammar::{Grammar, GrammarBuilder, Keyword, DEFAULT_KEYWORD_RELEVANCE, DEFAULT_WORD_PATTERN};
pub use loader::{load_file, parse as parse_grammar};
pub use registry::{GrammarRegistry, SealedRegistry};
pub use render::{escape_html, render, HtmlRenderer, DEFAULT_CLASS_PREFIX};
pub use rules::{PatternRule, RegionRule, Rule, RuleSpec, RuleSpecKind, MAX_NESTING};
pub use scorer::{
    detect, detection_sample, rank, rank_grammars, score, ScoreResult, ScoringPolicy,
};
pub use tokenizer::{tokenize, Role, Token, Tokens};
pub use tokens::TokenClass;
