//! Highlighter
//!
//! [`Highlighter`] ties a sealed grammar registry to a configuration and
//! is the entry point most callers want. It is cheap to clone and can be
//! shared between threads.

use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;

use crate::config::HighlightConfig;
use crate::error::Result;
use crate::syntax::{
    escape_html, rank_grammars, score, tokenize, Grammar, GrammarRegistry, HtmlRenderer,
    SealedRegistry,
};

/// Outcome of one highlight call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightResult {
    /// Escaped markup
    pub value: String,
    /// Grammar id, or empty when no grammar was confident enough
    pub language: String,
    /// Score of the chosen grammar
    pub relevance: f64,
    /// Runner-up grammar in auto mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_best: Option<String>,
}

impl HighlightResult {
    /// Result for text no grammar claimed: escaped, no spans
    fn plain(code: &str) -> Self {
        Self {
            value: escape_html(code),
            language: String::new(),
            relevance: 0.0,
            second_best: None,
        }
    }

    /// Whether a language was detected or requested
    pub fn has_language(&self) -> bool {
        !self.language.is_empty()
    }
}

/// Syntax highlighter over a fixed set of grammars
#[derive(Debug, Clone)]
pub struct Highlighter {
    registry: SealedRegistry,
    config: HighlightConfig,
    renderer: HtmlRenderer,
}

impl Highlighter {
    /// Create a highlighter over `registry`
    pub fn new(registry: SealedRegistry, config: HighlightConfig) -> Self {
        let renderer = HtmlRenderer::new(&config.class_prefix);
        Self {
            registry,
            config,
            renderer,
        }
    }

    /// Highlighter with the built-in grammars and default settings
    pub fn with_builtins() -> Result<Self> {
        Self::from_config(HighlightConfig::default())
    }

    /// Highlighter with the built-in grammars plus every grammar
    /// directory named in `config`
    pub fn from_config(config: HighlightConfig) -> Result<Self> {
        let mut registry = GrammarRegistry::with_builtins()?;
        for dir in &config.grammar_dirs {
            registry.load_dir(dir)?;
        }
        Ok(Self::new(registry.seal(), config))
    }

    /// Grammars this highlighter can use
    pub fn registry(&self) -> &SealedRegistry {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Detect the language of `code` and highlight it
    ///
    /// When no grammar qualifies the language is empty and the value is
    /// the escaped input without spans.
    pub fn highlight_auto(&self, code: &str) -> HighlightResult {
        self.auto(code, self.registry.all())
    }

    /// Like [`highlight_auto`](Self::highlight_auto), considering only the
    /// named grammars
    ///
    /// Ties still go to the grammar registered first, whatever order the
    /// names are given in.
    pub fn highlight_auto_in(&self, code: &str, languages: &[&str]) -> Result<HighlightResult> {
        let mut wanted = Vec::with_capacity(languages.len());
        for name in languages {
            wanted.push(self.registry.get(name)?.id());
        }
        let candidates = self
            .registry
            .all()
            .filter(|grammar| wanted.contains(&grammar.id()));
        Ok(self.auto(code, candidates))
    }

    /// Highlight `code` with the grammar named `language`
    pub fn highlight(&self, code: &str, language: &str) -> Result<HighlightResult> {
        let grammar = self.registry.get(language)?;
        let relevance = score(code, grammar, &self.config.policy()).score;
        Ok(HighlightResult {
            value: self.renderer.render(tokenize(code, grammar), code),
            language: grammar.id().to_string(),
            relevance,
            second_best: None,
        })
    }

    fn auto<'g>(&'g self, code: &str, candidates: impl Iterator<Item = &'g Grammar>) -> HighlightResult {
        let mut ranked = rank_grammars(code, candidates, &self.config.policy()).into_iter();
        let Some((grammar, best)) = ranked.next() else {
            debug!(bytes = code.len(), "no confident language, rendering plain text");
            return HighlightResult::plain(code);
        };
        let second_best = ranked.next().map(|(_, result)| result.language);
        debug!(
            language = %best.language,
            relevance = best.score,
            second_best = ?second_best,
            "auto-detected language"
        );
        HighlightResult {
            value: self.renderer.render(tokenize(code, grammar), code),
            language: best.language,
            relevance: best.score,
            second_best,
        }
    }
}

static DEFAULT_HIGHLIGHTER: OnceLock<Highlighter> = OnceLock::new();

/// Highlight `code` with the built-in grammars and default settings
///
/// The built-in highlighter is created on first use and reused after.
pub fn highlight_auto(code: &str) -> Result<HighlightResult> {
    let highlighter = match DEFAULT_HIGHLIGHTER.get() {
        Some(highlighter) => highlighter,
        None => {
            let highlighter = Highlighter::with_builtins()?;
            DEFAULT_HIGHLIGHTER.get_or_init(|| highlighter)
        }
    };
    Ok(highlighter.highlight_auto(code))
}
