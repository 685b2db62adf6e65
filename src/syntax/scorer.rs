//! Language scorer
//!
//! Auto-detection tokenizes a prefix of the input with every candidate
//! grammar and scores how well each one explains it:
//!
//! ```text
//! score = coverage_weight * coverage
//!       + keyword_weight  * keyword relevance
//!       + rule relevance
//!       - unterminated_penalty (if a region is still open at the end)
//! ```
//!
//! `coverage` is the fraction of bytes inside non-plain tokens. A grammar
//! qualifies only with nonzero coverage, some positive keyword or rule
//! relevance, a score above `min_score` and no illegal construct in its
//! plain text. Coverage alone (a stray operator or punctuation mark) never
//! claims a language. The highest score wins; ties go to the candidate
//! seen first.

use tracing::{debug, trace};

use super::grammar::Grammar;
use super::tokenizer::tokenize;

/// Tunable detection policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    /// Only this many leading bytes are examined
    pub max_detect_bytes: usize,
    /// Scores at or below this never qualify
    pub min_score: f64,
    /// Weight of the covered-bytes fraction
    pub coverage_weight: f64,
    /// Weight of summed keyword relevance
    pub keyword_weight: f64,
    /// Subtracted when input ends inside a region
    pub unterminated_penalty: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            max_detect_bytes: 100_000,
            min_score: 0.0,
            coverage_weight: 2.0,
            keyword_weight: 1.0,
            unterminated_penalty: 3.0,
        }
    }
}

/// Detection score of one grammar
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Grammar id
    pub language: String,
    /// Weighted score
    pub score: f64,
    /// Tokens produced for the examined prefix
    pub token_count: usize,
    /// Tokens that came from the keyword tables
    pub keyword_hits: usize,
    /// Unweighted keyword plus rule relevance
    pub relevance: f64,
    /// Fraction of examined bytes in non-plain tokens
    pub coverage: f64,
    /// Whether input ended inside a region
    pub unterminated: bool,
    /// Whether the grammar's illegal pattern was seen
    pub illegal: bool,
}

impl ScoreResult {
    /// Whether this result passes the confidence threshold
    pub fn qualifies(&self, policy: &ScoringPolicy) -> bool {
        !self.illegal
            && self.coverage > 0.0
            && self.relevance > 0.0
            && self.score > policy.min_score
    }
}

/// Cut `text` to at most `max` bytes on a char boundary
pub fn detection_sample(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Score a single grammar against `text`
pub fn score(text: &str, grammar: &Grammar, policy: &ScoringPolicy) -> ScoreResult {
    let sample = detection_sample(text, policy.max_detect_bytes);
    let mut tokens = tokenize(sample, grammar);

    let mut token_count = 0;
    let mut keyword_hits = 0;
    let mut covered = 0usize;
    let mut keyword_relevance = 0.0;
    let mut rule_relevance = 0.0;

    for token in tokens.by_ref() {
        token_count += 1;
        if !token.class.is_plain() {
            covered += token.len();
        }
        if token.keyword {
            keyword_hits += 1;
            keyword_relevance += token.relevance;
        } else {
            rule_relevance += token.relevance;
        }
    }

    let coverage = if sample.is_empty() {
        0.0
    } else {
        covered as f64 / sample.len() as f64
    };
    let unterminated = tokens.unterminated();
    let mut score = policy.coverage_weight * coverage
        + policy.keyword_weight * keyword_relevance
        + rule_relevance;
    if unterminated {
        score -= policy.unterminated_penalty;
    }

    let result = ScoreResult {
        language: grammar.id().to_string(),
        score,
        token_count,
        keyword_hits,
        relevance: keyword_relevance + rule_relevance,
        coverage,
        unterminated,
        illegal: tokens.illegal_seen(),
    };
    trace!(
        grammar = grammar.id(),
        score = result.score,
        coverage = result.coverage,
        relevance = result.relevance,
        keyword_hits = result.keyword_hits,
        unterminated = result.unterminated,
        illegal = result.illegal,
        "scored grammar"
    );
    result
}

/// Score every candidate and return the qualifying ones, best first
///
/// Grammars that opt out of auto-detection are skipped. The sort is
/// stable, so equal scores keep candidate order.
pub fn rank<'g>(
    text: &str,
    candidates: impl IntoIterator<Item = &'g Grammar>,
    policy: &ScoringPolicy,
) -> Vec<ScoreResult> {
    rank_grammars(text, candidates, policy)
        .into_iter()
        .map(|(_, result)| result)
        .collect()
}

/// Like [`rank`], pairing each result with the grammar that produced it
pub fn rank_grammars<'g>(
    text: &str,
    candidates: impl IntoIterator<Item = &'g Grammar>,
    policy: &ScoringPolicy,
) -> Vec<(&'g Grammar, ScoreResult)> {
    let mut results: Vec<_> = candidates
        .into_iter()
        .filter(|grammar| !grammar.disable_autodetect())
        .map(|grammar| (grammar, score(text, grammar, policy)))
        .filter(|(_, result)| result.qualifies(policy))
        .collect();
    results.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
    results
}

/// Pick the best-scoring candidate, or `None` when nothing qualifies
pub fn detect<'g>(
    text: &str,
    candidates: impl IntoIterator<Item = &'g Grammar>,
    policy: &ScoringPolicy,
) -> Option<ScoreResult> {
    let best = rank(text, candidates, policy).into_iter().next();
    match &best {
        Some(result) => debug!(language = %result.language, score = result.score, "detected language"),
        None => debug!(bytes = text.len(), "no language above confidence threshold"),
    }
    best
}
