//! Tokenizer
//!
//! [`tokenize`] turns text into a lazy stream of classified tokens for
//! one grammar. The stream covers the input exactly: token ranges are
//! contiguous, never overlap, and together span `0..text.len()`.
//!
//! Matching works on a stack of nesting contexts. At depth zero the
//! grammar's top-level rules and its keyword pattern are active; inside
//! a region only the region's escape, end and sub-rules are. At every
//! step the earliest match wins, then the longest, then the one declared
//! first. Text between matches becomes a single plain (or region body)
//! token.
//!
//! The next match of every pattern is cached for the whole pass, not per
//! region, so each pattern scans any stretch of the input at most once.

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::ops::Range;

use regex::Regex;

use super::grammar::Grammar;
use super::rules::{find_non_empty, RegionRule, Rule};
use super::tokens::TokenClass;

/// Position of a token relative to the region structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Self-contained token (keyword, number, plain run)
    Atom,
    /// Opening delimiter of a region
    Open,
    /// Unclassified text inside a region
    Body,
    /// Closing delimiter of a region
    Close,
}

/// A classified slice of the input, by byte offsets
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'g> {
    /// Semantic class
    pub class: TokenClass,
    /// Byte range in the source text
    pub range: Range<usize>,
    /// Id of the grammar that produced the token
    pub grammar: &'g str,
    /// Number of regions open while this token is inside them
    pub depth: usize,
    /// Structural role
    pub role: Role,
    /// Relevance this token adds to its grammar's score
    pub relevance: f64,
    /// Whether the token came from the grammar's keyword tables
    pub keyword: bool,
}

impl Token<'_> {
    /// Byte offset where this token starts (inclusive)
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Byte offset where this token ends (exclusive)
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Check if the token is empty
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Extract the token's text from the source
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Tokenize `text` with `grammar`
///
/// The returned iterator is lazy; call `tokenize` again for a fresh pass.
pub fn tokenize<'g, 't>(text: &'t str, grammar: &'g Grammar) -> Tokens<'g, 't> {
    Tokens {
        grammar,
        text,
        pos: 0,
        cache: MatchCache::default(),
        stack: Vec::new(),
        pending: None,
        finished: false,
        unterminated: false,
        illegal_seen: false,
    }
}

/// Cached next match of one pattern
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// No match anywhere ahead
    Never,
    /// Next match range
    At(usize, usize),
}

/// Next-match cache shared by every context of one pass
///
/// Keyed by the address of the compiled pattern, which is stable while
/// the grammar is borrowed. A cached match stays valid until the position
/// moves past its start; "no match" stays valid for the rest of the pass.
#[derive(Debug, Default)]
struct MatchCache {
    slots: HashMap<usize, Slot>,
    scanned: usize,
}

impl MatchCache {
    fn find(&mut self, regex: &Regex, text: &str, pos: usize) -> Option<(usize, usize)> {
        let key = regex as *const Regex as usize;
        match self.slots.get(&key) {
            Some(Slot::Never) => return None,
            Some(Slot::At(start, end)) if *start >= pos => return Some((*start, *end)),
            _ => {}
        }
        let found = find_non_empty(regex, text, pos);
        self.scanned += found.map_or(text.len(), |(start, _)| start) - pos;
        let slot = match found {
            Some((start, end)) => Slot::At(start, end),
            None => Slot::Never,
        };
        self.slots.insert(key, slot);
        found
    }
}

/// One open region
struct Frame<'g> {
    region: &'g RegionRule,
}

/// What a winning candidate does
enum Step<'g> {
    /// Fold the match into the current run
    Absorb,
    /// Emit an atom
    Atom {
        class: TokenClass,
        relevance: f64,
        keyword: bool,
    },
    /// Open a region
    Open(&'g RegionRule),
    /// Close the innermost region
    Close,
}

/// Lazy token stream returned by [`tokenize`]
pub struct Tokens<'g, 't> {
    grammar: &'g Grammar,
    text: &'t str,
    pos: usize,
    cache: MatchCache,
    stack: Vec<Frame<'g>>,
    pending: Option<Token<'g>>,
    finished: bool,
    unterminated: bool,
    illegal_seen: bool,
}

impl<'g, 't> Tokens<'g, 't> {
    /// Whether input ended inside an open region
    ///
    /// Only meaningful once the iterator is exhausted.
    pub fn unterminated(&self) -> bool {
        self.unterminated
    }

    /// Whether the grammar's illegal pattern appeared in top-level text
    pub fn illegal_seen(&self) -> bool {
        self.illegal_seen
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Source text being tokenized
    pub fn source(&self) -> &'t str {
        self.text
    }

    /// Bytes of input searched for pattern matches so far
    ///
    /// Stays within a small multiple of the input length for any grammar.
    pub fn scanned_bytes(&self) -> usize {
        self.cache.scanned
    }

    /// Find the winning candidate in the current context
    ///
    /// Returns the candidate index and its match range.
    fn best_candidate(&mut self) -> Option<(usize, usize, usize)> {
        let text = self.text;
        let pos = self.pos;
        let grammar = self.grammar;
        let cache = &mut self.cache;
        let mut best = None;

        match self.stack.last() {
            Some(frame) => {
                let region = frame.region;
                if let Some(escape) = &region.escape {
                    consider(&mut best, 0, cache.find(escape, text, pos));
                }
                consider(&mut best, 1, cache.find(&region.end, text, pos));
                for (i, rule) in region.contains.iter().enumerate() {
                    consider(&mut best, i + 2, cache.find(rule.trigger(), text, pos));
                }
            }
            None => {
                let rules = grammar.rules();
                for (i, rule) in rules.iter().enumerate() {
                    consider(&mut best, i, cache.find(rule.trigger(), text, pos));
                }
                let word = cache.find(grammar.word_pattern(), text, pos);
                consider(&mut best, rules.len(), word);
            }
        }
        best
    }

    /// Decide what the winning candidate does
    fn step_for(&self, index: usize, start: usize, end: usize) -> Step<'g> {
        let grammar: &'g Grammar = self.grammar;
        match self.stack.last() {
            Some(frame) => {
                let region: &'g RegionRule = frame.region;
                match index {
                    0 => Step::Absorb,
                    1 => Step::Close,
                    _ => rule_step(&region.contains[index - 2]),
                }
            }
            None => match grammar.rules().get(index) {
                Some(rule) => rule_step(rule),
                None => match grammar.keyword(&self.text[start..end]) {
                    Some(kw) => Step::Atom {
                        class: kw.class,
                        relevance: kw.relevance,
                        keyword: true,
                    },
                    None => Step::Absorb,
                },
            },
        }
    }

    /// Token for unmatched text in the current context
    fn run_token(&mut self, range: Range<usize>) -> Token<'g> {
        match self.stack.last() {
            Some(frame) => Token {
                class: frame.region.class,
                range,
                grammar: self.grammar.id(),
                depth: self.stack.len(),
                role: Role::Body,
                relevance: 0.0,
                keyword: false,
            },
            None => {
                if let Some(illegal) = self.grammar.illegal() {
                    if illegal.is_match(&self.text[range.clone()]) {
                        self.illegal_seen = true;
                    }
                }
                Token {
                    class: TokenClass::Plain,
                    range,
                    grammar: self.grammar.id(),
                    depth: 0,
                    role: Role::Atom,
                    relevance: 0.0,
                    keyword: false,
                }
            }
        }
    }

    /// Emit the token for a matched step, updating the context stack
    fn apply(&mut self, step: Step<'g>, range: Range<usize>) -> Token<'g> {
        let grammar = self.grammar.id();
        match step {
            Step::Atom {
                class,
                relevance,
                keyword,
            } => Token {
                class,
                range,
                grammar,
                depth: self.stack.len(),
                role: Role::Atom,
                relevance,
                keyword,
            },
            Step::Open(region) => {
                self.stack.push(Frame { region });
                Token {
                    class: region.class,
                    range,
                    grammar,
                    depth: self.stack.len(),
                    role: Role::Open,
                    relevance: region.relevance,
                    keyword: false,
                }
            }
            Step::Close => {
                let depth = self.stack.len();
                let class = self
                    .stack
                    .pop()
                    .map_or(TokenClass::Plain, |frame| frame.region.class);
                Token {
                    class,
                    range,
                    grammar,
                    depth,
                    role: Role::Close,
                    relevance: 0.0,
                    keyword: false,
                }
            }
            // Absorbed matches never reach here
            Step::Absorb => self.run_token(range),
        }
    }
}

/// Keep `found` if it starts earlier, or at the same place and longer
///
/// Candidates are offered in declaration order, so ties keep the first.
fn consider(
    best: &mut Option<(usize, usize, usize)>,
    index: usize,
    found: Option<(usize, usize)>,
) {
    let Some((start, end)) = found else {
        return;
    };
    let better = match *best {
        None => true,
        Some((_, b_start, b_end)) => start < b_start || (start == b_start && end > b_end),
    };
    if better {
        *best = Some((index, start, end));
    }
}

fn rule_step(rule: &Rule) -> Step<'_> {
    match rule {
        Rule::Pattern(p) => Step::Atom {
            class: p.class,
            relevance: p.relevance,
            keyword: false,
        },
        Rule::Region(r) => Step::Open(r),
    }
}

impl<'g> Iterator for Tokens<'g, '_> {
    type Item = Token<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.pos >= self.text.len() {
            if !self.finished {
                self.finished = true;
                self.unterminated = !self.stack.is_empty();
            }
            return None;
        }

        let run_start = self.pos;
        while self.pos < self.text.len() {
            let Some((index, start, end)) = self.best_candidate() else {
                self.pos = self.text.len();
                break;
            };
            match self.step_for(index, start, end) {
                Step::Absorb => {
                    self.pos = end;
                }
                step => {
                    let run = (start > run_start).then(|| self.run_token(run_start..start));
                    let token = self.apply(step, start..end);
                    self.pos = end;
                    return match run {
                        Some(run) => {
                            self.pending = Some(token);
                            Some(run)
                        }
                        None => Some(token),
                    };
                }
            }
        }
        Some(self.run_token(run_start..self.pos))
    }
}

impl FusedIterator for Tokens<'_, '_> {}
