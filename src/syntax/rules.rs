//! Token rules for syntax highlighting
//!
//! Rules are written as [`RuleSpec`] values (plain strings, nothing
//! compiled) and turned into [`Rule`]s when their grammar is built. A
//! rule is either a single pattern or a region with begin/end
//! delimiters that opens a nested context for its sub-rules.

use regex::{Regex, RegexBuilder};

use super::tokens::TokenClass;

/// Maximum depth of nested regions a grammar may declare
pub const MAX_NESTING: usize = 16;

/// Uncompiled rule definition
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    /// Name for debugging and error messages
    pub name: String,
    /// Token class assigned to matches
    pub class: TokenClass,
    /// Relevance added to a grammar's score per match
    pub relevance: f64,
    /// Pattern or region shape
    pub kind: RuleSpecKind,
}

/// Shape of a [`RuleSpec`]
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpecKind {
    /// A single regex match
    Pattern { pattern: String },
    /// A delimited region with its own nested rules
    Region {
        begin: String,
        end: String,
        escape: Option<String>,
        contains: Vec<RuleSpec>,
    },
}

impl RuleSpec {
    /// Create a single-pattern rule
    pub fn pattern(name: &str, pattern: &str, class: TokenClass) -> Self {
        Self {
            name: name.to_string(),
            class,
            relevance: 0.0,
            kind: RuleSpecKind::Pattern {
                pattern: pattern.to_string(),
            },
        }
    }

    /// Create a region rule spanning from `begin` to `end`
    pub fn region(name: &str, begin: &str, end: &str, class: TokenClass) -> Self {
        Self {
            name: name.to_string(),
            class,
            relevance: 0.0,
            kind: RuleSpecKind::Region {
                begin: begin.to_string(),
                end: end.to_string(),
                escape: None,
                contains: Vec::new(),
            },
        }
    }

    /// Builder: set relevance
    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance;
        self
    }

    /// Builder: set the escape pattern of a region
    ///
    /// Has no effect on pattern rules.
    pub fn with_escape(mut self, escape: &str) -> Self {
        if let RuleSpecKind::Region { escape: slot, .. } = &mut self.kind {
            *slot = Some(escape.to_string());
        }
        self
    }

    /// Builder: add a sub-rule active inside a region
    ///
    /// Has no effect on pattern rules.
    pub fn containing(mut self, rule: RuleSpec) -> Self {
        if let RuleSpecKind::Region { contains, .. } = &mut self.kind {
            contains.push(rule);
        }
        self
    }

    /// Compile this spec and its sub-rules
    ///
    /// `depth` is the region depth this rule is declared at (0 for
    /// top-level rules). Errors are reasons, the grammar builder adds
    /// the grammar id.
    pub(crate) fn compile(&self, depth: usize, case_insensitive: bool) -> Result<Rule, String> {
        match &self.kind {
            RuleSpecKind::Pattern { pattern } => Ok(Rule::Pattern(PatternRule {
                name: self.name.clone(),
                pattern: compile_pattern(&self.name, "pattern", pattern, case_insensitive)?,
                class: self.class,
                relevance: self.relevance,
            })),
            RuleSpecKind::Region {
                begin,
                end,
                escape,
                contains,
            } => {
                if depth >= MAX_NESTING {
                    return Err(format!(
                        "rule `{}` nests deeper than {} regions",
                        self.name, MAX_NESTING
                    ));
                }
                if end.is_empty() {
                    return Err(format!("region `{}` has no end pattern", self.name));
                }
                let escape = match escape {
                    Some(p) => Some(compile_pattern(&self.name, "escape", p, case_insensitive)?),
                    None => None,
                };
                let contains = contains
                    .iter()
                    .map(|spec| spec.compile(depth + 1, case_insensitive))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Rule::Region(RegionRule {
                    name: self.name.clone(),
                    begin: compile_pattern(&self.name, "begin", begin, case_insensitive)?,
                    end: compile_pattern(&self.name, "end", end, case_insensitive)?,
                    escape,
                    class: self.class,
                    relevance: self.relevance,
                    contains,
                }))
            }
        }
    }
}

/// Compile a rule pattern in multi-line mode, rejecting empty matches
pub(crate) fn compile_pattern(
    rule: &str,
    what: &str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, String> {
    if pattern.is_empty() {
        return Err(format!("rule `{}` has an empty {} pattern", rule, what));
    }
    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| format!("rule `{}` has an invalid {} pattern: {}", rule, what, e))?;
    if regex.is_match("") {
        return Err(format!(
            "rule `{}` has a {} pattern that matches the empty string",
            rule, what
        ));
    }
    Ok(regex)
}

/// Find the first non-empty match of `regex` at or after `start`
///
/// Zero-length matches can never produce a token, so they are skipped.
pub(crate) fn find_non_empty(regex: &Regex, text: &str, start: usize) -> Option<(usize, usize)> {
    let mut from = start;
    while from <= text.len() {
        let m = regex.find_at(text, from)?;
        if m.end() > m.start() {
            return Some((m.start(), m.end()));
        }
        from = match text[m.start()..].chars().next() {
            Some(c) => m.start() + c.len_utf8(),
            None => return None,
        };
    }
    None
}

/// A compiled rule
#[derive(Debug)]
pub enum Rule {
    Pattern(PatternRule),
    Region(RegionRule),
}

impl Rule {
    /// Rule name
    pub fn name(&self) -> &str {
        match self {
            Rule::Pattern(p) => &p.name,
            Rule::Region(r) => &r.name,
        }
    }

    /// Token class of the rule
    pub fn class(&self) -> TokenClass {
        match self {
            Rule::Pattern(p) => p.class,
            Rule::Region(r) => r.class,
        }
    }

    /// Relevance per match
    pub fn relevance(&self) -> f64 {
        match self {
            Rule::Pattern(p) => p.relevance,
            Rule::Region(r) => r.relevance,
        }
    }

    /// Find where this rule next starts matching at or after `start`
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_non_empty(self.trigger(), text, start)
    }

    /// Regex that fires this rule: the pattern, or a region's begin
    pub fn trigger(&self) -> &Regex {
        match self {
            Rule::Pattern(p) => &p.pattern,
            Rule::Region(r) => &r.begin,
        }
    }

    /// Deepest region nesting below (and including) this rule
    pub fn depth(&self) -> usize {
        match self {
            Rule::Pattern(_) => 0,
            Rule::Region(r) => 1 + r.contains.iter().map(Rule::depth).max().unwrap_or(0),
        }
    }
}

/// A single-pattern rule
///
/// Matches a regex pattern and assigns a token class to the match.
#[derive(Debug)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token class to assign to matches
    pub class: TokenClass,
    /// Relevance per match
    pub relevance: f64,
}

/// A delimited region (block comments, strings)
///
/// Entering a region pushes a nesting context in which only the end
/// pattern, the escape pattern and the region's own sub-rules apply.
#[derive(Debug)]
pub struct RegionRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that opens the region
    pub begin: Regex,
    /// Pattern that closes the region
    pub end: Regex,
    /// Escape sequences that never close the region (`\\.` for C strings)
    pub escape: Option<Regex>,
    /// Token class for the region
    pub class: TokenClass,
    /// Relevance per region entered
    pub relevance: f64,
    /// Rules active inside the region, in declaration order
    pub contains: Vec<Rule>,
}
