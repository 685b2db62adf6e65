//! Grammar files
//!
//! Grammars can be defined in TOML as well as in code. A file mirrors
//! [`GrammarBuilder`]:
//!
//! ```toml
//! id = "ini"
//! name = "INI"
//! aliases = ["cfg"]
//!
//! [keywords]
//! literal = "true false on off"
//!
//! [[rules]]
//! name = "comment"
//! class = "comment"
//! pattern = '^\s*[;#].*$'
//!
//! [[rules]]
//! name = "string"
//! class = "string"
//! begin = '"'
//! end = '"'
//! escape = '\\.'
//! ```
//!
//! A rule has either `pattern` or `begin`/`end`; regions may carry
//! nested `[[rules.contains]]` tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::grammar::{Grammar, GrammarBuilder};
use super::rules::RuleSpec;
use super::tokens::TokenClass;
use crate::error::{HighlightError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GrammarFile {
    id: String,
    name: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    case_insensitive: bool,
    #[serde(default)]
    disable_autodetect: bool,
    illegal: Option<String>,
    word_pattern: Option<String>,
    /// Class name -> whitespace-separated words
    #[serde(default)]
    keywords: BTreeMap<String, String>,
    #[serde(default)]
    rules: Vec<RuleFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    name: Option<String>,
    class: String,
    #[serde(default)]
    relevance: f64,
    pattern: Option<String>,
    begin: Option<String>,
    end: Option<String>,
    escape: Option<String>,
    #[serde(default)]
    contains: Vec<RuleFile>,
}

/// Load and build a grammar from a TOML file
pub fn load_file(path: &Path) -> Result<Grammar> {
    let source = fs::read_to_string(path)?;
    parse_at(&source, path)
}

/// Build a grammar from TOML source
pub fn parse(source: &str) -> Result<Grammar> {
    parse_at(source, Path::new("<inline>"))
}

fn parse_at(source: &str, path: &Path) -> Result<Grammar> {
    let file: GrammarFile = toml::from_str(source).map_err(|e| HighlightError::GrammarFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    builder_from(file)?.build()
}

fn builder_from(file: GrammarFile) -> Result<GrammarBuilder> {
    let id = file.id;
    let mut builder = GrammarBuilder::new(&id)
        .case_insensitive(file.case_insensitive)
        .disable_autodetect(file.disable_autodetect);
    if let Some(name) = &file.name {
        builder = builder.name(name);
    }
    for alias in &file.aliases {
        builder = builder.alias(alias);
    }
    if let Some(illegal) = &file.illegal {
        builder = builder.illegal(illegal);
    }
    if let Some(word) = &file.word_pattern {
        builder = builder.word_pattern(word);
    }
    for (class, words) in &file.keywords {
        let class = parse_class(&id, class)?;
        builder = builder.keywords(class, words);
    }
    for (i, rule) in file.rules.into_iter().enumerate() {
        builder = builder.rule(rule_spec(&id, rule, i)?);
    }
    Ok(builder)
}

fn parse_class(grammar: &str, name: &str) -> Result<TokenClass> {
    TokenClass::from_name(name)
        .ok_or_else(|| HighlightError::malformed(grammar, format!("unknown token class `{}`", name)))
}

fn rule_spec(grammar: &str, rule: RuleFile, index: usize) -> Result<RuleSpec> {
    let name = rule.name.unwrap_or_else(|| format!("rule{}", index));
    let class = parse_class(grammar, &rule.class)?;

    let spec = match (rule.pattern, rule.begin, rule.end) {
        (Some(pattern), None, None) => {
            if !rule.contains.is_empty() || rule.escape.is_some() {
                return Err(HighlightError::malformed(
                    grammar,
                    format!("pattern rule `{}` cannot have `contains` or `escape`", name),
                ));
            }
            RuleSpec::pattern(&name, &pattern, class)
        }
        (None, Some(begin), Some(end)) => {
            let mut spec = RuleSpec::region(&name, &begin, &end, class);
            if let Some(escape) = &rule.escape {
                spec = spec.with_escape(escape);
            }
            for (i, sub) in rule.contains.into_iter().enumerate() {
                spec = spec.containing(rule_spec(grammar, sub, i)?);
            }
            spec
        }
        (None, Some(_), None) => {
            return Err(HighlightError::malformed(
                grammar,
                format!("region `{}` is unterminated: missing `end`", name),
            ))
        }
        _ => {
            return Err(HighlightError::malformed(
                grammar,
                format!("rule `{}` needs either `pattern` or `begin` and `end`", name),
            ))
        }
    };
    Ok(spec.with_relevance(rule.relevance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;

    const INI: &str = r#"
id = "ini"
name = "INI"
aliases = ["cfg"]

[keywords]
literal = "true false on off"

[[rules]]
name = "comment"
class = "comment"
pattern = '^\s*[;#].*$'

[[rules]]
name = "section"
class = "section"
pattern = '^\[[^\]\n]+\]'
relevance = 2

[[rules]]
name = "string"
class = "string"
begin = '"'
end = '"'
escape = '\\.'

  [[rules.contains]]
  class = "variable"
  pattern = '\$\{\w+\}'
"#;

    #[test]
    fn test_parse_grammar() {
        let grammar = parse(INI).unwrap();
        assert_eq!(grammar.id(), "ini");
        assert_eq!(grammar.name(), "INI");
        assert!(grammar.answers_to("cfg"));
        assert_eq!(grammar.rules().len(), 3);
        assert_eq!(grammar.rules()[1].relevance(), 2.0);
        assert_eq!(grammar.keyword("on").unwrap().class, TokenClass::Literal);
    }

    #[test]
    fn test_parsed_grammar_tokenizes() {
        let grammar = parse(INI).unwrap();
        let text = "[main]\nname = \"${user}\"\n; done";
        let classes: Vec<_> = tokenize(text, &grammar).map(|t| t.class).collect();
        assert_eq!(classes.first(), Some(&TokenClass::Section));
        assert!(classes.contains(&TokenClass::Variable));
        assert_eq!(classes.last(), Some(&TokenClass::Comment));
    }

    #[test]
    fn test_unknown_class() {
        let err = parse("id = \"x\"\n[[rules]]\nclass = \"sparkle\"\npattern = \"a\"\n").unwrap_err();
        assert!(matches!(err, HighlightError::MalformedGrammar { .. }));
    }

    #[test]
    fn test_region_missing_end() {
        let err = parse("id = \"x\"\n[[rules]]\nclass = \"string\"\nbegin = \"'\"\n").unwrap_err();
        match err {
            HighlightError::MalformedGrammar { reason, .. } => assert!(reason.contains("unterminated")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse("id = ").unwrap_err();
        assert!(matches!(err, HighlightError::GrammarFile { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse("id = \"x\"\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, HighlightError::GrammarFile { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ini.toml");
        std::fs::write(&path, INI).unwrap();
        assert_eq!(load_file(&path).unwrap().id(), "ini");
    }
}
