//! Token classes for syntax highlighting
//!
//! This module defines the semantic classes a token can carry and the
//! dotted scope names used when rendering them as markup.

/// Semantic token classes for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Reserved words (if, else, fn, let, etc.)
    Keyword,
    /// Built-in functions and objects (print, len, console)
    BuiltIn,
    /// Literal constants (true, false, null)
    Literal,
    /// Built-in type names (i32, String, int)
    Type,
    /// Names being defined (functions, classes)
    Title,
    /// String literals ("..." or '...')
    String,
    /// Escape sequences inside strings
    Escape,
    /// Source code comments (// or /* */)
    Comment,
    /// Documentation tags inside comments (@param, TODO)
    DocTag,
    /// Numeric literals (integers, floats)
    Number,
    /// Operators (+, -, *, /, etc.)
    Operator,
    /// Punctuation (, ; : etc.)
    Punctuation,
    /// Preprocessor directives, shebangs, attributes on items
    Meta,
    /// Attribute or property names (keys in TOML and JSON)
    Attr,
    /// Variables with sigils ($HOME, ${x})
    Variable,
    /// Symbols and lifetimes ('a, :name)
    Symbol,
    /// Headings and table headers
    Section,
    /// Emphasized markup text
    Emphasis,
    /// Strong markup text
    Strong,
    /// Links and URLs
    Link,
    /// List bullets
    Bullet,
    /// Inline or fenced code in markup
    Code,
    /// Unclassified text
    Plain,
}

impl TokenClass {
    /// Dotted scope name for this class, or `None` for plain text
    pub fn scope(&self) -> Option<&'static str> {
        match self {
            TokenClass::Keyword => Some("keyword"),
            TokenClass::BuiltIn => Some("built_in"),
            TokenClass::Literal => Some("literal"),
            TokenClass::Type => Some("type"),
            TokenClass::Title => Some("title.function"),
            TokenClass::String => Some("string"),
            TokenClass::Escape => Some("char.escape"),
            TokenClass::Comment => Some("comment"),
            TokenClass::DocTag => Some("doctag"),
            TokenClass::Number => Some("number"),
            TokenClass::Operator => Some("operator"),
            TokenClass::Punctuation => Some("punctuation"),
            TokenClass::Meta => Some("meta"),
            TokenClass::Attr => Some("attr"),
            TokenClass::Variable => Some("variable"),
            TokenClass::Symbol => Some("symbol"),
            TokenClass::Section => Some("section"),
            TokenClass::Emphasis => Some("emphasis"),
            TokenClass::Strong => Some("strong"),
            TokenClass::Link => Some("link"),
            TokenClass::Bullet => Some("bullet"),
            TokenClass::Code => Some("code"),
            TokenClass::Plain => None,
        }
    }

    /// Get a human-readable name for this class
    pub fn name(&self) -> &'static str {
        match self {
            TokenClass::Keyword => "Keyword",
            TokenClass::BuiltIn => "BuiltIn",
            TokenClass::Literal => "Literal",
            TokenClass::Type => "Type",
            TokenClass::Title => "Title",
            TokenClass::String => "String",
            TokenClass::Escape => "Escape",
            TokenClass::Comment => "Comment",
            TokenClass::DocTag => "DocTag",
            TokenClass::Number => "Number",
            TokenClass::Operator => "Operator",
            TokenClass::Punctuation => "Punctuation",
            TokenClass::Meta => "Meta",
            TokenClass::Attr => "Attr",
            TokenClass::Variable => "Variable",
            TokenClass::Symbol => "Symbol",
            TokenClass::Section => "Section",
            TokenClass::Emphasis => "Emphasis",
            TokenClass::Strong => "Strong",
            TokenClass::Link => "Link",
            TokenClass::Bullet => "Bullet",
            TokenClass::Code => "Code",
            TokenClass::Plain => "Plain",
        }
    }

    /// Parse a class from its name or scope (for TOML loading)
    ///
    /// Matching ignores case, `_` and `-`, so `built_in`, `BuiltIn` and
    /// `built-in` all resolve to the same class.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "keyword" => Some(TokenClass::Keyword),
            "builtin" => Some(TokenClass::BuiltIn),
            "literal" => Some(TokenClass::Literal),
            "type" => Some(TokenClass::Type),
            "title" | "title.function" | "function" => Some(TokenClass::Title),
            "string" => Some(TokenClass::String),
            "escape" | "char.escape" => Some(TokenClass::Escape),
            "comment" => Some(TokenClass::Comment),
            "doctag" => Some(TokenClass::DocTag),
            "number" => Some(TokenClass::Number),
            "operator" => Some(TokenClass::Operator),
            "punctuation" => Some(TokenClass::Punctuation),
            "meta" | "preprocessor" => Some(TokenClass::Meta),
            "attr" | "attribute" => Some(TokenClass::Attr),
            "variable" => Some(TokenClass::Variable),
            "symbol" | "lifetime" => Some(TokenClass::Symbol),
            "section" => Some(TokenClass::Section),
            "emphasis" => Some(TokenClass::Emphasis),
            "strong" => Some(TokenClass::Strong),
            "link" => Some(TokenClass::Link),
            "bullet" => Some(TokenClass::Bullet),
            "code" => Some(TokenClass::Code),
            "plain" | "default" => Some(TokenClass::Plain),
            _ => None,
        }
    }

    /// Whether this class is one of the keyword-table classes
    pub fn is_keyword_like(&self) -> bool {
        matches!(
            self,
            TokenClass::Keyword | TokenClass::BuiltIn | TokenClass::Literal | TokenClass::Type
        )
    }

    /// Check if this is unclassified text
    pub fn is_plain(&self) -> bool {
        *self == TokenClass::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_scope() {
        assert_eq!(TokenClass::Plain.scope(), None);
        assert_eq!(TokenClass::Keyword.scope(), Some("keyword"));
        assert_eq!(TokenClass::Escape.scope(), Some("char.escape"));
    }

    #[test]
    fn test_from_name_roundtrip() {
        let classes = [
            TokenClass::Comment,
            TokenClass::String,
            TokenClass::Keyword,
            TokenClass::BuiltIn,
            TokenClass::Plain,
        ];
        for class in classes {
            assert_eq!(TokenClass::from_name(class.name()), Some(class));
        }
    }

    #[test]
    fn test_from_name_accepts_scopes() {
        assert_eq!(TokenClass::from_name("built_in"), Some(TokenClass::BuiltIn));
        assert_eq!(TokenClass::from_name("char.escape"), Some(TokenClass::Escape));
        assert_eq!(TokenClass::from_name("Preprocessor"), Some(TokenClass::Meta));
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(TokenClass::from_name("InvalidType"), None);
        assert_eq!(TokenClass::from_name(""), None);
    }
}
