//! Markup renderer
//!
//! Turns a token stream into HTML-style markup: every classified token
//! is wrapped in a `<span class="...">`, regions become nested spans,
//! and every character of the source is escaped exactly once.

use super::tokenizer::{Role, Token};

/// Default CSS class prefix
pub const DEFAULT_CLASS_PREFIX: &str = "hljs-";

/// Render tokens over `text` with the default class prefix
pub fn render<'g>(tokens: impl IntoIterator<Item = Token<'g>>, text: &str) -> String {
    HtmlRenderer::default().render(tokens, text)
}

/// Escape the characters that are significant in markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// Renders token streams as nested `<span>` markup
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    class_prefix: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

impl HtmlRenderer {
    /// Create a renderer using `class_prefix` for span classes
    pub fn new(class_prefix: &str) -> Self {
        Self {
            class_prefix: class_prefix.to_string(),
        }
    }

    /// CSS class attribute value for a dotted scope
    ///
    /// `title.function` becomes `hljs-title function_`; each nested
    /// part gets one more trailing underscore.
    pub fn class_name(&self, scope: &str) -> String {
        let mut parts = scope.split('.');
        let mut name = format!("{}{}", self.class_prefix, parts.next().unwrap_or_default());
        for (i, part) in parts.enumerate() {
            name.push(' ');
            name.push_str(part);
            name.push_str(&"_".repeat(i + 1));
        }
        name
    }

    fn open_span(&self, out: &mut String, scope: &str) {
        out.push_str("<span class=\"");
        out.push_str(&self.class_name(scope));
        out.push_str("\">");
    }

    /// Render tokens over `text`
    ///
    /// Spans left open by an unterminated region are closed at the end.
    pub fn render<'g>(&self, tokens: impl IntoIterator<Item = Token<'g>>, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        // One entry per open region: whether it emitted a span
        let mut open: Vec<bool> = Vec::new();

        for token in tokens {
            let slice = &text[token.range.clone()];
            let scope = token.class.scope();
            match token.role {
                Role::Atom => match scope {
                    Some(scope) => {
                        self.open_span(&mut out, scope);
                        escape_into(&mut out, slice);
                        out.push_str("</span>");
                    }
                    None => escape_into(&mut out, slice),
                },
                Role::Open => {
                    if let Some(scope) = scope {
                        self.open_span(&mut out, scope);
                    }
                    open.push(scope.is_some());
                    escape_into(&mut out, slice);
                }
                Role::Body => escape_into(&mut out, slice),
                Role::Close => {
                    escape_into(&mut out, slice);
                    if open.pop() == Some(true) {
                        out.push_str("</span>");
                    }
                }
            }
        }

        for emitted in open.into_iter().rev() {
            if emitted {
                out.push_str("</span>");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::Grammar;
    use crate::syntax::rules::RuleSpec;
    use crate::syntax::tokenizer::tokenize;
    use crate::syntax::tokens::TokenClass;

    fn grammar() -> Grammar {
        Grammar::builder("generic-code")
            .keywords(TokenClass::Keyword, "function")
            .rule(
                RuleSpec::region("string", "\"", "\"", TokenClass::String)
                    .containing(RuleSpec::pattern("escape", r"\\.", TokenClass::Escape)),
            )
            .rule(RuleSpec::region("block_comment", r"/\*", r"\*/", TokenClass::Comment))
            .build()
            .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>&\"</a>"), "&lt;a href=&#x27;x&#x27;&gt;&amp;&quot;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_class_name_nesting() {
        let renderer = HtmlRenderer::default();
        assert_eq!(renderer.class_name("keyword"), "hljs-keyword");
        assert_eq!(renderer.class_name("title.function"), "hljs-title function_");
        assert_eq!(renderer.class_name("a.b.c"), "hljs-a b_ c__");
        assert_eq!(HtmlRenderer::new("").class_name("string"), "string");
    }

    #[test]
    fn test_keyword_span() {
        let g = grammar();
        let text = "function f() {}";
        assert_eq!(
            render(tokenize(text, &g), text),
            "<span class=\"hljs-keyword\">function</span> f() {}"
        );
    }

    #[test]
    fn test_nested_spans() {
        let g = grammar();
        let text = "\"a\\nb\"";
        assert_eq!(
            render(tokenize(text, &g), text),
            "<span class=\"hljs-string\">&quot;a\
             <span class=\"hljs-char escape_\">\\n</span>\
             b&quot;</span>"
        );
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let g = grammar();
        let text = "<div>";
        let html = render(tokenize(text, &g), text);
        assert_eq!(html, "&lt;div&gt;");
        assert!(!html.contains('<'));
    }

    #[test]
    fn test_unterminated_region_is_closed() {
        let g = grammar();
        let text = "x /* <open";
        let html = render(tokenize(text, &g), text);
        assert_eq!(html, "x <span class=\"hljs-comment\">/* &lt;open</span>");
    }

    #[test]
    fn test_render_is_deterministic() {
        let g = grammar();
        let text = "function /* c */ \"s\" <b>";
        let a = render(tokenize(text, &g), text);
        let b = render(tokenize(text, &g), text);
        assert_eq!(a, b);
    }
}
