//! C/C++ grammar

use super::{c_block_comment, c_line_comment, c_number, quoted_string};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

/// Create the C grammar (also covers C++)
pub fn c_grammar() -> Result<Grammar> {
    Grammar::builder("c")
        .name("C")
        .alias("h")
        .alias("cpp")
        .alias("c++")
        .keywords(
            TokenClass::Keyword,
            "auto break case const continue default do else enum extern for goto if inline \
             register restrict return sizeof static struct|2 switch typedef|2 union volatile while \
             class namespace|2 template|2 typename public private protected virtual new delete \
             using operator friend explicit constexpr noexcept nullptr|2 this throw try catch",
        )
        .keywords(
            TokenClass::Type,
            "char double float int long short signed unsigned void bool size_t|2 ptrdiff_t \
             int8_t int16_t int32_t int64_t uint8_t uint16_t uint32_t|2 uint64_t FILE",
        )
        .keywords(TokenClass::Literal, "true false NULL|2")
        .keywords(TokenClass::BuiltIn, "printf|2 malloc|2 free memcpy strlen std cout|2 endl")
        .rule(
            RuleSpec::pattern(
                "preprocessor",
                r"^[ \t]*#[ \t]*(?:include|define|undef|ifdef|ifndef|if|elif|else|endif|pragma|error)\b.*$",
                TokenClass::Meta,
            )
            .with_relevance(2.0),
        )
        .rule(c_line_comment())
        .rule(c_block_comment())
        .rule(quoted_string("string", "\""))
        .rule(RuleSpec::pattern("char", r"'(?:\\.|[^'\\\n])'", TokenClass::String))
        .rule(c_number("[uU]?[lL]{0,2}|[fF]"))
        .rule(RuleSpec::pattern("arrow", r"->", TokenClass::Operator).with_relevance(0.5))
        .rule(RuleSpec::pattern("operator", r"[+\-*/%&|^!<>=~?:]+", TokenClass::Operator))
        .rule(RuleSpec::pattern("punctuation", r"[{}();,]", TokenClass::Punctuation))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::{tokenize, Role};

    #[test]
    fn test_preprocessor_line() {
        let grammar = c_grammar().unwrap();
        let text = "#include <stdio.h>\nint main(void) { return 0; }";
        let first = tokenize(text, &grammar).next().unwrap();
        assert_eq!(first.class, TokenClass::Meta);
        assert_eq!(first.text(text), "#include <stdio.h>");
    }

    #[test]
    fn test_types_and_keywords() {
        let grammar = c_grammar().unwrap();
        let text = "unsigned int x = sizeof(y);";
        let keywords: Vec<_> = tokenize(text, &grammar)
            .filter(|t| t.keyword)
            .map(|t| (t.class, t.text(text).to_string()))
            .collect();
        assert_eq!(
            keywords,
            vec![
                (TokenClass::Type, "unsigned".to_string()),
                (TokenClass::Type, "int".to_string()),
                (TokenClass::Keyword, "sizeof".to_string()),
            ]
        );
    }

    #[test]
    fn test_long_input_of_comments_and_strings() {
        let grammar = c_grammar().unwrap();
        for unit in ["/* a */ ", "\"a\" "] {
            let text = unit.repeat(20_000);
            let mut tokens = tokenize(&text, &grammar);
            let regions = tokens.by_ref().filter(|t| t.role == Role::Open).count();
            assert_eq!(regions, 20_000);
            assert!(tokens.scanned_bytes() <= 16 * text.len(), "{:?}", unit);
        }
    }

    #[test]
    fn test_cpp_alias() {
        let grammar = c_grammar().unwrap();
        assert!(grammar.answers_to("cpp"));
        assert!(grammar.answers_to("C++"));
    }
}
