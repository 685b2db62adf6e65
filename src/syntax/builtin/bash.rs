//! Bash grammar

use super::{backslash_escape, hash_comment};
use crate::error::Result;
use crate::syntax::grammar::Grammar;
use crate::syntax::rules::RuleSpec;
use crate::syntax::tokens::TokenClass;

const VARIABLE: &str = r"\$(?:\{[^}\n]*\}|[A-Za-z_]\w*|[0-9@#?$!*\-])";

/// Create the Bash grammar
pub fn bash_grammar() -> Result<Grammar> {
    let variable = || RuleSpec::pattern("variable", VARIABLE, TokenClass::Variable).with_relevance(0.5);

    Grammar::builder("bash")
        .name("Bash")
        .alias("sh")
        .alias("shell")
        .alias("zsh")
        .keywords(
            TokenClass::Keyword,
            "if then else elif fi|2 for while until in do done|2 case esac|2 function select \
             return local|2 export|2 readonly declare",
        )
        .keywords(TokenClass::Literal, "true false")
        .keywords(
            TokenClass::BuiltIn,
            "echo|2 cd printf read set unset source exit test shift eval exec trap alias \
             mkdir rm cp mv grep sed awk cat",
        )
        .rule(RuleSpec::pattern("shebang", r"\A#!.*$", TokenClass::Meta).with_relevance(3.0))
        .rule(hash_comment())
        .rule(variable())
        .rule(
            RuleSpec::region("double_string", "\"", "\"", TokenClass::String)
                .containing(backslash_escape())
                .containing(variable()),
        )
        .rule(RuleSpec::region("single_string", "'", "'", TokenClass::String))
        .rule(RuleSpec::pattern("number", r"\b\d+\b", TokenClass::Number))
        .rule(RuleSpec::pattern("operator", r"&&|\|\||[|;&<>]", TokenClass::Operator))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;

    #[test]
    fn test_shebang_beats_comment() {
        let grammar = bash_grammar().unwrap();
        let text = "#!/bin/bash\n# comment\n";
        let tokens: Vec<_> = tokenize(text, &grammar)
            .filter(|t| !t.class.is_plain())
            .map(|t| (t.class, t.text(text).to_string()))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (TokenClass::Meta, "#!/bin/bash".to_string()),
                (TokenClass::Comment, "# comment".to_string()),
            ]
        );
    }

    #[test]
    fn test_variables_inside_double_quotes() {
        let grammar = bash_grammar().unwrap();
        let text = "echo \"home is $HOME\" '$NOT'";
        let variables: Vec<_> = tokenize(text, &grammar)
            .filter(|t| t.class == TokenClass::Variable)
            .map(|t| t.text(text).to_string())
            .collect();
        assert_eq!(variables, vec!["$HOME"]);
    }

    #[test]
    fn test_special_variable_is_not_a_comment() {
        let grammar = bash_grammar().unwrap();
        let text = "echo $#";
        assert!(tokenize(text, &grammar).all(|t| t.class != TokenClass::Comment));
    }
}
