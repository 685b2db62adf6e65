//! autohighlight - syntax highlighting with automatic language detection
//!
//! Code is tokenized with every registered grammar, each grammar is
//! scored on how well it explains the input, and the winner's tokens are
//! rendered as `<span class="hljs-...">` markup.
//!
//! ```
//! let result = autohighlight::highlight_auto("fn main() { let mut x = 1u32; }").unwrap();
//! assert_eq!(result.language, "rust");
//! assert!(result.value.contains("<span class=\"hljs-keyword\">fn</span>"));
//! ```

pub mod config;
pub mod error;
pub mod highlighter;
pub mod syntax;

pub use config::HighlightConfig;
pub use error::{HighlightError, Result};
pub use highlighter::{highlight_auto, HighlightResult, Highlighter};
pub use syntax::{Grammar, GrammarRegistry, RuleSpec, SealedRegistry, TokenClass};
