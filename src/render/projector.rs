//! Render Projector: revealed text + theme → styled lines.
//!
//! Projection is recomputed on every frame and never cached; only the
//! tokenizer's compiled grammars are shared.

use crate::style::{Theme, TokenStyle};
use crate::token::{SyntectTokenizer, TokenKind, Tokenizer};

/// Language tag used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "tsx";

/// A token with its style resolved against one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    /// Literal text.
    pub text: String,
    /// Style keys the tokenizer assigned.
    pub kinds: Vec<TokenKind>,
    /// Resolved style.
    pub style: TokenStyle,
}

/// One projected line.
pub type StyledLine = Vec<StyledToken>;

/// Output of one projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Theme the styles were resolved against.
    pub theme: Theme,
    /// Styled lines, one per source line of the revealed text.
    pub lines: Vec<StyledLine>,
}

impl Projection {
    /// Whether nothing was projected.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Tokenizes revealed text with a fixed language and styles it per theme.
#[derive(Debug, Clone)]
pub struct RenderProjector<T: Tokenizer = SyntectTokenizer> {
    tokenizer: T,
    language: String,
}

impl RenderProjector {
    /// Projector using the bundled grammars.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self::new(SyntectTokenizer::new(), language)
    }
}

impl Default for RenderProjector {
    fn default() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }
}

impl<T: Tokenizer> RenderProjector<T> {
    /// Projector using a custom tokenizer.
    pub fn new(tokenizer: T, language: impl Into<String>) -> Self {
        Self {
            tokenizer,
            language: language.into(),
        }
    }

    /// The language tag passed to the tokenizer.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Tokenize `revealed` and resolve each token's style for `theme`.
    ///
    /// Empty input yields zero lines. The same input always yields the same
    /// output.
    pub fn project(&self, revealed: &str, theme: Theme) -> Projection {
        let table = theme.style_table();
        let lines = self
            .tokenizer
            .tokenize(revealed, &self.language)
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|token| StyledToken {
                        style: table.resolve(&token.kinds),
                        text: token.text,
                        kinds: token.kinds,
                    })
                    .collect()
            })
            .collect();
        Projection { theme, lines }
    }
}
