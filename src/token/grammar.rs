//! Grammar-based tokenizer backed by syntect's bundled syntax definitions.

use super::{push_merged, split_lines, Token, TokenKind, TokenLine, Tokenizer};
use once_cell::sync::Lazy;
use std::sync::Arc;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

/// Compiled default syntaxes, loaded once per process.
static DEFAULT_SYNTAXES: Lazy<Arc<SyntaxSet>> =
    Lazy::new(|| Arc::new(SyntaxSet::load_defaults_newlines()));

/// Language tags that have no bundled grammar but read well with another one.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("tsx", "js"),
    ("ts", "js"),
    ("typescript", "js"),
    ("jsx", "js"),
    ("mjs", "js"),
    ("cjs", "js"),
    ("javascript", "js"),
    ("rust", "rs"),
    ("python", "py"),
    ("shell", "sh"),
];

/// Map a TextMate scope to a token kind.
///
/// More specific prefixes are checked before their parents.
fn scope_to_kind(scope: &str) -> Option<TokenKind> {
    let kind = if scope.starts_with("comment") {
        TokenKind::Comment
    } else if scope.starts_with("string.regexp") {
        TokenKind::Regex
    } else if scope.starts_with("string") {
        TokenKind::String
    } else if scope.starts_with("constant.character") {
        TokenKind::Char
    } else if scope.starts_with("constant.numeric") {
        TokenKind::Number
    } else if scope.starts_with("constant.language.boolean") {
        TokenKind::Boolean
    } else if scope.starts_with("constant") || scope.starts_with("support.constant") {
        TokenKind::Constant
    } else if scope.starts_with("keyword.operator") {
        TokenKind::Operator
    } else if scope.starts_with("keyword")
        || scope.starts_with("storage")
        || scope.starts_with("variable.language")
    {
        TokenKind::Keyword
    } else if scope.starts_with("punctuation") {
        TokenKind::Punctuation
    } else if scope.starts_with("entity.name.function")
        || scope.starts_with("support.function")
        || scope.starts_with("variable.function")
    {
        TokenKind::Function
    } else if scope.starts_with("support.type.property-name") {
        TokenKind::Property
    } else if scope.starts_with("entity.name.class")
        || scope.starts_with("entity.name.type")
        || scope.starts_with("entity.other.inherited-class")
        || scope.starts_with("support.class")
    {
        TokenKind::ClassName
    } else if scope.starts_with("support.type") {
        TokenKind::Builtin
    } else if scope.starts_with("entity.name.namespace") {
        TokenKind::Namespace
    } else if scope.starts_with("entity.name.tag") {
        TokenKind::Tag
    } else if scope.starts_with("entity.other.attribute-name") {
        TokenKind::AttrName
    } else if scope.starts_with("variable.other.property")
        || scope.starts_with("variable.other.member")
        || scope.starts_with("meta.object-literal.key")
    {
        TokenKind::Property
    } else if scope.starts_with("variable") {
        TokenKind::Variable
    } else if scope.starts_with("markup.inserted") {
        TokenKind::Inserted
    } else if scope.starts_with("markup.deleted") {
        TokenKind::Deleted
    } else if scope.starts_with("markup.changed") {
        TokenKind::Changed
    } else {
        return None;
    };
    Some(kind)
}

/// Kinds for the current scope stack, outermost first, without repeats.
fn kinds_of(scopes: &ScopeStack) -> Vec<TokenKind> {
    let mut kinds = Vec::new();
    for scope in scopes.as_slice() {
        if let Some(kind) = scope_to_kind(&scope.build_string()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    if kinds.is_empty() {
        kinds.push(TokenKind::Plain);
    }
    kinds
}

/// Tokenizer driven by syntect grammars.
///
/// Output is recomputed on every call; only the compiled syntax set is shared.
#[derive(Clone)]
pub struct SyntectTokenizer {
    syntax_set: Arc<SyntaxSet>,
}

impl SyntectTokenizer {
    /// Create a tokenizer over syntect's default syntaxes.
    pub fn new() -> Self {
        Self {
            syntax_set: Arc::clone(&DEFAULT_SYNTAXES),
        }
    }

    /// Create a tokenizer over a custom syntax set.
    pub const fn with_syntax_set(syntax_set: Arc<SyntaxSet>) -> Self {
        Self { syntax_set }
    }

    /// Find the grammar for a language tag.
    ///
    /// Looks the tag up by extension or name, then through the alias table, and
    /// finally falls back to plain text.
    pub fn syntax_for(&self, language: &str) -> &SyntaxReference {
        let lookup = |tag: &str| self.syntax_set.find_syntax_by_token(tag);
        lookup(language)
            .or_else(|| {
                let lower = language.to_ascii_lowercase();
                LANGUAGE_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .and_then(|(_, target)| lookup(target))
            })
            .unwrap_or_else(|| {
                tracing::debug!(language, "no grammar for language, using plain text");
                self.syntax_set.find_syntax_plain_text()
            })
    }

    /// Name of the grammar a language tag resolves to.
    pub fn syntax_name(&self, language: &str) -> &str {
        &self.syntax_for(language).name
    }
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntectTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectTokenizer")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .finish()
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(&self, text: &str, language: &str) -> Vec<TokenLine> {
        let syntax = self.syntax_for(language);
        let mut state = ParseState::new(syntax);
        let mut scopes = ScopeStack::new();
        let mut lines = Vec::new();

        for line in split_lines(text) {
            // Bundled grammars expect each line to end with a newline.
            let with_newline = format!("{line}\n");
            let ops = match state.parse_line(&with_newline, &self.syntax_set) {
                Ok(ops) => ops,
                Err(err) => {
                    tracing::debug!(%err, "grammar failed on line, emitting it unstyled");
                    let tokens = if line.is_empty() {
                        Vec::new()
                    } else {
                        vec![Token::plain(line)]
                    };
                    lines.push(tokens);
                    continue;
                }
            };

            let mut tokens = TokenLine::new();
            let mut pos = 0;
            for (offset, op) in ops {
                let end = offset.min(line.len());
                if end > pos {
                    push_merged(&mut tokens, &line[pos..end], kinds_of(&scopes));
                    pos = end;
                }
                if let Err(err) = scopes.apply(&op) {
                    tracing::trace!(%err, "scope stack op rejected");
                }
            }
            if pos < line.len() {
                push_merged(&mut tokens, &line[pos..], kinds_of(&scopes));
            }
            lines.push(tokens);
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(line: &TokenLine) -> String {
        line.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_language_resolution() {
        let tokenizer = SyntectTokenizer::new();
        assert_eq!(tokenizer.syntax_name("rs"), "Rust");
        assert_eq!(tokenizer.syntax_name("py"), "Python");
        assert_eq!(tokenizer.syntax_name("tsx"), "JavaScript");
        assert_eq!(tokenizer.syntax_name("unknown_xyz"), "Plain Text");
    }

    #[test]
    fn test_tokens_reassemble_the_input() {
        let tokenizer = SyntectTokenizer::new();
        let code = "const isExample = animations.some(() => {})\n// done\n";
        let lines = tokenizer.tokenize(code, "tsx");
        assert_eq!(lines.len(), 3);
        assert_eq!(joined(&lines[0]), "const isExample = animations.some(() => {})");
        assert_eq!(joined(&lines[1]), "// done");
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_keywords_and_comments_are_classified() {
        let tokenizer = SyntectTokenizer::new();
        let lines = tokenizer.tokenize("const a = 1; // note", "js");
        let first = &lines[0][0];
        assert_eq!(first.text, "const");
        assert!(first.kinds.contains(&TokenKind::Keyword));
        assert!(lines[0]
            .iter()
            .any(|t| t.kinds.contains(&TokenKind::Comment)));
        assert!(lines[0]
            .iter()
            .any(|t| t.kinds.contains(&TokenKind::Number)));
    }

    #[test]
    fn test_partial_input_is_total() {
        let tokenizer = SyntectTokenizer::new();
        // An unterminated string and a dangling bracket still tokenize.
        let lines = tokenizer.tokenize("let s = \"abc", "js");
        assert_eq!(joined(&lines[0]), "let s = \"abc");
        let lines = tokenizer.tokenize("fn main() {", "rs");
        assert_eq!(joined(&lines[0]), "fn main() {");
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        let tokenizer = SyntectTokenizer::new();
        assert!(tokenizer.tokenize("", "tsx").is_empty());
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let tokenizer = SyntectTokenizer::new();
        let lines = tokenizer.tokenize("whatever here", "nope");
        assert_eq!(lines, vec![vec![Token::plain("whatever here")]]);
    }

    #[test]
    fn test_scope_mapping() {
        assert_eq!(scope_to_kind("comment.line.double-slash.js"), Some(TokenKind::Comment));
        assert_eq!(scope_to_kind("keyword.operator.assignment.js"), Some(TokenKind::Operator));
        assert_eq!(scope_to_kind("storage.type.js"), Some(TokenKind::Keyword));
        assert_eq!(scope_to_kind("constant.numeric.integer"), Some(TokenKind::Number));
        assert_eq!(scope_to_kind("support.type.property-name.json"), Some(TokenKind::Property));
        assert_eq!(scope_to_kind("source.js"), None);
        assert_eq!(scope_to_kind("meta.function-call.js"), None);
    }
}
