//! Tokenizer Adapter: text + language tag → line-grouped tokens.
//!
//! The core only relies on the [`Tokenizer`] trait being deterministic and
//! total: any string, including the empty string or code that does not parse,
//! produces output. Two implementations ship with the crate:
//!
//! - [`SyntectTokenizer`]: grammar-based highlighting from syntect's bundled syntaxes
//! - [`PlainTokenizer`]: one unstyled token per line
//!
//! Lines are produced by splitting on `\n`; a trailing `\r` is dropped. A
//! trailing newline therefore yields a final empty line, and the empty string
//! yields no lines at all.

mod grammar;

pub use grammar::SyntectTokenizer;

/// Style key attached to a token.
///
/// These are the token classes theme tables are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text with no particular class.
    Plain,
    /// Comments.
    Comment,
    /// String literals.
    String,
    /// Character literals and escapes.
    Char,
    /// Numeric literals.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Language constants (`null`, `undefined`, ...).
    Constant,
    /// Built-in objects and functions.
    Builtin,
    /// Keywords and storage modifiers.
    Keyword,
    /// Operators.
    Operator,
    /// Brackets, separators, delimiters.
    Punctuation,
    /// Function names.
    Function,
    /// Class and type names.
    ClassName,
    /// Variables and parameters.
    Variable,
    /// Object properties.
    Property,
    /// Markup tag names.
    Tag,
    /// Markup attribute names.
    AttrName,
    /// Markup attribute values.
    AttrValue,
    /// Regular expression literals.
    Regex,
    /// Namespaces and module paths.
    Namespace,
    /// Diff insertions.
    Inserted,
    /// Diff deletions.
    Deleted,
    /// Diff changes.
    Changed,
}

/// A contiguous substring classified by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The literal text of the token.
    pub text: String,
    /// Style keys, outermost first. May be empty.
    pub kinds: Vec<TokenKind>,
}

impl Token {
    /// Create a token.
    pub fn new(text: impl Into<String>, kinds: Vec<TokenKind>) -> Self {
        Self {
            text: text.into(),
            kinds,
        }
    }

    /// Create an unclassified token.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, vec![TokenKind::Plain])
    }
}

/// One line of tokens. Contains no newline characters.
pub type TokenLine = Vec<Token>;

/// Anything that can split text into line-grouped tokens.
pub trait Tokenizer {
    /// Tokenize `text` as `language`.
    ///
    /// Must be deterministic and total. Unknown languages are tokenized as
    /// plain text rather than rejected.
    fn tokenize(&self, text: &str, language: &str) -> Vec<TokenLine>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str, language: &str) -> Vec<TokenLine> {
        (**self).tokenize(text, language)
    }
}

/// Tokenizer that performs no classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, text: &str, _language: &str) -> Vec<TokenLine> {
        split_lines(text)
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![Token::plain(line)]
                }
            })
            .collect()
    }
}

/// Split text into lines the way every tokenizer in this crate does.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let lines = if text.is_empty() { None } else { Some(text.split('\n')) };
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Append `text` to `line`, merging into the previous token when the kinds match.
pub(crate) fn push_merged(line: &mut TokenLine, text: &str, kinds: Vec<TokenKind>) {
    if text.is_empty() {
        return;
    }
    match line.last_mut() {
        Some(last) if last.kinds == kinds => last.text.push_str(text),
        _ => line.push(Token::new(text, kinds)),
    }
}
