//! Splits genome source into whitespace-delimited tokens, recording the line
//! (and byte span) each token was found on.
use core::fmt;

pub use logos::Span;
use logos::Logos;

/// Lexer extras: the 1-based line the lexer is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineTracker {
    line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { line: 1 }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LineTracker)]
#[logos(skip r"[^\S\r\n]+")]
enum Lexeme {
    #[regex(r"\r\n|\n|\r", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    LineEnding,
    #[regex(r"\S+")]
    Word,
}

/// A single word of genome source.
///
/// Tokens are immutable once produced. A token that was not lexed from any
/// source (see [`Token::new`] and [`Token::default`]) has an empty span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: Box<str>,
    line: usize,
    span: Span,
}

impl Token {
    /// Builds a token by hand, outside of [`tokenize`].
    pub fn new(value: impl AsRef<str>, line: usize) -> Self {
        Self {
            value: Box::from(value.as_ref()),
            line,
            span: 0..0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte range of this token in the source it was lexed from.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn is(&self, text: &str) -> bool {
        &*self.value == text
    }
}

/// The synthetic token: empty text on line 1.
impl Default for Token {
    fn default() -> Self {
        Self::new("", 1)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Splits `source` on whitespace (newlines included).
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = vec![];

    while let Some(lexeme) = lexer.next() {
        match lexeme {
            Ok(Lexeme::LineEnding) => {}
            // The two rules cover every character, so an error can only be word text
            Ok(Lexeme::Word) | Err(()) => tokens.push(Token {
                value: Box::from(lexer.slice()),
                line: lexer.extras.line,
                span: lexer.span(),
            }),
        }
    }

    tokens
}
