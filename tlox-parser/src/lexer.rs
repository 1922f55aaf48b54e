use logos::{Lexer, Logos};
use tlox_source::{Source, SyntaxError};

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse())]
    NumberLit(f64),
    #[regex(r#""[^"]*"?"#, string_literal)]
    StringLit(String),

    // identifiers
    #[regex("[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,

    // unary operators
    #[token("!")]
    Bang,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semi,

    // keywords
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fun")]
    Fun,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    // misc
    #[regex(r"[ \t\n\r]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated by [`Scanner`] once the input is exhausted.
    Eof,
}

/// Strips the quotes off a string literal. Returns `None` (an error token) if the closing quote is missing.
fn string_literal(lex: &mut Lexer<TokenKind>) -> Option<String> {
    let slice = lex.slice();
    if slice.len() >= 2 && slice.ends_with('"') {
        Some(slice[1..slice.len() - 1].to_string())
    } else {
        None
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token. Empty for [`TokenKind::Eof`].
    pub lexeme: String,
    /// The line the token ends on (1-based).
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Returns `true` if the token starts a declaration or statement.
    /// The parser resynchronizes on these after a syntax error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

/// Turns source code into a [`Vec`] of [`Token`]s.
/// Lexical errors are reported to the [`Source`] and scanning continues after them.
pub struct Scanner<'a> {
    lexer: Lexer<'a, TokenKind>,
    source: &'a Source<'a>,
    /// Current line (1-based).
    line: usize,
    /// Byte offset up to which newlines have been counted.
    counted: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            lexer: TokenKind::lexer(source.content),
            source,
            line: 1,
            counted: 0,
        }
    }

    /// Counts the newlines between the last token and the end of the current one.
    fn advance_line(&mut self) {
        let end = self.lexer.span().end;
        self.line += self.source.content[self.counted..end]
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        self.counted = end;
    }

    /// Scans the whole source. The result always ends with exactly one [`TokenKind::Eof`].
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(kind) = self.lexer.next() {
            self.advance_line();
            let lexeme = self.lexer.slice();

            if kind == TokenKind::Error {
                let message = if lexeme.starts_with('"') {
                    "Unterminated string."
                } else {
                    "Unexpected character."
                };
                self.source
                    .errors
                    .add_error(SyntaxError::new(message, self.line));
                continue;
            }

            tokens.push(Token::new(kind, lexeme, self.line));
        }

        // trailing whitespace and comments still count towards the last line
        self.line += self.source.content[self.counted..]
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        tokens.push(Token::new(TokenKind::Eof, "", self.line));

        tracing::trace!(count = tokens.len(), "scanned tokens");
        tokens
    }
}

/// Scans `source` into tokens. See [`Scanner::scan_tokens`].
pub fn scan<'a>(source: &'a Source<'a>) -> Vec<Token> {
    Scanner::new(source).scan_tokens()
}
