use crate::ast::{Expr, FnDeclaration, Stmt};
use crate::lexer::{self, Token, TokenKind};
use std::mem;
use std::rc::Rc;
use tlox_source::{ErrorLocation, Source, SyntaxError};

mod expr;
mod stmt;

/// Functions and calls are limited to this many parameters / arguments.
pub const MAX_ARITY: usize = 255;

/// Expressions and statements can be nested at most this deep.
pub const MAX_NESTING: usize = 200;

/// Marker for a syntax error that has already been reported to the [`Source`].
/// Unwinds the parser up to the enclosing declaration, which then synchronizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseError;

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    /// Index of the current (not yet consumed) token.
    current: usize,
    /// Current nesting depth, see [`Parser::nested`].
    depth: usize,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    /// Scans `source` and creates a parser over the resulting tokens.
    pub fn new(source: &'a Source<'a>) -> Self {
        Self::with_tokens(lexer::scan(source), source)
    }

    /// Creates a parser over already scanned `tokens`.
    /// `tokens` must end with a [`TokenKind::Eof`].
    pub fn with_tokens(mut tokens: Vec<Token>, source: &'a Source<'a>) -> Self {
        if tokens.last().map(|token| &token.kind) != Some(&TokenKind::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }
        Self {
            tokens,
            current: 0,
            depth: 0,
            source,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses the whole program.
    /// Declarations that fail to parse are reported and left out of the result, so the
    /// result must not be evaluated unless the [`Source`] has no errors.
    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut program = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration() {
                program.push(stmt);
            }
        }
        program
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn current_token(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.current_token().kind == TokenKind::Eof
    }

    /// Consumes the current token and returns it. At [`TokenKind::Eof`], returns the
    /// `Eof` token without moving.
    fn next(&mut self) -> Token {
        if self.is_at_end() {
            return self.current_token().clone();
        }
        self.current += 1;
        self.previous().clone()
    }

    /// Predicate that tests whether the current token has the same discriminant as `tok`.
    fn check(&self, tok: &TokenKind) -> bool {
        mem::discriminant(&self.current_token().kind) == mem::discriminant(tok)
    }

    /// Predicate that tests whether the next token has the same discriminant and eats the next token if yes as a side effect.
    fn eat(&mut self, tok: TokenKind) -> bool {
        if self.check(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    /// Eats a token of the given kind or reports `message` at the current token.
    fn expect(&mut self, tok: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(&tok) {
            Ok(self.next())
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Reports a syntax error at `token`.
    fn error(&self, token: &Token, message: &str) -> ParseError {
        let location = if token.kind == TokenKind::Eof {
            ErrorLocation::End
        } else {
            ErrorLocation::Lexeme(token.lexeme.clone())
        };
        self.source
            .errors
            .add_error(SyntaxError::new(message, token.line).at(location));
        ParseError
    }

    fn error_at_current(&self, message: &str) -> ParseError {
        self.error(self.current_token(), message)
    }

    /// Runs `parse` one nesting level deeper.
    /// Past [`MAX_NESTING`] levels, reports an error at the current token instead.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_at_current("Too much nesting."));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Discards tokens until a statement boundary: just after a `;` or just before a
    /// token that starts a declaration or statement.
    fn synchronize(&mut self) {
        self.next();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semi || self.current_token().starts_statement() {
                break;
            }
            self.next();
        }
        tracing::trace!(
            line = self.current_token().line,
            "parser synchronized after syntax error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::AstPrinter;

    fn program(source: &str) -> String {
        let source = source.into();
        let ast = Parser::new(&source).parse_program();
        assert!(source.has_no_errors(), "{}", source.errors);
        AstPrinter::print_program(&ast)
    }

    fn errors(source: &str) -> String {
        let source = source.into();
        Parser::new(&source).parse_program();
        source.errors.to_string()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(program(""), "");
        assert_eq!(program("// nothing here"), "");
    }

    #[test]
    fn test_with_tokens_appends_eof() {
        let source = "".into();
        let tokens = vec![
            Token::new(TokenKind::Print, "print", 1),
            Token::new(TokenKind::NumberLit(1.0), "1", 1),
            Token::new(TokenKind::Semi, ";", 1),
        ];
        let ast = Parser::with_tokens(tokens, &source).parse_program();
        assert!(source.has_no_errors());
        assert_eq!(ast, vec![Stmt::PrintStmt(Expr::NumberLit(1.0))]);
    }

    #[test]
    fn test_multiple_errors() {
        assert_eq!(
            errors("print ;\nvar x = 1;\nvar = 2;"),
            "[line 1] Error at ';': Expect expression.\n\
             [line 3] Error at '=': Expect variable name.\n"
        );
    }

    #[test]
    fn test_error_at_end() {
        assert_eq!(
            errors("print 1"),
            "[line 1] Error at end: Expect ';' after value.\n"
        );
    }

    #[test]
    fn test_synchronize_before_keyword() {
        // the bad expression statement is skipped up to `print`, which parses normally
        let source = "1 + ) 2 print 3;".into();
        let ast = Parser::new(&source).parse_program();
        assert_eq!(
            source.errors.to_string(),
            "[line 1] Error at ')': Expect expression.\n"
        );
        assert_eq!(ast, vec![Stmt::PrintStmt(Expr::NumberLit(3.0))]);
    }

    #[test]
    fn test_next_stays_at_eof() {
        let source = "".into();
        let mut parser = Parser::with_tokens(Vec::new(), &source);
        assert_eq!(parser.next().kind, TokenKind::Eof);
        assert_eq!(parser.next().kind, TokenKind::Eof);
        assert!(parser.is_at_end());

        let source = "print".into();
        let mut parser = Parser::new(&source);
        assert_eq!(parser.next().kind, TokenKind::Print);
        assert_eq!(parser.next().kind, TokenKind::Eof);
    }

    #[test]
    fn test_too_much_nesting() {
        let deep = format!("print {}1{};\nprint 2;", "(".repeat(1_000), ")".repeat(1_000));
        let source = deep.as_str().into();
        let ast = Parser::new(&source).parse_program();
        assert_eq!(
            source.errors.to_string(),
            "[line 1] Error at '(': Too much nesting.\n"
        );
        // the rest of the program still parses
        assert_eq!(AstPrinter::print_program(&ast), "(print 2)");

        assert_eq!(
            errors(&format!("print {}true;", "!".repeat(1_000))),
            "[line 1] Error at '!': Too much nesting.\n"
        );
        assert_eq!(
            errors(&format!("{}{}", "{".repeat(1_000), "}".repeat(1_000)))
                .lines()
                .next(),
            Some("[line 1] Error at '{': Too much nesting.")
        );
        assert_eq!(
            errors(&format!("{}print 1;", "if (true) ".repeat(300))),
            "[line 1] Error at 'if': Too much nesting.\n"
        );
    }

    #[test]
    fn test_nesting_below_limit() {
        let depth = MAX_NESTING / 2;
        let grouped = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
        assert!(program(&grouped).starts_with("(print (group (group"));

        let blocks = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        assert!(program(&blocks).starts_with("(block (block"));
    }

    #[test]
    fn test_errors_inside_block() {
        assert_eq!(
            errors("{\n  print 1\n  print 2;\n  var;\n}"),
            "[line 3] Error at 'print': Expect ';' after value.\n\
             [line 4] Error at ';': Expect variable name.\n"
        );
        assert_eq!(
            errors("{ print 1;"),
            "[line 1] Error at end: Expect '}' after block.\n"
        );
    }
}
