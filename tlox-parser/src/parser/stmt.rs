use super::*;

impl<'a> Parser<'a> {
    /// Parses a declaration (or statement).
    /// On a syntax error, synchronizes to the next statement boundary and returns `None`.
    pub fn parse_declaration(&mut self) -> Option<Stmt> {
        let result = match self.current_token().kind {
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Fun => self.parse_fn_declaration(),
            _ => self.parse_stmt(),
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(ParseError) => {
                self.synchronize();
                None
            }
        }
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        self.nested(|parser| match parser.current_token().kind {
            TokenKind::If => parser.parse_if_stmt(),
            TokenKind::Print => parser.parse_print_stmt(),
            TokenKind::Return => parser.parse_return_stmt(),
            TokenKind::OpenBrace => {
                parser.next();
                Ok(Stmt::Block(parser.parse_block_body()?))
            }
            _ => {
                // expression statement
                let expr = parser.parse_expr()?;
                parser.expect(TokenKind::Semi, "Expect ';' after expression.")?;
                Ok(Stmt::ExprStmt(expr))
            }
        })
    }

    /// Parses the declarations of a block up to and including the closing `}`.
    /// The opening `{` must already be eaten.
    fn parse_block_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::CloseBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration() {
                body.push(stmt);
            }
        }

        self.expect(TokenKind::CloseBrace, "Expect '}' after block.")?;
        Ok(body)
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        self.next(); // eat `var`
        let ident = self.expect(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.eat(TokenKind::Equals) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(
            TokenKind::Semi,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::VarDeclaration { ident, initializer })
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        self.next(); // eat `fun`
        let ident = self.expect(TokenKind::Identifier, "Expect function name.")?;
        self.expect(TokenKind::OpenParen, "Expect '(' after function name.")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::CloseParen) {
            loop {
                if params.len() >= MAX_ARITY {
                    self.error_at_current("Can't have more than 255 parameters.");
                }
                params.push(self.expect(TokenKind::Identifier, "Expect parameter name.")?);

                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen, "Expect ')' after parameters.")?;

        self.expect(TokenKind::OpenBrace, "Expect '{' before function body.")?;
        let body = self.nested(Self::parse_block_body)?;

        Ok(Stmt::FnDeclaration(Rc::new(FnDeclaration {
            ident,
            params,
            body,
        })))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.next(); // eat `if`
        self.expect(TokenKind::OpenParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.next(); // eat `print`
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi, "Expect ';' after value.")?;
        Ok(Stmt::PrintStmt(expr))
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let keyword = self.next();
        let value = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semi, "Expect ';' after return value.")?;
        Ok(Stmt::ReturnStmt { keyword, value })
    }
}
