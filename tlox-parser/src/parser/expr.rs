use super::*;

impl TokenKind {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` is reserved for accepting any expression.
    /// All binary operators are left associative (`r_bp = l_bp + 1`).
    /// Assignment is handled separately by [`Parser::parse_expr`].
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Logical */
            TokenKind::Or => Some((1, 2)),
            TokenKind::And => Some((3, 4)),
            /* Equality */
            TokenKind::EqualsEquals | TokenKind::NotEquals => Some((5, 6)),
            /* Comparison */
            TokenKind::GreaterThan
            | TokenKind::GreaterThanEquals
            | TokenKind::LessThan
            | TokenKind::LessThanEquals => Some((7, 8)),
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some((9, 10)),
            /* Multiplicative */
            TokenKind::Asterisk | TokenKind::Slash => Some((11, 12)),
            _ => None,
        }
    }
}

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression, including assignment.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(Self::parse_assignment_expr)
    }

    fn parse_assignment_expr(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_expr_bp(0)?; // 0 to accept any expression

        if self.eat(TokenKind::Equals) {
            let equals = self.previous().clone();
            let value = self.parse_expr()?; // right associative

            return match lhs {
                Expr::Variable(ident) => Ok(Expr::Assign {
                    ident,
                    value: Box::new(value),
                }),
                _ => {
                    // reported, but the parser is still in a well defined state
                    self.error(&equals, "Invalid assignment target.");
                    Ok(lhs)
                }
            };
        }

        Ok(lhs)
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token().kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop
            let op = self.next();

            let rhs = Box::new(self.parse_expr_bp(r_bp)?);
            let lhs_boxed = Box::new(lhs);

            lhs = if matches!(op.kind, TokenKind::And | TokenKind::Or) {
                Expr::Logical {
                    lhs: lhs_boxed,
                    op,
                    rhs,
                }
            } else {
                Expr::Binary {
                    lhs: lhs_boxed,
                    op,
                    rhs,
                }
            };
        }

        Ok(lhs)
    }

    /// Parses a prefix expression (`!` or `-`) or falls through to a call expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        if matches!(self.current_token().kind, TokenKind::Bang | TokenKind::Minus) {
            let op = self.next();
            Ok(Expr::Unary {
                op,
                arg: Box::new(self.nested(Self::parse_unary_expr)?),
            })
        } else {
            self.parse_call_expr()
        }
    }

    /* Expressions.Call */
    /// Parses a primary expression followed by any number of argument lists.
    fn parse_call_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary_expr()?;

        while self.eat(TokenKind::OpenParen) {
            let mut args = Vec::new();

            if !self.check(&TokenKind::CloseParen) {
                loop {
                    if args.len() >= MAX_ARITY {
                        self.error_at_current("Can't have more than 255 arguments.");
                    }
                    args.push(self.parse_expr()?);

                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }

            let paren = self.expect(TokenKind::CloseParen, "Expect ')' after arguments.")?;
            expr = Expr::FnCall {
                callee: Box::new(expr),
                paren,
                args,
            };
        }

        Ok(expr)
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let expr = match self.current_token().kind.clone() {
            TokenKind::NumberLit(val) => Expr::NumberLit(val),
            TokenKind::StringLit(val) => Expr::StringLit(val),
            TokenKind::True => Expr::BoolLit(true),
            TokenKind::False => Expr::BoolLit(false),
            TokenKind::Nil => Expr::NilLit,
            TokenKind::Identifier => Expr::Variable(self.current_token().clone()),
            TokenKind::OpenParen => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping(Box::new(inner)));
            }
            _ => return Err(self.error_at_current("Expect expression.")),
        };
        self.next(); // eat parsed token
        Ok(expr)
    }
}
