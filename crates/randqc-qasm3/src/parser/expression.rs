//! Gate parameter and condition expressions.

use super::Parser;
use crate::ast::Expression;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_expr(0)
    }

    /// Precedence climbing over operators binding at least `min_prec`.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek().and_then(Token::binary_op) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();

            let rhs_prec = prec + u8::from(!op.is_right_associative());
            let right = self.parse_binary_expr(rhs_prec)?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expression> {
        if self.consume(&Token::Minus) {
            let operand = self.parse_unary_expr()?;
            Ok(Expression::Neg(Box::new(operand)))
        } else {
            self.parse_atom()
        }
    }

    /// Literal, constant, identifier, call or parenthesized expression.
    fn parse_atom(&mut self) -> ParseResult<Expression> {
        let atom = match self.next_token("expression")? {
            Token::IntLiteral(v) => Expression::Int(self.signed_int(v)?),
            Token::FloatLiteral(v) => Expression::Float(v),
            Token::Pi => Expression::Pi,
            Token::Tau => Expression::Tau,
            Token::Euler => Expression::Euler,
            Token::Identifier(name) if self.consume(&Token::LParen) => {
                let args = self.parse_expression_list()?;
                self.expect(Token::RParen)?;
                Expression::FnCall { name, args }
            }
            Token::Identifier(name) => Expression::Identifier(name),
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Expression::Paren(Box::new(inner))
            }
            other => return Err(self.unexpected("expression", &other)),
        };
        Ok(atom)
    }

    fn signed_int(&self, v: u64) -> ParseResult<i64> {
        i64::try_from(v).map_err(|_| ParseError::UnexpectedToken {
            line: self.line,
            expected: "integer below 2^63".into(),
            found: v.to_string(),
        })
    }

    /// Possibly empty argument list, up to but not including `)`.
    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        if self.check(&Token::RParen) {
            return Ok(Vec::new());
        }
        self.comma_separated(Self::parse_expression)
    }
}
