//! Statement parsing.

use super::Parser;
use crate::ast::{GateCall, LoopRange, Operand, Statement, WireKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qubit => self.parse_declaration(WireKind::Qubit),
            Token::Bit => self.parse_declaration(WireKind::Bit),
            Token::Qreg => self.parse_qasm2_declaration(WireKind::Qubit),
            Token::Creg => self.parse_qasm2_declaration(WireKind::Bit),
            Token::Measure => self.parse_measure(),
            Token::Reset => {
                self.advance();
                let qubits = self.parse_operands()?;
                self.expect(Token::Semicolon)?;
                Ok(Statement::Reset { qubits })
            }
            Token::Barrier => {
                self.advance();
                let qubits = if self.check(&Token::Semicolon) {
                    Vec::new()
                } else {
                    self.parse_operands()?
                };
                self.expect(Token::Semicolon)?;
                Ok(Statement::Barrier { qubits })
            }
            Token::If => self.parse_if(),
            Token::For => self.parse_for(),
            Token::Gate => self.parse_gate_def(),
            Token::GateU => {
                self.advance();
                self.parse_gate_call("U".into())
            }
            Token::GateCX => {
                self.advance();
                self.parse_gate_call("CX".into())
            }
            Token::Identifier(_) => {
                let name = self.parse_identifier()?;
                if self.check(&Token::Eq) || self.check(&Token::LBracket) {
                    self.parse_assignment(name)
                } else {
                    self.parse_gate_call(name)
                }
            }
            _ => {
                self.advance();
                Err(self.unexpected("statement", &token))
            }
        }
    }

    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.next_token("include path")? {
            Token::StringLiteral(s) => s,
            other => return Err(self.unexpected("string literal", &other)),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// `qubit[n] q;` / `bit[n] c;`, with the size before the name.
    fn parse_declaration(&mut self, kind: WireKind) -> ParseResult<Statement> {
        self.advance();
        let size = self.parse_optional_index()?;
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Declare { kind, name, size })
    }

    /// `qreg q[n];` / `creg c[n];`, with the size after the name.
    fn parse_qasm2_declaration(&mut self, kind: WireKind) -> ParseResult<Statement> {
        self.advance();
        let name = self.parse_identifier()?;
        let size = self.parse_optional_index()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Declare { kind, name, size })
    }

    /// `measure q -> c;` or a bare `measure q;`.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Measure)?;
        let qubits = self.parse_operands()?;
        let bits = if self.consume(&Token::Arrow) {
            self.parse_operands()?
        } else {
            Vec::new()
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubits, bits })
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(Token::RParen)?;

        let then_body = self.parse_body()?;
        let else_body = if self.consume(&Token::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_body,
            else_body,
        })
    }

    /// `for i in [start:end]` or `for i in [start:step:end]`.
    fn parse_for(&mut self) -> ParseResult<Statement> {
        self.expect(Token::For)?;
        let variable = self.parse_identifier()?;
        self.expect(Token::In)?;
        self.expect(Token::LBracket)?;
        let start = self.parse_expression()?;
        self.expect(Token::Colon)?;
        let second = self.parse_expression()?;
        let range = if self.consume(&Token::Colon) {
            LoopRange {
                start,
                step: Some(second),
                end: self.parse_expression()?,
            }
        } else {
            LoopRange {
                start,
                step: None,
                end: second,
            }
        };
        self.expect(Token::RBracket)?;

        let body = self.parse_body()?;
        Ok(Statement::For {
            variable,
            range,
            body,
        })
    }

    /// `gate name(params) a, b { ... }`
    fn parse_gate_def(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Gate)?;
        let name = self.parse_identifier()?;

        let params = if self.consume(&Token::LParen) {
            let params = if self.check(&Token::RParen) {
                Vec::new()
            } else {
                self.comma_separated(Self::parse_identifier)?
            };
            self.expect(Token::RParen)?;
            params
        } else {
            Vec::new()
        };
        let qubits = self.comma_separated(Self::parse_identifier)?;
        let body = self.parse_block()?;

        Ok(Statement::GateDef {
            name,
            params,
            qubits,
            body,
        })
    }

    /// `target = measure q;`, `target[i] = measure q[j];` or an expression
    /// assignment.
    fn parse_assignment(&mut self, target: String) -> ParseResult<Statement> {
        let index = self.parse_optional_index()?;
        self.expect(Token::Eq)?;

        if self.consume(&Token::Measure) {
            let qubits = self.parse_operands()?;
            self.expect(Token::Semicolon)?;
            let bit = Operand {
                register: target,
                index,
            };
            return Ok(Statement::Measure {
                qubits,
                bits: vec![bit],
            });
        }

        let value = self.parse_expression()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Assignment {
            target,
            index,
            value,
        })
    }

    fn parse_gate_call(&mut self, name: String) -> ParseResult<Statement> {
        let params = if self.consume(&Token::LParen) {
            let params = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            params
        } else {
            Vec::new()
        };
        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
        }))
    }

    /// A braced block, or a single statement standing in for one.
    pub(super) fn parse_body(&mut self) -> ParseResult<Vec<Statement>> {
        if self.check(&Token::LBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.expect(Token::LBrace)?;
        let mut statements = Vec::new();
        while !self.consume(&Token::RBrace) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_operands(&mut self) -> ParseResult<Vec<Operand>> {
        self.comma_separated(|p| {
            let register = p.parse_identifier()?;
            let index = p.parse_optional_index()?;
            Ok(Operand { register, index })
        })
    }

    /// An optional `[n]` suffix or prefix.
    fn parse_optional_index(&mut self) -> ParseResult<Option<u32>> {
        if !self.consume(&Token::LBracket) {
            return Ok(None);
        }
        let value = self.parse_u32_literal()?;
        self.expect(Token::RBracket)?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinOp, Expression, Operand, Statement, WireKind};
    use crate::error::ParseError;
    use crate::parser::parse_ast;

    fn statements(body: &str) -> Vec<Statement> {
        parse_ast(&format!("OPENQASM 3.0;\n{body}"))
            .unwrap()
            .statements
    }

    #[test]
    fn test_measure_forms() {
        let stmts = statements("c[1] = measure q[0];\nmeasure q[2] -> c[3];\nc = measure q;\nmeasure q;");
        let Statement::Measure { qubits, bits } = &stmts[0] else {
            panic!("expected measure");
        };
        assert_eq!(qubits[0], Operand::element("q", 0));
        assert_eq!(bits[0], Operand::element("c", 1));

        let Statement::Measure { qubits, bits } = &stmts[1] else {
            panic!("expected measure");
        };
        assert_eq!(qubits[0].index, Some(2));
        assert_eq!(bits[0].index, Some(3));

        let Statement::Measure { qubits, bits } = &stmts[2] else {
            panic!("expected measure");
        };
        assert_eq!(qubits[0], Operand::whole("q"));
        assert_eq!(bits[0], Operand::whole("c"));

        assert!(matches!(&stmts[3], Statement::Measure { bits, .. } if bits.is_empty()));
    }

    #[test]
    fn test_builtin_gate_calls() {
        let stmts = statements("U(pi, 0, pi) q[0];\nCX q[0], q[1];");
        assert!(matches!(&stmts[0], Statement::Gate(call) if call.name == "U" && call.params.len() == 3));
        assert!(matches!(&stmts[1], Statement::Gate(call) if call.name == "CX" && call.qubits.len() == 2));
    }

    #[test]
    fn test_gate_definition() {
        let stmts = statements("gate rzz(theta) a, b {\n    cx a, b;\n    rz(theta) b;\n    cx a, b;\n}\ngate g a { }");
        let Statement::GateDef {
            name,
            params,
            qubits,
            body,
        } = &stmts[0]
        else {
            panic!("expected gate definition");
        };
        assert_eq!(name, "rzz");
        assert_eq!(params, &["theta"]);
        assert_eq!(qubits, &["a", "b"]);
        assert_eq!(body.len(), 3);

        assert!(matches!(&stmts[1], Statement::GateDef { params, body, .. } if params.is_empty() && body.is_empty()));
    }

    #[test]
    fn test_if_block() {
        let stmts = statements("if (c == 5) {\n    x q[1];\n}\nif (c == 1) x q[0]; else y q[0];");
        let Statement::If {
            condition,
            then_body,
            else_body,
        } = &stmts[0]
        else {
            panic!("expected if");
        };
        assert!(matches!(
            condition,
            Expression::BinOp { op: BinOp::Eq, right, .. } if **right == Expression::Int(5)
        ));
        assert_eq!(then_body.len(), 1);
        assert!(else_body.is_none());

        assert!(matches!(&stmts[1], Statement::If { else_body: Some(body), .. } if body.len() == 1));
    }

    #[test]
    fn test_for_ranges() {
        let stmts = statements("for i in [0:4] { x q[0]; }\nfor j in [0:2:8] x q[0];");
        let Statement::For { range, .. } = &stmts[0] else {
            panic!("expected for");
        };
        assert!(range.step.is_none());
        assert_eq!(range.end, Expression::Int(4));

        let Statement::For { variable, range, .. } = &stmts[1] else {
            panic!("expected for");
        };
        assert_eq!(variable, "j");
        assert_eq!(range.step, Some(Expression::Int(2)));
        assert_eq!(range.end, Expression::Int(8));
    }

    #[test]
    fn test_declarations() {
        let stmts = statements("qubit[3] q;\nbit c;\nqreg r[2];\ncreg d[2];");
        let kinds: Vec<_> = stmts
            .iter()
            .map(|s| match s {
                Statement::Declare { kind, name, size } => (*kind, name.as_str(), *size),
                other => panic!("expected declaration, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                (WireKind::Qubit, "q", Some(3)),
                (WireKind::Bit, "c", None),
                (WireKind::Qubit, "r", Some(2)),
                (WireKind::Bit, "d", Some(2)),
            ]
        );
    }

    #[test]
    fn test_barrier_without_operands() {
        let stmts = statements("barrier;");
        assert!(matches!(&stmts[0], Statement::Barrier { qubits } if qubits.is_empty()));
    }

    #[test]
    fn test_assignment() {
        let stmts = statements("c[0] = 1;");
        assert!(matches!(
            &stmts[0],
            Statement::Assignment { target, index: Some(0), value: Expression::Int(1) } if target == "c"
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let result = parse_ast("OPENQASM 3.0;\nif (c == 1) {\n x q[0];");
        assert!(matches!(result, Err(ParseError::UnexpectedEof(_))));
    }

    #[test]
    fn test_stray_token() {
        let result = parse_ast("OPENQASM 3.0;\n;");
        assert!(matches!(result, Err(ParseError::UnexpectedToken { line: 2, .. })));
    }
}
