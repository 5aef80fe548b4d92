//! Parser for `OpenQASM` 3.

mod expression;
mod lowering;
mod statement;

pub(crate) use lowering::lower_to_circuit;

use randqc_ir::Circuit;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Read `OpenQASM` 2 or 3 text into a circuit.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let program = parse_ast(source)?;
    lower_to_circuit(&program)
}

/// Read `OpenQASM` text into its syntax tree without building a circuit.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Cursor over a fully tokenized source.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    /// Line of the most recently consumed token.
    pub(super) line: usize,
}

fn same_kind(a: &Token, b: &Token) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

impl Parser {
    /// Lexing happens up front, so the first bad character fails here.
    fn new(source: &str) -> ParseResult<Self> {
        let tokens = tokenize(source)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::LexerError {
                line: e.line,
                message: e.message,
            })?;

        Ok(Self {
            tokens,
            pos: 0,
            line: 1,
        })
    }

    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    pub(super) fn advance(&mut self) -> Option<Token> {
        let spanned = self.tokens.get(self.pos)?;
        self.line = spanned.line;
        self.pos += 1;
        Some(spanned.token.clone())
    }

    /// Like [`Parser::advance`], but running out of input is an error
    /// naming `what` was being read.
    fn next_token(&mut self, what: &str) -> ParseResult<Token> {
        self.advance()
            .ok_or_else(|| ParseError::UnexpectedEof(what.to_string()))
    }

    /// Consume a token of the same kind as `expected`, ignoring payloads.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let found = self.next_token(&format!("expected {expected}"))?;
        if same_kind(&found, &expected) {
            Ok(())
        } else {
            Err(self.unexpected(expected.to_string(), &found))
        }
    }

    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| same_kind(t, token))
    }

    /// Consume the next token only if it matches, reporting whether it did.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        let matched = self.check(token);
        if matched {
            self.advance();
        }
        matched
    }

    pub(super) fn unexpected(&self, expected: impl Into<String>, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line,
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    fn parse_program(&mut self) -> ParseResult<Program> {
        self.expect(Token::OpenQasm)?;
        let version = self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    /// `major.minor`, where only majors 2 and 3 are accepted.
    fn parse_version(&mut self) -> ParseResult<String> {
        let version = match self.next_token("version number")? {
            Token::FloatLiteral(v) => format!("{v:.1}"),
            Token::IntLiteral(v) => format!("{v}.0"),
            other => return Err(ParseError::InvalidVersion(other.to_string())),
        };
        if version.starts_with("2.") || version.starts_with("3.") {
            Ok(version)
        } else {
            Err(ParseError::InvalidVersion(version))
        }
    }

    /// One or more `item`s separated by commas.
    pub(super) fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.consume(&Token::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.next_token("identifier")? {
            Token::Identifier(name) => Ok(name),
            other => Err(self.unexpected("identifier", &other)),
        }
    }

    pub(super) fn parse_int_literal(&mut self) -> ParseResult<u64> {
        match self.next_token("integer")? {
            Token::IntLiteral(v) => Ok(v),
            other => Err(self.unexpected("integer", &other)),
        }
    }

    /// An integer that must fit a register size or index.
    pub(super) fn parse_u32_literal(&mut self) -> ParseResult<u32> {
        let value = self.parse_int_literal()?;
        u32::try_from(value).map_err(|_| ParseError::UnexpectedToken {
            line: self.line,
            expected: "integer below 2^32".into(),
            found: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Statement, WireKind};

    #[test]
    fn test_parse_bell_state() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] q;
            bit[2] c;
            h q[0];
            cx q[0], q[1];
            c = measure q;
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.instructions().filter(|i| i.is_measure()).count(), 2);
    }

    #[test]
    fn test_parse_parameterized() {
        let source = r"
            OPENQASM 3.0;
            qubit q;
            rx(pi/2) q;
            ry(pi/4) q;
            rz(0.5) q;
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_parse_multiple_registers() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] q1;
            qubit[2] q2;
            bit[4] c;
            h q1[0];
            cx q1[0], q2[0];
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
    }

    #[test]
    fn test_parse_ast_keeps_statements() {
        let program = parse_ast("OPENQASM 3.0;\ninclude \"stdgates.inc\";\nqubit[1] q;").unwrap();
        assert_eq!(program.version, "3.0");
        assert!(matches!(&program.statements[0], Statement::Include(p) if p == "stdgates.inc"));
        assert!(matches!(
            &program.statements[1],
            Statement::Declare {
                kind: WireKind::Qubit,
                size: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_version() {
        let result = parse_ast("OPENQASM 4.0;");
        assert!(matches!(result, Err(ParseError::InvalidVersion(_))));
    }

    #[test]
    fn test_error_reports_line() {
        let source = "OPENQASM 3.0;\nqubit[2] q;\nh q[0]\ncx q[0], q[1];";
        match parse(source) {
            Err(ParseError::UnexpectedToken { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected UnexpectedToken, got {other:?}"),
        }

        match parse("OPENQASM 3.0;\n\nqubit q;\n$") {
            Err(ParseError::LexerError { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected LexerError, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_register() {
        let result = parse("OPENQASM 3.0;\nqubit[5000000000] q;");
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_parse_error_undefined() {
        let source = r"
            OPENQASM 3.0;
            h undefined[0];
        ";

        let result = parse(source);
        assert!(matches!(result, Err(ParseError::UndefinedIdentifier(_))));
    }
}
