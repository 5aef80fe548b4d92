//! Errors raised while reading or writing QASM text.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    // Syntax. These carry the 1-based source line.
    #[error("line {line}: unrecognized input {message}")]
    LexerError { line: usize, message: String },

    #[error("line {line}: expected {expected} but found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("input ended while reading {0}")]
    UnexpectedEof(String),

    #[error("OPENQASM version '{0}' is not 2.x or 3.x")]
    InvalidVersion(String),

    // Name resolution.
    #[error("'{0}' was never declared")]
    UndefinedIdentifier(String),

    #[error("'{0}' is declared twice")]
    DuplicateDeclaration(String),

    /// Neither a standard gate nor one defined with `gate ... { }`.
    #[error("no gate named '{0}'")]
    UnknownGate(String),

    // Operand checks.
    #[error("'{gate}' acts on {expected} qubit(s) but was given {got}")]
    WrongQubitCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    #[error("'{gate}' takes {expected} parameter(s) but was given {got}")]
    WrongParameterCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    #[error("{register}[{index}] is past the end of '{register}' (size {size})")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    #[error("'{gate}' is broadcast over registers of unequal sizes {sizes:?}")]
    BroadcastMismatch { gate: String, sizes: Vec<usize> },

    /// Only `register == integer` can become a circuit condition.
    #[error("condition '{0}' is not of the form `register == value`")]
    InvalidCondition(String),

    /// Valid syntax with no circuit counterpart, or a feature the target
    /// dialect lacks when emitting.
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    CircuitError(#[from] randqc_ir::IrError),
}

pub type ParseResult<T> = Result<T, ParseError>;
