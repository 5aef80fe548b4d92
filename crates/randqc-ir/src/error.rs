//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while building a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("Qubit {qubit} is not part of the circuit (in '{op}')")]
    QubitNotFound { qubit: QubitId, op: String },

    #[error("Classical bit {clbit} is not part of the circuit (in '{op}')")]
    ClbitNotFound { clbit: ClbitId, op: String },

    #[error("Qubit {qubit} appears more than once in '{op}'")]
    DuplicateQubit { qubit: QubitId, op: String },

    #[error("Gate '{gate}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch {
        gate: String,
        expected: u32,
        got: usize,
    },

    #[error("Measurement of {qubits} qubits into {clbits} classical bits")]
    MeasureMismatch { qubits: usize, clbits: usize },

    /// A conditional gate needs a classical register to read.
    #[error("Conditional '{op}' in a circuit without classical bits")]
    ConditionWithoutClbits { op: String },

    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
