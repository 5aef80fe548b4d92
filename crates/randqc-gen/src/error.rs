//! Error types for circuit generation.

use randqc_ir::IrError;
use thiserror::Error;

/// Errors that can occur while sampling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// A circuit needs at least one qubit.
    #[error("Number of qubits must be at least 1")]
    NoQubits,

    /// Operand bound outside the supported gate arities.
    #[error("max_operands must be between 1 and 4, got {0}")]
    InvalidMaxOperands(u32),

    /// A pool entry could not be turned into a gate.
    #[error("Gate '{0}' cannot be built from the sampled parameters")]
    UnsupportedGate(&'static str),

    /// Error while building the circuit.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for generation.
pub type GenResult<T> = Result<T, GenError>;
