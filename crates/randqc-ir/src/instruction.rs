//! Operations together with the wires they touch.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{ClassicalCondition, Gate};
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(Gate),
    /// Measure each qubit into the classical bit at the same position.
    Measure,
    /// Return the qubit to |0⟩.
    Reset,
    Barrier,
}

/// An operation applied to concrete qubits and classical bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Only measurements write classical bits.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on_qubits(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Gate(gate.into()), qubits)
    }

    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    pub fn reset(qubit: QubitId) -> Self {
        Self::on_qubits(InstructionKind::Reset, [qubit])
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Barrier, qubits)
    }

    /// Check the operand shape that does not depend on the circuit.
    ///
    /// Gates need exactly their arity in qubits and measurements need one
    /// classical bit per qubit. Whether the wires exist is up to the DAG.
    pub fn validate(&self) -> IrResult<()> {
        match &self.kind {
            InstructionKind::Gate(gate) if gate.num_qubits() as usize != self.qubits.len() => {
                Err(IrError::QubitCountMismatch {
                    gate: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got: self.qubits.len(),
                })
            }
            InstructionKind::Measure if self.qubits.len() != self.clbits.len() => {
                Err(IrError::MeasureMismatch {
                    qubits: self.qubits.len(),
                    clbits: self.clbits.len(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    /// Register condition, if this is a conditional gate.
    pub fn condition(&self) -> Option<&ClassicalCondition> {
        self.as_gate()?.condition.as_ref()
    }

    /// The operation name as written in QASM.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}
