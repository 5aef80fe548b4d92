//! Circuit model shared by the randqc generator and the QASM reader.
//!
//! A [`Circuit`] is a fixed set of qubits `q[0..n]` and classical bits
//! `c[0..m]` plus an append-only [`CircuitDag`]. Every appended
//! [`Instruction`] is checked against the circuit's wires and placed on the
//! first layer after everything it touches, so [`Circuit::depth`] is always
//! the length of the longest wire chain.
//!
//! Gates are either one of the [`StandardGate`]s the generator samples from
//! or a [`CustomGate`] declared in a QASM file. Angles are
//! [`ParameterExpression`]s, which may stay symbolic.
//!
//! ```rust
//! use randqc_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! # Ok::<(), randqc_ir::IrError>(())
//! ```
//!
//! Conditional gates fire when register `c` holds a given value:
//!
//! ```rust
//! use randqc_ir::{Circuit, ClassicalCondition, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("feedback", 1, 1);
//! circuit.measure_all().unwrap();
//! circuit
//!     .gate_if(StandardGate::X, [QubitId(0)], ClassicalCondition::new("c", 1))
//!     .unwrap();
//!
//! assert_eq!(circuit.dag().num_ops(), 2);
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, CustomGate, Gate, GateKind, GateSignature, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
