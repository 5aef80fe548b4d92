//! The circuit type and its builder methods.

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{ClassicalCondition, Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// Shorthands for fixed (unparameterized) gates.
macro_rules! fixed_gate_methods {
    ($($method:ident => $gate:ident ( $($q:ident),+ )),+ $(,)?) => {
        $(
            #[doc = concat!("Append `", stringify!($method), "`.")]
            pub fn $method(&mut self, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.gate(StandardGate::$gate, [$($q),+])
            }
        )+
    };
}

/// Shorthands for single-angle gates.
macro_rules! angle_gate_methods {
    ($($method:ident => $gate:ident ( $($q:ident),+ )),+ $(,)?) => {
        $(
            #[doc = concat!("Append `", stringify!($method), "(theta)`.")]
            pub fn $method(
                &mut self,
                theta: impl Into<ParameterExpression>,
                $($q: QubitId),+
            ) -> IrResult<&mut Self> {
                self.gate(StandardGate::$gate(theta.into()), [$($q),+])
            }
        )+
    };
}

/// A quantum circuit over one quantum register `q` and one classical
/// register `c`.
///
/// Qubits and classical bits are numbered from zero in the order they were
/// added. A builder method that appends one instruction validates it first
/// and leaves the circuit untouched on error.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    dag: CircuitDag,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            dag: CircuitDag::new(),
        }
    }

    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        (0..num_qubits).for_each(|_| {
            circuit.add_qubit();
        });
        (0..num_clbits).for_each(|_| {
            circuit.add_clbit();
        });
        circuit
    }

    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        self.dag.add_qubit(id);
        id
    }

    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        self.dag.add_clbit(id);
        id
    }

    fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    fixed_gate_methods! {
        h => H(qubit),
        x => X(qubit),
        y => Y(qubit),
        z => Z(qubit),
        s => S(qubit),
        t => T(qubit),
        sx => SX(qubit),
        cx => CX(control, target),
        cz => CZ(control, target),
        swap => Swap(a, b),
        ccx => CCX(control1, control2, target),
    }

    angle_gate_methods! {
        rx => Rx(qubit),
        ry => Ry(qubit),
        rz => Rz(qubit),
        p => P(qubit),
        cp => CP(control, target),
    }

    /// Append the built-in `U(theta, phi, lambda)`.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        let gate = StandardGate::U(theta.into(), phi.into(), lambda.into());
        self.gate(gate, [qubit])
    }

    /// Append any gate, standard or custom.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    /// Append a gate that only fires when register `c` equals
    /// `condition.value`.
    pub fn gate_if(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
        condition: ClassicalCondition,
    ) -> IrResult<&mut Self> {
        let gate = gate.into().with_condition(condition);
        self.push(Instruction::gate(gate, qubits))
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure `qubits[i]` into `clbits[i]`, one instruction per pair.
    ///
    /// Fails with [`IrError::MeasureMismatch`] before anything is appended
    /// when the lengths differ.
    pub fn measure_many(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(self)
    }

    /// Measure every qubit `i` into classical bit `i`, adding classical bits
    /// as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::reset(qubit))
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.barrier(self.qubits())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        (0..self.num_qubits).map(QubitId)
    }

    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + use<> {
        (0..self.num_clbits).map(ClbitId)
    }

    /// Longest dependency chain, see [`CircuitDag::depth`].
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Instructions in the order they were appended.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Measured two-qubit Bell pair.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
        Ok(circuit)
    }

    /// Measured `n`-qubit GHZ state: a Hadamard followed by a CX ladder.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for (control, target) in (0..n).zip(1..n) {
            circuit.cx(QubitId(control), QubitId(target))?;
        }
        circuit.measure_all()?;

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(
            circuit.qubits().collect::<Vec<_>>(),
            vec![QubitId(0), QubitId(1), QubitId(2)]
        );
        assert_eq!(circuit.dag().num_qubits(), 3);
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_clbits(), 5);
        assert_eq!(circuit.depth(), 6);
        let cx_count = circuit.instructions().filter(|i| i.name() == "cx").count();
        assert_eq!(cx_count, 4);
    }

    #[test]
    fn test_ghz_single_qubit() {
        let circuit = Circuit::ghz(1).unwrap();
        assert_eq!(circuit.dag().num_ops(), 2);
    }

    #[test]
    fn test_measure_all_adds_clbits() {
        let mut circuit = Circuit::with_size("m", 3, 0);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);

        let pairs: Vec<_> = circuit
            .instructions()
            .map(|i| (i.qubits[0], i.clbits[0]))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (QubitId(0), ClbitId(0)),
                (QubitId(1), ClbitId(1)),
                (QubitId(2), ClbitId(2)),
            ]
        );
    }

    #[test]
    fn test_measure_many() {
        let mut circuit = Circuit::with_size("m", 2, 2);
        circuit
            .measure_many(&[QubitId(1), QubitId(0)], &[ClbitId(0), ClbitId(1)])
            .unwrap();
        assert_eq!(circuit.dag().num_ops(), 2);

        let result = circuit.measure_many(&[QubitId(0), QubitId(1)], &[ClbitId(0)]);
        assert!(matches!(
            result,
            Err(IrError::MeasureMismatch {
                qubits: 2,
                clbits: 1
            })
        ));
        assert_eq!(circuit.dag().num_ops(), 2);
    }

    #[test]
    fn test_parameterized_gates() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.rx(PI / 2.0, QubitId(0)).unwrap();
        circuit
            .ry(ParameterExpression::symbol("theta"), QubitId(0))
            .unwrap();
        circuit.cp(PI, QubitId(0), QubitId(1)).unwrap();

        assert_eq!(circuit.depth(), 3);
        let names: Vec<_> = circuit.instructions().map(|i| i.name()).collect();
        assert_eq!(names, ["rx", "ry", "cp"]);
    }

    #[test]
    fn test_gate_if() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .gate_if(StandardGate::H, [QubitId(1)], ClassicalCondition::new("c", 2))
            .unwrap();
        let inst = circuit.instructions().next().unwrap();
        assert_eq!(inst.condition().map(|c| c.value), Some(2));
    }

    #[test]
    fn test_unknown_qubit_leaves_circuit_untouched() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        assert!(matches!(
            circuit.x(QubitId(4)),
            Err(IrError::QubitNotFound { .. })
        ));
        assert_eq!(circuit.dag().num_ops(), 0);
    }

    #[test]
    fn test_barrier_all() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap().barrier_all().unwrap();
        circuit.x(QubitId(2)).unwrap();
        assert_eq!(circuit.depth(), 3);
    }
}
