//! Wire-dependency graph of a circuit.
//!
//! Every qubit and classical bit is a wire that starts at an input node.
//! Applying an instruction appends an operation node and links it to the
//! current front of each wire it touches, so the graph only ever grows at
//! the fronts. Each operation records its layer (one more than the deepest
//! predecessor), which makes [`CircuitDag::depth`] a constant-time lookup.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A quantum or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireId {
    Qubit(QubitId),
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Start of a wire.
    Input(WireId),
    /// An applied instruction and the layer it landed in, counted from 1.
    Op {
        instruction: Instruction,
        layer: usize,
    },
}

impl DagNode {
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op { .. })
    }

    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op { instruction, .. } => Some(instruction),
            DagNode::Input(_) => None,
        }
    }

    /// Layer of an operation; input nodes sit at layer 0.
    #[inline]
    pub fn layer(&self) -> usize {
        match self {
            DagNode::Op { layer, .. } => *layer,
            DagNode::Input(_) => 0,
        }
    }
}

/// Edge weight: the wire that carries the dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DagEdge {
    pub wire: WireId,
}

#[derive(Debug, Clone, Copy)]
struct WireEnds {
    input: NodeIndex,
    front: NodeIndex,
}

/// Append-only DAG of a circuit's instructions.
///
/// Operation nodes are created in application order, so iterating node
/// indices yields a valid topological order. Serializers rely on that.
///
/// A conditional gate reads the whole classical register, so it is linked
/// onto every classical bit in addition to its qubits.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    wires: FxHashMap<WireId, WireEnds>,
    num_qubits: usize,
    num_clbits: usize,
    num_ops: usize,
    depth: usize,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit wire. Adding an existing qubit does nothing.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.add_wire(qubit.into()) {
            self.num_qubits += 1;
        }
    }

    /// Add a classical wire. Adding an existing bit does nothing.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.add_wire(clbit.into()) {
            self.num_clbits += 1;
        }
    }

    fn add_wire(&mut self, wire: WireId) -> bool {
        if self.wires.contains_key(&wire) {
            return false;
        }
        let input = self.graph.add_node(DagNode::Input(wire));
        self.wires.insert(wire, WireEnds { input, front: input });
        true
    }

    /// Append an instruction behind everything already on its wires.
    ///
    /// Nothing is added when the instruction is rejected.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        instruction.validate()?;
        let wires = self.wires_of(&instruction)?;

        let layer = 1 + wires
            .iter()
            .map(|&(_, front)| self.graph[front].layer())
            .max()
            .unwrap_or(0);
        let node = self.graph.add_node(DagNode::Op { instruction, layer });

        for (wire, front) in wires {
            self.graph.add_edge(front, node, DagEdge { wire });
            if let Some(ends) = self.wires.get_mut(&wire) {
                ends.front = node;
            }
        }
        self.num_ops += 1;
        self.depth = self.depth.max(layer);

        Ok(node)
    }

    /// Resolve the wires an instruction depends on, with their current fronts.
    fn wires_of(&self, instruction: &Instruction) -> IrResult<Vec<(WireId, NodeIndex)>> {
        let op = || instruction.name().to_string();
        let mut wires = Vec::with_capacity(instruction.qubits.len() + instruction.clbits.len());

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, op: op() });
            }
            let front = self
                .front(qubit.into())
                .ok_or_else(|| IrError::QubitNotFound { qubit, op: op() })?;
            wires.push((WireId::Qubit(qubit), front));
        }

        if instruction.condition().is_some() {
            if self.num_clbits == 0 {
                return Err(IrError::ConditionWithoutClbits { op: op() });
            }
            for clbit in self.clbits() {
                let front = self
                    .front(clbit.into())
                    .ok_or_else(|| IrError::ClbitNotFound { clbit, op: op() })?;
                wires.push((WireId::Clbit(clbit), front));
            }
            return Ok(wires);
        }

        let mut seen = FxHashSet::default();
        for &clbit in &instruction.clbits {
            let front = self
                .front(clbit.into())
                .ok_or_else(|| IrError::ClbitNotFound { clbit, op: op() })?;
            if seen.insert(clbit) {
                wires.push((WireId::Clbit(clbit), front));
            }
        }

        Ok(wires)
    }

    fn front(&self, wire: WireId) -> Option<NodeIndex> {
        self.wires.get(&wire).map(|ends| ends.front)
    }

    /// Operations in the order they were applied.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    /// Layer an operation node landed in.
    pub fn layer_of(&self, node: NodeIndex) -> Option<usize> {
        self.graph
            .node_weight(node)
            .filter(|n| n.is_op())
            .map(DagNode::layer)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    #[inline]
    pub fn num_ops(&self) -> usize {
        self.num_ops
    }

    /// Length of the longest dependency chain. Barriers count as a layer.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Qubits in index order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> {
        let mut qubits: Vec<_> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Qubit(q) => Some(*q),
                WireId::Clbit(_) => None,
            })
            .collect();
        qubits.sort_unstable();
        qubits.into_iter()
    }

    /// Classical bits in index order.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> {
        let mut clbits: Vec<_> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Clbit(c) => Some(*c),
                WireId::Qubit(_) => None,
            })
            .collect();
        clbits.sort_unstable();
        clbits.into_iter()
    }

    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Check that the graph is acyclic and that every wire is a single
    /// unforked chain from its input node to its front, with layers strictly
    /// increasing along the way.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for (&wire, ends) in &self.wires {
            let mut current = ends.input;
            loop {
                let mut outgoing = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .filter(|e| e.weight().wire == wire);
                let Some(edge) = outgoing.next() else {
                    break;
                };
                if outgoing.next().is_some() {
                    return Err(IrError::InvalidDag(format!(
                        "Wire {wire:?} forks at node {}",
                        current.index()
                    )));
                }
                let next = edge.target();
                if self.graph[next].layer() <= self.graph[current].layer() {
                    return Err(IrError::InvalidDag(format!(
                        "Layer does not increase along wire {wire:?} at node {}",
                        next.index()
                    )));
                }
                current = next;
            }
            if current != ends.front {
                return Err(IrError::InvalidDag(format!(
                    "Wire {wire:?} ends at node {} instead of its front",
                    current.index()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{ClassicalCondition, Gate, StandardGate};

    fn dag_with(qubits: u32, clbits: u32) -> CircuitDag {
        let mut dag = CircuitDag::new();
        for i in 0..qubits {
            dag.add_qubit(QubitId(i));
        }
        for i in 0..clbits {
            dag.add_clbit(ClbitId(i));
        }
        dag
    }

    fn h(q: u32) -> Instruction {
        Instruction::gate(StandardGate::H, [QubitId(q)])
    }

    fn cx(c: u32, t: u32) -> Instruction {
        Instruction::gate(StandardGate::CX, [QubitId(c), QubitId(t)])
    }

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_clbits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_adding_a_wire_twice_is_a_no_op() {
        let mut dag = dag_with(2, 1);
        dag.add_qubit(QubitId(1));
        dag.add_clbit(ClbitId(0));
        assert_eq!(dag.num_qubits(), 2);
        assert_eq!(dag.num_clbits(), 1);
        assert_eq!(dag.graph().node_count(), 3);
    }

    #[test]
    fn test_layers_follow_dependencies() {
        let mut dag = dag_with(3, 0);
        let a = dag.apply(h(0)).unwrap();
        let b = dag.apply(h(1)).unwrap();
        let c = dag.apply(cx(0, 1)).unwrap();
        let d = dag.apply(h(2)).unwrap();

        assert_eq!(dag.layer_of(a), Some(1));
        assert_eq!(dag.layer_of(b), Some(1));
        assert_eq!(dag.layer_of(c), Some(2));
        assert_eq!(dag.layer_of(d), Some(1));
        assert_eq!(dag.depth(), 2);
        assert_eq!(dag.num_ops(), 4);
    }

    #[test]
    fn test_ops_in_insertion_order() {
        let mut dag = dag_with(2, 0);
        dag.apply(Instruction::gate(StandardGate::X, [QubitId(1)]))
            .unwrap();
        dag.apply(h(0)).unwrap();
        dag.apply(Instruction::gate(StandardGate::CZ, [QubitId(1), QubitId(0)]))
            .unwrap();

        let names: Vec<_> = dag.topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["x", "h", "cz"]);
    }

    #[test]
    fn test_conditional_gate_waits_for_measurement() {
        let mut dag = dag_with(2, 1);
        dag.apply(Instruction::measure(QubitId(0), ClbitId(0)))
            .unwrap();
        let gate = Gate::standard(StandardGate::X).with_condition(ClassicalCondition::new("c", 1));
        let node = dag.apply(Instruction::gate(gate, [QubitId(1)])).unwrap();

        // The X on q[1] shares no qubit with the measurement but reads c.
        assert_eq!(dag.layer_of(node), Some(2));
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_condition_needs_clbits() {
        let mut dag = dag_with(1, 0);
        let gate = Gate::standard(StandardGate::X).with_condition(ClassicalCondition::new("c", 0));
        assert!(matches!(
            dag.apply(Instruction::gate(gate, [QubitId(0)])),
            Err(IrError::ConditionWithoutClbits { .. })
        ));
    }

    #[test]
    fn test_arity_checked_before_insertion() {
        let mut dag = dag_with(2, 0);
        let result = dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)]));
        assert!(matches!(result, Err(IrError::QubitCountMismatch { .. })));
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_unknown_wires_are_named() {
        let mut dag = dag_with(1, 1);

        match dag.apply(cx(0, 99)) {
            Err(IrError::QubitNotFound { qubit, op }) => {
                assert_eq!(qubit, QubitId(99));
                assert_eq!(op, "cx");
            }
            other => panic!("expected QubitNotFound, got {other:?}"),
        }

        let err = dag
            .apply(Instruction::measure(QubitId(0), ClbitId(5)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Classical bit c[5] is not part of the circuit (in 'measure')"
        );
        assert_eq!(dag.graph().node_count(), 2);
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut dag = dag_with(1, 0);
        let inst = Instruction::gate(StandardGate::CZ, [QubitId(0), QubitId(0)]);
        assert!(matches!(
            dag.apply(inst),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_barrier_spans_a_layer() {
        let mut dag = dag_with(3, 0);
        dag.apply(h(0)).unwrap();
        dag.apply(Instruction::barrier((0..3).map(QubitId))).unwrap();
        let after = dag.apply(h(2)).unwrap();
        assert_eq!(dag.layer_of(after), Some(3));
    }

    #[test]
    fn test_verify_integrity_multi_qubit_circuit() {
        let mut dag = dag_with(3, 3);
        dag.apply(h(0)).unwrap();
        dag.apply(cx(0, 1)).unwrap();
        dag.apply(cx(1, 2)).unwrap();
        for i in 0..3 {
            dag.apply(Instruction::measure(QubitId(i), ClbitId(i)))
                .unwrap();
        }

        dag.verify_integrity().unwrap();
        assert_eq!(dag.depth(), 4);
        assert_eq!(dag.qubits().collect::<Vec<_>>(), (0..3).map(QubitId).collect::<Vec<_>>());
        assert_eq!(dag.clbits().count(), 3);
    }
}
