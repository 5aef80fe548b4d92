//! Property-based tests for QASM3 roundtrip conversion.
//!
//! Tests that circuit → QASM3 → circuit preserves circuit structure for
//! everything the random generator can produce.

use proptest::prelude::*;
use randqc_gen::{RandomCircuitConfig, generate};
use randqc_ir::{Circuit, Instruction};
use randqc_qasm3::{emit, parse};

/// Random generator configurations, with every optional feature in play.
fn arb_config() -> impl Strategy<Value = RandomCircuitConfig> {
    (
        1_u32..=6,
        0_u32..=8,
        1_u32..=4,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<u64>(),
    )
        .prop_map(|(n, depth, max_operands, measure, conditional, reset, seed)| {
            RandomCircuitConfig::new(n, depth)
                .with_max_operands(max_operands)
                .with_measure(measure)
                .with_conditional(conditional)
                .with_reset(reset)
                .with_seed(seed)
        })
}

fn same_instruction(a: &Instruction, b: &Instruction) -> bool {
    if a.name() != b.name() || a.qubits != b.qubits || a.clbits != b.clbits {
        return false;
    }
    if a.condition() != b.condition() {
        return false;
    }
    match (a.as_gate(), b.as_gate()) {
        (Some(ga), Some(gb)) => {
            let pa = ga.kind.parameters();
            let pb = gb.kind.parameters();
            pa.len() == pb.len()
                && pa.iter().zip(&pb).all(|(x, y)| match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => (x - y).abs() < 1e-9,
                    _ => false,
                })
        }
        (None, None) => true,
        _ => false,
    }
}

fn assert_same_structure(original: &Circuit, parsed: &Circuit) -> Result<(), TestCaseError> {
    prop_assert_eq!(parsed.num_qubits(), original.num_qubits(), "qubit count");
    prop_assert_eq!(parsed.num_clbits(), original.num_clbits(), "clbit count");
    prop_assert_eq!(parsed.dag().num_ops(), original.dag().num_ops(), "op count");
    prop_assert_eq!(parsed.depth(), original.depth(), "depth");
    for (a, b) in original.instructions().zip(parsed.instructions()) {
        prop_assert!(same_instruction(a, b), "{:?} != {:?}", a, b);
    }
    Ok(())
}

proptest! {
    /// Generated circuit → QASM3 → circuit preserves qubit, clbit and
    /// operation counts, depth, and every instruction.
    #[test]
    fn test_generated_circuit_roundtrip(config in arb_config()) {
        let circuit = generate(&config).unwrap();

        let qasm = emit(&circuit).unwrap();
        let parsed = parse(&qasm).unwrap();

        assert_same_structure(&circuit, &parsed)?;
    }

    /// Emitting a parsed file reproduces it exactly.
    #[test]
    fn test_emit_is_a_fixed_point(config in arb_config()) {
        let circuit = generate(&config).unwrap();

        let first = emit(&circuit).unwrap();
        let second = emit(&parse(&first).unwrap()).unwrap();

        prop_assert_eq!(first, second);
    }

    /// The same seed produces the same file.
    #[test]
    fn test_seeded_emission_is_deterministic(config in arb_config()) {
        let a = emit(&generate(&config).unwrap()).unwrap();
        let b = emit(&generate(&config).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_empty_circuit_roundtrip() {
    let circuit = Circuit::with_size("empty", 0, 0);
    let qasm = emit(&circuit).unwrap();
    assert_eq!(qasm, "OPENQASM 3.0;\ninclude \"stdgates.inc\";\n\n");

    let parsed = parse(&qasm).unwrap();
    assert_eq!(parsed.num_qubits(), 0);
    assert_eq!(parsed.dag().num_ops(), 0);
}

#[test]
fn test_measurement_only_circuit() {
    let config = RandomCircuitConfig::new(3, 0).with_measure(true).with_seed(7);
    let circuit = generate(&config).unwrap();
    let qasm = emit(&circuit).unwrap();

    assert!(qasm.contains("qubit[3] q;\nbit[3] c;\n"));
    let parsed = parse(&qasm).unwrap();
    assert_eq!(parsed.instructions().filter(|i| i.is_measure()).count(), 3);
}

#[test]
fn test_conditional_circuit_reads_back() {
    // Search a few seeds for a circuit that actually contains a conditional.
    let circuit = (0..200)
        .map(|seed| {
            RandomCircuitConfig::new(3, 10)
                .with_conditional(true)
                .with_seed(seed)
        })
        .map(|config| generate(&config).unwrap())
        .find(|c| c.instructions().any(|i| i.condition().is_some()))
        .expect("no conditional in 200 seeds");

    let qasm = emit(&circuit).unwrap();
    assert!(qasm.contains("if (c == "));

    let parsed = parse(&qasm).unwrap();
    assert_eq!(
        parsed
            .instructions()
            .filter(|i| i.condition().is_some())
            .count(),
        circuit
            .instructions()
            .filter(|i| i.condition().is_some())
            .count()
    );
}
