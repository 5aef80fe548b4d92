//! Property-based tests for layered sampling.

use proptest::prelude::*;
use randqc_gen::{RandomCircuitConfig, generate};

proptest! {
    /// Every layer touches each qubit exactly once, so every qubit carries
    /// exactly `depth` operations before the final measurement.
    #[test]
    fn test_each_qubit_gets_depth_operations(
        num_qubits in 1_u32..=12,
        depth in 0_u32..=12,
        max_operands in 1_u32..=4,
        seed in any::<u64>(),
    ) {
        let config = RandomCircuitConfig::new(num_qubits, depth)
            .with_max_operands(max_operands)
            .with_reset(true)
            .with_seed(seed);
        let circuit = generate(&config).unwrap();

        let mut per_qubit = vec![0_u32; num_qubits as usize];
        for inst in circuit.instructions() {
            prop_assert!(inst.qubits.len() <= max_operands.min(num_qubits) as usize);
            for q in &inst.qubits {
                per_qubit[q.0 as usize] += 1;
            }
        }
        prop_assert!(per_qubit.iter().all(|&count| count == depth));
        prop_assert_eq!(circuit.depth(), depth as usize);
    }

    /// Measured circuits end with one measurement per qubit.
    #[test]
    fn test_measured_circuit_shape(
        num_qubits in 1_u32..=10,
        depth in 0_u32..=10,
        seed in any::<u64>(),
    ) {
        let config = RandomCircuitConfig::new(num_qubits, depth)
            .with_measure(true)
            .with_seed(seed);
        let circuit = generate(&config).unwrap();

        prop_assert_eq!(circuit.num_clbits(), num_qubits as usize);
        let measures = circuit.instructions().filter(|i| i.is_measure()).count();
        prop_assert_eq!(measures, num_qubits as usize);
        prop_assert_eq!(circuit.depth(), depth as usize + 1);
    }

    /// Conditional circuits stay structurally valid.
    #[test]
    fn test_conditional_circuit_integrity(
        num_qubits in 1_u32..=6,
        depth in 1_u32..=8,
        seed in any::<u64>(),
    ) {
        let config = RandomCircuitConfig::new(num_qubits, depth)
            .with_conditional(true)
            .with_reset(true)
            .with_measure(true)
            .with_seed(seed);
        let circuit = generate(&config).unwrap();
        prop_assert!(circuit.dag().verify_integrity().is_ok());
        for inst in circuit.instructions() {
            if let Some(condition) = inst.condition() {
                prop_assert!(condition.value < 1_u64 << num_qubits);
            }
        }
    }
}
